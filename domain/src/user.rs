use crate::error::Error;
use crate::roles::Role;
use crate::users::Model;
use crate::Id;
use entity_api::user;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

pub use entity_api::user::{
    find_by, find_by_email, find_by_id, AuthSession, Backend, Credentials, UserFilter,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// What a prospective client supplies to open an account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
}

/// Opens a client account. Emails are unique regardless of case.
pub async fn signup(db: &DatabaseConnection, new_user: NewUser) -> Result<Model, Error> {
    let email = new_user.email.trim().to_lowercase();
    let first_name = new_user.first_name.trim().to_string();
    let last_name = new_user.last_name.trim().to_string();

    if first_name.is_empty() || last_name.is_empty() {
        return Err(Error::invalid("First and last name are required"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(Error::invalid("A valid email address is required")),
    }
    if new_user.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::invalid("Password must be at least 8 characters"));
    }

    if user::find_by_email(db, &email).await?.is_some() {
        warn!("Signup rejected, email already in use");
        return Err(Error::conflict("Email already in use"));
    }

    let now = chrono::Utc::now();
    let created = user::create(
        db,
        Model {
            id: Id::nil(),
            email,
            first_name,
            last_name,
            display_name: new_user
                .display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            password: new_user.password,
            role: Role::Client,
            enabled: true,
            created_at: now.into(),
            updated_at: now.into(),
        },
        Role::Client,
    )
    .await?;

    info!("User {} signed up", created.id);
    Ok(created)
}

/// Enables a disabled account or disables an enabled one. Admins cannot
/// lock themselves out this way.
pub async fn toggle_enabled(
    db: &DatabaseConnection,
    acting_user_id: Id,
    id: Id,
) -> Result<Model, Error> {
    if acting_user_id == id {
        warn!("User {id} tried to toggle their own account");
        return Err(Error::invalid("Cannot toggle your own account"));
    }

    let toggled = user::toggle_enabled(db, id).await?;
    info!("User {} is now enabled={}", toggled.id, toggled.enabled);
    Ok(toggled)
}
