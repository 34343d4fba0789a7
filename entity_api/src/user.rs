use super::error::{EntityApiErrorKind, Error};
use async_trait::async_trait;
use axum_login::{AuthnBackend, UserId};
use chrono::Utc;

use entity::users::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    entity::prelude::*, Condition, ConnectionTrait, DatabaseConnection, IntoActiveModel,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

pub use entity::users::Role;

pub async fn create(db: &impl ConnectionTrait, user_model: Model, role: Role) -> Result<Model, Error> {
    debug!("New User Model to be inserted: {:?}", user_model.email);

    let now = Utc::now();
    let user_active_model: ActiveModel = ActiveModel {
        email: Set(user_model.email.to_lowercase()),
        first_name: Set(user_model.first_name),
        last_name: Set(user_model.last_name),
        display_name: Set(user_model.display_name),
        password: Set(generate_hash(user_model.password)),
        role: Set(role),
        enabled: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(user_active_model.insert(db).await?)
}

pub async fn find_by_email(db: &impl ConnectionTrait, email: &str) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email.to_lowercase()))
        .one(db)
        .await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(Error::not_found)
}

/// Narrows the user listing. Unset fields match every user.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub enabled: Option<bool>,
    /// Case-insensitive substring of the email, first name or last name
    pub search: Option<String>,
}

/// Users matching `filter`, newest accounts first.
pub async fn find_by(db: &impl ConnectionTrait, filter: UserFilter) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find();

    if let Some(role) = filter.role {
        query = query.filter(Column::Role.eq(role));
    }
    if let Some(enabled) = filter.enabled {
        query = query.filter(Column::Enabled.eq(enabled));
    }
    if let Some(search) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty())
    {
        let pattern = format!("%{}%", search.to_lowercase());
        query = query.filter(
            [Column::Email, Column::FirstName, Column::LastName]
                .into_iter()
                .fold(Condition::any(), |condition, column| {
                    condition.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern.clone()))
                }),
        );
    }

    Ok(query.order_by_desc(Column::CreatedAt).all(db).await?)
}

/// Flips whether the user may log in.
pub async fn toggle_enabled(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let user = find_by_id(db, id).await?;
    let enabled = !user.enabled;
    debug!("Setting enabled={enabled} on User {}", user.id);

    let mut active_model = user.into_active_model();
    active_model.enabled = Set(enabled);
    active_model.updated_at = Set(Utc::now().into());

    Ok(active_model.update(db).await?)
}

pub fn generate_hash(password: String) -> String {
    password_auth::generate_hash(password)
}

// Disabled accounts are rejected exactly like a bad password so that the
// response does not reveal which accounts exist.
fn authenticate_user(creds: Credentials, user: Model) -> Result<Option<Model>, Error> {
    if !user.enabled {
        warn!("Login attempt for disabled user {}", user.id);
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        });
    }

    match password_auth::verify_password(creds.password, &user.password) {
        Ok(_) => Ok(Some(user)),
        Err(_) => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Backend {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, ToSchema, IntoParams, Deserialize)]
#[schema(as = domain::user::Credentials)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

impl Backend {
    pub fn new(db: &Arc<DatabaseConnection>) -> Self {
        Self { db: Arc::clone(db) }
    }
}

#[async_trait]
impl AuthnBackend for Backend {
    type User = Model;
    type Credentials = Credentials;
    type Error = Error;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        match find_by_email(self.db.as_ref(), &creds.email).await? {
            Some(user) => authenticate_user(creds, user),
            None => Err(Error {
                source: None,
                error_kind: EntityApiErrorKind::RecordUnauthenticated,
            }),
        }
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        Ok(Entity::find_by_id(*user_id)
            .filter(Column::Enabled.eq(true))
            .one(self.db.as_ref())
            .await?)
    }
}

pub type AuthSession = axum_login::AuthSession<Backend>;
