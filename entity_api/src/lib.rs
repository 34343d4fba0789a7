use chrono::Utc;
use log::*;
use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, Value};
use std::collections::HashMap;

pub use entity::{
    ai_answers, ai_questions, answers, project_reports, project_status, project_types, projects,
    question_format, questions, roles, users, Id,
};

pub mod ai_answer;
pub mod ai_question;
pub mod answer;
pub mod error;
pub mod project;
pub mod project_report;
pub mod project_type;
pub mod query;
pub mod question;
pub mod user;

pub(crate) fn uuid_parse_str(uuid_str: &str) -> Result<Id, error::Error> {
    Id::parse_str(uuid_str).map_err(|_| error::Error {
        source: None,
        error_kind: error::EntityApiErrorKind::InvalidQueryTerm,
    })
}

/// `QueryFilterMap` carries column-name keyed filter values from request
/// parameters down to [`query::find_by`].
///
/// # Example
///
/// ```
/// use sea_orm::Value;
/// use entity_api::QueryFilterMap;
///
/// let mut query_filter_map = QueryFilterMap::new();
/// query_filter_map.insert("project_id".to_string(), Some(Value::String(Some(Box::new("a_project_id".to_string())))));
/// let filter_value = query_filter_map.get("project_id");
/// ```
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }

    /// Inserts a string-encoded id, rejecting anything that is not a UUID.
    pub fn insert_id(&mut self, key: &str, id_str: &str) -> Result<(), error::Error> {
        let id = uuid_parse_str(id_str)?;
        self.insert(key.to_string(), Some(Value::from(id)));
        Ok(())
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts request parameters into a [`QueryFilterMap`].
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

const SEED_QUESTIONS: [(&str, &str); 5] = [
    (
        "What problem should this application solve?",
        "Describe the business need in a few sentences.",
    ),
    (
        "Who will use it?",
        "List the kinds of users and roughly how many of each.",
    ),
    (
        "What are the must-have features for the first release?",
        "",
    ),
    (
        "Are there existing systems it must integrate with?",
        "Payment providers, CRMs, internal APIs...",
    ),
    (
        "Do you have any design, hosting or compliance constraints?",
        "",
    ),
];

/// Inserts an admin, a client and one project type with a five question,
/// successor-linked catalog. Accounts that already exist are left alone; the
/// whole seed is skipped once the demo client exists.
pub async fn seed_database(db: &DatabaseConnection) -> Result<(), error::Error> {
    if user::find_by_email(db, "client@intake.local").await?.is_some() {
        info!("Database already seeded, skipping");
        return Ok(());
    }

    let now = Utc::now();

    // The initial-admin migration normally creates this account already.
    if user::find_by_email(db, "admin@intake.local").await?.is_none() {
        users::ActiveModel {
            email: Set("admin@intake.local".to_owned()),
            first_name: Set("Admin".to_owned()),
            last_name: Set("User".to_owned()),
            display_name: Set(Some("Admin".to_owned())),
            password: Set(generate_hash("password")),
            role: Set(roles::Role::Admin),
            enabled: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    users::ActiveModel {
        email: Set("client@intake.local".to_owned()),
        first_name: Set("Casey".to_owned()),
        last_name: Set("Client".to_owned()),
        display_name: Set(None),
        password: Set(generate_hash("password")),
        role: Set(roles::Role::Client),
        enabled: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let web_app = project_types::ActiveModel {
        name: Set("Web Application".to_owned()),
        description: Set(Some(
            "Browser-based software with a backend and a database".to_owned(),
        )),
        icon: Set("🌐".to_owned()),
        enabled: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // Ids are assigned up front so each row can reference its successor in
    // the same statement.
    let ids: Vec<Id> = SEED_QUESTIONS.iter().map(|_| Id::new_v4()).collect();
    let catalog = SEED_QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, (text, description))| questions::ActiveModel {
            id: Set(ids[index]),
            project_type_id: Set(web_app.id),
            question_no: Set(index as i32 + 1),
            text: Set(text.to_string()),
            description: Set(Some(description.to_string()).filter(|d| !d.is_empty())),
            question_format: Set(question_format::QuestionFormat::Text),
            next_question_id: Set(ids.get(index + 1).copied()),
            enabled: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        });

    questions::Entity::insert_many(catalog)
        .exec_without_returning(db)
        .await?;

    info!(
        "Seeded admin and client users, Project Type {} and {} questions",
        web_app.id,
        ids.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_parse_str_parses_valid_uuid() {
        let uuid_str = "a98c3295-0933-44cb-89db-7db0f7250fb1";
        let uuid = uuid_parse_str(uuid_str).unwrap();
        assert_eq!(uuid.to_string(), uuid_str);
    }

    #[test]
    fn insert_id_rejects_malformed_ids() {
        let mut query_filter_map = QueryFilterMap::new();
        let result = query_filter_map.insert_id("project_id", "not-a-uuid");
        assert_eq!(
            result.unwrap_err().error_kind,
            error::EntityApiErrorKind::InvalidQueryTerm
        );
        assert!(query_filter_map.get("project_id").is_none());
    }

    #[test]
    fn seed_catalog_has_five_questions() {
        assert_eq!(SEED_QUESTIONS.len(), 5);
        assert!(SEED_QUESTIONS.iter().all(|(text, _)| text.ends_with('?')));
    }
}
