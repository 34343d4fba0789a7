use password_auth::generate_hash;
use sea_orm_migration::sea_orm::{DbBackend, Statement, Value};
use sea_orm_migration::prelude::*;

const ADMIN_EMAIL: &str = "admin@intake.local";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Raw SQL so that later changes to the users entity cannot break this migration.
        db.execute(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                INSERT INTO intake_platform.users (
                    email, first_name, last_name, display_name, password, role, enabled, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, 'admin', TRUE, now(), now())
                ON CONFLICT (email) DO NOTHING
            "#,
            vec![
                Value::String(Some(Box::new(ADMIN_EMAIL.to_owned()))),
                Value::String(Some(Box::new("Admin".to_owned()))),
                Value::String(Some(Box::new("User".to_owned()))),
                Value::String(Some(Box::new("Admin".to_owned()))),
                Value::String(Some(Box::new(generate_hash("password")))),
            ],
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "DELETE FROM intake_platform.users WHERE email = $1",
                vec![Value::String(Some(Box::new(ADMIN_EMAIL.to_owned())))],
            ))
            .await?;

        Ok(())
    }
}
