pub use sea_orm_migration::prelude::*;

mod m20260915_000001_create_schema_and_base_db_setup;
mod m20260915_000002_create_users_and_question_catalog;
mod m20260915_000003_create_projects_and_interview_tables;
mod m20260915_000004_add_initial_admin_user;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260915_000001_create_schema_and_base_db_setup::Migration),
            Box::new(m20260915_000002_create_users_and_question_catalog::Migration),
            Box::new(m20260915_000003_create_projects_and_interview_tables::Migration),
            Box::new(m20260915_000004_add_initial_admin_user::Migration),
        ]
    }
}
