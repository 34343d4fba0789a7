use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("CREATE SCHEMA IF NOT EXISTS intake_platform;")
            .await?;
        db.execute_unprepared("SET search_path TO intake_platform, public;")
            .await?;

        // The application connects as `intake` and needs full rights on
        // everything created inside the schema from here on.
        db.execute_unprepared(
            r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE intake TO intake;
                    GRANT ALL ON SCHEMA intake_platform TO intake;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA intake_platform GRANT ALL ON TABLES TO intake;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA intake_platform GRANT ALL ON SEQUENCES TO intake;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA intake_platform GRANT ALL ON FUNCTIONS TO intake;
                END $$;
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA intake_platform REVOKE ALL ON FUNCTIONS FROM intake;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA intake_platform REVOKE ALL ON SEQUENCES FROM intake;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA intake_platform REVOKE ALL ON TABLES FROM intake;
                    REVOKE ALL ON SCHEMA intake_platform FROM intake;
                    REVOKE ALL PRIVILEGES ON DATABASE intake FROM intake;
                END $$;
            "#,
        )
        .await?;

        db.execute_unprepared("DROP SCHEMA IF EXISTS intake_platform CASCADE;")
            .await?;

        Ok(())
    }
}
