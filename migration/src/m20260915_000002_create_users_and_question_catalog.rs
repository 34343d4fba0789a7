use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("CREATE TYPE intake_platform.role AS ENUM ('client', 'admin')")
            .await?;
        db.execute_unprepared("ALTER TYPE intake_platform.role OWNER TO intake")
            .await?;

        db.execute_unprepared(
            "CREATE TYPE intake_platform.question_format AS ENUM ('text', 'mcq', 'mic')",
        )
        .await?;
        db.execute_unprepared("ALTER TYPE intake_platform.question_format OWNER TO intake")
            .await?;

        db.execute_unprepared(
            "CREATE TABLE intake_platform.users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email VARCHAR(255) NOT NULL,
                first_name VARCHAR(255) NOT NULL,
                last_name VARCHAR(255) NOT NULL,
                display_name VARCHAR(255),
                password VARCHAR(255) NOT NULL,
                role intake_platform.role NOT NULL DEFAULT 'client',
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT users_email_unique UNIQUE (email)
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.users OWNER TO intake")
            .await?;

        db.execute_unprepared(
            "CREATE TABLE intake_platform.project_types (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL,
                description TEXT,
                icon VARCHAR(16) NOT NULL DEFAULT '📁',
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT project_types_name_unique UNIQUE (name)
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.project_types OWNER TO intake")
            .await?;

        // next_question_id is the statically configured successor; deleting a
        // question breaks the chain there instead of deleting its predecessor.
        db.execute_unprepared(
            "CREATE TABLE intake_platform.questions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                project_type_id UUID NOT NULL REFERENCES intake_platform.project_types(id) ON DELETE CASCADE,
                question_no INTEGER NOT NULL,
                text TEXT NOT NULL,
                description TEXT,
                question_format intake_platform.question_format NOT NULL DEFAULT 'text',
                next_question_id UUID REFERENCES intake_platform.questions(id) ON DELETE SET NULL,
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT questions_project_type_question_no_unique UNIQUE (project_type_id, question_no)
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.questions OWNER TO intake")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP TABLE IF EXISTS intake_platform.questions")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS intake_platform.project_types")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS intake_platform.users")
            .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS intake_platform.question_format")
            .await?;
        db.execute_unprepared("DROP TYPE IF EXISTS intake_platform.role")
            .await?;

        Ok(())
    }
}
