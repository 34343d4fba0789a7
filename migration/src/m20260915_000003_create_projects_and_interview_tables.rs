use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "CREATE TYPE intake_platform.project_status AS ENUM (
                'proposed',
                'called',
                'converted',
                'trash'
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TYPE intake_platform.project_status OWNER TO intake")
            .await?;

        db.execute_unprepared(
            "CREATE TABLE intake_platform.projects (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL,
                description TEXT,
                user_id UUID NOT NULL REFERENCES intake_platform.users(id) ON DELETE CASCADE,
                project_type_id UUID NOT NULL REFERENCES intake_platform.project_types(id) ON DELETE RESTRICT,
                status intake_platform.project_status NOT NULL DEFAULT 'proposed',
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.projects OWNER TO intake")
            .await?;
        db.execute_unprepared(
            "CREATE INDEX projects_user_id_created_at_idx ON intake_platform.projects (user_id, created_at DESC)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE intake_platform.answers (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                project_id UUID NOT NULL REFERENCES intake_platform.projects(id) ON DELETE CASCADE,
                question_id UUID NOT NULL REFERENCES intake_platform.questions(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES intake_platform.users(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.answers OWNER TO intake")
            .await?;
        db.execute_unprepared(
            "CREATE INDEX answers_project_id_idx ON intake_platform.answers (project_id, created_at)",
        )
        .await?;

        // A project gets at most one synthesis batch; the unique ordinal is
        // what makes a second concurrent batch insert fail.
        db.execute_unprepared(
            "CREATE TABLE intake_platform.ai_questions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                project_id UUID NOT NULL REFERENCES intake_platform.projects(id) ON DELETE CASCADE,
                question_no INTEGER NOT NULL,
                text TEXT NOT NULL,
                description TEXT,
                next_question_id UUID REFERENCES intake_platform.ai_questions(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT ai_questions_project_question_no_unique UNIQUE (project_id, question_no)
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.ai_questions OWNER TO intake")
            .await?;

        db.execute_unprepared(
            "CREATE TABLE intake_platform.ai_answers (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                ai_question_id UUID NOT NULL REFERENCES intake_platform.ai_questions(id) ON DELETE CASCADE,
                user_id UUID NOT NULL REFERENCES intake_platform.users(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.ai_answers OWNER TO intake")
            .await?;
        db.execute_unprepared(
            "CREATE INDEX ai_answers_ai_question_id_idx ON intake_platform.ai_answers (ai_question_id)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE TABLE intake_platform.project_reports (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                project_id UUID NOT NULL REFERENCES intake_platform.projects(id) ON DELETE CASCADE,
                report TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                CONSTRAINT project_reports_project_id_unique UNIQUE (project_id)
            )",
        )
        .await?;
        db.execute_unprepared("ALTER TABLE intake_platform.project_reports OWNER TO intake")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for table in [
            "project_reports",
            "ai_answers",
            "ai_questions",
            "answers",
            "projects",
        ] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS intake_platform.{table}"))
                .await?;
        }
        db.execute_unprepared("DROP TYPE IF EXISTS intake_platform.project_status")
            .await?;

        Ok(())
    }
}
