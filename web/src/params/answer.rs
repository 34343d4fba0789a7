use domain::intake::{AnswerSubmission, QuestionType};
use domain::Id;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Only answers given to this catalog question
    #[param(value_type = Option<Uuid>)]
    pub(crate) question_id: Option<Id>,
}

/// The client's answer to the question they were shown.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateParams {
    #[schema(value_type = Uuid)]
    pub(crate) question_id: Id,
    #[schema(value_type = String, example = "predefined")]
    pub(crate) question_type: QuestionType,
    pub(crate) text: String,
}

impl From<CreateParams> for AnswerSubmission {
    fn from(params: CreateParams) -> Self {
        AnswerSubmission {
            question_id: params.question_id,
            question_type: params.question_type,
            text: params.text,
        }
    }
}
