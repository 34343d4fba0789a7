use domain::question::{NewQuestion, QuestionChanges};
use domain::question_format::QuestionFormat;
use domain::Id;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateParams {
    #[schema(value_type = Uuid)]
    pub(crate) project_type_id: Id,
    /// Position in the catalog; appended at the end when omitted
    pub(crate) question_no: Option<i32>,
    pub(crate) text: String,
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) question_format: QuestionFormat,
    #[schema(value_type = Option<Uuid>)]
    pub(crate) next_question_id: Option<Id>,
}

impl From<CreateParams> for NewQuestion {
    fn from(params: CreateParams) -> Self {
        NewQuestion {
            project_type_id: params.project_type_id,
            question_no: params.question_no,
            text: params.text,
            description: params.description,
            question_format: params.question_format,
            next_question_id: params.next_question_id,
        }
    }
}

/// Fields left out of the body are not changed. An explicit `null` clears
/// `description` or `next_question_id`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct UpdateParams {
    pub(crate) text: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub(crate) description: Option<Option<String>>,
    pub(crate) question_format: Option<QuestionFormat>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Uuid>)]
    pub(crate) next_question_id: Option<Option<Id>>,
}

// Distinguishes a `null` field from a missing one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateParams> for QuestionChanges {
    fn from(params: UpdateParams) -> Self {
        QuestionChanges {
            text: params.text,
            description: params.description,
            question_format: params.question_format,
            next_question_id: params.next_question_id,
        }
    }
}

/// Every question of the catalog, in the order they should be asked.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ReorderParams {
    #[schema(value_type = Vec<Uuid>)]
    pub(crate) question_ids: Vec<Id>,
}
