pub(crate) mod ai_question_controller;
pub(crate) mod answer_controller;
pub(crate) mod next_question_controller;
pub(crate) mod report_controller;
