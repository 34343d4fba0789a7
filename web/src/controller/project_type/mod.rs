pub(crate) mod question_controller;
