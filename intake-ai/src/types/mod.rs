pub mod completion;
pub mod interview;
