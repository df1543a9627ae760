pub mod llm_service;
pub mod option_shuffler;
pub mod question_backend;
pub mod scoring;

pub use llm_service::LlmService;
pub use option_shuffler::{shape_question, MalformedItem, MalformedReason};
pub use question_backend::{BatchRequest, QuestionBackend};
pub use scoring::{grade, QuizResult};
