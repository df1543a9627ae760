pub mod difficulty;
pub mod loaders;
pub mod question;

pub use difficulty::Difficulty;
pub use loaders::{load_generation_request, load_toml_to_request};
pub use question::{CorrectAnswer, GenerationRequest, InternalQuestion, PublicQuestion};
