pub mod json_loader;
pub mod toml_loader;

pub use json_loader::{load_answers, load_quiz, save_quiz};
pub use toml_loader::{load_generation_request, load_toml_to_request};
