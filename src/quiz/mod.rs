//! Quiz content and response construction

pub mod builder;
pub mod model;
pub mod store;

pub use builder::{absolutize, build_quiz};
pub use model::{Question, Quiz};
