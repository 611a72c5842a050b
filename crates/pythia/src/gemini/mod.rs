pub mod backend;
pub mod config;
pub mod types;

pub use backend::{GenerativeBackend, HttpBackend};
pub use config::{Credentials, GeminiConfig};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
