//! Completion oracle adapters

mod openai;

pub use openai::OpenAiOracle;
