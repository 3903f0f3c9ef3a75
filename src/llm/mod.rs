// LLM module

pub mod client;

pub use client::{OllamaClient, OllamaError};
