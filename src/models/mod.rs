// Data models

pub mod message;

pub use message::{ChatExchange, GenerateRequest, GetMessagesQuery};
