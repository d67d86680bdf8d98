//! LLM Adapter - 聊天补全客户端实现

mod fake_text_generator;
mod groq_client;

pub use fake_text_generator::FakeTextGenerator;
pub use groq_client::*;
