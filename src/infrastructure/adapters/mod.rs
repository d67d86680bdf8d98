//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod gif;
pub mod llm;
pub mod stt;
pub mod tts;

pub use gif::*;
pub use llm::*;
pub use stt::*;
pub use tts::*;
