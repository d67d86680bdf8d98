//! Domain Layer - 领域层
//!
//! Therapy Context: 回复的值对象、提示词与拆分规则

pub mod therapy;
