//! 应用层 - 命令
//!
//! 每个请求对应一条命令，处理器之间不共享可变状态

mod therapy_commands;

pub mod handlers;

pub use therapy_commands::*;
