//! Command Handlers 实现

mod therapy_handlers;

pub use therapy_handlers::*;
