//! HTTP Handlers

mod ping;
mod roast;
mod transcribe;

pub use ping::*;
pub use roast::*;
pub use transcribe::*;
