//! Session-facing model types.

pub mod session;

pub use session::{Notice, NoticeLevel, session_keys};
