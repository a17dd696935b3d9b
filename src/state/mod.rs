//! Session state for one folder-annotation pass:
//! - Image list scanning and ordering
//! - The cursor and navigation rules
//! - The filename-keyed annotation map

mod session;
mod types;

pub use session::*;
pub use types::*;
