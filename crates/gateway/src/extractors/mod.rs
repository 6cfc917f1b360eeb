//! Request extractors.

mod session;
mod validated_json;

pub use session::{set_session_cookie, Session};
pub use validated_json::{validate, ValidatedJson};
