//! Session module
//!
//! Holds the pre-established browser session used to authorize every
//! request: the account id (`ds_user_id`) and the anti-forgery token
//! (`csrftoken`), optionally with the full cookie header.
//!
//! Acquiring the session is out of scope; it is parsed from a cookie
//! header string supplied by the caller.

mod session;

pub use session::{Session, COOKIE_ENV_VAR};

#[cfg(test)]
mod tests;
