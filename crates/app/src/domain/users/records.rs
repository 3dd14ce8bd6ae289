//! User Records

use std::fmt;

/// User as stored by the external system.
#[derive(Clone)]
pub struct UserRecord {
    /// Login name, the subject of session tokens.
    pub login: String,

    /// Per-user signing secret.
    pub hash: String,

    /// Externally issued git credential.
    pub token: String,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("login", &self.login)
            .field("hash", &"**redacted**")
            .field("token", &"**redacted**")
            .finish()
    }
}
