//! Subject signing secrets.

use std::fmt;

use zeroize::Zeroize;

/// Signing secret of a subject, as currently stored.
#[derive(Clone, PartialEq, Eq)]
pub struct SubjectSecret {
    bytes: Vec<u8>,
}

impl SubjectSecret {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<String> for SubjectSecret {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl fmt::Debug for SubjectSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubjectSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SubjectSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
