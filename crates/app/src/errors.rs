//! Error taxonomy shared by the control-plane services.

/// Coarse error classes the transport layer maps onto responses.
///
/// An unknown subject, an unknown repository, a missing config and a refused
/// caller all report [`ErrorKind::NotFound`] so the surface never confirms
/// that something exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    InvalidToken,
    Conflict,
    Internal,
}
