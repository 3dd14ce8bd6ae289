//! Token issuance and verification

pub mod clock;
mod errors;
mod resolver;
mod secret;
mod service;
mod token;

pub use clock::{Clock, SystemClock};
pub use errors::*;
pub use resolver::*;
pub use secret::SubjectSecret;
pub use service::*;
pub use token::*;
