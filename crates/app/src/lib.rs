//! Backstage control-plane: scoped token issuance, the caller allow-list gate
//! and per-repository build configuration storage.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod errors;
pub mod gate;

mod ids;

#[cfg(test)]
mod test;

pub use errors::ErrorKind;
pub use ids::TypedId;
