//! Users

pub mod records;
mod repository;

pub use repository::*;
