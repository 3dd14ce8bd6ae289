//! Token handlers

pub(crate) mod verify;
