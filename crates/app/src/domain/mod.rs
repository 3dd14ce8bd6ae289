//! Backstage Domain Concerns

pub mod configs;
pub mod repos;
pub mod users;
