//! Storefront domain, persistence, and checkout workflow.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
