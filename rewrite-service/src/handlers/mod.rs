//! HTTP handlers for the rewrite service.

pub mod generate;
pub mod health;
