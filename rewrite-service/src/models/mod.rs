//! Domain models for the rewrite service.

pub mod rewrite;

pub use rewrite::{RewriteRequest, RewriteResponse};
