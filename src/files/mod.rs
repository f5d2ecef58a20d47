//! File Service Module
//!
//! The HTTP-facing side of the crate. Handlers are thin: they extract the
//! request pieces and hand them to `FileService`, which owns the
//! request-scoped flow.
//!
//! ## Workflow
//! 1. **Resolve**: pick the most recent record or a uniformly random one.
//! 2. **Fetch**: open the object's byte stream. A record without an object is
//!    reported as not found and logged as a store inconsistency.
//! 3. **Tokenize**: decode the stream into lines.
//! 4. **Analyze**: sample, reverse, rank or count letters.
//! 5. **Shape**: build the response body, negotiated where the endpoint asks for it.

pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
