//! Object Storage Module
//!
//! Stores and retrieves the raw bytes of uploaded files.
//!
//! ## Core Concepts
//! - **Contract**: `ObjectStore` is what the service depends on. `fetch` separates a
//!   missing object (`Ok(None)`) from a transport failure (`Err`).
//! - **Backends**: `BlobStore` adapts any `object_store` implementation. Memory and
//!   local filesystem backends keep each container under its own path prefix, the
//!   S3 backend maps the container onto the bucket itself.
//! - **Streaming**: content is handed out as a stream of byte chunks so the line
//!   tokenizer can consume it in a single pass.

pub mod backend;
pub mod blob;
pub mod types;
