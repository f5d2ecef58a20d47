//! Text Sampling Service Library
//!
//! Clients upload text files; the service keeps the bytes in an object store,
//! records each upload, and answers questions about file contents: a random
//! line, the same line reversed, the longest lines, and the most frequent
//! letter of a sampled line.
//!
//! ## Architecture Modules
//!
//! - **`analysis`**: The pure core. Line tokenization, uniform line sampling,
//!   longest-line ranking and letter frequency.
//! - **`negotiation`**: Maps the `Accept` header onto the payload shapes of the
//!   random-line endpoint.
//! - **`metadata`**: Upload records, the gateway contract, and the uniform record
//!   sampler that picks a random file without scanning all of them.
//! - **`storage`**: The object store contract and its `object_store` backed
//!   implementation (memory, local filesystem, S3).
//! - **`files`**: Request orchestration and the axum handlers.
//! - **`config`** / **`error`**: Runtime settings and the error taxonomy.

pub mod analysis;
pub mod config;
pub mod error;
pub mod files;
pub mod metadata;
pub mod negotiation;
pub mod storage;
