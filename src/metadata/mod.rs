//! Upload Metadata Module
//!
//! Keeps one record per successful upload and picks records for the
//! analysis endpoints.
//!
//! ## Core Concepts
//! - **Gateway**: `MetadataGateway` is the contract the service depends on. The rest
//!   of the crate only sees `Arc<dyn MetadataGateway>`, so tests can swap in fakes.
//! - **Ordering**: records inside a container are addressed most-recent-first.
//! - **Sampling**: `UniformRecordSampler` draws one record with probability 1/N using
//!   a count query plus a single offset lookup, never a full scan.

pub mod gateway;
pub mod memory;
pub mod sampler;
pub mod types;
