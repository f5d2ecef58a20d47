//! Text Analysis Module
//!
//! The pure part of the service: everything here works on decoded lines and
//! never touches storage or the network.
//!
//! ## Responsibilities
//! - **Tokenization**: decoding raw bytes into lines, one pass over the stream.
//! - **Sampling**: picking one line uniformly, forward or reversed.
//! - **Ranking**: the longest lines of a file, stable on ties.
//! - **Frequency**: the most common letter of a line.
//!
//! ## Submodules
//! - **`tokenizer`**: Incremental UTF-8 line decoder and the stream driver.
//! - **`sampler`**: Uniform line selection.
//! - **`ranker`**: Longest-lines ranking.
//! - **`frequency`**: Letter frequency with a fixed tie-break.
//! - **`types`**: Results shared with the negotiation and HTTP layers.

pub mod frequency;
pub mod ranker;
pub mod sampler;
pub mod tokenizer;
pub mod types;
