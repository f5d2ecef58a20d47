//! Response Negotiation Module
//!
//! Turns the caller's `Accept` header into one of the payload shapes of the
//! random-line endpoint.
//!
//! | Accept              | Payload                                              |
//! |---------------------|------------------------------------------------------|
//! | `application/json`  | `{"random_line": ...}`                               |
//! | `application/xml`   | fixed XML template around the escaped line           |
//! | `application/*`     | `{"line_number", "filename", "most_freq_letter"}`    |
//! | anything else       | the raw line as `text/plain`                         |
//!
//! A missing header is a client error.

pub mod negotiator;
pub mod types;
