//! tilepal End-to-End Test Infrastructure
//!
//! Integration tests for the flows that touch real files:
//!
//! - Generation: sheet -> palette manifest and tile assets
//! - Validation: rejected sheets leave the directory untouched
//! - **Determinism**: repeated runs write byte-identical assets
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tilepal-tests
//! ```

pub mod harness;
