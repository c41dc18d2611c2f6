//! # Local-Chain Test Suite
//!
//! Cross-crate scenarios for the emulator.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs       # Emulator, account and transaction builders
//! │   └── integration/      # End-to-end flows across lc-01, lc-02, lc-03
//! │       ├── lifecycle.rs
//! │       └── ledger_flows.rs
//! └── benches/
//!     └── pipeline_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lc-tests
//!
//! # By category
//! cargo test -p lc-tests integration::lifecycle
//! cargo test -p lc-tests integration::ledger_flows
//!
//! # Benchmarks
//! cargo bench -p lc-tests
//! ```

pub mod fixtures;
pub mod integration;
