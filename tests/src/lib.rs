//! # Section Ageing Simulator Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Whole-network scenarios
//!     ├── churn.rs      # Growth, decay, and invariant preservation
//!     ├── determinism.rs# Seed reproducibility across full runs
//!     └── attack.rs     # Targeted join attacks against the quorum
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sim-tests
//!
//! # By category
//! cargo test -p sim-tests integration::churn
//! cargo test -p sim-tests integration::attack
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

/// Install a subscriber once so `RUST_LOG` controls scenario verbosity.
/// Safe to call from every test; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
