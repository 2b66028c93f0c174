//! # Sim XOR Space
//!
//! Address-space primitives for the section ageing simulator.
//!
//! ## Purpose
//!
//! Every simulated vault lives at a 256-bit name in XOR space, and the
//! network partitions that space into sections keyed by binary prefixes:
//!
//! - [`Address`]: a fixed-length 256-bit random name, ordered numerically
//! - [`XorDistance`]: the comparable XOR metric between two 256-bit values
//! - [`Prefix`]: a variable-length (0..=256 bit) subtree identifier with a
//!   canonical, collision-free key encoding
//!
//! ## Module Structure
//!
//! ```text
//! sim-xor-space/
//! ├── address.rs       # Address: random 256-bit names
//! ├── distance.rs      # XorDistance: comparable XOR metric
//! ├── prefix.rs        # Prefix: binary subtree identifiers
//! └── errors.rs        # XorSpaceError
//! ```
//!
//! Names are simulated random bit-strings, not real public keys; nothing in
//! this crate performs cryptography.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod distance;
mod errors;
mod prefix;

pub use address::{Address, ADDRESS_BITS};
pub use distance::XorDistance;
pub use errors::XorSpaceError;
pub use prefix::Prefix;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
