//! # Ports Layer
//!
//! Trait boundary between the membership engine and its drivers.
//!
//! The simulator has one driving port: the churn API a simulation loop
//! calls to grow, shrink and probe the network. There is no driven side;
//! the engine owns its randomness and keeps all state in memory.

pub mod inbound;

pub use inbound::MembershipApi;
