//! Parameterised layout generators built on the kernel.
//!
//! Recipes either return geometry or fail before anything is added to a
//! [`Layout`](crate::emit::Layout).

mod bridge;
mod shield;

pub use bridge::{two_point_bridge, BridgeClosure, BridgeRunners};
pub use shield::{ShieldGrid, ShieldPattern};
