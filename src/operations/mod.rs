//! Constructive operations on planar geometry.
//!
//! Each operation is a small struct built with `new` and run with `execute`.

pub mod blend;
pub mod boolean;
pub mod offset;
pub mod query;
