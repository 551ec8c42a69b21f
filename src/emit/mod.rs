//! Hand-off of extruded shapes to simulator backends.
//!
//! A [`Layout`] collects shapes while a recipe runs; [`Layout::emit`]
//! validates every footprint before the first record reaches an
//! [`Emitter`], so a failing layout writes nothing.

mod json;
mod layout;
mod naming;
mod shape;

pub use json::JsonEmitter;
pub use layout::Layout;
pub use naming::ShapeNamer;
pub(crate) use shape::cull_repeats;
pub use shape::{EmitRecord, ExtrudedShape};

use crate::error::Result;

/// Consumer of validated shape records.
pub trait Emitter {
    /// Accepts one record.
    ///
    /// # Errors
    ///
    /// Returns an [`EmitError`](crate::error::EmitError) if the backend
    /// cannot take the record.
    fn emit(&mut self, record: &EmitRecord) -> Result<()>;
}

impl Emitter for Vec<EmitRecord> {
    fn emit(&mut self, record: &EmitRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
