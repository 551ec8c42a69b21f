mod engine;
mod select;

pub use engine::Boolean;
pub use select::BooleanOp;
