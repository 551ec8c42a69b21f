use thiserror::Error;

/// Top-level error type for the layout kernel.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while constructing or combining geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("lines are colinear")]
    Colinear,

    #[error("zero-length edge at vertex {0}")]
    ZeroLengthEdge(usize),
}

/// Errors related to the process stack.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("layer not found: {0}")]
    NotFound(String),

    #[error("layer index {index} out of range for stack of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown length unit: {0}")]
    InvalidUnit(String),

    #[error("invalid layer {name}: {reason}")]
    InvalidLayer { name: String, reason: String },

    #[error("stack configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Errors related to kernel operations (thickening, Booleans, blending, solving).
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),

    #[error("root finder did not converge after {iterations} iterations (last x = {last})")]
    NoConvergence { iterations: usize, last: f64 },
}

/// Errors raised while serialising shapes for a simulator.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("shape {name} has a degenerate footprint ({vertices} distinct vertices)")]
    DegenerateFootprint { name: String, vertices: usize },

    #[error("duplicate shape name: {0}")]
    DuplicateName(String),

    #[error("failed to write shape: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialise shape: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`LayoutError`].
pub type Result<T> = std::result::Result<T, LayoutError>;
