use std::fmt;

/// The type of Boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Intersection,
    Union,
    Difference,
    Xor,
}

impl BooleanOp {
    /// Whether the result can be non-empty when the clip operand is empty.
    #[must_use]
    pub fn keeps_subject_without_clip(self) -> bool {
        !matches!(self, Self::Intersection)
    }

    /// Whether the result can be non-empty when the subject operand is empty.
    #[must_use]
    pub fn keeps_clip_without_subject(self) -> bool {
        matches!(self, Self::Union | Self::Xor)
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Intersection => "intersection",
            Self::Union => "union",
            Self::Difference => "difference",
            Self::Xor => "xor",
        };
        f.write_str(name)
    }
}
