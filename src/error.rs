use thiserror::Error;

/// Errors produced by the clustering and fusion APIs.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    /// A numeric parameter was outside its valid domain.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    /// Weighted sampling received a different number of groups and weights.
    #[error("got {groups} point groups but {weights} weights")]
    WeightMismatch { groups: usize, weights: usize },
    /// A fusion source referenced a class that was never added.
    #[error("unknown object class: {0}")]
    UnknownClass(String),
}

impl ClusterError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
