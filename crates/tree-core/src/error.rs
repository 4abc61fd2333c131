use crate::particle::Category;
use thiserror::Error;

/// Rejected particle configuration. Shape parameters are never clamped: a
/// zero or negative size means the caller built the config wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{category:?}: particle count must be at least 1")]
    EmptyCategory { category: Category },

    #[error("{category:?}: {field} must be positive and finite, got {value}")]
    NonPositive {
        category: Category,
        field: &'static str,
        value: f32,
    },

    #[error("{category:?}: weight range {start}..{end} is empty or not finite")]
    InvalidWeightRange {
        category: Category,
        start: f32,
        end: f32,
    },

    #[error(
        "{category:?}: lowest weight {start} scales progress by {scale}, particles could never reach their formed position"
    )]
    WeightCannotConverge {
        category: Category,
        start: f32,
        scale: f32,
    },
}
