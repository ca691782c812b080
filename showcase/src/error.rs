use alloc::string::String;

/// Rejected construction input.
///
/// Components are never built in a degraded state: every constructor validates its options up
/// front and returns one of these instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("carousel needs at least one item")]
    EmptyItems,
    #[error("auto-advance interval must be greater than zero")]
    ZeroInterval,
    #[error("visibility threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("invalid margin `{0}`")]
    InvalidMargin(String),
    #[error("invalid value for `{name}`: {value}")]
    InvalidOption { name: &'static str, value: f64 },
}
