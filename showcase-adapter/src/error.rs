use showcase::ConfigError;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The handle was detached, stopped or torn down, or belongs to another stage.
    ///
    /// Callers can safely ignore this; it is never fatal.
    #[error("handle is no longer valid")]
    InvalidHandle,
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}
