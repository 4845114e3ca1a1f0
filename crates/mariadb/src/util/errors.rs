use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("YamlSerializationError: {0}")]
    YamlSerializationError(#[source] serde_yaml::Error),

    #[error("ConflictingRegistration: {0}")]
    ConflictingRegistration(String),

    #[error("TelemetryError: {0}")]
    TelemetryError(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
