use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("Checkpoint stack is empty")]
    EmptyCheckpointStack,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Malformed test vector at line {line}: {content:?}")]
    VectorParse { line: usize, content: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, GeneticsError>;
