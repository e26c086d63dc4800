use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    InvalidParameter { name: String, value: String },
    MissingRequired(String),
    ValidationError(String),
    JsonError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}' with value '{}'", name, value)
            }
            ConfigError::MissingRequired(name) => write!(f, "Missing required parameter: {}", name),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ConfigError::JsonError(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub(crate) fn invalid(name: &str, value: impl fmt::Display) -> Self {
        ConfigError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
