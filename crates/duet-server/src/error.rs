use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {env_var}: {reason}")]
    InvalidValue { env_var: String, reason: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a config field path such as `provider.host` to its environment variable
pub fn to_env_var(field_path: &str) -> String {
    format!("DUET_{}", field_path.to_uppercase().replace('.', "__"))
}
