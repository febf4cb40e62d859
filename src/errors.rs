use thiserror::Error;

/// Error type that captures common forecast failures.
#[derive(Debug, Error)]
pub enum CashflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("Invalid reference: item `{referenced_by}` points to missing item `{name}`")]
    InvalidRef { name: String, referenced_by: String },
}
