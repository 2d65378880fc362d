use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraderError {
    #[error("invalid grading configuration: {0}")]
    Configuration(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid bill record: {0}")]
    InvalidBill(String),

    #[error("invalid manual grade: {0}")]
    InvalidGrade(String),

    #[error("bill not found in grade store: {0}")]
    BillNotFound(String),

    #[error("grade store error: {0}")]
    Store(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraderError>;
