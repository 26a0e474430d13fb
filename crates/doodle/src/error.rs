use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Seed ({x}, {y}) is outside the {width}x{height} raster")]
    SeedOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Word list for difficulty '{0}' is missing or empty")]
    EmptyWordList(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Attempt not found: {0}")]
    AttemptNotFound(String),

    #[error("Attempt {0} has already been scored")]
    AttemptAlreadyScored(String),

    #[error("Daily word not found for {0}")]
    DailyWordNotFound(String),

    #[error("Storage error at {path}: {message}")]
    Storage { path: String, message: String },

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        let message = match &e {
            ureq::Error::StatusCode(code) => format!("HTTP {} error", code),
            ureq::Error::Timeout(_) => format!("Request timed out: {}", e),
            ureq::Error::Io(_) => format!("Connection failed: {}", e),
            _ => format!("HTTP error: {}", e),
        };
        Error::Classifier(message)
    }
}
