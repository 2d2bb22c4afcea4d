use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Thresholds breached: {0}")]
    ThresholdBreached(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> LoadResult<T>;
    fn with_context<F>(self, f: F) -> LoadResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> LoadResult<T> {
        self.map_err(|e| LoadError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> LoadResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LoadError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> LoadResult<T> {
        self.ok_or_else(|| LoadError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> LoadResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| LoadError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! load_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::LoadError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::LoadError::$error_type(format!($fmt, $($arg)*))
    };
}
