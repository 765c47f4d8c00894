pub mod config;
pub mod error;
pub mod logger;
pub mod text;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::AutoRouteError;
pub use text::normalize_text;
pub type Result<T> = std::result::Result<T, AutoRouteError>;
