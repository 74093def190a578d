use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GalaxyError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("invalid colour literal {0:?}")]
    InvalidColor(String),

    #[error("label raster is {got} bytes, expected {expected}")]
    LabelSize { expected: usize, got: usize },

    #[error("text rasterizer failed: {0}")]
    Raster(String),
}

pub type Result<T> = std::result::Result<T, GalaxyError>;
