use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchellingError {
    #[error("{name} must be at least 1, got {value}")]
    InvalidDimension { name: &'static str, value: usize },

    #[error("{name} must be a fraction in [0, 1], got {value}")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("position ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is vacant")]
    VacantCell { row: usize, col: usize },

    #[error("cell has no neighbors to evaluate")]
    EmptyNeighborhood,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SchellingError>;
