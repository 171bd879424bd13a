use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("required column `{column}` not found in dataset header")]
    MissingColumn { column: String },

    #[error("failed to read csv dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read dataset source: {0}")]
    Io(#[from] std::io::Error),
}
