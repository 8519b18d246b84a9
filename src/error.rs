use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("record {index} has no usable field `{field}`")]
    MissingField { index: usize, field: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}
