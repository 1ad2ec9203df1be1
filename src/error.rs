pub type SpiroResult<T> = Result<T, SpiroError>;

#[derive(thiserror::Error, Debug)]
pub enum SpiroError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("empty input: curve has no points")]
    EmptyInput,

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("empty sequence: playback needs at least one curve")]
    EmptySequence,

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpiroError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn invalid_viewport(msg: impl Into<String>) -> Self {
        Self::InvalidViewport(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
