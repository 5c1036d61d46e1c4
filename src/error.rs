use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{model} equilibrium is undefined: {reason}")]
    Domain { model: &'static str, reason: String },

    #[error("no convergence after {iterations} iterations (residual {residual}, at {last_value})")]
    NonConvergence {
        iterations: usize,
        residual: f64,
        last_value: f64,
    },

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
}

impl GraphError {
    pub(crate) fn domain(model: &'static str, reason: impl Into<String>) -> Self {
        Self::Domain {
            model,
            reason: reason.into(),
        }
    }
}
