use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

/// Configuration-time failures. Per-point failures are NaN, never an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("{projection} expects {expected} parameter(s), got {got}")]
    ParameterCount {
        projection: String,
        expected: usize,
        got: usize,
    },

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Projection not configured: {0}")]
    Unconfigured(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("Invalid aspect ratio: {0}")]
    InvalidAspect(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Affine error: {0}")]
    SingularTransform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_names_parameter() {
        let err = ProjError::InvalidParameter {
            name: "K".into(),
            reason: "7 is above the maximum 5".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'K'"), "{msg}");
        assert!(msg.contains("maximum 5"), "{msg}");
    }

    #[test]
    fn test_map_error_wraps() {
        let err: MapError = GridError::InvalidResolution("0".into()).into();
        assert!(matches!(err, MapError::Grid(_)));
    }
}
