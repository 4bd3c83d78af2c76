//! Error types shared by every layer of the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a [`LifeError`], used by the CLI to decide how to report it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operator asked for something that does not exist.
    Usage,
    /// The run was configured with values that cannot work.
    Configuration,
    /// The rendering or writing collaborator failed.
    Export,
}

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("unsupported pattern '{given}'; valid patterns: {valid}")]
    UnknownPattern { given: String, valid: String },

    #[error("no pattern given; valid patterns: {valid}")]
    MissingPattern { valid: String },

    #[error("unknown rule '{given}'; use a preset ({valid}) or B/S notation such as B36/S23")]
    UnknownRule { given: String, valid: String },

    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pattern {pattern} needs at least a {min_width}x{min_height} grid, got {width}x{height}")]
    PatternOutOfBounds {
        pattern: &'static str,
        min_width: usize,
        min_height: usize,
        width: usize,
        height: usize,
    },

    #[error("frame interval must be between 1 and 65535 ms, got {0}")]
    InvalidFrameInterval(u32),

    #[error("cell scale must be at least 1 pixel")]
    InvalidScale,

    #[error("nothing to export to {}: no frames were rendered", .0.display())]
    EmptyAnimation(PathBuf),

    #[error("animation declared {expected} frames but {written} were emitted")]
    IncompleteAnimation { written: usize, expected: usize },

    #[error("I/O failure while exporting {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode animation")]
    Encoding(#[from] png::EncodingError),
}

impl LifeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifeError::UnknownPattern { .. }
            | LifeError::MissingPattern { .. }
            | LifeError::UnknownRule { .. } => ErrorKind::Usage,
            LifeError::InvalidDimensions { .. }
            | LifeError::PatternOutOfBounds { .. }
            | LifeError::InvalidFrameInterval(_)
            | LifeError::InvalidScale => ErrorKind::Configuration,
            LifeError::EmptyAnimation(_)
            | LifeError::IncompleteAnimation { .. }
            | LifeError::Io { .. }
            | LifeError::Encoding(_) => ErrorKind::Export,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LifeError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_taxonomy() {
        let usage = LifeError::UnknownPattern { given: "x".into(), valid: "A".into() };
        assert_eq!(usage.kind(), ErrorKind::Usage);

        let config = LifeError::InvalidDimensions { width: 0, height: 10 };
        assert_eq!(config.kind(), ErrorKind::Configuration);

        let export = LifeError::EmptyAnimation(PathBuf::from("out.png"));
        assert_eq!(export.kind(), ErrorKind::Export);
    }

    #[test]
    fn test_unknown_pattern_lists_valid_set() {
        let err = LifeError::UnknownPattern {
            given: "glider".into(),
            valid: "SHUTTLES, BRAIN".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("glider"));
        assert!(msg.contains("SHUTTLES, BRAIN"));
    }
}
