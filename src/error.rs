use std::path::PathBuf;

/// Failures surfaced while loading suppression rules.
///
/// Display texts are the messages reported to the user verbatim.
#[derive(Debug, thiserror::Error)]
pub enum SuppressionError {
    #[error("Failed to add suppression. No id.")]
    NoId,

    #[error("Failed to add suppression. Invalid id \"{0}\"")]
    InvalidId(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
}

impl SuppressionError {
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SuppressionError::FileNotFound(path)
        } else {
            SuppressionError::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            SuppressionError::NoId.to_string(),
            "Failed to add suppression. No id."
        );
        assert_eq!(
            SuppressionError::InvalidId("ab-2".to_string()).to_string(),
            "Failed to add suppression. Invalid id \"ab-2\""
        );
    }

    #[test]
    fn test_not_found_io_error_maps_to_file_not_found() {
        let err = SuppressionError::from_io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, SuppressionError::FileNotFound(_)));
        assert_eq!(err.to_string(), "File not found: missing.txt");
    }

    #[test]
    fn test_other_io_error_keeps_source() {
        let err = SuppressionError::from_io(
            "locked.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, SuppressionError::Io { .. }));
        assert!(err.to_string().contains("locked.txt"));
    }
}
