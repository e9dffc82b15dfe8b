//! Error types for decoding forecast payloads.

/// Error returned when a payload cannot be decoded into a record.
///
/// Every variant except [`DecodeError::Json`] carries the dotted path of the
/// offending wire key, e.g. `hourly.data[3].precipIntensity`. A failed decode
/// never yields a partially populated record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input was not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record or list position held a value of the wrong JSON shape.
    #[error("expected {expected} at {}", display_path(.path))]
    UnexpectedShape {
        path: String,
        expected: &'static str,
    },

    /// A field the record requires was absent or `null`.
    #[error("missing required field {}", display_path(.path))]
    MissingField { path: String },

    /// A field was present but its value does not match the declared type.
    #[error("invalid value for {}: {source}", display_path(.path))]
    InvalidField {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A timestamp does not fit in the supported date range.
    #[error("timestamp {seconds} out of range at {}", display_path(.path))]
    TimestampOutOfRange { path: String, seconds: f64 },

    /// An enumeration token was not recognized and the decode options reject
    /// unknown tokens.
    #[error("unrecognized {kind} token {token:?} at {}", display_path(.path))]
    UnknownToken {
        path: String,
        kind: &'static str,
        token: String,
    },
}

impl DecodeError {
    /// Dotted path of the offending field. `None` for malformed input.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::Json(_) => None,
            DecodeError::UnexpectedShape { path, .. }
            | DecodeError::MissingField { path }
            | DecodeError::InvalidField { path, .. }
            | DecodeError::TimestampOutOfRange { path, .. }
            | DecodeError::UnknownToken { path, .. } => Some(path),
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "the top level".to_string()
    } else {
        format!("`{path}`")
    }
}

/// Error returned when parsing an [`UnknownTokenPolicy`](crate::UnknownTokenPolicy) by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown token policy '{0}'. Supported policies: preserve, reject.")]
pub struct ParsePolicyError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_described_in_words() {
        let err = DecodeError::UnexpectedShape {
            path: String::new(),
            expected: "an object",
        };

        assert_eq!(err.to_string(), "expected an object at the top level");
        assert_eq!(err.path(), Some(""));
    }

    #[test]
    fn nested_path_is_quoted() {
        let err = DecodeError::MissingField {
            path: "alerts[0].title".to_string(),
        };

        assert_eq!(err.to_string(), "missing required field `alerts[0].title`");
    }
}
