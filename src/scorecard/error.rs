use thiserror::Error;

/// Input that falls outside the supported description grammar. Either one
/// aborts translation of the whole plate appearance.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TranslationError {
    #[error("{token:?} is not a defensive position (in {description:?})")]
    UnknownPosition { token: String, description: String },

    #[error("No keyword found in plate description: {description}")]
    NoPlayKeyword { description: String },
}

impl TranslationError {
    pub fn unknown_position(token: &str, description: &str) -> Self {
        Self::UnknownPosition {
            token: token.to_string(),
            description: description.to_string(),
        }
    }

    pub fn no_play_keyword(description: &str) -> Self {
        Self::NoPlayKeyword {
            description: description.to_string(),
        }
    }
}
