use std::path::PathBuf;

pub type CardResult<T> = Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
pub enum CardError {
    #[error("color palette is empty")]
    EmptyPalette,

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("gap must be at least 1 pixel")]
    InvalidGap,

    #[error("speed must be a finite number, got {0}")]
    InvalidSpeed(f32),

    #[error("config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CardError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_problem() {
        assert!(CardError::EmptyPalette.to_string().contains("empty"));
        assert!(CardError::InvalidColor("#zz".into())
            .to_string()
            .contains("#zz"));
        let io = CardError::io(
            "/tmp/card.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(io.to_string().contains("/tmp/card.json"));
    }
}
