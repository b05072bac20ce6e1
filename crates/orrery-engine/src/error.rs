use thiserror::Error;

/// Errors that stop scene construction.
///
/// Per-asset load failures are deliberately absent: a texture that fails to
/// load leaves its surface untextured and is reported through `log::warn!`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The texture manifest JSON could not be parsed.
    #[error("manifest parse error: {0}")]
    Manifest(#[source] serde_json::Error),

    /// The game configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[source] serde_json::Error),

    /// The configuration parsed but describes an impossible scene.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A texture id was requested that the manifest does not list.
    #[error("unknown texture id: {0}")]
    UnknownTexture(String),

    /// The render surface has a zero, negative or non-finite size.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },

    /// The runner was used before `init` succeeded.
    #[error("game not initialized")]
    NotInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = EngineError::UnknownTexture("pluto".into());
        assert_eq!(err.to_string(), "unknown texture id: pluto");

        let err = EngineError::InvalidSurface { width: 0.0, height: 600.0 };
        assert_eq!(err.to_string(), "invalid surface size 0x600");
    }

    #[test]
    fn manifest_error_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EngineError::Manifest(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
