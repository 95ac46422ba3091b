use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How move history is rendered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationConfig {
    /// Append " e.p." to en passant captures.
    pub mark_en_passant: bool,
    /// Append "+" after a checking move and "#" after a mating one.
    pub mark_checks: bool,
}

impl Default for NotationConfig {
    fn default() -> Self {
        NotationConfig {
            mark_en_passant: true,
            mark_checks: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub notation: NotationConfig,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing fields fall back to their defaults, so `{}` is a valid config.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::new());
        assert!(config.notation.mark_en_passant);
        assert!(config.notation.mark_checks);
    }

    #[test]
    fn partial_notation_section() {
        let config = GameConfig::from_json(r#"{"notation": {"mark_checks": false}}"#).unwrap();
        assert!(!config.notation.mark_checks);
        assert!(config.notation.mark_en_passant);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = GameConfig::from_json("{notation").unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }
}
