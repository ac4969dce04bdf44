use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unsupported complement target: {0}")]
    UnsupportedTarget(String),

    #[error("configuration for {config} does not belong to the {kind} game")]
    KindMismatch { kind: GameKind, config: GameKind },
}

//
// ─── GAME KIND ─────────────────────────────────────────────────────────────────
//

/// The quiz game a session engine is bound to.
///
/// The clock-face page and the clock-picture page share the `Clock` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Complement,
    Clock,
    Money,
    Probability,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Complement,
        GameKind::Clock,
        GameKind::Money,
        GameKind::Probability,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Complement => "complement",
            GameKind::Clock => "clock",
            GameKind::Money => "money",
            GameKind::Probability => "probability",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complement" => Ok(Self::Complement),
            "clock" | "time" | "heure" => Ok(Self::Clock),
            "money" => Ok(Self::Money),
            "probability" => Ok(Self::Probability),
            _ => Err(ConfigurationError::UnknownGame(s.to_string())),
        }
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Three-tier difficulty shared by the clock, money and probability games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Minute granularity used by the clock-reading game.
    #[must_use]
    pub fn minute_step(self) -> u8 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Medium => 15,
            Difficulty::Hard => 5,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigurationError;

    /// Accepts both the English and the French radio values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "facile" => Ok(Self::Easy),
            "medium" | "moyen" => Ok(Self::Medium),
            "hard" | "difficile" => Ok(Self::Hard),
            _ => Err(ConfigurationError::UnknownDifficulty(s.to_string())),
        }
    }
}

//
// ─── COMPLEMENT TARGET ─────────────────────────────────────────────────────────
//

/// Target sum for the complement game, restricted to the offered values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ComplementTarget(u32);

impl ComplementTarget {
    pub const SUPPORTED: [u32; 4] = [10, 20, 50, 100];

    /// # Errors
    ///
    /// Returns `ConfigurationError::UnsupportedTarget` for values outside `SUPPORTED`.
    pub fn new(value: u32) -> Result<Self, ConfigurationError> {
        if Self::SUPPORTED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigurationError::UnsupportedTarget(value.to_string()))
        }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for ComplementTarget {
    fn default() -> Self {
        Self(10)
    }
}

impl fmt::Debug for ComplementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComplementTarget({})", self.0)
    }
}

impl TryFrom<u32> for ComplementTarget {
    type Error = ConfigurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComplementTarget> for u32 {
    fn from(target: ComplementTarget) -> Self {
        target.0
    }
}

impl FromStr for ComplementTarget {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map_err(|_| ConfigurationError::UnsupportedTarget(s.to_string()))
            .and_then(Self::new)
    }
}

//
// ─── GAME CONFIG ───────────────────────────────────────────────────────────────
//

/// Parameter chosen before a session starts and fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", content = "level", rename_all = "snake_case")]
pub enum GameConfig {
    Complement(ComplementTarget),
    Clock(Difficulty),
    Money(Difficulty),
    Probability(Difficulty),
}

impl GameConfig {
    /// The configuration a game page shows before the player picks anything.
    #[must_use]
    pub fn default_for(kind: GameKind) -> Self {
        match kind {
            GameKind::Complement => Self::Complement(ComplementTarget::default()),
            GameKind::Clock => Self::Clock(Difficulty::default()),
            GameKind::Money => Self::Money(Difficulty::default()),
            GameKind::Probability => Self::Probability(Difficulty::default()),
        }
    }

    /// Parse a raw selector value for the given game.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the value is not offered by that game.
    pub fn parse(kind: GameKind, raw: &str) -> Result<Self, ConfigurationError> {
        Ok(match kind {
            GameKind::Complement => Self::Complement(raw.parse()?),
            GameKind::Clock => Self::Clock(raw.parse()?),
            GameKind::Money => Self::Money(raw.parse()?),
            GameKind::Probability => Self::Probability(raw.parse()?),
        })
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            GameConfig::Complement(_) => GameKind::Complement,
            GameConfig::Clock(_) => GameKind::Clock,
            GameConfig::Money(_) => GameKind::Money,
            GameConfig::Probability(_) => GameKind::Probability,
        }
    }

    /// Returns `self` if it belongs to `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::KindMismatch` otherwise.
    pub fn ensure_kind(self, kind: GameKind) -> Result<Self, ConfigurationError> {
        if self.kind() == kind {
            Ok(self)
        } else {
            Err(ConfigurationError::KindMismatch {
                kind,
                config: self.kind(),
            })
        }
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameConfig::Complement(target) => write!(f, "complement (target {})", target.value()),
            GameConfig::Clock(level) => write!(f, "clock ({level})"),
            GameConfig::Money(level) => write!(f, "money ({level})"),
            GameConfig::Probability(level) => write!(f, "probability ({level})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_accepts_french_values() {
        assert_eq!("facile".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("moyen".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(" Difficile ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownDifficulty("extreme".into()));
    }

    #[test]
    fn complement_target_must_be_offered() {
        assert_eq!(ComplementTarget::new(20).unwrap().value(), 20);
        assert!(ComplementTarget::new(15).is_err());
        assert!("abc".parse::<ComplementTarget>().is_err());
    }

    #[test]
    fn parse_routes_by_kind() {
        assert_eq!(
            GameConfig::parse(GameKind::Money, "hard").unwrap(),
            GameConfig::Money(Difficulty::Hard)
        );
        assert_eq!(
            GameConfig::parse(GameKind::Complement, "100").unwrap(),
            GameConfig::Complement(ComplementTarget::new(100).unwrap())
        );
        assert!(GameConfig::parse(GameKind::Complement, "hard").is_err());
    }

    #[test]
    fn defaults_match_page_defaults() {
        assert_eq!(
            GameConfig::default_for(GameKind::Complement),
            GameConfig::Complement(ComplementTarget::new(10).unwrap())
        );
        for kind in GameKind::ALL {
            assert_eq!(GameConfig::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn ensure_kind_rejects_foreign_config() {
        let err = GameConfig::Money(Difficulty::Easy)
            .ensure_kind(GameKind::Clock)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::KindMismatch { .. }));
    }

    #[test]
    fn game_kind_aliases() {
        assert_eq!("heure".parse::<GameKind>().unwrap(), GameKind::Clock);
        assert_eq!("time".parse::<GameKind>().unwrap(), GameKind::Clock);
        assert!("chess".parse::<GameKind>().is_err());
    }

    #[test]
    fn config_serializes_with_game_tag() {
        let json = serde_json::to_string(&GameConfig::Clock(Difficulty::Medium)).unwrap();
        assert_eq!(json, r#"{"game":"clock","level":"medium"}"#);

        let parsed: Result<GameConfig, _> =
            serde_json::from_str(r#"{"game":"complement","level":7}"#);
        assert!(parsed.is_err());
    }
}
