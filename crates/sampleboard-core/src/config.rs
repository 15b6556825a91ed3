//! Board configuration
//!
//! Loaded from TOML at startup:
//!
//! ```toml
//! fallback_advice = "No analysis right now."
//!
//! [[roster]]
//! id = "s1"
//! name = "Sara"
//! phone = "0501234567"
//! specialty = "Laboratory tests"
//! active_tasks = 1
//! ```

use crate::error::ConfigError;
use crate::types::{Specialist, SpecialistId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default text shown when the advisory collaborator fails
pub const DEFAULT_FALLBACK_ADVICE: &str = "No workload analysis is available right now.";

/// Default text shown before the first advisory answer
pub const DEFAULT_INITIAL_ADVICE: &str = "Analyzing workload...";

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Advice shown when the collaborator fails or answers with nothing
    pub fallback_advice: String,
    /// Advice shown until the first answer arrives
    pub initial_advice: String,
    /// Preloaded specialist roster
    pub roster: Vec<SpecialistConfig>,
}

impl BoardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fallback advice
    #[inline]
    #[must_use]
    pub fn with_fallback_advice(mut self, text: impl Into<String>) -> Self {
        self.fallback_advice = text.into();
        self
    }

    /// With initial advice
    #[inline]
    #[must_use]
    pub fn with_initial_advice(mut self, text: impl Into<String>) -> Self {
        self.initial_advice = text.into();
        self
    }

    /// With an extra roster entry
    #[inline]
    #[must_use]
    pub fn with_specialist(mut self, specialist: SpecialistConfig) -> Self {
        self.roster.push(specialist);
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` for malformed TOML
    /// - `ConfigError::DuplicateSpecialist` if a roster id repeats
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - see [`BoardConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), specialists = config.roster.len(), "config loaded");
        Ok(config)
    }

    /// Reject duplicate roster ids
    ///
    /// # Errors
    /// - `ConfigError::DuplicateSpecialist` naming the first repeated id
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.roster {
            if !seen.insert(&entry.id) {
                return Err(ConfigError::DuplicateSpecialist(entry.id.clone()));
            }
        }
        Ok(())
    }

    /// Build the specialist roster
    #[must_use]
    pub fn build_roster(&self) -> Vec<Specialist> {
        self.roster.iter().cloned().map(Specialist::from).collect()
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            fallback_advice: DEFAULT_FALLBACK_ADVICE.to_string(),
            initial_advice: DEFAULT_INITIAL_ADVICE.to_string(),
            roster: Vec::new(),
        }
    }
}

/// Roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistConfig {
    pub id: SpecialistId,
    pub name: String,
    pub phone: String,
    pub specialty: String,
    /// Preloaded workload carried over from outside the board
    #[serde(default)]
    pub active_tasks: u32,
}

impl From<SpecialistConfig> for Specialist {
    fn from(value: SpecialistConfig) -> Self {
        Specialist::new(value.id, value.name, value.phone, value.specialty)
            .with_active_tasks(value.active_tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const ROSTER: &str = r#"
fallback_advice = "Nothing to report."

[[roster]]
id = "s1"
name = "Sara"
phone = "0501234567"
specialty = "Laboratory tests"
active_tasks = 1

[[roster]]
id = "s3"
name = "Hind"
phone = "0559876543"
specialty = "Lab technician"
"#;

    #[test]
    fn parses_roster() {
        let config = BoardConfig::from_toml_str(ROSTER).unwrap();
        assert_eq!(config.fallback_advice, "Nothing to report.");
        assert_eq!(config.initial_advice, DEFAULT_INITIAL_ADVICE);

        let roster = config.build_roster();
        assert_eq!(
            roster,
            vec![
                Specialist::new("s1", "Sara", "0501234567", "Laboratory tests")
                    .with_active_tasks(1),
                Specialist::new("s3", "Hind", "0559876543", "Lab technician"),
            ]
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert!(config.build_roster().is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let text = format!(
            "{ROSTER}\n[[roster]]\nid = \"s1\"\nname = \"Again\"\n\
             phone = \"0\"\nspecialty = \"x\"\n"
        );
        let err = BoardConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSpecialist(id) if id.as_str() == "s1"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = BoardConfig::from_toml_str("roster = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();
        let config = BoardConfig::load(file.path()).unwrap();
        assert_eq!(config.roster.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BoardConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builder_methods() {
        let config = BoardConfig::new()
            .with_fallback_advice("fb")
            .with_initial_advice("init")
            .with_specialist(SpecialistConfig {
                id: SpecialistId::new("s1"),
                name: "Sara".to_string(),
                phone: "0501".to_string(),
                specialty: "Lab".to_string(),
                active_tasks: 0,
            });
        assert_eq!(config.fallback_advice, "fb");
        assert_eq!(config.initial_advice, "init");
        assert_eq!(config.roster.len(), 1);
    }
}
