//! # Parley Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements configuration loading for Parley: which persona to talk
//! to, an optional random seed, an optional override of the typing delay, where
//! transcripts are exported, and any custom personas.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and `PARLEY_*` environment variables (applied by the commands)
//! 2. Project-specific `.parley.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/parley/config.toml` on Linux)
//! 4. Default values defined in the code
//!
//! The project search walks up from the current directory and stops at the first
//! directory containing `.git`.
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! persona = "ona"
//! seed = 42
//!
//! [delay]
//! min_ms = 0
//! max_ms = 250
//!
//! [export]
//! directory = "~/chat-logs"
//!
//! [[personas]]
//! name = "pirate"
//! label = "Cap'n"
//! greeting = "Ahoy!"
//! fallback = ["Arr, tell me more."]
//!
//! [[personas.categories]]
//! name = "greeting"
//! triggers = ["ahoy"]
//! replies = ["Ahoy, matey!"]
//! ```
//!
use crate::core::error::{ParleyError, Result};
use crate::engine::persona::{DelayRange, Persona, PersonaRegistry};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub delay: DelayConfig,
    #[serde(default)]
    pub export: ExportConfig,
    /// Custom personas. A name matching a built-in replaces it.
    #[serde(default)]
    pub personas: Vec<Persona>,
}

/// Session defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Persona used when `--persona` is not given. Unset means `assistant`.
    pub persona: Option<String>,
    /// Seed for the random source. Unset means a fresh seed every run.
    pub seed: Option<u64>,
}

/// Optional override of the persona's typing delay window, in milliseconds.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DelayConfig {
    pub min_ms: Option<u64>,
    pub max_ms: Option<u64>,
}

/// Where exported transcripts are written.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Target directory (can use ~). Will be expanded. Unset means the current directory.
    pub directory: Option<String>,
}

const DEFAULT_PERSONA: &str = "assistant";
const DEFAULT_EXPORT_DIR: &str = ".";

impl Config {
    /// Built-in personas plus the configured ones, validated.
    pub fn persona_registry(&self) -> Result<PersonaRegistry> {
        let mut registry = PersonaRegistry::with_builtins();
        for persona in &self.personas {
            registry.register(persona.clone())?;
        }
        Ok(registry)
    }

    /// The typing delay for `persona`, with any configured bounds applied on top.
    pub fn delay_for(&self, persona: &Persona) -> Result<DelayRange> {
        DelayRange::new(
            self.delay.min_ms.unwrap_or(persona.min_delay_ms),
            self.delay.max_ms.unwrap_or(persona.max_delay_ms),
        )
        .with_context(|| format!("Invalid delay window for persona '{}'", persona.name))
    }

    /// The persona a session starts with when no flag or variable names one.
    pub fn persona_name(&self) -> &str {
        self.chat.persona.as_deref().unwrap_or(DEFAULT_PERSONA)
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(self.export.directory.as_deref().unwrap_or(DEFAULT_EXPORT_DIR))
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".parley.toml";

/// Loads, merges, expands and validates configuration from all file sources.
pub fn load_config() -> Result<Config> {
    let user_path = user_config_path();
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_path = find_project_config_path(&current_dir);
    load_config_from_paths(user_path.as_deref(), project_path.as_deref())
}

/// Same as [`load_config`] with explicit file locations. Missing paths are skipped.
pub fn load_config_from_paths(user: Option<&Path>, project: Option<&Path>) -> Result<Config> {
    let user_config = match user {
        Some(path) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            None
        }
        None => None,
    };
    let project_config = match project {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => {
            debug!(
                "No project configuration file ({}) found in current directory or ancestors.",
                PROJECT_CONFIG_FILENAME
            );
            None
        }
    };

    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn user_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "Parley", "parley") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.chat.persona = project_cfg.chat.persona.or(user.chat.persona);
    merged.chat.seed = project_cfg.chat.seed.or(user.chat.seed);
    merged.delay.min_ms = project_cfg.delay.min_ms.or(user.delay.min_ms);
    merged.delay.max_ms = project_cfg.delay.max_ms.or(user.delay.max_ms);
    merged.export.directory = project_cfg.export.directory.or(user.export.directory);
    // Project personas come last so they win over same-named user personas.
    merged.personas = user.personas;
    merged.personas.extend(project_cfg.personas);
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(directory) = config.export.directory.as_mut() {
        *directory = shellexpand::tilde(directory.as_str()).into_owned();
        debug!("Expanded export directory: {}", directory);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if let (Some(min), Some(max)) = (config.delay.min_ms, config.delay.max_ms) {
        if min > max {
            return Err(anyhow!(ParleyError::Config(format!(
                "delay.min_ms ({}) exceeds delay.max_ms ({}).",
                min, max
            ))));
        }
    }
    let export_dir = config.export_dir();
    if export_dir.exists() && !export_dir.is_dir() {
        return Err(anyhow!(ParleyError::Config(format!(
            "Configured export path '{}' exists but is not a directory.",
            export_dir.display()
        ))));
    }
    let registry = config.persona_registry()?;
    registry.get(config.persona_name()).with_context(|| {
        format!(
            "Configured default persona '{}' is not available",
            config.persona_name()
        )
    })?;
    info!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [chat]
            persona = "ona"
            seed = 42

            [delay]
            max_ms = 250

            [export]
            directory = "~/chat-logs"

            [[personas]]
            name = "pirate"
            label = "Cap'n"
            greeting = "Ahoy!"
            fallback = ["Arr, tell me more."]

            [[personas.categories]]
            name = "greeting"
            triggers = ["ahoy"]
            replies = ["Ahoy, matey!"]
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.persona_name(), "ona");
        assert_eq!(config.chat.seed, Some(42));
        assert_eq!(config.delay.min_ms, None);
        assert_eq!(config.delay.max_ms, Some(250));
        assert_eq!(config.export.directory.as_deref(), Some("~/chat-logs")); // Not yet expanded
        assert_eq!(config.personas.len(), 1);
        assert_eq!(config.personas[0].categories[0].replies, vec!["Ahoy, matey!"]);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[chat]\nvoice = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.persona_name(), "assistant");
        assert_eq!(config.export_dir(), PathBuf::from("."));
        assert!(config.personas.is_empty());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            export: ExportConfig {
                directory: Some("~/chat-logs".to_string()),
            },
            ..Default::default()
        };
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(config.export_dir(), home_dir.join("chat-logs"));
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user: Config = toml::from_str(
            r#"
            [chat]
            persona = "ona"
            seed = 1
            [delay]
            min_ms = 10
            max_ms = 20
            [export]
            directory = "/user/logs"
        "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [chat]
            seed = 2
            [delay]
            max_ms = 50
        "#,
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.persona_name(), "ona"); // Project left it unset
        assert_eq!(merged.chat.seed, Some(2));
        assert_eq!(merged.delay.min_ms, Some(10));
        assert_eq!(merged.delay.max_ms, Some(50));
        assert_eq!(merged.export_dir(), PathBuf::from("/user/logs"));
    }

    #[test]
    fn test_merge_project_values_equal_to_defaults_still_win() {
        let user: Config = toml::from_str(
            r#"
            [chat]
            persona = "ona"
            [export]
            directory = "/user/logs"
        "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [chat]
            persona = "assistant"
            [export]
            directory = "."
        "#,
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.persona_name(), "assistant");
        assert_eq!(merged.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_delay_for_applies_overrides() {
        let mut config = Config::default();
        let ona = Persona::ona();
        let delay = config.delay_for(&ona).unwrap();
        assert_eq!(delay, ona.delay());

        config.delay.max_ms = Some(100);
        let err = config.delay_for(&ona).unwrap_err();
        assert!(format!("{:#}", err).contains("exceeds upper bound"));

        config.delay.min_ms = Some(0);
        let delay = config.delay_for(&ona).unwrap();
        assert_eq!(delay, DelayRange::new(0, 100).unwrap());
    }

    #[test]
    fn test_validate_config_invalid_delay() {
        let config = Config {
            delay: DelayConfig {
                min_ms: Some(500),
                max_ms: Some(100),
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("exceeds delay.max_ms"));
    }

    #[test]
    fn test_validate_config_export_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            export: ExportConfig {
                directory: Some(file_path.to_string_lossy().to_string()),
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("is not a directory"));
    }

    #[test]
    fn test_validate_config_unknown_default_persona() {
        let config = Config {
            chat: ChatConfig {
                persona: Some("marvin".to_string()),
                seed: None,
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("Persona 'marvin' not found."));
    }

    #[test]
    fn test_load_config_from_paths_with_files() {
        let temp_dir = tempdir().unwrap();
        let user_path = temp_dir.path().join("config.toml");
        let project_path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
        fs::write(&user_path, "[chat]\nseed = 9\n").unwrap();
        fs::write(
            &project_path,
            r#"
            [chat]
            persona = "pirate"

            [[personas]]
            name = "pirate"
            label = "Cap'n"
            greeting = "Ahoy!"
            fallback = ["Arr, tell me more."]
        "#,
        )
        .unwrap();

        let config =
            load_config_from_paths(Some(user_path.as_path()), Some(project_path.as_path()))
                .unwrap();
        assert_eq!(config.persona_name(), "pirate");
        assert_eq!(config.chat.seed, Some(9));
        let registry = config.persona_registry().unwrap();
        assert_eq!(registry.get("pirate").unwrap().label, "Cap'n");
    }

    #[test]
    fn test_load_config_from_paths_no_files() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("config.toml");
        let config = load_config_from_paths(Some(missing.as_path()), None).unwrap();
        assert_eq!(config.persona_name(), "assistant");
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        // Above the repository root, so it must not be picked up.
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }
}
