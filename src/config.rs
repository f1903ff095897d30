//! Run configuration loaded from YAML.
//!
//! The term vocabulary, publications and reporting windows are data, not
//! code, and live in a single file:
//!
//! ```yaml
//! input_dir: input/LexisNexis
//! output_dir: output/LexisNexis
//! publications:
//!   - name: The Guardian
//!     format: the_guardian
//! date_windows:
//!   - start: 2015-06-01
//!     end: 2015-08-31
//! headlines:
//!   term: Syria
//!   weekday: Saturday
//! term_groups:
//!   - label: Countries
//!     terms:
//!       - "Syria "
//!       - "England OR Britain OR UK"
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file. Any problem here aborts the run before a single file is read.

use crate::cli::Cli;
use crate::errors::ConfigError;
use crate::models::{DateWindow, Publication, TermCatalog, TermDefinition, TermGroup};
use chrono::Weekday;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Where the key file lives unless configured otherwise.
pub const DEFAULT_KEY_FILE: &str = "private/GuardianAPIKey.txt";

fn default_key_file() -> PathBuf {
    PathBuf::from(DEFAULT_KEY_FILE)
}

fn default_headline_weekday() -> Weekday {
    Weekday::Sat
}

/// Headline mode settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeadlineSettings {
    /// Articles mentioning this term are listed.
    pub term: TermDefinition,
    /// Only articles published on this day are listed.
    #[serde(default = "default_headline_weekday")]
    pub weekday: Weekday,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input_dir: PathBuf,
    output_dir: PathBuf,
    #[serde(default = "default_key_file")]
    key_file: PathBuf,
    publications: Vec<Publication>,
    date_windows: Vec<DateWindow>,
    #[serde(default)]
    headlines: Option<HeadlineSettings>,
    term_groups: Vec<TermGroup>,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root holding one subdirectory per collection.
    pub input_dir: PathBuf,
    /// Root for the per-window report directories.
    pub output_dir: PathBuf,
    pub key_file: PathBuf,
    pub publications: Vec<Publication>,
    pub windows: Vec<DateWindow>,
    /// `None` when headline mode is off.
    pub headlines: Option<HeadlineSettings>,
    pub catalog: TermCatalog,
}

impl Config {
    /// Parse YAML text, resolving relative paths against `base_dir`.
    pub fn from_yaml(yaml: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        Ok(Config {
            input_dir: base_dir.join(file.input_dir),
            output_dir: base_dir.join(file.output_dir),
            key_file: base_dir.join(file.key_file),
            publications: file.publications,
            windows: file.date_windows,
            headlines: file.headlines,
            catalog: TermCatalog::new(file.term_groups),
        })
    }

    /// Apply command-line overrides on top of the file's values.
    ///
    /// A headline term given on the command line turns headline mode on,
    /// keeping any configured weekday.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.input_dir {
            self.input_dir = dir.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(path) = &cli.key_file {
            self.key_file = path.clone();
        }
        if let Some(term) = &cli.headline_term {
            let weekday = self
                .headlines
                .as_ref()
                .map_or_else(default_headline_weekday, |h| h.weekday);
            self.headlines = Some(HeadlineSettings {
                term: TermDefinition::parse(term),
                weekday,
            });
        }
    }

    /// Reject configurations that would make every report meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.publications.is_empty() {
            return invalid("no publications configured".to_string());
        }
        if let Some(p) = self.publications.iter().find(|p| p.name.trim().is_empty()) {
            return invalid(format!("publication with empty name (format {:?})", p.format));
        }
        if self.windows.is_empty() {
            return invalid("no date windows configured".to_string());
        }
        if let Some(w) = self.windows.iter().find(|w| w.start >= w.end) {
            return invalid(format!("date window {w} does not start before it ends"));
        }
        if self.catalog.is_empty() {
            return invalid("no terms configured".to_string());
        }
        for (_, group, term) in self.catalog.iter() {
            if term.alternatives.iter().any(|a| a.is_empty()) {
                return invalid(format!(
                    "term {:?} in group {:?} has an empty alternative",
                    term.label, group.label
                ));
            }
        }
        if let Some(h) = &self.headlines {
            if h.term.alternatives.iter().any(|a| a.is_empty()) {
                return invalid("headline term has an empty alternative".to_string());
            }
        }
        Ok(())
    }
}

/// Read, parse and validate the config file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = Config::from_yaml(&yaml, base_dir)?;
    info!(
        publications = config.publications.len(),
        windows = config.windows.len(),
        groups = config.catalog.groups().len(),
        terms = config.catalog.len(),
        headlines = config.headlines.is_some(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Opaque single-line secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Read the first line of the key file.
///
/// # Errors
///
/// Fails if the file cannot be read or its first line is blank.
pub fn load_key(path: &Path) -> Result<ApiKey, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;
    let key = contents.lines().next().unwrap_or("").trim();
    if key.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "key file {} is empty",
            path.display()
        )));
    }
    debug!(path = %path.display(), "Loaded key file");
    Ok(ApiKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationFormat;
    use chrono::NaiveDate;
    use clap::Parser;

    const YAML: &str = r#"
input_dir: input/LexisNexis
output_dir: output/LexisNexis
publications:
  - name: The Express
    format: the_express
  - name: DAILY MAIL (London)
    format: daily_mail
date_windows:
  - start: 2015-06-01
    end: 2015-08-31
headlines:
  term: Syria
term_groups:
  - label: Countries
    terms:
      - "Syria "
      - "England OR Britain OR UK"
"#;

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml(YAML, Path::new("/data")).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/data/input/LexisNexis"));
        assert_eq!(config.output_dir, PathBuf::from("/data/output/LexisNexis"));
        assert_eq!(config.key_file, PathBuf::from("/data/private/GuardianAPIKey.txt"));
        assert_eq!(config.publications[1].format, PublicationFormat::DailyMail);
        assert_eq!(
            config.windows[0].start,
            NaiveDate::from_ymd_opt(2015, 6, 1).unwrap()
        );
        let headlines = config.headlines.as_ref().unwrap();
        assert_eq!(headlines.term.label, "Syria");
        assert_eq!(headlines.weekday, Weekday::Sat);
        assert_eq!(config.catalog.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let yaml = YAML.replace("input/LexisNexis", "/abs/in");
        let config = Config::from_yaml(&yaml, Path::new("/data")).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/abs/in"));
    }

    #[test]
    fn test_headline_weekday_can_be_set() {
        let yaml = YAML.replace("  term: Syria", "  term: Syria\n  weekday: Friday");
        let config = Config::from_yaml(&yaml, Path::new(".")).unwrap();
        assert_eq!(config.headlines.unwrap().weekday, Weekday::Fri);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let yaml = format!("{YAML}\nextra: true\n");
        assert!(matches!(
            Config::from_yaml(&yaml, Path::new(".")),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let yaml = YAML.replace("format: the_express", "format: the_sun");
        assert!(Config::from_yaml(&yaml, Path::new(".")).is_err());
    }

    #[test]
    fn test_validate_rejects_reversed_window() {
        let yaml = YAML.replace("end: 2015-08-31", "end: 2015-05-31");
        let config = Config::from_yaml(&yaml, Path::new(".")).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_alternative() {
        let yaml = YAML.replace("England OR Britain OR UK", "England OR ");
        let config = Config::from_yaml(&yaml, Path::new(".")).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::from_yaml(YAML, Path::new(".")).unwrap();
        config.headlines = None;
        let cli = Cli::parse_from([
            "awful_news_counts",
            "--output-dir",
            "/tmp/out",
            "--headline-term",
            "Aleppo",
        ]);
        config.apply_overrides(&cli);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        let headlines = config.headlines.unwrap();
        assert_eq!(headlines.term.label, "Aleppo");
        assert_eq!(headlines.weekday, Weekday::Sat);
    }

    #[test]
    fn test_load_config_and_key() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.yaml");
        fs::write(&config_path, YAML).unwrap();
        let config = load_config(&config_path).unwrap();
        assert_eq!(config.input_dir, tmp.path().join("input/LexisNexis"));

        assert!(matches!(
            load_key(&config.key_file),
            Err(ConfigError::KeyFile { .. })
        ));

        fs::create_dir_all(tmp.path().join("private")).unwrap();
        fs::write(&config.key_file, "secret-key\nignored\n").unwrap();
        let key = load_key(&config.key_file).unwrap();
        assert_eq!(key.expose(), "secret-key");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn test_blank_key_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("key.txt");
        fs::write(&path, "   \n").unwrap();
        assert!(matches!(load_key(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_example_config_is_valid() {
        let yaml = include_str!("../config.example.yaml");
        let config = Config::from_yaml(yaml, Path::new(".")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.publications.len(), 9);
        assert_eq!(config.windows.len(), 5);
        let (_, syria) = config.catalog.find("Syria ").unwrap();
        assert_eq!(syria.alternatives, vec!["Syria ".to_string()]);
        let (_, uk) = config.catalog.find("England OR Britain OR UK").unwrap();
        assert_eq!(uk.alternatives.len(), 3);
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/config.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
