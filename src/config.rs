//! Project configuration describing which bundles to build and where to write them.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, BundleResult};
use crate::models::{MinifyOptions, SourceSpec};

/// File name searched for in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "bundle.config.json";

/// Task name that runs every configured bundle unless a task with that name exists.
pub const DEFAULT_TASK: &str = "default";

/// Settings for a single named bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskConfig {
  /// Ordered glob patterns, relative to the project root.
  pub sources: SourceSpec,
  /// File name of the written bundle.
  pub output_name: String,
  /// Directory, relative to the project root, receiving the bundle.
  pub output_dir: String,
  /// Minifier settings.
  pub minify: MinifyOptions,
  /// Include a file only once when several patterns match it.
  pub dedupe: bool,
}

impl Default for TaskConfig {
  fn default() -> Self {
    Self {
      sources: SourceSpec::new(["_css/poole.css", "_css/hyde.css", "_css/**/*.css"]),
      output_name: "all.min.css".into(),
      output_dir: "public/css".into(),
      minify: MinifyOptions::default(),
      dedupe: true,
    }
  }
}

impl TaskConfig {
  /// Destination directory resolved against the project root.
  pub fn output_dir_path(&self, root: &Path) -> PathBuf {
    root.join(&self.output_dir)
  }

  /// Full path of the written bundle.
  pub fn output_path(&self, root: &Path) -> PathBuf {
    self.output_dir_path(root).join(&self.output_name)
  }
}

/// Discoverable bundle configuration: a set of named tasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
  /// Bundles keyed by task name.
  #[serde(default = "default_tasks")]
  pub tasks: BTreeMap<String, TaskConfig>,
  #[serde(skip)]
  source: Option<PathBuf>,
}

fn default_tasks() -> BTreeMap<String, TaskConfig> {
  BTreeMap::from([("css".to_string(), TaskConfig::default())])
}

impl Default for BundleConfig {
  fn default() -> Self {
    Self {
      tasks: default_tasks(),
      source: None,
    }
  }
}

impl BundleConfig {
  /// Load `bundle.config.json` from the project root, falling back to the built-in defaults
  /// when the file does not exist.
  ///
  /// A file that exists but cannot be read or parsed is an error rather than a silent
  /// fallback, so a typo never produces a bundle from the wrong sources.
  pub fn discover(root: &Path) -> BundleResult<Self> {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    match fs::read_to_string(&candidate) {
      Ok(content) => Self::parse(&candidate, &content),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
      Err(err) => Err(config_error(&candidate, err)),
    }
  }

  /// Read configuration from a specific JSON file, which must exist.
  pub fn from_path(path: &Path) -> BundleResult<Self> {
    let content = fs::read_to_string(path).map_err(|err| config_error(path, err))?;
    Self::parse(path, &content)
  }

  fn parse(path: &Path, content: &str) -> BundleResult<Self> {
    let mut config: Self = serde_json::from_str(content).map_err(|err| config_error(path, err))?;
    config.source = Some(path.to_path_buf());
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> BundleResult<()> {
    if self.tasks.is_empty() {
      return Err(self.error("no tasks are configured"));
    }

    for (name, task) in &self.tasks {
      if task.output_name.trim().is_empty() {
        return Err(self.error(format!("task `{name}` has an empty outputName")));
      }
      if task.sources.is_empty() {
        return Err(self.error(format!("task `{name}` declares no sources")));
      }
    }

    Ok(())
  }

  /// Configured task names in execution order.
  pub fn task_names(&self) -> impl Iterator<Item = &str> {
    self.tasks.keys().map(String::as_str)
  }

  /// Tasks to run for the requested name.
  ///
  /// `default` expands to every task unless a task is literally named `default`.
  pub fn select(&self, name: &str) -> BundleResult<Vec<(&str, &TaskConfig)>> {
    if let Some((key, task)) = self.tasks.get_key_value(name) {
      return Ok(vec![(key.as_str(), task)]);
    }

    if name == DEFAULT_TASK {
      return Ok(
        self
          .tasks
          .iter()
          .map(|(key, task)| (key.as_str(), task))
          .collect(),
      );
    }

    let known: Vec<&str> = self.task_names().collect();
    Err(self.error(format!(
      "unknown task `{name}` (available: {})",
      known.join(", ")
    )))
  }

  fn error(&self, reason: impl ToString) -> BundleError {
    let path = self
      .source
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    config_error(&path, reason)
  }
}

fn config_error(path: &Path, reason: impl ToString) -> BundleError {
  BundleError::Config {
    path: path.to_path_buf(),
    reason: reason.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_mirror_the_theme_build() {
    let config = BundleConfig::default();
    let task = &config.tasks["css"];
    assert_eq!(task.sources.patterns(), [
      "_css/poole.css",
      "_css/hyde.css",
      "_css/**/*.css"
    ]);
    assert_eq!(
      task.output_path(Path::new("site")),
      PathBuf::from("site/public/css/all.min.css")
    );
    assert_eq!(task.minify.max_line_length, 80);
    assert!(task.minify.strip_comments);
    assert!(task.dedupe);
  }

  #[test]
  fn discover_falls_back_to_defaults_for_missing_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let config = BundleConfig::discover(temp.path()).expect("missing config is not an error");
    assert_eq!(config, BundleConfig::default());
  }

  #[test]
  fn discover_reads_configuration() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{
        "tasks": {
          "theme": {
            "sources": ["styles/base.css", "styles/**/*.css"],
            "outputName": "theme.css",
            "outputDir": "dist",
            "minify": { "maxLineLength": 120, "stripComments": false },
            "dedupe": false
          }
        }
      }"#,
    )
    .expect("failed to write config");

    let config = BundleConfig::discover(temp.path()).expect("configuration should load");
    let task = &config.tasks["theme"];
    assert_eq!(task.sources.patterns(), ["styles/base.css", "styles/**/*.css"]);
    assert_eq!(task.output_path(temp.path()), temp.path().join("dist/theme.css"));
    assert_eq!(task.minify.max_line_length, 120);
    assert!(!task.minify.strip_comments);
    assert!(!task.dedupe);
  }

  #[test]
  fn partial_tasks_inherit_defaults() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("custom.json");
    fs::write(&path, r#"{"tasks": {"css": {"outputDir": "out"}}}"#).unwrap();

    let config = BundleConfig::from_path(&path).unwrap();
    let task = &config.tasks["css"];
    assert_eq!(task.output_dir, "out");
    assert_eq!(task.output_name, "all.min.css");
    assert_eq!(task.sources, TaskConfig::default().sources);
  }

  #[test]
  fn malformed_file_is_a_config_error() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();

    let err = BundleConfig::discover(temp.path()).unwrap_err();
    assert!(matches!(err, BundleError::Config { .. }));
    assert_eq!(err.subject(), temp.path().join(DEFAULT_CONFIG_FILE).display().to_string());
  }

  #[test]
  fn explicit_path_must_exist() {
    let temp = tempdir().expect("failed to create temp dir");
    assert!(BundleConfig::from_path(&temp.path().join("absent.json")).is_err());
  }

  #[test]
  fn rejects_tasks_without_sources() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("custom.json");
    fs::write(&path, r#"{"tasks": {"css": {"sources": []}}}"#).unwrap();
    assert!(BundleConfig::from_path(&path).is_err());
  }

  #[test]
  fn default_task_runs_everything() {
    let mut config = BundleConfig::default();
    config.tasks.insert("print".into(), TaskConfig::default());

    let names: Vec<&str> = config
      .select(DEFAULT_TASK)
      .unwrap()
      .into_iter()
      .map(|(name, _)| name)
      .collect();
    assert_eq!(names, ["css", "print"]);

    let single: Vec<&str> = config
      .select("print")
      .unwrap()
      .into_iter()
      .map(|(name, _)| name)
      .collect();
    assert_eq!(single, ["print"]);
  }

  #[test]
  fn unknown_task_lists_available_names() {
    let err = BundleConfig::default().select("js").unwrap_err();
    assert!(err.to_string().contains("unknown task `js`"));
    assert!(err.to_string().contains("available: css"));
  }
}
