// Hook registry document model and loader
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, Location, Result};
use crate::logging::utils::{config_loading_span, log_config_validation};
use crate::pattern::{FilePattern, PatternError};
use crate::revision::RevisionPin;
use crate::tags::is_known_tag;

/// Literal `repo` value marking hooks defined in the document itself
pub const LOCAL_SOURCE: &str = "local";

/// Default document file name
pub const DEFAULT_CONFIG_FILE: &str = ".pre-commit-config.yaml";

/// A loaded and validated hook registry document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub repos: Vec<SourceEntry>,
    pub files: Option<FilePattern>,
    pub exclude: Option<FilePattern>,
    pub fail_fast: Option<bool>,
}

/// One remote hook collection or the local definitions, with its hooks in order
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    pub source: Source,
    pub hooks: Vec<HookSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote {
        location: String,
        revision: RevisionPin,
    },
    Local,
}

impl Source {
    /// Value of the `repo` key
    pub fn location(&self) -> &str {
        match self {
            Source::Remote { location, .. } => location,
            Source::Local => LOCAL_SOURCE,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Source::Local)
    }
}

/// Runtime a hook is invoked through
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    System,
    Script,
    Python,
    Node,
    Ruby,
    Rust,
    Golang,
    Docker,
    DockerImage,
    Conda,
    Perl,
    Lua,
    Pygrep,
    Fail,
    /// A tag this crate does not know; preserved as written
    Other(String),
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::System => "system",
            Language::Script => "script",
            Language::Python => "python",
            Language::Node => "node",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Golang => "golang",
            Language::Docker => "docker",
            Language::DockerImage => "docker_image",
            Language::Conda => "conda",
            Language::Perl => "perl",
            Language::Lua => "lua",
            Language::Pygrep => "pygrep",
            Language::Fail => "fail",
            Language::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Language::Other(_))
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        match tag {
            "system" => Language::System,
            "script" => Language::Script,
            "python" => Language::Python,
            "node" => Language::Node,
            "ruby" => Language::Ruby,
            "rust" => Language::Rust,
            "golang" => Language::Golang,
            "docker" => Language::Docker,
            "docker_image" => Language::DockerImage,
            "conda" => Language::Conda,
            "perl" => Language::Perl,
            "lua" => Language::Lua,
            "pygrep" => Language::Pygrep,
            "fail" => Language::Fail,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lint/format/check task
#[derive(Debug, Clone, PartialEq)]
pub struct HookSpec {
    pub id: String,
    pub language: Language,
    pub name: Option<String>,
    pub description: Option<String>,
    pub entry: Option<String>,
    pub files: Option<FilePattern>,
    pub exclude: Option<FilePattern>,
    pub types: Option<Vec<String>>,
    pub exclude_types: Option<Vec<String>>,
    pub additional_dependencies: Option<Vec<String>>,
    pub args: Option<Vec<String>>,
    pub pass_filenames: Option<bool>,
    pub always_run: Option<bool>,
    pub stages: Option<Vec<String>>,
    pub verbose: Option<bool>,
}

impl HookSpec {
    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether matched file names are appended to the command line
    pub fn passes_filenames(&self) -> bool {
        self.pass_filenames.unwrap_or(true)
    }

    pub fn runs_always(&self) -> bool {
        self.always_run.unwrap_or(false)
    }
}

// Serialized layout of the document. Loading goes through these types so
// that structural validation can report entry and hook indices.

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    repos: Vec<RawSourceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fail_fast: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawSourceEntry {
    repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rev: Option<String>,
    hooks: Vec<RawHook>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawHook {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<String>,
    language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pass_filenames: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    always_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verbose: Option<bool>,
}

impl Document {
    pub fn from_file(path: &Path) -> Result<Self> {
        let span = config_loading_span(path);
        let _guard = span.enter();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
                suggestion: Some(format!(
                    "Create a {DEFAULT_CONFIG_FILE} file in your repository root"
                )),
            }
            .into());
        }

        if !path.is_file() {
            return Err(ConfigError::InvalidValue {
                message: "Configuration path is not a file".to_string(),
                value: path.display().to_string(),
                expected: "file path".to_string(),
                location: Location::default(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        let result = Self::parse(&content).map_err(|mut e| {
            e.set_file_path(path);
            e
        });
        log_config_validation(path, result.is_ok());

        Ok(result?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self::parse(yaml)?)
    }

    fn parse(yaml: &str) -> std::result::Result<Self, ConfigError> {
        let raw: RawDocument =
            serde_yaml::from_str(yaml).map_err(|e| *Box::<ConfigError>::from(e))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> std::result::Result<Self, ConfigError> {
        if raw.repos.is_empty() {
            tracing::warn!("Configuration contains no repositories");
        }

        let files = raw
            .files
            .as_deref()
            .map(|p| compile_pattern(p, Location::document("files")))
            .transpose()?;
        let exclude = raw
            .exclude
            .as_deref()
            .map(|p| compile_pattern(p, Location::document("exclude")))
            .transpose()?;

        let repos = raw
            .repos
            .into_iter()
            .enumerate()
            .map(|(entry_idx, entry)| SourceEntry::from_raw(entry, entry_idx))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            entries = repos.len(),
            hooks = repos.iter().map(|r| r.hooks.len()).sum::<usize>(),
            "Loaded hook registry document"
        );

        Ok(Document {
            repos,
            files,
            exclude,
            fail_fast: raw.fail_fast,
        })
    }

    /// Serialize back to YAML; absent optional fields stay absent
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&RawDocument::from(self))
            .map_err(|e| Box::<ConfigError>::from(e).into())
    }

    /// Serialize to pretty-printed JSON with the same field layout as the YAML form
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&RawDocument::from(self)).map_err(|e| {
            ConfigError::InvalidValue {
                message: e.to_string(),
                value: String::new(),
                expected: "serializable document".to_string(),
                location: Location::default(),
            }
            .into()
        })
    }

    /// All hooks in execution order, with their entry
    pub fn hooks(&self) -> impl Iterator<Item = (&SourceEntry, &HookSpec)> {
        self.repos
            .iter()
            .flat_map(|entry| entry.hooks.iter().map(move |hook| (entry, hook)))
    }

    pub fn hook_count(&self) -> usize {
        self.repos.iter().map(|entry| entry.hooks.len()).sum()
    }
}

impl SourceEntry {
    fn from_raw(raw: RawSourceEntry, entry_idx: usize) -> std::result::Result<Self, ConfigError> {
        let location = Location::entry(entry_idx);

        if raw.repo.is_empty() {
            return Err(ConfigError::MissingField {
                location: location.with_field("repo"),
            });
        }

        let source = if raw.repo == LOCAL_SOURCE {
            if let Some(rev) = raw.rev {
                return Err(ConfigError::InvalidValue {
                    message: "local sources do not take a revision".to_string(),
                    value: rev,
                    expected: "no `rev` key".to_string(),
                    location: location.with_field("rev"),
                });
            }
            Source::Local
        } else {
            let rev = raw.rev.ok_or_else(|| ConfigError::MissingField {
                location: location.clone().with_field("rev"),
            })?;
            let revision =
                RevisionPin::parse(&rev).map_err(|reason| ConfigError::FloatingRevision {
                    revision: rev.clone(),
                    reason: reason.to_string(),
                    location: location.clone().with_field("rev"),
                })?;
            Source::Remote {
                location: raw.repo,
                revision,
            }
        };

        if raw.hooks.is_empty() {
            return Err(ConfigError::ValidationFailed {
                message: format!("source '{}' has no hooks defined", source.location()),
                location,
            });
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut hooks = Vec::with_capacity(raw.hooks.len());
        for (hook_idx, raw_hook) in raw.hooks.into_iter().enumerate() {
            let hook = HookSpec::from_raw(raw_hook, &source, entry_idx, hook_idx)?;
            if let Some(&first_index) = seen.get(&hook.id) {
                return Err(ConfigError::DuplicateHookId {
                    id: hook.id,
                    first_index,
                    location: Location::hook(entry_idx, hook_idx).with_field("id"),
                });
            }
            seen.insert(hook.id.clone(), hook_idx);
            hooks.push(hook);
        }

        Ok(SourceEntry { source, hooks })
    }
}

impl HookSpec {
    fn from_raw(
        raw: RawHook,
        source: &Source,
        entry_idx: usize,
        hook_idx: usize,
    ) -> std::result::Result<Self, ConfigError> {
        let at = |field: &str| Location::hook(entry_idx, hook_idx).with_field(field);

        if raw.id.is_empty() {
            return Err(ConfigError::MissingField { location: at("id") });
        }

        if raw.language.is_empty() {
            return Err(ConfigError::MissingField {
                location: at("language"),
            });
        }
        let language = Language::from(raw.language.as_str());
        if !language.is_known() {
            tracing::warn!("Hook '{}' uses unknown language: '{}'", raw.id, language);
        }

        // A local hook id names nothing outside this document
        if source.is_local() && raw.entry.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField {
                location: at("entry"),
            });
        }

        let files = raw
            .files
            .as_deref()
            .map(|p| compile_pattern(p, at("files")))
            .transpose()?;
        let exclude = raw
            .exclude
            .as_deref()
            .map(|p| compile_pattern(p, at("exclude")))
            .transpose()?;

        for tag in raw.types.iter().chain(raw.exclude_types.iter()).flatten() {
            if !is_known_tag(tag) {
                tracing::warn!("Hook '{}' uses unknown file type: '{tag}'", raw.id);
            }
        }

        if let Some(ref stages) = raw.stages {
            for stage in stages {
                if !is_valid_stage(stage) {
                    return Err(ConfigError::InvalidValue {
                        message: format!("Hook '{}' has invalid stage: '{}'", raw.id, stage),
                        value: stage.clone(),
                        expected: "valid git hook stage (pre-commit, pre-push, etc.)".to_string(),
                        location: at("stages"),
                    });
                }
            }
        }

        Ok(HookSpec {
            id: raw.id,
            language,
            name: raw.name,
            description: raw.description,
            entry: raw.entry,
            files,
            exclude,
            types: raw.types,
            exclude_types: raw.exclude_types,
            additional_dependencies: raw.additional_dependencies,
            args: raw.args,
            pass_filenames: raw.pass_filenames,
            always_run: raw.always_run,
            stages: raw.stages,
            verbose: raw.verbose,
        })
    }
}

fn compile_pattern(
    source: &str,
    location: Location,
) -> std::result::Result<FilePattern, ConfigError> {
    FilePattern::new(source).map_err(|e| match e {
        PatternError::Invalid(error) => ConfigError::InvalidRegex {
            pattern: source.to_string(),
            error,
            location,
        },
        PatternError::Unanchored => ConfigError::UnanchoredPattern {
            pattern: source.to_string(),
            location,
        },
    })
}

fn is_valid_stage(stage: &str) -> bool {
    matches!(
        stage,
        "commit"
            | "merge-commit"
            | "prepare-commit-msg"
            | "commit-msg"
            | "post-commit"
            | "manual"
            | "post-checkout"
            | "post-merge"
            | "pre-commit"
            | "pre-merge-commit"
            | "pre-push"
            | "pre-rebase"
            | "push"
            | "post-rewrite"
    )
}

impl From<&Document> for RawDocument {
    fn from(doc: &Document) -> Self {
        RawDocument {
            repos: doc.repos.iter().map(RawSourceEntry::from).collect(),
            files: doc.files.as_ref().map(|p| p.as_str().to_string()),
            exclude: doc.exclude.as_ref().map(|p| p.as_str().to_string()),
            fail_fast: doc.fail_fast,
        }
    }
}

impl From<&SourceEntry> for RawSourceEntry {
    fn from(entry: &SourceEntry) -> Self {
        let rev = match entry.source {
            Source::Remote { ref revision, .. } => Some(revision.to_string()),
            Source::Local => None,
        };
        RawSourceEntry {
            repo: entry.source.location().to_string(),
            rev,
            hooks: entry.hooks.iter().map(RawHook::from).collect(),
        }
    }
}

impl From<&HookSpec> for RawHook {
    fn from(hook: &HookSpec) -> Self {
        RawHook {
            id: hook.id.clone(),
            name: hook.name.clone(),
            description: hook.description.clone(),
            entry: hook.entry.clone(),
            language: hook.language.to_string(),
            files: hook.files.as_ref().map(|p| p.as_str().to_string()),
            exclude: hook.exclude.as_ref().map(|p| p.as_str().to_string()),
            types: hook.types.clone(),
            exclude_types: hook.exclude_types.clone(),
            additional_dependencies: hook.additional_dependencies.clone(),
            args: hook.args.clone(),
            pass_filenames: hook.pass_filenames,
            always_run: hook.always_run,
            stages: hook.stages.clone(),
            verbose: hook.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookregError;

    fn config_error(yaml: &str) -> ConfigError {
        match Document::from_yaml(yaml) {
            Err(HookregError::Config(e)) => *e,
            other => panic!("Expected configuration error, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_basic_document() {
        let yaml = r#"
repos:
- repo: https://github.com/google/yapf
  rev: v0.30.0
  hooks:
  - id: yapf
    language: python
"#;
        let doc = Document::from_yaml(yaml).unwrap();
        assert_eq!(doc.repos.len(), 1);
        assert_eq!(doc.repos[0].source.location(), "https://github.com/google/yapf");
        match &doc.repos[0].source {
            Source::Remote { revision, .. } => assert_eq!(revision.as_str(), "v0.30.0"),
            Source::Local => panic!("Expected remote source"),
        }
        assert_eq!(doc.repos[0].hooks[0].id, "yapf");
        assert_eq!(doc.repos[0].hooks[0].language, Language::Python);
    }

    #[test]
    fn test_hook_defaults() {
        let yaml = r#"
repos:
- repo: local
  hooks:
  - id: lint
    entry: make lint
    language: system
"#;
        let doc = Document::from_yaml(yaml).unwrap();
        let hook = &doc.repos[0].hooks[0];
        assert!(hook.name.is_none());
        assert!(hook.files.is_none());
        assert!(hook.pass_filenames.is_none());
        assert!(hook.passes_filenames());
        assert!(!hook.runs_always());
        assert_eq!(hook.display_name(), "lint");
    }

    #[test]
    fn test_order_is_preserved() {
        let yaml = r#"
repos:
- repo: local
  hooks:
  - id: c
    entry: c
    language: system
  - id: a
    entry: a
    language: system
- repo: https://example.com/hooks
  rev: v1.0.0
  hooks:
  - id: b
    language: system
"#;
        let doc = Document::from_yaml(yaml).unwrap();
        let ids: Vec<&str> = doc.hooks().map(|(_, h)| h.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(doc.repos[0].source.is_local());
        assert_eq!(doc.hook_count(), 3);
    }

    #[test]
    fn test_unknown_language_is_preserved() {
        let yaml = r#"
repos:
- repo: local
  hooks:
  - id: x
    entry: x
    language: cobol
"#;
        let doc = Document::from_yaml(yaml).unwrap();
        assert_eq!(
            doc.repos[0].hooks[0].language,
            Language::Other("cobol".to_string())
        );
    }

    #[test]
    fn test_remote_without_rev_fails() {
        let err = config_error(
            r#"
repos:
- repo: https://example.com/hooks
  hooks:
  - id: check-yaml
    language: system
"#,
        );
        assert!(matches!(err, ConfigError::MissingField { .. }));
        assert_eq!(err.location().unwrap().field_path(), "repos[0].rev");
    }

    #[test]
    fn test_floating_rev_fails() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
- repo: https://example.com/hooks
  rev: master
  hooks:
  - id: check-yaml
    language: system
"#,
        );
        match err {
            ConfigError::FloatingRevision {
                revision, location, ..
            } => {
                assert_eq!(revision, "master");
                assert_eq!(location.entry, Some(1));
            }
            other => panic!("Expected FloatingRevision, got {other:?}"),
        }
    }

    #[test]
    fn test_local_with_rev_fails() {
        let err = config_error(
            r#"
repos:
- repo: local
  rev: v1.0.0
  hooks:
  - id: a
    entry: a
    language: system
"#,
        );
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_local_hook_requires_entry() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    language: system
"#,
        );
        assert_eq!(err.location().unwrap().field_path(), "repos[0].hooks[0].entry");
    }

    #[test]
    fn test_duplicate_hook_id_fails() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
  - id: b
    entry: b
    language: system
  - id: a
    entry: a2
    language: system
"#,
        );
        match err {
            ConfigError::DuplicateHookId {
                id,
                first_index,
                location,
            } => {
                assert_eq!(id, "a");
                assert_eq!(first_index, 0);
                assert_eq!(location.hook, Some(2));
            }
            other => panic!("Expected DuplicateHookId, got {other:?}"),
        }
    }

    #[test]
    fn test_same_id_in_different_sources_is_allowed() {
        let yaml = r#"
repos:
- repo: local
  hooks:
  - id: check-yaml
    entry: yamllint
    language: system
- repo: https://github.com/pre-commit/pre-commit-hooks
  rev: v4.4.0
  hooks:
  - id: check-yaml
    language: system
"#;
        assert!(Document::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_invalid_and_unanchored_patterns_fail_at_load() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
    exclude: "^(*invalid)$"
"#,
        );
        assert!(matches!(err, ConfigError::InvalidRegex { .. }));
        assert!(err.to_string().contains("repos[0].hooks[0].exclude"));

        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
    files: \.py$
"#,
        );
        assert!(matches!(err, ConfigError::UnanchoredPattern { .. }));

        let err = config_error(
            r#"
files: ^src/
repos: []
"#,
        );
        assert_eq!(err.location().unwrap().field_path(), "files");
    }

    #[test]
    fn test_verbose_patterns_round_trip() {
        let yaml = r#"
exclude: >
  (?x)^(
    vendor/.*|
    build/.*
  )$
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
    files: "(?x)^(\n  src/.*\\.py|\n  tests/.*\\.py\n)$"
"#;
        let doc = Document::from_yaml(yaml).unwrap();
        assert!(!doc.includes("vendor/lib.py"));
        assert!(doc.repos[0].hooks[0].selects("tests/test_x.py"));

        let reloaded = Document::from_yaml(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(reloaded, doc);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
    pass_filename: false
"#,
        );
        match err {
            ConfigError::InvalidYaml { message, line, .. } => {
                assert!(message.contains("pass_filename"), "{message}");
                assert!(line.is_some());
            }
            other => panic!("Expected InvalidYaml, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_language_fails() {
        assert!(Document::from_yaml(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
"#
        )
        .is_err());
    }

    #[test]
    fn test_empty_hooks_fails() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks: []
"#,
        );
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_invalid_stage_fails() {
        let err = config_error(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
    stages: [pre-commit, invalid-stage]
"#,
        );
        assert!(err.to_string().contains("invalid stage"));
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = Document::from_yaml("repos: []\n").unwrap();
        assert!(doc.repos.is_empty());
    }

    #[test]
    fn test_to_yaml_omits_absent_fields() {
        let doc = Document::from_yaml(
            r#"
repos:
- repo: local
  hooks:
  - id: a
    entry: a
    language: system
"#,
        )
        .unwrap();
        let yaml = doc.to_yaml().unwrap();
        assert!(!yaml.contains("pass_filenames"));
        assert!(!yaml.contains("rev"));
        assert!(!yaml.contains("null"));
        assert_eq!(Document::from_yaml(&yaml).unwrap(), doc);
    }
}
