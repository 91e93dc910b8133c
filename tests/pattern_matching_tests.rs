// Whole-path matching semantics of files/exclude patterns
use hookreg::{Document, FilePattern, PatternError};

#[test]
fn test_alternation_pattern_scenario() {
    let pattern = FilePattern::new(r"^(a/.*\.py|b/.*\.py)$").unwrap();

    assert!(pattern.is_match("a/foo.py"));
    assert!(pattern.is_match("b/bar.py"));
    assert!(!pattern.is_match("c/foo.py"));
    assert!(!pattern.is_match("a/foo.py.bak"));
}

#[test]
fn test_match_is_not_substring_search() {
    let pattern = FilePattern::new(r"^(setup\.py)$").unwrap();
    assert!(pattern.is_match("setup.py"));
    assert!(!pattern.is_match("pkg/setup.py"));
    assert!(!pattern.is_match("setup.pyc"));
}

#[test]
fn test_paths_are_normalised_before_matching() {
    let pattern = FilePattern::new(r"^(docs/.*\.txt)$").unwrap();
    assert!(pattern.is_match("./docs/requirements_for_rtd.txt"));
    assert!(pattern.is_match(r"docs\requirements_for_rtd.txt"));
}

#[test]
fn test_every_document_pattern_is_anchored_and_compiles() {
    let doc = Document::from_yaml(
        r#"
files: ^(aiida/.*|docs/.*|setup\.json)$
repos:
- repo: local
  hooks:
  - id: rtd-requirements
    entry: python ./docs/update_req_for_rtd.py --pre-commit
    language: system
    files: ^(setup_requirements\.py|docs/requirements_for_rtd\.txt|docs/update_req_for_rtd\.py)$
    pass_filenames: false
  - id: prospector
    entry: prospector
    language: system
    exclude: ^(docs/.*|examples/.*)$
"#,
    )
    .unwrap();

    let patterns = doc
        .files
        .iter()
        .chain(doc.exclude.iter())
        .chain(
            doc.hooks()
                .flat_map(|(_, hook)| hook.files.iter().chain(hook.exclude.iter())),
        );
    for pattern in patterns {
        let source = pattern.as_str();
        assert!(source.starts_with('^') && source.ends_with('$'), "{source}");
        assert!(regex::Regex::new(source).is_ok());
    }
}

#[test]
fn test_escaped_dollar_is_not_an_anchor() {
    assert_eq!(
        FilePattern::new(r"^(price\$)").unwrap_err(),
        PatternError::Unanchored
    );
    assert!(FilePattern::new(r"^(price\$)$").is_ok());
}

#[test]
fn test_verbose_block_scalar_pattern_loads() {
    let doc = Document::from_yaml(
        r#"
repos:
- repo: local
  hooks:
  - id: yapf
    entry: yapf
    language: system
    files: |
      (?x)^(
        a/.*\.py|
        b/.*\.py
      )$
"#,
    )
    .unwrap();

    let hook = &doc.repos[0].hooks[0];
    assert!(hook.files.as_ref().unwrap().as_str().ends_with("$\n"));
    assert!(hook.selects("a/foo.py"));
    assert!(hook.selects("b/bar.py"));
    assert!(!hook.selects("c/foo.py"));
    assert!(!hook.selects("a/foo.py.bak"));
}

#[test]
fn test_verbose_pattern_without_anchor_is_rejected() {
    let result = Document::from_yaml(
        r#"
repos:
- repo: local
  hooks:
  - id: yapf
    entry: yapf
    language: system
    files: |
      (?x)(
        a/.*\.py
      )
"#,
    );
    assert!(result.is_err());
}
