// Which hooks run, on which files, and how many times
use hookreg::{Arguments, Document};

fn registry() -> Document {
    Document::from_yaml(
        r#"
repos:
- repo: https://github.com/pre-commit/mirrors-yapf
  rev: v0.30.0
  hooks:
  - id: yapf
    language: python
    files: ^(aiida/.*\.py|docs/.*\.py)$
- repo: local
  hooks:
  - id: rtd-requirements
    name: Requirements for RTD
    entry: python ./docs/update_req_for_rtd.py --pre-commit
    language: system
    files: ^(setup_requirements\.py|docs/.*\.txt)$
    pass_filenames: false
  - id: travis-linter
    name: travis
    entry: travis lint
    files: ^(\.travis\.yml)$
    language: ruby
    additional_dependencies: [travis]
- repo: https://github.com/pre-commit/pre-commit-hooks
  rev: v4.4.0
  hooks:
  - id: check-yaml
    language: system
"#,
    )
    .unwrap()
}

#[test]
fn test_check_yaml_without_files_pattern_matches_all() {
    let doc = registry();
    let paths = ["aiida/orm/node.py", ".travis.yml", "README.rst", "docs/a/b/c.txt"];
    let plan = doc.plan_invocations(&paths);

    let check_yaml = plan
        .iter()
        .find(|inv| inv.hook.id == "check-yaml")
        .expect("check-yaml should run");
    assert_eq!(
        check_yaml.arguments,
        Arguments::Files(paths.iter().map(|p| p.to_string()).collect())
    );
}

#[test]
fn test_pass_filenames_false_runs_once() {
    let doc = registry();
    let many: Vec<String> = (0..50).map(|i| format!("docs/req_{i}.txt")).collect();

    for paths in [vec!["setup_requirements.py".to_string()], many] {
        let plan = doc.plan_invocations(&paths);
        let runs: Vec<_> = plan
            .iter()
            .filter(|inv| inv.hook.id == "rtd-requirements")
            .collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].arguments, Arguments::WholeRepository);
    }
}

#[test]
fn test_plan_follows_document_order() {
    let doc = registry();
    let plan = doc.plan_invocations(&[
        ".travis.yml",
        "docs/conf.py",
        "docs/requirements_for_rtd.txt",
    ]);
    let order: Vec<(usize, usize, &str)> = plan
        .iter()
        .map(|inv| (inv.entry_index, inv.hook_index, inv.hook.id.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (0, 0, "yapf"),
            (1, 0, "rtd-requirements"),
            (1, 1, "travis-linter"),
            (2, 0, "check-yaml"),
        ]
    );
    assert_eq!(plan[0].source.source.location(), "https://github.com/pre-commit/mirrors-yapf");
}

#[test]
fn test_unmatched_hooks_are_not_planned() {
    let doc = registry();
    let plan = doc.plan_invocations(&["aiida/orm/node.py"]);
    let ids: Vec<&str> = plan.iter().map(|inv| inv.hook.id.as_str()).collect();
    assert_eq!(ids, vec!["yapf", "check-yaml"]);
}

#[test]
fn test_empty_candidate_set_plans_nothing() {
    let doc = registry();
    let paths: [&str; 0] = [];
    assert!(doc.plan_invocations(&paths).is_empty());
}
