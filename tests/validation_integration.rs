// The repository's own hook registry must stay loadable
use hookreg::{Document, Source, DEFAULT_CONFIG_FILE};
use std::path::Path;

#[test]
fn test_validate_real_config_file() {
    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE);
    let doc = Document::from_file(&config_path).unwrap();

    assert!(doc.hook_count() > 0);
    for entry in &doc.repos {
        if let Source::Remote { revision, .. } = &entry.source {
            assert!(!revision.as_str().is_empty());
        }
    }

    let clippy = doc
        .hooks()
        .map(|(_, hook)| hook)
        .find(|hook| hook.id == "cargo-clippy")
        .unwrap();
    assert!(!clippy.passes_filenames());
    assert!(clippy.selects("src/config.rs"));
    assert!(!clippy.selects("README.md"));
}
