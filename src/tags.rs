// Path-based file type tags used by `types` / `exclude_types` filters
use std::collections::BTreeSet;

use crate::pattern::normalize_path;

/// Tags understood by `types` filters
pub const KNOWN_TAGS: &[&str] = &[
    "file",
    "text",
    "binary",
    "executable",
    "symlink",
    "python",
    "pyi",
    "cython",
    "javascript",
    "jsx",
    "typescript",
    "tsx",
    "json",
    "yaml",
    "toml",
    "xml",
    "html",
    "css",
    "markdown",
    "rst",
    "ini",
    "cfg",
    "shell",
    "bash",
    "zsh",
    "fish",
    "ruby",
    "perl",
    "rust",
    "go",
    "c",
    "c++",
    "header",
    "java",
    "dockerfile",
    "makefile",
    "sql",
    "plain-text",
    "image",
    "png",
    "jpeg",
    "svg",
    "gif",
    "pdf",
    "zip",
    "gzip",
    "tar",
];

pub fn is_known_tag(tag: &str) -> bool {
    KNOWN_TAGS.contains(&tag)
}

/// Infer the tags of a path from its extension and well-known file names.
///
/// No filesystem access happens here: every path is a `file`, and `text` or
/// `binary` is added only when the extension decides it.
pub fn tags_for_path(path: &str) -> BTreeSet<&'static str> {
    let normalized = normalize_path(path);
    let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);

    let mut tags = BTreeSet::new();
    tags.insert("file");

    match file_name {
        "Dockerfile" => {
            tags.extend(["dockerfile", "text"]);
        }
        "Makefile" | "GNUmakefile" => {
            tags.extend(["makefile", "text"]);
        }
        "Gemfile" | "Rakefile" => {
            tags.extend(["ruby", "text"]);
        }
        ".travis.yml" | ".pre-commit-config.yaml" => {
            tags.extend(["yaml", "text"]);
        }
        _ => {}
    }

    let extension = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return tags,
    };

    let by_extension: &[&'static str] = match extension.as_str() {
        "py" => &["python", "text"],
        "pyi" => &["python", "pyi", "text"],
        "pyx" | "pxd" => &["cython", "text"],
        "js" | "mjs" | "cjs" => &["javascript", "text"],
        "jsx" => &["javascript", "jsx", "text"],
        "ts" => &["typescript", "text"],
        "tsx" => &["typescript", "tsx", "text"],
        "json" => &["json", "text"],
        "yaml" | "yml" => &["yaml", "text"],
        "toml" => &["toml", "text"],
        "xml" => &["xml", "text"],
        "html" | "htm" => &["html", "text"],
        "css" => &["css", "text"],
        "md" | "markdown" => &["markdown", "text"],
        "rst" => &["rst", "text"],
        "ini" => &["ini", "text"],
        "cfg" => &["cfg", "text"],
        "sh" => &["shell", "text"],
        "bash" => &["shell", "bash", "text"],
        "zsh" => &["shell", "zsh", "text"],
        "fish" => &["fish", "text"],
        "rb" | "gemspec" => &["ruby", "text"],
        "pl" | "pm" => &["perl", "text"],
        "rs" => &["rust", "text"],
        "go" => &["go", "text"],
        "c" => &["c", "text"],
        "h" => &["c", "header", "text"],
        "cc" | "cpp" | "cxx" => &["c++", "text"],
        "hpp" | "hxx" => &["c++", "header", "text"],
        "java" => &["java", "text"],
        "sql" => &["sql", "text"],
        "txt" => &["plain-text", "text"],
        "svg" => &["image", "svg", "xml", "text"],
        "png" => &["image", "png", "binary"],
        "jpg" | "jpeg" => &["image", "jpeg", "binary"],
        "gif" => &["image", "gif", "binary"],
        "pdf" => &["pdf", "binary"],
        "zip" => &["zip", "binary"],
        "gz" => &["gzip", "binary"],
        "tar" => &["tar", "binary"],
        _ => &[],
    };
    tags.extend(by_extension.iter().copied());

    tags
}
