// Revision pins and their resolution against local git mirrors
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use git2::{BranchType, Commit, Repository};
use tracing::{debug, info};

use crate::config::{Document, Source};
use crate::error::{HookregError, Result, RevisionError};

/// Names that follow a moving target instead of a fixed snapshot
const FLOATING_NAMES: &[&str] = &[
    "HEAD", "FETCH_HEAD", "ORIG_HEAD", "main", "master", "trunk", "develop", "latest", "stable",
];

/// Why a revision string cannot be used as a pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinRejection {
    Empty,
    FloatingName,
    RelativeSyntax,
    Whitespace,
}

impl fmt::Display for PinRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinRejection::Empty => f.write_str("revision must not be empty"),
            PinRejection::FloatingName => f.write_str("names a moving branch or ref"),
            PinRejection::RelativeSyntax => {
                f.write_str("relative revision syntax (~, ^, @{) is not a fixed snapshot")
            }
            PinRejection::Whitespace => f.write_str("revision must not contain whitespace"),
        }
    }
}

/// An immutable reference to a hook collection snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionPin {
    /// Abbreviated (7+) or full (40) hexadecimal commit id
    Commit(String),
    /// Any other non-floating name; resolves only through `refs/tags/`
    Tag(String),
}

impl RevisionPin {
    pub fn parse(revision: &str) -> std::result::Result<Self, PinRejection> {
        if revision.is_empty() {
            return Err(PinRejection::Empty);
        }
        if revision.chars().any(char::is_whitespace) {
            return Err(PinRejection::Whitespace);
        }
        if FLOATING_NAMES.contains(&revision) || revision.starts_with("refs/heads/") {
            return Err(PinRejection::FloatingName);
        }
        if revision.contains('~') || revision.contains('^') || revision.contains("@{") {
            return Err(PinRejection::RelativeSyntax);
        }

        if (7..=40).contains(&revision.len()) && revision.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(RevisionPin::Commit(revision.to_string()))
        } else {
            Ok(RevisionPin::Tag(revision.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RevisionPin::Commit(rev) | RevisionPin::Tag(rev) => rev,
        }
    }

    pub fn is_commit(&self) -> bool {
        matches!(self, RevisionPin::Commit(_))
    }
}

impl fmt::Display for RevisionPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a pinned revision of a hook collection to a full commit id
pub trait RevisionResolver {
    fn resolve(&self, location: &str, pin: &RevisionPin) -> Result<String>;
}

/// Resolver backed by local git checkouts of each remote location
#[derive(Debug, Default, Clone)]
pub struct GitMirrorResolver {
    mirrors: HashMap<String, PathBuf>,
}

impl GitMirrorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mirror(mut self, location: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.mirrors.insert(location.into(), path.into());
        self
    }

    pub fn mirror_for(&self, location: &str) -> Option<&Path> {
        self.mirrors.get(location).map(PathBuf::as_path)
    }
}

impl RevisionResolver for GitMirrorResolver {
    fn resolve(&self, location: &str, pin: &RevisionPin) -> Result<String> {
        let path = self.mirror_for(location).ok_or_else(|| RevisionError::NoMirror {
            location: location.to_string(),
            suggestion: Some(format!("pass --mirror {location}=<path to a local clone>")),
        })?;

        debug!("Resolving {} in mirror {}", pin, path.display());
        let repo = Repository::open(path).map_err(|e| RevisionError::Git {
            message: e.message().to_string(),
            path: Some(path.to_path_buf()),
        })?;

        let commit = match pin {
            RevisionPin::Tag(name) => resolve_tag(&repo, name)?,
            RevisionPin::Commit(prefix) => resolve_commit(&repo, prefix)?,
        };
        Ok(commit.id().to_string())
    }
}

/// Look the name up under `refs/tags/` only; branches never satisfy a pin
fn resolve_tag<'r>(repo: &'r Repository, name: &str) -> Result<Commit<'r>> {
    let tag_ref = name.strip_prefix("refs/tags/").unwrap_or(name);
    let reference = repo
        .find_reference(&format!("refs/tags/{tag_ref}"))
        .map_err(|_| not_fixed(repo, format!("no tag named '{tag_ref}'")))?;
    Ok(reference.peel_to_commit()?)
}

fn resolve_commit<'r>(repo: &'r Repository, prefix: &str) -> Result<Commit<'r>> {
    if repo.find_branch(prefix, BranchType::Local).is_ok() {
        return Err(not_fixed(
            repo,
            format!("'{prefix}' is also a branch name"),
        ));
    }

    let commit = repo.revparse_single(prefix)?.peel_to_commit()?;
    // a ref with a hexadecimal name can shadow the object id
    if !commit.id().to_string().starts_with(&prefix.to_ascii_lowercase()) {
        return Err(not_fixed(
            repo,
            format!("'{prefix}' names a ref, not commit {}", commit.id()),
        ));
    }
    Ok(commit)
}

fn not_fixed(repo: &Repository, message: String) -> HookregError {
    RevisionError::Git {
        message,
        path: Some(repo.path().to_path_buf()),
    }
    .into()
}

/// A remote source whose pin resolved to a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPin {
    pub entry: usize,
    pub location: String,
    pub revision: RevisionPin,
    pub commit: String,
}

impl Document {
    /// Resolve every remote pin in document order.
    ///
    /// Stops at the first pin that does not resolve; there is no fallback to
    /// an unpinned revision.
    pub fn verify_pins(&self, resolver: &dyn RevisionResolver) -> Result<Vec<ResolvedPin>> {
        let mut resolved = Vec::new();

        for (entry_idx, entry) in self.repos.iter().enumerate() {
            let Source::Remote { location, revision } = &entry.source else {
                continue;
            };

            let commit = resolver.resolve(location, revision).map_err(|e| {
                RevisionError::Unresolvable {
                    location: location.clone(),
                    revision: revision.to_string(),
                    entry: entry_idx,
                    error: e.to_string(),
                }
            })?;

            info!(
                entry = entry_idx,
                location = %location,
                revision = %revision,
                commit = %commit,
                "Revision pin resolved"
            );
            resolved.push(ResolvedPin {
                entry: entry_idx,
                location: location.clone(),
                revision: revision.clone(),
                commit,
            });
        }

        Ok(resolved)
    }
}
