// File selection and invocation planning for a loaded document
use tracing::debug;

use crate::config::{Document, HookSpec, SourceEntry};
use crate::pattern::normalize_path;
use crate::tags::tags_for_path;

/// What a hook receives on its command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    /// Matched paths, in the order they were given
    Files(Vec<String>),
    /// A single run over the whole repository (`pass_filenames: false`)
    WholeRepository,
}

/// One planned run of a hook
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<'a> {
    pub entry_index: usize,
    pub hook_index: usize,
    pub source: &'a SourceEntry,
    pub hook: &'a HookSpec,
    pub arguments: Arguments,
}

impl HookSpec {
    /// Whether this hook's own filters select `path`.
    ///
    /// A missing `files` pattern selects every path; a missing `exclude`
    /// excludes nothing.
    pub fn selects(&self, path: &str) -> bool {
        let path = normalize_path(path);

        if let Some(ref exclude) = self.exclude {
            if exclude.is_match(&path) {
                return false;
            }
        }
        if let Some(ref files) = self.files {
            if !files.is_match(&path) {
                return false;
            }
        }

        let has_type_filters = self.types.as_ref().is_some_and(|t| !t.is_empty())
            || self.exclude_types.as_ref().is_some_and(|t| !t.is_empty());
        if !has_type_filters {
            return true;
        }

        let tags = tags_for_path(&path);
        if let Some(ref exclude_types) = self.exclude_types {
            if exclude_types.iter().any(|t| tags.contains(t.as_str())) {
                return false;
            }
        }
        // every listed type must apply
        match self.types {
            Some(ref types) => types.iter().all(|t| tags.contains(t.as_str())),
            None => true,
        }
    }

    /// Filter `paths`, keeping input order
    pub fn select<'p, S: AsRef<str>>(&self, paths: &'p [S]) -> Vec<&'p str> {
        paths
            .iter()
            .map(AsRef::as_ref)
            .filter(|path| self.selects(path))
            .collect()
    }
}

impl Document {
    /// Whether the document-level `files`/`exclude` keep `path`
    pub fn includes(&self, path: &str) -> bool {
        let path = normalize_path(path);
        if let Some(ref exclude) = self.exclude {
            if exclude.is_match(&path) {
                return false;
            }
        }
        match self.files {
            Some(ref files) => files.is_match(&path),
            None => true,
        }
    }

    /// Plan the hook runs for a set of candidate paths, in document order.
    ///
    /// Hooks with `pass_filenames: false` get exactly one whole-repository
    /// invocation however many paths match. Hooks that match nothing are
    /// skipped unless `always_run` is set.
    pub fn plan_invocations<S: AsRef<str>>(&self, paths: &[S]) -> Vec<Invocation<'_>> {
        let candidates: Vec<String> = paths
            .iter()
            .map(|p| normalize_path(p.as_ref()).into_owned())
            .filter(|p| self.includes(p))
            .collect();

        let mut plan = Vec::new();
        for (entry_index, source) in self.repos.iter().enumerate() {
            for (hook_index, hook) in source.hooks.iter().enumerate() {
                let matched: Vec<String> = hook
                    .select(&candidates)
                    .into_iter()
                    .map(str::to_string)
                    .collect();

                if matched.is_empty() && !hook.runs_always() {
                    debug!(hook_id = %hook.id, "No files matched, skipping");
                    continue;
                }

                debug!(
                    hook_id = %hook.id,
                    file_count = matched.len(),
                    pass_filenames = hook.passes_filenames(),
                    "Hook selected"
                );
                let arguments = if hook.passes_filenames() {
                    Arguments::Files(matched)
                } else {
                    Arguments::WholeRepository
                };

                plan.push(Invocation {
                    entry_index,
                    hook_index,
                    source,
                    hook,
                    arguments,
                });
            }
        }

        plan
    }
}
