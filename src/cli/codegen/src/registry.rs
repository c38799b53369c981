/* src/cli/codegen/src/registry.rs */

// Process-wide tables filled while modules are transformed:
// directory -> route prefix, and the set of loaded i18n namespace ids.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Owned by one build/watch session and passed to every macro handler.
#[derive(Debug, Default, Clone)]
pub struct ProjectRegistry {
  routes: BTreeMap<PathBuf, String>,
  namespaces: BTreeSet<String>,
}

impl ProjectRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register_route(&mut self, dir: &Path, route: &str) {
    tracing::debug!(dir = %dir.display(), route, "register route prefix");
    self.routes.insert(dir.to_path_buf(), route.to_string());
  }

  /// Most specific registered ancestor of `dir` (inclusive), by path segments.
  pub fn enclosing_route(&self, dir: &Path) -> Option<(&Path, &str)> {
    dir
      .ancestors()
      .find_map(|a| self.routes.get_key_value(a).map(|(k, v)| (k.as_path(), v.as_str())))
  }

  /// Drop every route entry at or below `dir`. Returns how many were removed.
  pub fn prune_under(&mut self, dir: &Path) -> usize {
    let before = self.routes.len();
    self.routes.retain(|k, _| !k.starts_with(dir));
    let removed = before - self.routes.len();
    if removed > 0 {
      tracing::debug!(dir = %dir.display(), removed, "pruned route prefixes");
    }
    removed
  }

  pub fn routes(&self) -> impl Iterator<Item = (&Path, &str)> {
    self.routes.iter().map(|(k, v)| (k.as_path(), v.as_str()))
  }

  pub fn register_namespace(&mut self, id: &str) {
    if self.namespaces.insert(id.to_string()) {
      tracing::debug!(namespace = id, "register i18n namespace");
    }
  }

  /// Longest registered namespace id that prefixes `caller_id` on a `|` boundary.
  pub fn resolve_namespace(&self, caller_id: &str) -> Option<&str> {
    self
      .namespaces
      .iter()
      .filter(|id| is_segment_prefix(id, caller_id))
      .max_by_key(|id| id.len())
      .map(String::as_str)
  }

  /// Route prefixes plus namespaces currently registered.
  pub fn entry_count(&self) -> usize {
    self.routes.len() + self.namespaces.len()
  }
}

fn is_segment_prefix(id: &str, caller: &str) -> bool {
  if id.is_empty() {
    return true;
  }
  match caller.strip_prefix(id) {
    Some(rest) => rest.is_empty() || rest.starts_with('|'),
    None => false,
  }
}
