/* src/cli/core/src/build/cache.rs */

// Per-module record of the last transform: source fingerprint, generated code
// and the dependency tags used to invalidate it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::host::ModuleDeps;

/// Hex-encoded SHA-256 of a module's source text.
pub fn fingerprint(src: &str) -> String {
  hex::encode(Sha256::digest(src.as_bytes()))
}

#[derive(Debug, Clone)]
pub struct CachedModule {
  pub fingerprint: String,
  pub deps: ModuleDeps,
  pub output: String,
}

#[derive(Debug, Default)]
pub struct ModuleCache {
  modules: BTreeMap<PathBuf, CachedModule>,
}

impl ModuleCache {
  pub fn get(&self, path: &Path) -> Option<&CachedModule> {
    self.modules.get(path)
  }

  pub fn insert(&mut self, path: PathBuf, module: CachedModule) {
    self.modules.insert(path, module);
  }

  pub fn remove(&mut self, path: &Path) -> Option<CachedModule> {
    self.modules.remove(path)
  }

  /// Unchanged text that nothing invalidated can be skipped.
  pub fn is_fresh(&self, path: &Path, fingerprint: &str) -> bool {
    self.modules.get(path).is_some_and(|m| m.fingerprint == fingerprint)
  }

  fn select(&self, pred: impl Fn(&ModuleDeps) -> bool) -> Vec<PathBuf> {
    self.modules.iter().filter(|(_, m)| pred(&m.deps)).map(|(p, _)| p.clone()).collect()
  }

  /// Modules tagged as depending on page structure.
  pub fn page_dependents(&self) -> Vec<PathBuf> {
    self.select(|d| d.page_structure)
  }

  /// Modules whose expansion read files under `dir`.
  pub fn dir_dependents(&self, dir: &Path) -> Vec<PathBuf> {
    self.select(|d| d.watches(dir))
  }

  /// Modules that resolve i18n namespaces.
  pub fn namespace_dependents(&self) -> Vec<PathBuf> {
    self.select(|d| d.namespaces)
  }

  pub fn registers(&self, path: &Path) -> bool {
    self.modules.get(path).is_some_and(|m| m.deps.registers)
  }

  /// Forget every module at or below `path`. Returns how many were dropped.
  pub fn remove_under(&mut self, path: &Path) -> usize {
    let before = self.modules.len();
    self.modules.retain(|p, _| !p.starts_with(path));
    before - self.modules.len()
  }
}
