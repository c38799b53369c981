/* src/cli/core/src/build/session.rs */

// One build or watch session: configuration, the shared project registry and the
// module cache. Modules are transformed strictly one at a time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagemacro_codegen::{MacroError, ProjectRegistry};

use super::cache::{CachedModule, ModuleCache, fingerprint};
use crate::config::PagemacroConfig;
use crate::host::{ModuleScan, scan_module, transform_module};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Macros expanded; carries the generated code
  Transformed(String),
  /// Module without macro imports, output is the source
  Unchanged(String),
  /// Fingerprint hit, nothing to do
  Fresh,
}

pub struct Session {
  pub root: PathBuf,
  pub config: PagemacroConfig,
  pub registry: ProjectRegistry,
  pub cache: ModuleCache,
}

impl Session {
  pub fn new(root: PathBuf, config: PagemacroConfig) -> Self {
    Self { root, config, registry: ProjectRegistry::new(), cache: ModuleCache::default() }
  }

  pub fn src_dir(&self) -> PathBuf {
    self.root.join(&self.config.source.dir)
  }

  pub fn out_dir(&self) -> PathBuf {
    self.root.join(&self.config.source.out_dir)
  }

  /// Mirrored location of a source-tree file in the output tree.
  pub fn output_path(&self, file: &Path) -> Option<PathBuf> {
    let rel = file.strip_prefix(self.src_dir()).ok()?;
    Some(self.out_dir().join(rel))
  }

  pub fn is_module(&self, path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| self.config.is_source_ext(ext))
  }

  /// Every file under the source tree, skipping `node_modules` and the output tree.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let out_dir = self.out_dir();
    walk(&self.src_dir(), &out_dir, &mut files)?;
    files.sort();
    Ok(files)
  }

  /// Transform one module. `force` ignores the fingerprint, for invalidated modules.
  pub fn process_module(&mut self, path: &Path, force: bool) -> Result<Outcome> {
    let src =
      std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let fp = fingerprint(&src);
    if !force && self.cache.is_fresh(path, &fp) {
      tracing::debug!(file = %path.display(), "fingerprint unchanged, skipping");
      return Ok(Outcome::Fresh);
    }

    let transformed = transform_module(&src, path, &self.root, &self.config, &mut self.registry)
      .with_context(|| format!("failed to expand macros in {}", path.display()))?;
    Ok(match transformed {
      Some(t) => {
        self.cache.insert(
          path.to_path_buf(),
          CachedModule { fingerprint: fp, deps: t.deps, output: t.code.clone() },
        );
        Outcome::Transformed(t.code)
      }
      None => {
        self.cache.remove(path);
        Outcome::Unchanged(src)
      }
    })
  }

  /// Build order: registering modules first, then other macro users, then plain
  /// modules; inside a stage, shallower paths first, then lexical.
  pub fn order_modules(&self, modules: &[PathBuf]) -> Vec<PathBuf> {
    let scanned: Vec<(PathBuf, ModuleScan)> = modules
      .iter()
      .map(|p| {
        let scan = std::fs::read_to_string(p)
          .map(|src| scan_module(&src, p, &self.config))
          .unwrap_or_default();
        (p.clone(), scan)
      })
      .collect();
    build_order(scanned)
  }

  /// Transform `modules` in build order. Modules that failed only because their
  /// route or namespace was not registered yet run again, forced, after every pass
  /// that grew the registry.
  pub fn process_ordered(
    &mut self,
    modules: &[PathBuf],
    force: impl Fn(&Path) -> bool,
  ) -> Vec<(PathBuf, Result<Outcome>)> {
    let mut results = Vec::new();
    let mut pending = self.order_modules(modules);
    let mut retry = false;
    loop {
      let before = self.registry.entry_count();
      let mut waiting = Vec::new();
      for path in pending {
        let result = self.process_module(&path, retry || force(&path));
        if result.as_ref().is_err_and(awaits_registration) {
          waiting.push((path, result));
        } else {
          results.push((path, result));
        }
      }
      if waiting.is_empty() || self.registry.entry_count() == before {
        results.extend(waiting);
        return results;
      }
      tracing::debug!(modules = waiting.len(), "registry grew, retrying");
      pending = waiting.into_iter().map(|(p, _)| p).collect();
      retry = true;
    }
  }
}

fn awaits_registration(err: &anyhow::Error) -> bool {
  matches!(
    err.downcast_ref::<MacroError>(),
    Some(MacroError::UnregisteredCallSite(_) | MacroError::NamespaceNotLoaded(_))
  )
}

pub(crate) fn build_order(mut scanned: Vec<(PathBuf, ModuleScan)>) -> Vec<PathBuf> {
  scanned.sort_by(|(a, sa), (b, sb)| {
    let key = |p: &PathBuf, s: &ModuleScan| (!s.registers, !s.uses_macros, p.components().count());
    (key(a, sa), a).cmp(&(key(b, sb), b))
  });
  scanned.into_iter().map(|(p, _)| p).collect()
}

fn walk(dir: &Path, skip: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
  let entries =
    std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
  for entry in entries {
    let entry = entry?;
    let path = entry.path();
    if path.starts_with(skip) || entry.file_name() == "node_modules" {
      continue;
    }
    if entry.file_type()?.is_dir() {
      walk(&path, skip, files)?;
    } else {
      files.push(path);
    }
  }
  Ok(())
}
