/* src/cli/core/src/dev/batch.rs */

// Applies one debounced batch of filesystem events to a running session.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::classify::{Change, FsChange, classify};
use crate::build::{Outcome, Session, copy_output, describe_failure, write_output};

#[derive(Debug, Default)]
pub struct BatchSummary {
  pub rebuilt: usize,
  pub copied: usize,
  pub pruned: usize,
  pub failures: Vec<(PathBuf, String)>,
}

impl BatchSummary {
  pub fn is_empty(&self) -> bool {
    self.rebuilt == 0 && self.copied == 0 && self.pruned == 0 && self.failures.is_empty()
  }
}

#[derive(Default)]
struct Plan {
  structure: bool,
  translation_dirs: BTreeSet<PathBuf>,
  sources: BTreeSet<PathBuf>,
  assets: BTreeSet<PathBuf>,
}

/// Invalidate, re-transform and re-mirror whatever `events` touched. Failures are
/// collected, never returned: the next event retries.
pub fn apply_batch(session: &mut Session, events: &[(PathBuf, FsChange)]) -> BatchSummary {
  let mut summary = BatchSummary::default();
  let mut plan = Plan::default();

  for (path, change) in events {
    if *change == FsChange::Removed {
      summary.pruned += session.registry.prune_under(path);
      session.cache.remove_under(path);
      remove_output(session, path);
    }
    match classify(session, path, *change) {
      Change::Structure => {
        plan.structure = true;
        if path.is_file() {
          if session.is_module(path) {
            plan.sources.insert(path.clone());
          } else {
            plan.assets.insert(path.clone());
          }
        }
      }
      Change::Translation(dir) => {
        plan.translation_dirs.insert(dir);
        if path.is_file() {
          plan.assets.insert(path.clone());
        }
      }
      Change::Source(p) if p.is_file() => {
        plan.sources.insert(p);
      }
      Change::Asset(p) if p.is_file() => {
        plan.assets.insert(p);
      }
      Change::Source(_) | Change::Asset(_) | Change::Ignored => {}
    }
  }

  let mut forced: BTreeSet<PathBuf> = BTreeSet::new();
  if plan.structure {
    forced.extend(session.cache.page_dependents());
  }
  for dir in &plan.translation_dirs {
    forced.extend(session.cache.dir_dependents(dir));
  }
  let registries_touched = plan.structure
    || !plan.translation_dirs.is_empty()
    || plan.sources.iter().any(|p| session.cache.registers(p));
  if registries_touched {
    forced.extend(session.cache.namespace_dependents());
  }
  tracing::debug!(
    structure = plan.structure,
    forced = forced.len(),
    sources = plan.sources.len(),
    "dev batch planned"
  );

  let candidates: Vec<PathBuf> =
    forced.union(&plan.sources).filter(|p| p.is_file()).cloned().collect();
  for (path, result) in session.process_ordered(&candidates, |p| forced.contains(p)) {
    let result = result.and_then(|outcome| match outcome {
      Outcome::Transformed(code) | Outcome::Unchanged(code) => {
        write_output(session, &path, &code)?;
        Ok(true)
      }
      Outcome::Fresh => Ok(false),
    });
    match result {
      Ok(true) => summary.rebuilt += 1,
      Ok(false) => {}
      Err(e) => summary.failures.push((path, describe_failure(&e))),
    }
  }

  for path in &plan.assets {
    match copy_output(session, path) {
      Ok(()) => summary.copied += 1,
      Err(e) => summary.failures.push((path.clone(), format!("{e:#}"))),
    }
  }
  summary
}

fn remove_output(session: &Session, path: &Path) {
  let Some(out) = session.output_path(path) else { return };
  let result =
    if out.is_dir() { std::fs::remove_dir_all(&out) } else { std::fs::remove_file(&out) };
  if let Err(e) = result
    && e.kind() != std::io::ErrorKind::NotFound
  {
    tracing::warn!(path = %out.display(), error = %e, "failed to remove stale output");
  }
}
