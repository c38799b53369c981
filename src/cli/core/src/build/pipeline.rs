/* src/cli/core/src/build/pipeline.rs */

// `pagemacro build` and `pagemacro expand`: transform the whole source tree in
// build order and mirror it into the output directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use pagemacro_codegen::MacroError;

use super::session::{Outcome, Session};
use crate::ui::{self, DIM, RESET};

#[derive(Debug, Default)]
pub struct BuildReport {
  pub transformed: usize,
  pub copied: usize,
  pub failures: Vec<(PathBuf, String)>,
}

/// Render a module failure as `Kind: message`, keeping the macro error kind visible.
pub fn describe_failure(err: &anyhow::Error) -> String {
  match err.downcast_ref::<MacroError>() {
    Some(e) => format!("{}: {e}", e.kind()),
    None => format!("{err:#}"),
  }
}

/// Transform every module in build order; copy everything else when `write` is set.
/// A failing module is recorded and the rest still run.
pub fn run_pipeline(session: &mut Session, write: bool) -> Result<BuildReport> {
  let files = session.collect_files()?;
  let (modules, assets): (Vec<PathBuf>, Vec<PathBuf>) =
    files.into_iter().partition(|p| session.is_module(p));

  let mut report = BuildReport::default();
  for (path, result) in session.process_ordered(&modules, |_| true) {
    match result {
      Ok(Outcome::Transformed(code)) => {
        report.transformed += 1;
        if write {
          write_output(session, &path, &code)?;
        }
      }
      Ok(Outcome::Unchanged(code)) => {
        if write {
          write_output(session, &path, &code)?;
        }
      }
      Ok(Outcome::Fresh) => {}
      Err(e) => report.failures.push((path, describe_failure(&e))),
    }
  }

  if write {
    for path in &assets {
      copy_output(session, path)?;
      report.copied += 1;
    }
  }
  Ok(report)
}

pub fn write_output(session: &Session, file: &Path, content: &str) -> Result<()> {
  let Some(out) = session.output_path(file) else { return Ok(()) };
  if let Some(parent) = out.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(&out, content).with_context(|| format!("failed to write {}", out.display()))
}

pub fn copy_output(session: &Session, file: &Path) -> Result<()> {
  let Some(out) = session.output_path(file) else { return Ok(()) };
  if let Some(parent) = out.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::copy(file, &out)
    .with_context(|| format!("failed to copy {} to {}", file.display(), out.display()))?;
  Ok(())
}

fn print_failures(session: &Session, failures: &[(PathBuf, String)]) {
  for (path, msg) in failures {
    let rel = path.strip_prefix(&session.root).unwrap_or(path);
    ui::error(&format!("{}", rel.display()));
    ui::detail(&format!("{DIM}{msg}{RESET}"));
  }
}

/// `pagemacro build`
pub fn run_build(session: &mut Session) -> Result<()> {
  let started = Instant::now();
  let out_dir = session.out_dir();
  ui::banner("build", Some(&session.config.source.dir));

  ui::step(1, 2, "expanding macros");
  let report = run_pipeline(session, true)?;
  ui::detail(&format!(
    "{} module(s) expanded, {} file(s) copied",
    report.transformed, report.copied
  ));

  ui::step(2, 2, &format!("output written to {}", out_dir.display()));
  if !report.failures.is_empty() {
    print_failures(session, &report.failures);
    bail!("{} module(s) failed to expand", report.failures.len());
  }
  ui::ok(&format!("build complete ({:.1}s)", started.elapsed().as_secs_f64()));
  Ok(())
}

/// `pagemacro expand <FILE>`: run the pipeline in memory, return one module's text.
pub fn expand_file(session: &mut Session, file: &Path) -> Result<String> {
  let file = file.canonicalize().with_context(|| format!("failed to resolve {}", file.display()))?;
  if !file.starts_with(session.src_dir()) {
    bail!("{} is outside the source tree {}", file.display(), session.src_dir().display());
  }
  let report = run_pipeline(session, false)?;
  if let Some((_, msg)) = report.failures.iter().find(|(p, _)| *p == file) {
    bail!("{msg}");
  }
  match session.cache.get(&file) {
    Some(module) => Ok(module.output.clone()),
    None => {
      std::fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))
    }
  }
}
