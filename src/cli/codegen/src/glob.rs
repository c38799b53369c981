/* src/cli/codegen/src/glob.rs */

// Resolves `./`, `../` and `/`-rooted import globs against an importer directory
// and maps discovered files back to import specifiers.

use std::path::{Component, Path, PathBuf};

use crate::error::{MacroError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportBase {
  /// `/`-prefixed: rooted at the project root
  Absolute,
  /// `../` repeated n times
  Parent(usize),
  /// `./` or a bare `.`
  Current,
}

#[derive(Debug, Clone)]
pub struct ResolvedGlob {
  /// Directory the remaining pattern is matched under
  pub base: PathBuf,
  /// Pattern remainder, relative to `base`, `/`-separated; empty means `base` itself
  pub rest: String,
  mode: ImportBase,
}

/// Resolve an import glob written in `importer_dir` (the directory of the importing
/// module) against the project `root`.
pub fn resolve_glob(pattern: &str, importer_dir: &Path, root: &Path) -> Result<ResolvedGlob> {
  if let Some(rest) = pattern.strip_prefix('/') {
    return Ok(ResolvedGlob {
      base: root.to_path_buf(),
      rest: rest.to_string(),
      mode: ImportBase::Absolute,
    });
  }
  if !pattern.starts_with('.') {
    return Err(MacroError::configuration(format!(
      "import pattern \"{pattern}\" must start with \".\" or \"/\""
    )));
  }

  let mut base = importer_dir.to_path_buf();
  let mut rest = pattern;
  let mut depth = 0usize;
  loop {
    if let Some(r) = rest.strip_prefix("../") {
      rest = r;
    } else if rest == ".." {
      rest = "";
    } else {
      break;
    }
    base.pop();
    depth += 1;
  }
  if let Some(r) = rest.strip_prefix("./") {
    rest = r;
  } else if rest == "." {
    rest = "";
  }

  let mode = if depth > 0 { ImportBase::Parent(depth) } else { ImportBase::Current };
  Ok(ResolvedGlob { base, rest: rest.trim_end_matches('/').to_string(), mode })
}

impl ResolvedGlob {
  /// Absolute path the pattern names when it contains no wildcard.
  pub fn target(&self) -> PathBuf {
    if self.rest.is_empty() { self.base.clone() } else { self.base.join(&self.rest) }
  }

  /// Map a `/`-separated path, relative to `base`, to an import specifier.
  pub fn resolve_import_path(&self, found_relative: &str) -> String {
    let found = found_relative.trim_start_matches("./");
    match self.mode {
      ImportBase::Absolute => format!("/{found}"),
      ImportBase::Parent(depth) => format!("{}{found}", "../".repeat(depth)),
      ImportBase::Current => format!("./{found}"),
    }
  }

  /// Import specifier for an absolute path under `base`.
  pub fn import_path_for(&self, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(&self.base).ok()?;
    Some(self.resolve_import_path(&to_slash(rel)))
  }

  /// Expand the pattern under `base`, skipping any `node_modules` subtree.
  /// Results are absolute file paths in lexical order.
  pub fn find_files(&self) -> Result<Vec<PathBuf>> {
    let escaped_base = glob::Pattern::escape(&self.base.to_string_lossy());
    let full = if self.rest.is_empty() {
      escaped_base
    } else {
      format!("{}/{}", escaped_base.trim_end_matches('/'), self.rest)
    };
    let entries = glob::glob(&full)
      .map_err(|source| MacroError::Pattern { pattern: self.rest.clone(), source })?;

    let mut files = Vec::new();
    for entry in entries {
      let path = match entry {
        Ok(p) => p,
        Err(e) => {
          tracing::debug!(error = %e, "skipping unreadable glob entry");
          continue;
        }
      };
      let in_node_modules = path
        .strip_prefix(&self.base)
        .map(|rel| rel.components().any(|c| c.as_os_str() == "node_modules"))
        .unwrap_or(false);
      if !in_node_modules && path.is_file() {
        files.push(path);
      }
    }
    files.sort();
    Ok(files)
  }
}

/// Render a relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
  path
    .components()
    .filter_map(|c| match c {
      Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
      Component::ParentDir => Some("..".to_string()),
      _ => None,
    })
    .collect::<Vec<_>>()
    .join("/")
}

/// Relative import specifier from a module directory to a target file.
pub fn relative_import(from_dir: &Path, target: &Path) -> String {
  let from: Vec<_> = from_dir.components().collect();
  let to: Vec<_> = target.components().collect();
  let common = from.iter().zip(to.iter()).take_while(|(a, b)| a == b).count();
  let ups = from.len() - common;
  let down: PathBuf = to[common..].iter().collect();
  let down = to_slash(&down);
  if ups == 0 { format!("./{down}") } else { format!("{}{down}", "../".repeat(ups)) }
}
