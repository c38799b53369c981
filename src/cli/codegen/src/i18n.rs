/* src/cli/codegen/src/i18n.rs */

// Path-derived translation namespaces: `loadI18n` registers, `useI18n` resolves.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{MacroError, Result};
use crate::glob::{relative_import, resolve_glob, to_slash};
use crate::registry::ProjectRegistry;

pub const NAMESPACE_SEPARATOR: char = '|';

/// Namespace id of a directory: its project-relative path joined with `|`.
pub fn namespace_id(dir: &Path, root: &Path) -> String {
  let rel = dir.strip_prefix(root).unwrap_or(dir);
  to_slash(rel).replace('/', &NAMESPACE_SEPARATOR.to_string())
}

fn lang_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"([^/]+)\.ya?ml$").expect("valid regex"))
}

/// Language tag from a resource file name: `en.yaml` -> `en`.
pub fn lang_tag(path: &Path) -> Option<String> {
  let name = path.file_name()?.to_string_lossy();
  let tag = lang_re().captures(&name)?.get(1)?.as_str().to_string();
  (tag.chars().count() >= 2).then_some(tag)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
  pub lang: String,
  pub path: PathBuf,
  /// Import specifier as seen from the calling module
  pub import: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedNamespace {
  pub id: String,
  pub resources: Vec<Resource>,
}

pub struct LoadRequest<'a> {
  pub glob: &'a str,
  /// Directory the glob and namespace are relative to
  pub cwd: &'a Path,
  /// Directory of the calling module
  pub importer_dir: &'a Path,
  pub root: &'a Path,
  /// Optional whitelist; files with other tags are dropped
  pub languages: Option<&'a [String]>,
}

/// Discover resources for a `loadI18n` call and register its namespace.
pub fn load_namespace(
  registry: &mut ProjectRegistry,
  req: &LoadRequest<'_>,
) -> Result<LoadedNamespace> {
  let resolved = resolve_glob(req.glob, req.cwd, req.root)?;
  let files = resolved.find_files()?;

  let mut resources = Vec::new();
  for path in files {
    let Some(lang) = lang_tag(&path) else { continue };
    if req.languages.is_some_and(|allowed| !allowed.contains(&lang)) {
      continue;
    }
    let import = if req.cwd == req.importer_dir {
      resolved.import_path_for(&path).unwrap_or_else(|| relative_import(req.importer_dir, &path))
    } else {
      relative_import(req.importer_dir, &path)
    };
    resources.push(Resource { lang, path, import });
  }
  if resources.is_empty() {
    tracing::warn!(glob = req.glob, cwd = %req.cwd.display(), "loadI18n matched no resource files");
  }

  let id = namespace_id(req.cwd, req.root);
  registry.register_namespace(&id);
  Ok(LoadedNamespace { id, resources })
}

/// Resources of a page-level `translations` directory, registered under the page id.
pub fn load_page_translations(
  registry: &mut ProjectRegistry,
  page_id: &str,
  dir: &Path,
  languages: Option<&[String]>,
  import_for: &dyn Fn(&Path) -> String,
) -> Result<LoadedNamespace> {
  let mut resources = Vec::new();
  for ext in ["yaml", "yml"] {
    let resolved = resolve_glob(&format!("./*.{ext}"), dir, dir)?;
    for path in resolved.find_files()? {
      let Some(lang) = lang_tag(&path) else { continue };
      if languages.is_some_and(|allowed| !allowed.contains(&lang)) {
        continue;
      }
      let import = import_for(&path);
      resources.push(Resource { lang, path, import });
    }
  }
  resources.sort_by(|a, b| a.path.cmp(&b.path));
  registry.register_namespace(page_id);
  Ok(LoadedNamespace { id: page_id.to_string(), resources })
}

/// Namespace argument handed to the translation runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceArg {
  Single(String),
  /// Specific namespace first, then global namespaces in configured order
  Chain(Vec<String>),
}

/// Resolve the namespace a `useI18n`/`getI18n` call in `caller_file` reads from.
pub fn resolve_namespace(
  registry: &ProjectRegistry,
  caller_file: &Path,
  root: &Path,
  global_namespaces: &[String],
) -> Result<NamespaceArg> {
  let dir = caller_file.parent().unwrap_or(caller_file);
  let caller_id = namespace_id(dir, root);
  let specific = registry
    .resolve_namespace(&caller_id)
    .ok_or_else(|| MacroError::NamespaceNotLoaded(caller_id.clone()))?;
  tracing::debug!(caller = %caller_id, namespace = specific, "resolved i18n namespace");

  if global_namespaces.is_empty() {
    return Ok(NamespaceArg::Single(specific.to_string()));
  }
  let mut chain = vec![specific.to_string()];
  chain.extend(global_namespaces.iter().filter(|g| g.as_str() != specific).cloned());
  Ok(NamespaceArg::Chain(chain))
}
