/* src/cli/codegen/src/page/loader.rs */

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::name::{PageKind, clean_name, parse_dir_name};
use crate::error::{MacroError, Result};
use crate::glob::{ResolvedGlob, resolve_glob, to_slash};
use crate::i18n::namespace_id;
use crate::urlpath::{join_url, normalize_url};

const META_FILES: &[&str] = &["meta.tsx", "meta.ts"];
const INDEX_FILES: &[(&str, bool)] = &[("index.sync.tsx", true), ("index.tsx", false)];
const LAYOUT_FILES: &[(&str, bool)] = &[
  ("layout.sync.tsx", true),
  ("layouts.sync.tsx", true),
  ("layout.tsx", false),
  ("layouts.tsx", false),
];
const TRANSLATION_DIRS: &[&str] = &["translations", "translation"];

/// Whether adding or removing a file with this name changes a page's shape.
pub fn is_convention_file(name: &str) -> bool {
  META_FILES.contains(&name) || INDEX_FILES.iter().chain(LAYOUT_FILES).any(|(f, _)| *f == name)
}

pub fn is_translation_dir(name: &str) -> bool {
  TRANSLATION_DIRS.contains(&name)
}

/// A convention file inside a page directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRef {
  #[serde(skip)]
  pub path: PathBuf,
  /// Import specifier as seen from the calling module (extension stripped)
  pub import: String,
  /// Inline import instead of a lazy dynamic import
  pub sync: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageImports {
  pub meta: Option<ModuleRef>,
  pub index: Option<ModuleRef>,
  pub layout: Option<ModuleRef>,
  /// Directory holding per-language `*.yaml`/`*.yml` resources
  #[serde(skip_serializing_if = "Option::is_none")]
  pub translations: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageRoute {
  pub endpoint: String,
  pub full: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
  pub id: String,
  pub raw_name: String,
  #[serde(skip)]
  pub dir_path: PathBuf,
  /// `None` only for the pages root
  pub kind: Option<PageKind>,
  pub protect: bool,
  pub route: PageRoute,
  pub imports: PageImports,
  pub children: Vec<PageNode>,
}

impl PageNode {
  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }
}

/// A loaded pages tree plus the resolver that produced its import paths.
#[derive(Debug, Clone)]
pub struct PageTree {
  pub root: PageNode,
  pub resolver: ResolvedGlob,
}

impl PageTree {
  /// Import specifier (as seen from the calling module) for any file under the pages root.
  pub fn import_path(&self, path: &Path) -> Option<String> {
    self.resolver.import_path_for(path)
  }
}

pub struct LoadOptions<'a> {
  /// Pages-root pattern as written at the call site, e.g. `./pages`
  pub pages: &'a str,
  /// Route prefix of the pages root
  pub prefix: &'a str,
  pub root: &'a Path,
  /// Directory of the calling module
  pub importer_dir: &'a Path,
  pub allow_no_meta: bool,
}

/// Walk the pages directory depth-first and build the page tree.
///
/// `on_node` is called for every node once it is fully built (children first), so a
/// failure part-way leaves only complete nodes registered.
pub fn load_page_tree(
  opts: &LoadOptions<'_>,
  on_node: &mut dyn FnMut(&PageNode),
) -> Result<PageTree> {
  let resolver = resolve_glob(opts.pages, opts.importer_dir, opts.root)?;
  let pages_dir = resolver.target();
  if !pages_dir.is_dir() {
    return Err(MacroError::configuration(format!(
      "pages directory {} does not exist",
      pages_dir.display()
    )));
  }

  let raw_name =
    pages_dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
  let root_frame = Frame {
    dir: pages_dir.clone(),
    raw_name: raw_name.clone(),
    kind: None,
    protect: false,
    endpoint: clean_name(&raw_name),
    full: normalize_url(opts.prefix),
  };
  let loader = Loader { opts, resolver: &resolver };
  let root = loader.visit(root_frame, on_node)?;
  Ok(PageTree { root, resolver })
}

struct Frame {
  dir: PathBuf,
  raw_name: String,
  kind: Option<PageKind>,
  protect: bool,
  endpoint: String,
  full: String,
}

struct Loader<'a> {
  opts: &'a LoadOptions<'a>,
  resolver: &'a ResolvedGlob,
}

impl Loader<'_> {
  fn visit(&self, frame: Frame, on_node: &mut dyn FnMut(&PageNode)) -> Result<PageNode> {
    let (dirs, files) = read_entries(&frame.dir)?;
    let imports = self.locate_conventions(&frame.dir, &dirs, &files);

    if frame.kind.is_some() && imports.meta.is_none() && !self.opts.allow_no_meta {
      return Err(MacroError::structural(format!(
        "page {} has no meta.tsx/meta.ts",
        frame.dir.display()
      )));
    }

    let mut children = Vec::new();
    for name in &dirs {
      let Some(parsed) = parse_dir_name(name) else { continue };
      let child = Frame {
        dir: frame.dir.join(name),
        raw_name: name.clone(),
        kind: Some(parsed.kind),
        protect: parsed.protect,
        endpoint: parsed.endpoint,
        full: join_url(&frame.full, &parsed.segment),
      };
      children.push(self.visit(child, on_node)?);
    }

    let fallbacks = children.iter().filter(|c| c.kind == Some(PageKind::Fallback)).count();
    if fallbacks > 1 {
      return Err(MacroError::structural(format!(
        "{} has {fallbacks} [0] fallback pages, at most one is allowed",
        frame.dir.display()
      )));
    }
    if children.is_empty() && imports.index.is_none() {
      return Err(MacroError::structural(format!(
        "leaf page {} has no index.tsx",
        frame.dir.display()
      )));
    }

    let node = PageNode {
      id: namespace_id(&frame.dir, self.opts.root),
      raw_name: frame.raw_name,
      dir_path: frame.dir,
      kind: frame.kind,
      protect: frame.protect,
      route: PageRoute { endpoint: frame.endpoint, full: frame.full },
      imports,
      children,
    };
    on_node(&node);
    Ok(node)
  }

  fn locate_conventions(&self, dir: &Path, dirs: &[String], files: &[String]) -> PageImports {
    let has_file = |name: &str| files.iter().any(|f| f == name);

    let meta = META_FILES
      .iter()
      .find(|f| has_file(**f))
      .map(|f| self.module_ref(&dir.join(f), true));
    let index = INDEX_FILES
      .iter()
      .find(|(f, _)| has_file(*f))
      .map(|(f, sync)| self.module_ref(&dir.join(f), *sync));
    let layout = LAYOUT_FILES
      .iter()
      .find(|(f, _)| has_file(*f))
      .map(|(f, sync)| self.module_ref(&dir.join(f), *sync));
    let translations = TRANSLATION_DIRS
      .iter()
      .find(|d| dirs.iter().any(|x| x == *d))
      .map(|d| dir.join(d));

    PageImports { meta, index, layout, translations }
  }

  fn module_ref(&self, path: &Path, sync: bool) -> ModuleRef {
    let import = match path.strip_prefix(&self.resolver.base) {
      Ok(rel) => self.resolver.resolve_import_path(&strip_module_ext(&to_slash(rel))),
      Err(_) => to_slash(path),
    };
    ModuleRef { path: path.to_path_buf(), import, sync }
  }
}

/// Directory entries split into (subdirectories, files), each sorted by name.
fn read_entries(dir: &Path) -> Result<(Vec<String>, Vec<String>)> {
  let entries = std::fs::read_dir(dir).map_err(|e| MacroError::io(dir, e))?;
  let mut dirs = Vec::new();
  let mut files = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|e| MacroError::io(dir, e))?;
    let name = entry.file_name().to_string_lossy().into_owned();
    let file_type = entry.file_type().map_err(|e| MacroError::io(entry.path(), e))?;
    if file_type.is_dir() {
      dirs.push(name);
    } else {
      files.push(name);
    }
  }
  dirs.sort();
  files.sort();
  Ok((dirs, files))
}

fn strip_module_ext(path: &str) -> String {
  for ext in [".tsx", ".ts", ".jsx", ".js"] {
    if let Some(stem) = path.strip_suffix(ext) {
      return stem.to_string();
    }
  }
  path.to_string()
}
