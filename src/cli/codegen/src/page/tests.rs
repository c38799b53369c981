/* src/cli/codegen/src/page/tests.rs */

use std::fs;
use std::path::{Path, PathBuf};

use super::*;
use crate::error::MacroError;
use crate::menu::synthesize_menus;
use crate::registry::ProjectRegistry;
use crate::resolve::{Piece, RouteArg, resolve_route};
use crate::route::{RouteComponent, synthesize_routes};

struct Project {
  _tmp: tempfile::TempDir,
  root: PathBuf,
}

impl Project {
  fn new() -> Self {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    fs::create_dir_all(root.join("src/pages")).unwrap();
    Self { _tmp: tmp, root }
  }

  fn pages(&self) -> PathBuf {
    self.root.join("src/pages")
  }

  /// Page with meta and index.
  fn leaf(&self, rel: &str) -> &Self {
    let dir = self.pages().join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("meta.tsx"), "export default {}").unwrap();
    fs::write(dir.join("index.tsx"), "export default () => null").unwrap();
    self
  }

  /// Page with meta only; expected to get children.
  fn section(&self, rel: &str) -> &Self {
    let dir = self.pages().join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("meta.tsx"), "export default {}").unwrap();
    self
  }

  fn load_with(
    &self,
    prefix: &str,
    allow_no_meta: bool,
    on_node: &mut dyn FnMut(&PageNode),
  ) -> crate::Result<PageTree> {
    let importer_dir = self.root.join("src");
    let opts = LoadOptions {
      pages: "./pages",
      prefix,
      root: &self.root,
      importer_dir: &importer_dir,
      allow_no_meta,
    };
    load_page_tree(&opts, on_node)
  }

  fn load(&self) -> PageTree {
    self.load_with("/", false, &mut |_| {}).unwrap()
  }
}

fn child_paths(route: &crate::route::Route) -> Vec<&str> {
  route.children.iter().map(|c| c.path.as_str()).collect()
}

#[test]
fn visible_then_hidden_then_fallback() {
  let p = Project::new();
  p.leaf("[2]b").leaf("[1]a").leaf("[-2]x").leaf("[-1]login").leaf("[0]notfound");
  let routes = synthesize_routes(&p.load().root);
  assert_eq!(child_paths(&routes), vec!["/a", "/b", "/login", "/x", "/*"]);
  let flags: Vec<bool> = routes.children.iter().map(|c| c.is_menu_item).collect();
  assert_eq!(flags, vec![true, true, false, false, false]);
}

#[test]
fn hidden_page_sorts_after_menu_item() {
  let p = Project::new();
  p.leaf("[-1]login").leaf("[1]dashboard");
  let routes = synthesize_routes(&p.load().root);
  let names: Vec<&str> = routes.children.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, vec!["Dashboard", "Login"]);
  assert!(routes.children[0].is_menu_item);
  assert!(!routes.children[1].is_menu_item);
}

#[test]
fn equal_indices_break_ties_by_name() {
  let p = Project::new();
  p.leaf("[1]zeta").leaf("[1]alpha");
  let routes = synthesize_routes(&p.load().root);
  assert_eq!(child_paths(&routes), vec!["/alpha", "/zeta"]);
}

#[test]
fn fallback_is_inexact_wildcard() {
  let p = Project::new();
  p.section("[-2]_x").section("[-2]_x/[1]y").leaf("[-2]_x/[1]y/[0]z");
  let routes = synthesize_routes(&p.load().root);
  let y = &routes.children[0].children[0];
  assert_eq!(y.path, "/:x/y");
  let z = &y.children[0];
  assert_eq!(z.path, "/:x/y/*");
  assert!(!z.exact);
  assert!(!z.is_menu_item);
}

#[test]
fn at_most_one_fallback() {
  let p = Project::new();
  p.leaf("[0]a").leaf("[0]b");
  let err = p.load_with("/", false, &mut |_| {}).unwrap_err();
  assert!(matches!(err, MacroError::Structural(_)));
}

#[test]
fn leaf_without_index_is_structural_error() {
  let p = Project::new();
  p.section("[1]empty");
  let err = p.load_with("/", false, &mut |_| {}).unwrap_err();
  assert_eq!(err.kind(), "StructuralError");
}

#[test]
fn meta_required_unless_allowed() {
  let p = Project::new();
  let dir = p.pages().join("[1]bare");
  fs::create_dir_all(&dir).unwrap();
  fs::write(dir.join("index.tsx"), "").unwrap();

  assert!(matches!(p.load_with("/", false, &mut |_| {}), Err(MacroError::Structural(_))));
  let tree = p.load_with("/", true, &mut |_| {}).unwrap();
  assert!(tree.root.children[0].imports.meta.is_none());
}

#[test]
fn directories_without_index_token_are_ignored() {
  let p = Project::new();
  p.leaf("[1]a");
  fs::create_dir_all(p.pages().join("components")).unwrap();
  fs::create_dir_all(p.pages().join("[1]a/translations")).unwrap();
  let tree = p.load();
  assert_eq!(tree.root.children.len(), 1);
  assert!(tree.root.children[0].is_leaf());
  assert!(tree.root.children[0].imports.translations.is_some());
}

#[test]
fn conventions_resolve_to_import_specifiers() {
  let p = Project::new();
  p.leaf("[1]a");
  fs::write(p.pages().join("[1]a/index.sync.tsx"), "").unwrap();
  let tree = p.load();
  let a = &tree.root.children[0];
  assert_eq!(a.id, "src|pages|[1]a");
  assert_eq!(a.imports.meta.as_ref().unwrap().import, "./pages/[1]a/meta");
  let index = a.imports.index.as_ref().unwrap();
  assert_eq!(index.import, "./pages/[1]a/index.sync");
  assert!(index.sync);
}

#[test]
fn section_with_index_gets_exact_index_child() {
  let p = Project::new();
  p.leaf("[1]a").leaf("[1]a/[1]b");
  let routes = synthesize_routes(&p.load().root);
  let a = &routes.children[0];
  assert!(!a.exact);
  assert_eq!(a.component, RouteComponent::PassThrough);
  assert_eq!(a.children[0].id, "src|pages|[1]a|index");
  assert_eq!(a.children[0].path, "/a");
  assert!(a.children[0].exact);
  assert_eq!(a.children[1].path, "/a/b");
}

#[test]
fn layout_wraps_section() {
  let p = Project::new();
  p.section("[1]a").leaf("[1]a/[1]b");
  fs::write(p.pages().join("[1]a/layout.tsx"), "").unwrap();
  let routes = synthesize_routes(&p.load().root);
  let a = &routes.children[0];
  assert!(matches!(&a.component, RouteComponent::Module(m) if !m.sync));
  assert!(!a.sync);
  assert_eq!(a.children.len(), 1);
}

#[test]
fn menus_skip_hidden_and_truncate_protected() {
  let p = Project::new();
  p.section("[1][protect]admin").leaf("[1][protect]admin/[1]users");
  p.section("[2]docs").leaf("[2]docs/[1]intro").leaf("[2]docs/[-1]draft");
  p.leaf("[-1]login");
  let menus = synthesize_menus(&p.load().root);
  let paths: Vec<&str> = menus.iter().map(|m| m.path.as_str()).collect();
  assert_eq!(paths, vec!["/admin", "/docs"]);
  assert!(menus[0].children.is_empty());
  assert_eq!(menus[1].children.len(), 1);
  assert_eq!(menus[1].children[0].path, "/docs/intro");
}

#[test]
fn loading_twice_is_identical() {
  let p = Project::new();
  p.section("[1]a").leaf("[1]a/[1]b").leaf("[-1]c").leaf("[0]d");
  let first = serde_json::to_string(&synthesize_routes(&p.load().root)).unwrap();
  let second = serde_json::to_string(&synthesize_routes(&p.load().root)).unwrap();
  assert_eq!(first, second);
}

#[test]
fn nodes_are_reported_children_first() {
  let p = Project::new();
  p.section("[1]a").leaf("[1]a/[1]b");
  let mut seen = Vec::new();
  p.load_with("/", false, &mut |n| seen.push(n.id.clone())).unwrap();
  assert_eq!(seen, vec!["src|pages|[1]a|[1]b", "src|pages|[1]a", "src|pages"]);
}

#[test]
fn failure_keeps_completed_nodes_only() {
  let p = Project::new();
  p.leaf("[1]good").section("[2]broken");
  let mut seen = Vec::new();
  let result = p.load_with("/", false, &mut |n| seen.push(n.id.clone()));
  assert!(result.is_err());
  assert_eq!(seen, vec!["src|pages|[1]good"]);
}

#[test]
fn resolve_route_from_nested_page() {
  let p = Project::new();
  p.section("[1]_clusterId").leaf("[1]_clusterId/[2]backup");
  let mut registry = ProjectRegistry::new();
  p.load_with("/cluster", false, &mut |n| registry.register_route(&n.dir_path, &n.route.full))
    .unwrap();

  let caller: PathBuf = p.pages().join("[1]_clusterId/[2]backup/index.tsx");
  let path = resolve_route(&registry, &caller, "..").unwrap();
  assert_eq!(path.as_str(), "/cluster/:clusterId");
  let pieces = path.bind(&[RouteArg::Literal("abc".into())]).unwrap();
  assert_eq!(pieces, vec![Piece::Text("/cluster/abc".into())]);
}

#[test]
fn missing_pages_dir_is_configuration_error() {
  let p = Project::new();
  let importer_dir = p.root.join("src");
  let opts = LoadOptions {
    pages: "./nope",
    prefix: "/",
    root: Path::new(&p.root),
    importer_dir: &importer_dir,
    allow_no_meta: false,
  };
  let err = load_page_tree(&opts, &mut |_| {}).unwrap_err();
  assert_eq!(err.kind(), "ConfigurationError");
}

#[test]
fn convention_names() {
  assert!(is_convention_file("meta.ts"));
  assert!(is_convention_file("index.sync.tsx"));
  assert!(is_convention_file("layouts.tsx"));
  assert!(!is_convention_file("view.tsx"));
  assert!(is_translation_dir("translation"));
  assert!(!is_translation_dir("locales"));
}
