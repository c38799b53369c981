/* src/cli/core/src/build/tests.rs */

use std::fs;
use std::path::{Path, PathBuf};

use super::pipeline::run_pipeline;
use super::session::build_order;
use super::*;
use crate::config::PagemacroConfig;
use crate::host::ModuleScan;

fn project() -> (tempfile::TempDir, Session) {
  let tmp = tempfile::tempdir().unwrap();
  let root = tmp.path().canonicalize().unwrap();
  fs::write(root.join("package.json"), "{}").unwrap();
  let session = Session::new(root, PagemacroConfig::default());
  (tmp, session)
}

fn write(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, content).unwrap();
}

fn seed_pages(root: &Path) {
  write(root, "src/pages/[1]_clusterId/meta.tsx", "export default {}");
  write(root, "src/pages/[1]_clusterId/[2]backup/meta.tsx", "export default {}");
  write(
    root,
    "src/pages/[1]_clusterId/[2]backup/index.tsx",
    "import { resolveRoute } from \"pages.macro\";\n\
     export const up = resolveRoute(\"..\", \"abc\");\n",
  );
  // sorts before App.tsx lexically and is shallower than the page module
  write(
    root,
    "src/App.tsx",
    "import { loadRoutes } from \"pages.macro\";\n\
     export default loadRoutes(\"./pages\", \"/cluster\");\n",
  );
}

#[test]
fn registering_modules_come_first() {
  let scan = |registers| ModuleScan { uses_macros: true, registers };
  let order = build_order(vec![
    (PathBuf::from("/p/src/a.tsx"), scan(false)),
    (PathBuf::from("/p/src/pages/[1]x/view.tsx"), scan(true)),
    (PathBuf::from("/p/src/App.tsx"), scan(true)),
    (PathBuf::from("/p/src/z/b.tsx"), ModuleScan::default()),
  ]);
  assert_eq!(
    order,
    vec![
      PathBuf::from("/p/src/App.tsx"),
      PathBuf::from("/p/src/pages/[1]x/view.tsx"),
      PathBuf::from("/p/src/a.tsx"),
      PathBuf::from("/p/src/z/b.tsx"),
    ]
  );
}

#[test]
fn build_mirrors_tree_and_expands_in_order() {
  let (_tmp, mut session) = project();
  let root = session.root.clone();
  seed_pages(&root);
  write(&root, "src/styles/app.css", "body {}");
  write(&root, "src/util.ts", "export const x = 1;\n");

  let report = run_pipeline(&mut session, true).unwrap();
  assert!(report.failures.is_empty(), "{:?}", report.failures);
  assert_eq!(report.transformed, 2);

  let out = root.join(".pagemacro/out");
  let page = fs::read_to_string(out.join("pages/[1]_clusterId/[2]backup/index.tsx")).unwrap();
  assert!(page.contains("export const up = \"/cluster/abc\";"));
  assert_eq!(fs::read_to_string(out.join("util.ts")).unwrap(), "export const x = 1;\n");
  assert_eq!(fs::read_to_string(out.join("styles/app.css")).unwrap(), "body {}");
}

#[test]
fn deep_routes_module_still_registers_first() {
  let (_tmp, mut session) = project();
  let root = session.root.clone();
  write(
    &root,
    "src/app/router/config/routes.ts",
    "import { loadRoutes } from \"pages.macro\";\nexport default loadRoutes(\"../../../pages\");\n",
  );
  write(&root, "src/pages/[1]_clusterId/meta.tsx", "export default {}");
  write(
    &root,
    "src/pages/[1]_clusterId/index.tsx",
    "import { resolveRoute } from \"pages.macro\";\nexport const here = resolveRoute();\n",
  );
  // registering, shallower than routes.ts, and needs the pages root registered
  write(
    &root,
    "src/pages/Nav.tsx",
    "import { loadMenus } from \"pages.macro\";\nexport const menus = loadMenus(\".\");\n",
  );

  let report = run_pipeline(&mut session, true).unwrap();
  assert!(report.failures.is_empty(), "{:?}", report.failures);
  assert_eq!(report.transformed, 3);
  let out = root.join(".pagemacro/out/pages");
  let page = fs::read_to_string(out.join("[1]_clusterId/index.tsx")).unwrap();
  assert!(page.contains("export const here = \"/:clusterId\";"), "{page}");
  let nav = fs::read_to_string(out.join("Nav.tsx")).unwrap();
  assert!(nav.contains("\"/:clusterId\""), "{nav}");
}

#[test]
fn unresolvable_module_is_reported_once() {
  let (_tmp, mut session) = project();
  let root = session.root.clone();
  seed_pages(&root);
  let src = "import { resolveRoute } from \"pages.macro\";\nresolveRoute();\n";
  write(&root, "src/other/view.ts", src);
  let report = run_pipeline(&mut session, true).unwrap();
  assert_eq!(report.failures.len(), 1);
  assert!(report.failures[0].0.ends_with("src/other/view.ts"));
}

#[test]
fn failing_module_does_not_stop_others() {
  let (_tmp, mut session) = project();
  let root = session.root.clone();
  let src = "import { resolveRoute } from \"pages.macro\";\nresolveRoute(\".\");\n";
  write(&root, "src/bad.ts", src);
  write(&root, "src/good.ts", "export const ok = true;\n");

  let report = run_pipeline(&mut session, true).unwrap();
  assert_eq!(report.failures.len(), 1);
  assert!(report.failures[0].1.starts_with("UnregisteredCallSiteError: "));
  assert!(root.join(".pagemacro/out/good.ts").is_file());
  assert!(run_build(&mut session).is_err());
}

#[test]
fn expand_returns_one_module() {
  let (_tmp, mut session) = project();
  let root = session.root.clone();
  seed_pages(&root);
  let file = root.join("src/pages/[1]_clusterId/[2]backup/index.tsx");
  let out = expand_file(&mut session, &file).unwrap();
  assert!(out.contains("\"/cluster/abc\""));
  assert!(!root.join(".pagemacro/out").exists());
}

#[test]
fn unchanged_module_is_fresh() {
  let (_tmp, mut session) = project();
  let root = session.root.clone();
  seed_pages(&root);
  run_pipeline(&mut session, false).unwrap();
  let app = root.join("src/App.tsx");
  assert_eq!(session.process_module(&app, false).unwrap(), Outcome::Fresh);
  assert!(matches!(session.process_module(&app, true).unwrap(), Outcome::Transformed(_)));
}
