/* src/cli/codegen/src/typescript/tests.rs */

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::*;
use crate::i18n::{LoadedNamespace, NamespaceArg, Resource};
use crate::page::ModuleRef;
use crate::resolve::Piece;
use crate::route::{Route, RouteComponent};

/// Records allocations; dedupes by (source, name).
#[derive(Default)]
struct RecordingScope {
  bindings: BTreeMap<(String, String), String>,
}

impl ImportScope for RecordingScope {
  fn default_import(&mut self, source: &str, hint: &str) -> String {
    let n = self.bindings.len();
    self
      .bindings
      .entry((source.to_string(), "default".to_string()))
      .or_insert_with(|| format!("__pm_{hint}_{n}"))
      .clone()
  }

  fn named_import(&mut self, source: &str, name: &str) -> String {
    self
      .bindings
      .entry((source.to_string(), name.to_string()))
      .or_insert_with(|| format!("__pm_{name}"))
      .clone()
  }
}

fn module(import: &str, sync: bool) -> ModuleRef {
  ModuleRef { path: PathBuf::from(import), import: import.to_string(), sync }
}

fn leaf(id: &str, path: &str, component: RouteComponent) -> Route {
  let sync = matches!(&component, RouteComponent::Module(m) if m.sync);
  Route {
    id: id.into(),
    name: "Leaf".into(),
    path: path.into(),
    exact: true,
    is_menu_item: true,
    sync,
    component,
    meta: None,
    translations: None,
    children: vec![],
  }
}

#[test]
fn render_nested_object() {
  let expr = JsExpr::Object(vec![
    ("id".into(), JsExpr::str("a")),
    ("children".into(), JsExpr::Array(vec![JsExpr::Object(vec![])])),
  ]);
  assert_eq!(render_expr(&expr, 0), "{\n  id: \"a\",\n  children: [\n    {},\n  ],\n}");
}

#[test]
fn render_quotes_non_identifier_keys() {
  let expr = JsExpr::Object(vec![("a-b".into(), JsExpr::Bool(true))]);
  assert_eq!(render_expr(&expr, 0), "{\n  \"a-b\": true,\n}");
}

#[test]
fn render_iife_wraps_arrow_callee() {
  let expr = JsExpr::arrow(&["r"], JsExpr::ident("r").call(vec![])).call(vec![JsExpr::Null]);
  assert_eq!(render_expr(&expr, 0), "((r) => r())(null)");
}

#[test]
fn template_escapes_backticks() {
  let expr = route_path_expr(&[Piece::Text("/a`/".into()), Piece::Expr("id".into())]);
  assert_eq!(render_expr(&expr, 0), "`/a\\`/${id}`");
}

#[test]
fn static_route_path_is_string_literal() {
  let expr = route_path_expr(&[Piece::Text("/cluster/abc".into())]);
  assert_eq!(render_expr(&expr, 0), "\"/cluster/abc\"");
}

#[test]
fn lazy_component_uses_runtime_wrapper() {
  let mut scope = RecordingScope::default();
  let route = leaf("x", "/x", RouteComponent::Module(module("./pages/[1]x/index", false)));
  let out = render_expr(&emit_route(&route, &mut scope, &RuntimeImport::new("lazy", "react")), 0);
  assert!(out.contains("component: __pm_lazy(() => import(\"./pages/[1]x/index\")),"));
  assert!(out.contains("sync: false,"));
  assert!(out.contains("meta: undefined,"));
}

#[test]
fn sync_component_is_direct_reference() {
  let mut scope = RecordingScope::default();
  let route = leaf("x", "/x", RouteComponent::Module(module("./pages/[1]x/index.sync", true)));
  let out = render_expr(&emit_route(&route, &mut scope, &RuntimeImport::new("lazy", "react")), 0);
  assert!(out.contains("component: __pm_page_0,"));
}

#[test]
fn placeholder_components() {
  let mut scope = RecordingScope::default();
  let lazy = RuntimeImport::new("lazy", "react");
  let route = leaf("x", "/x", RouteComponent::NotImplemented);
  let out = render_expr(&emit_route(&route, &mut scope, &lazy), 0);
  assert!(out.contains("component: () => \"NOT IMPLEMENTED YET\","));
  let route = leaf("x", "/x", RouteComponent::PassThrough);
  let out = render_expr(&emit_route(&route, &mut scope, &lazy), 0);
  assert!(out.contains("component: ({ children }) => children,"));
}

#[test]
fn shared_meta_is_imported_once() {
  let mut scope = RecordingScope::default();
  let mut route = leaf("x", "/x", RouteComponent::PassThrough);
  route.meta = Some(module("./pages/meta", true));
  let mut child = leaf("x|index", "/x", RouteComponent::NotImplemented);
  child.meta = Some(module("./pages/meta", true));
  route.children.push(child);
  let out = render_expr(&emit_route(&route, &mut scope, &RuntimeImport::new("lazy", "react")), 0);
  assert_eq!(out.matches("meta: __pm_meta_0,").count(), 2);
  assert_eq!(scope.bindings.len(), 1);
}

#[test]
fn registration_guards_on_initialization() {
  let mut scope = RecordingScope::default();
  let ns = LoadedNamespace {
    id: "src|app".into(),
    resources: vec![Resource {
      lang: "en".into(),
      path: PathBuf::from("/p/src/app/en.yaml"),
      import: "./en.yaml".into(),
    }],
  };
  let runtime = I18nRuntime {
    instance: "i18next".into(),
    hook: RuntimeImport::new("useTranslation", "react-i18next"),
  };
  let out = render_expr(&emit_registration(&ns, &mut scope, &runtime), 0);
  assert_eq!(
    out,
    "((register) => __pm_i18n_0.isInitialized ? register() : \
     __pm_i18n_0.on(\"initialized\", register))(() => {\n  \
     __pm_i18n_0.addResourceBundle(\"en\", \"src|app\", __pm_i18n_en_1, true, true);\n})"
  );
}

#[test]
fn use_and_get_pass_namespace_chain() {
  let mut scope = RecordingScope::default();
  let runtime = I18nRuntime {
    instance: "i18next".into(),
    hook: RuntimeImport::new("useTranslation", "react-i18next"),
  };
  let ns = NamespaceArg::Chain(vec!["a|b".into(), "common".into()]);
  let used = render_expr(&emit_use(&ns, &mut scope, &runtime), 0);
  assert_eq!(used, "__pm_useTranslation([\n  \"a|b\",\n  \"common\",\n])");
  let got = render_expr(&emit_get(&NamespaceArg::Single("a".into()), &mut scope, &runtime), 0);
  assert!(got.ends_with(".getFixedT(null, \"a\")"));
}
