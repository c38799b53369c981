/* src/cli/codegen/src/typescript/i18n.rs */

use super::expr::JsExpr;
use super::scope::{ImportScope, RuntimeImport};
use crate::i18n::{LoadedNamespace, NamespaceArg};

/// Where the i18n instance and the React hook come from.
#[derive(Debug, Clone)]
pub struct I18nRuntime {
  /// Module whose default export is the i18n instance
  pub instance: String,
  pub hook: RuntimeImport,
}

/// Deferred bundle registration: runs now if the runtime is initialized,
/// otherwise once it emits `initialized`.
pub fn emit_registration(
  ns: &LoadedNamespace,
  scope: &mut dyn ImportScope,
  runtime: &I18nRuntime,
) -> JsExpr {
  let i18n = JsExpr::Ident(scope.default_import(&runtime.instance, "i18n"));
  let adds = ns
    .resources
    .iter()
    .map(|res| {
      let local = scope.default_import(&res.import, &format!("i18n_{}", res.lang));
      i18n.clone().member("addResourceBundle").call(vec![
        JsExpr::str(&res.lang),
        JsExpr::str(&ns.id),
        JsExpr::Ident(local),
        JsExpr::Bool(true),
        JsExpr::Bool(true),
      ])
    })
    .collect();

  let guard = JsExpr::arrow(
    &["register"],
    JsExpr::cond(
      i18n.clone().member("isInitialized"),
      JsExpr::ident("register").call(vec![]),
      i18n.member("on").call(vec![JsExpr::str("initialized"), JsExpr::ident("register")]),
    ),
  );
  guard.call(vec![JsExpr::arrow_block(&[], adds)])
}

/// The namespace argument itself (`resolveNamespace()`).
pub fn namespace_value(ns: &NamespaceArg) -> JsExpr {
  match ns {
    NamespaceArg::Single(id) => JsExpr::str(id),
    NamespaceArg::Chain(ids) => JsExpr::Array(ids.iter().map(JsExpr::str).collect()),
  }
}

/// `useI18n()` -> `useTranslation(ns)`
pub fn emit_use(ns: &NamespaceArg, scope: &mut dyn ImportScope, runtime: &I18nRuntime) -> JsExpr {
  let hook = scope.named_import(&runtime.hook.from, &runtime.hook.name);
  JsExpr::ident(hook).call(vec![namespace_value(ns)])
}

/// `getI18n()` -> `i18n.getFixedT(null, ns)`
pub fn emit_get(ns: &NamespaceArg, scope: &mut dyn ImportScope, runtime: &I18nRuntime) -> JsExpr {
  let i18n = scope.default_import(&runtime.instance, "i18n");
  JsExpr::ident(i18n).member("getFixedT").call(vec![JsExpr::Null, namespace_value(ns)])
}
