/* src/cli/codegen/src/typescript/pages.rs */

use super::expr::JsExpr;
use super::scope::{ImportScope, RuntimeImport};
use crate::menu::Menu;
use crate::page::ModuleRef;
use crate::route::{Route, RouteComponent};

const NOT_IMPLEMENTED: &str = "NOT IMPLEMENTED YET";

/// Route tree as an object literal; imports are allocated through `scope`.
pub fn emit_route(route: &Route, scope: &mut dyn ImportScope, lazy: &RuntimeImport) -> JsExpr {
  let children = route.children.iter().map(|c| emit_route(c, scope, lazy)).collect();
  JsExpr::Object(vec![
    ("id".into(), JsExpr::str(&route.id)),
    ("name".into(), JsExpr::str(&route.name)),
    ("path".into(), JsExpr::str(&route.path)),
    ("exact".into(), JsExpr::Bool(route.exact)),
    ("isMenuItem".into(), JsExpr::Bool(route.is_menu_item)),
    ("sync".into(), JsExpr::Bool(route.sync)),
    ("component".into(), emit_component(&route.component, scope, lazy)),
    ("meta".into(), emit_meta(route.meta.as_ref(), scope)),
    ("children".into(), JsExpr::Array(children)),
  ])
}

/// Menu list as an array literal.
pub fn emit_menus(menus: &[Menu], scope: &mut dyn ImportScope) -> JsExpr {
  JsExpr::Array(menus.iter().map(|m| emit_menu(m, scope)).collect())
}

fn emit_menu(menu: &Menu, scope: &mut dyn ImportScope) -> JsExpr {
  JsExpr::Object(vec![
    ("id".into(), JsExpr::str(&menu.id)),
    ("name".into(), JsExpr::str(&menu.name)),
    ("path".into(), JsExpr::str(&menu.path)),
    ("meta".into(), emit_meta(menu.meta.as_ref(), scope)),
    ("children".into(), emit_menus(&menu.children, scope)),
  ])
}

fn emit_component(
  component: &RouteComponent,
  scope: &mut dyn ImportScope,
  lazy: &RuntimeImport,
) -> JsExpr {
  match component {
    RouteComponent::Module(m) if m.sync => JsExpr::Ident(scope.default_import(&m.import, "page")),
    RouteComponent::Module(m) => {
      let wrapper = scope.named_import(&lazy.from, &lazy.name);
      JsExpr::ident(wrapper).call(vec![JsExpr::arrow(&[], JsExpr::Import(m.import.clone()))])
    }
    RouteComponent::PassThrough => JsExpr::arrow(&["{ children }"], JsExpr::ident("children")),
    RouteComponent::NotImplemented => JsExpr::arrow(&[], JsExpr::str(NOT_IMPLEMENTED)),
  }
}

fn emit_meta(meta: Option<&ModuleRef>, scope: &mut dyn ImportScope) -> JsExpr {
  match meta {
    Some(m) => JsExpr::Ident(scope.default_import(&m.import, "meta")),
    None => JsExpr::Undefined,
  }
}
