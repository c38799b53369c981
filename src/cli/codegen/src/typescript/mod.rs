/* src/cli/codegen/src/typescript/mod.rs */

mod expr;
mod i18n;
mod pages;
mod render;
mod scope;

#[cfg(test)]
mod tests;

pub use expr::{ArrowBody, JsExpr, TemplatePart};
pub use i18n::{I18nRuntime, emit_get, emit_registration, emit_use, namespace_value};
pub use pages::{emit_menus, emit_route};
pub use render::{capitalize, quote_str, render_expr};
pub use scope::{ImportScope, RuntimeImport};

use crate::resolve::Piece;

/// A bound `resolveRoute` path: plain string when fully static, template otherwise.
pub fn route_path_expr(pieces: &[Piece]) -> JsExpr {
  if let [Piece::Text(text)] = pieces {
    return JsExpr::str(text);
  }
  JsExpr::Template(
    pieces
      .iter()
      .map(|p| match p {
        Piece::Text(t) => TemplatePart::Text(t.clone()),
        Piece::Expr(e) => TemplatePart::Expr(JsExpr::Raw(e.clone())),
      })
      .collect(),
  )
}
