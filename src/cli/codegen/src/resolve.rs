/* src/cli/codegen/src/resolve.rs */

use std::path::Path;

use crate::error::{MacroError, Result};
use crate::registry::ProjectRegistry;
use crate::urlpath::join_url;

/// A value passed after the relative path of `resolveRoute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteArg {
  /// Compile-time string literal, inlined into the path
  Literal(String),
  /// Any other expression, kept verbatim and substituted at runtime
  Expr(String),
}

/// Piece of a bound route path: static text or a runtime substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
  Text(String),
  Expr(String),
}

/// A joined route path, e.g. `/cluster/:clusterId/backup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
  path: String,
}

impl RoutePath {
  pub fn as_str(&self) -> &str {
    &self.path
  }

  /// `:name` segments in order of appearance.
  pub fn params(&self) -> Vec<&str> {
    self.path.split('/').filter_map(|s| s.strip_prefix(':')).collect()
  }

  /// Substitute values into `:param` segments by position, left to right.
  ///
  /// Unbound placeholders stay in the path as written and surplus values are dropped.
  pub fn bind(&self, args: &[RouteArg]) -> Result<Vec<Piece>> {
    if args.is_empty() {
      return Ok(vec![Piece::Text(self.path.clone())]);
    }
    let placeholders = self.params().len();
    if placeholders == 0 {
      return Err(MacroError::MissingParameter(self.path.clone()));
    }
    if placeholders != args.len() {
      tracing::warn!(
        path = %self.path,
        placeholders,
        supplied = args.len(),
        "resolveRoute parameter count does not match placeholders"
      );
    }

    let mut pieces: Vec<Piece> = Vec::new();
    let mut next = args.iter();
    for (i, seg) in self.path.split('/').enumerate() {
      if i > 0 {
        push_text(&mut pieces, "/");
      }
      let arg = if seg.starts_with(':') { next.next() } else { None };
      match arg {
        Some(RouteArg::Literal(v)) => push_text(&mut pieces, v),
        Some(RouteArg::Expr(e)) => pieces.push(Piece::Expr(e.clone())),
        None => push_text(&mut pieces, seg),
      }
    }
    Ok(pieces)
  }
}

fn push_text(pieces: &mut Vec<Piece>, text: &str) {
  if let Some(Piece::Text(last)) = pieces.last_mut() {
    last.push_str(text);
  } else {
    pieces.push(Piece::Text(text.to_string()));
  }
}

/// Resolve `relative` against the route prefix owning `caller_file`.
pub fn resolve_route(
  registry: &ProjectRegistry,
  caller_file: &Path,
  relative: &str,
) -> Result<RoutePath> {
  let dir = caller_file.parent().unwrap_or(caller_file);
  let (_, this_path) = registry
    .enclosing_route(dir)
    .ok_or_else(|| MacroError::UnregisteredCallSite(caller_file.to_path_buf()))?;
  Ok(RoutePath { path: join_url(this_path, relative) })
}
