/* src/cli/codegen/src/page/name.rs */

// Lexer for page directory names: `[index]name`, `[protect]`, `_param`.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Ordering/visibility variant encoded by the `[N]` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "order", rename_all = "camelCase")]
pub enum PageKind {
  /// `N > 0`: visible menu item, ordered ascending by `N`
  MenuItem(u32),
  /// `N < 0`: routable but hidden, ordered ascending by `|N|`
  Hidden(u32),
  /// `N == 0`: wildcard catch-all
  Fallback,
}

impl PageKind {
  fn from_index(index: i64) -> Option<Self> {
    let magnitude = u32::try_from(index.unsigned_abs()).ok()?;
    Some(match index.signum() {
      1 => Self::MenuItem(magnitude),
      -1 => Self::Hidden(magnitude),
      _ => Self::Fallback,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
  pub kind: PageKind,
  pub protect: bool,
  /// Route segment, `_param` already rewritten to `:param`
  pub segment: String,
  /// Segment with brackets and parameter marker stripped
  pub endpoint: String,
}

fn index_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\[([-+]?\d+)](_)?").expect("valid regex"))
}

fn protect_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\[protect]").expect("valid regex"))
}

fn bracket_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\[[^\]]*]").expect("valid regex"))
}

/// Parse a raw directory name. `None` means the directory is not a page node.
pub fn parse_dir_name(raw: &str) -> Option<ParsedName> {
  let caps = index_re().captures(raw)?;
  let index: i64 = caps[1].parse().ok()?;
  let kind = PageKind::from_index(index)?;
  let protect = protect_re().is_match(raw);
  // only `<digit>]_name` marks a parameter; `_` after any other token is literal
  let is_param = caps.get(2).is_some();

  let cleaned = bracket_re().replace_all(raw, "").into_owned();
  let (segment, endpoint) = match cleaned.strip_prefix('_') {
    Some(param) if is_param => (format!(":{param}"), param.to_string()),
    _ => (cleaned.clone(), cleaned),
  };

  Some(ParsedName { kind, protect, segment, endpoint })
}

/// Strip brackets from a name that is not itself a page (e.g. the pages root).
pub fn clean_name(raw: &str) -> String {
  bracket_re().replace_all(raw, "").into_owned()
}
