/* src/cli/codegen/src/urlpath.rs */

/// Join URL path fragments: collapse repeated slashes, resolve `.`/`..`,
/// always absolute, never a trailing slash (except the bare root).
pub fn join_url(base: &str, rel: &str) -> String {
  let mut stack: Vec<&str> = Vec::new();
  for seg in base.split('/').chain(rel.split('/')) {
    match seg {
      "" | "." => {}
      ".." => {
        stack.pop();
      }
      s => stack.push(s),
    }
  }
  format!("/{}", stack.join("/"))
}

/// Normalize a single route prefix, e.g. `cluster//x/` -> `/cluster/x`.
pub fn normalize_url(path: &str) -> String {
  join_url("/", path)
}

/// Replace the last segment with `*` for catch-all routes.
pub fn wildcard_of(path: &str) -> String {
  match path.rfind('/') {
    Some(0) | None => "/*".to_string(),
    Some(pos) => format!("{}/*", &path[..pos]),
  }
}
