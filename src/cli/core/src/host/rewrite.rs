/* src/cli/core/src/host/rewrite.rs */

// Text splicing: macro calls are replaced in place, the macro import removed,
// and generated imports plus prelude statements land after the import block.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
  pub start: usize,
  pub end: usize,
  pub text: String,
}

impl Edit {
  pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
    Self { start, end, text: text.into() }
  }

  pub fn insert(at: usize, text: impl Into<String>) -> Self {
    Self::replace(at, at, text)
  }
}

/// Apply non-overlapping edits. Inserts at the same offset keep their given order.
pub(crate) fn apply(src: &str, mut edits: Vec<Edit>) -> String {
  edits.sort_by_key(|e| (e.start, e.end));
  let mut out = String::with_capacity(src.len());
  let mut cursor = 0;
  for edit in edits {
    debug_assert!(edit.start >= cursor, "overlapping edits");
    out.push_str(&src[cursor..edit.start]);
    out.push_str(&edit.text);
    cursor = edit.end;
  }
  out.push_str(&src[cursor..]);
  out
}

/// Extend `end` past trailing spaces and one line break, so removing a whole
/// statement does not leave a blank line.
pub(crate) fn line_end(src: &str, end: usize) -> usize {
  let rest = &src[end..];
  let trimmed = rest.trim_start_matches([' ', '\t']);
  let after_spaces = end + (rest.len() - trimmed.len());
  if trimmed.starts_with("\r\n") {
    after_spaces + 2
  } else if trimmed.starts_with('\n') {
    after_spaces + 1
  } else {
    end
  }
}

/// Indentation depth (two spaces per level) of the line containing `pos`.
pub(crate) fn indent_depth(src: &str, pos: usize) -> usize {
  let line_start = src[..pos].rfind('\n').map_or(0, |n| n + 1);
  let indent = src[line_start..].chars().take_while(|c| *c == ' ').count();
  indent / 2
}

/// A replacement starting with `(` at the start of a statement needs a leading `;`
/// when the previous statement may lack one.
pub(crate) fn needs_asi_guard(src: &str, pos: usize, replacement: &str) -> bool {
  if !replacement.starts_with('(') {
    return false;
  }
  match src[..pos].trim_end().chars().last() {
    None => false,
    Some(c) => {
      !matches!(c, ';' | '{' | '}' | '(' | '[' | ',' | '=' | ':' | '?' | '&' | '|' | '!' | '>')
    }
  }
}
