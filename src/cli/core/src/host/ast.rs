/* src/cli/core/src/host/ast.rs */

/// One `import ... from "..."` declaration (or a bare side-effect import).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportDecl {
  pub start: usize,
  pub end: usize,
  pub source: String,
  pub type_only: bool,
  pub default: Option<String>,
  pub namespace: Option<String>,
  pub named: Vec<NamedImport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamedImport {
  pub imported: String,
  pub local: String,
  pub type_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MacroName {
  LoadRoutes,
  LoadMenus,
  ResolveRoute,
  LoadI18n,
  UseI18n,
  GetI18n,
  ResolveNamespace,
}

impl MacroName {
  pub const PAGES: &'static [Self] = &[Self::LoadRoutes, Self::LoadMenus, Self::ResolveRoute];
  pub const I18N: &'static [Self] =
    &[Self::LoadI18n, Self::UseI18n, Self::GetI18n, Self::ResolveNamespace];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::LoadRoutes => "loadRoutes",
      Self::LoadMenus => "loadMenus",
      Self::ResolveRoute => "resolveRoute",
      Self::LoadI18n => "loadI18n",
      Self::UseI18n => "useI18n",
      Self::GetI18n => "getI18n",
      Self::ResolveNamespace => "resolveNamespace",
    }
  }
}

/// A macro argument: its source span and, for plain literals, the cooked value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arg {
  pub start: usize,
  pub end: usize,
  pub text: String,
  pub literal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MacroCall {
  pub name: MacroName,
  /// Span from the callee through the closing paren
  pub start: usize,
  pub end: usize,
  pub args: Vec<Arg>,
}
