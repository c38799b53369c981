/* src/cli/core/src/host/mod.rs */

// Macro host: finds macro imports and call sites in a module, expands them
// against the project registry and splices the results back into the text.

mod ast;
mod hygiene;
mod macros;
mod parser;
mod rewrite;


use std::collections::HashMap;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use pagemacro_codegen::typescript::render_expr;
use pagemacro_codegen::{MacroError, ProjectRegistry, Result};

use self::ast::{ImportDecl, MacroName};
use self::hygiene::ModuleScope;
use self::macros::MacroEnv;
use self::rewrite::{Edit, apply, indent_depth, line_end, needs_asi_guard};
use crate::config::PagemacroConfig;

/// What a transformed module depends on, for dev-mode invalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDeps {
  /// Reads the page tree or the directory -> route map
  pub page_structure: bool,
  /// Resolves an i18n namespace
  pub namespaces: bool,
  /// Writes into the registry
  pub registers: bool,
  /// Directories whose files feed the expansion
  pub watched_dirs: Vec<PathBuf>,
}

impl ModuleDeps {
  pub fn watches(&self, path: &Path) -> bool {
    self.watched_dirs.iter().any(|d| path.starts_with(d))
  }
}

#[derive(Debug, Clone)]
pub struct Transformed {
  pub code: String,
  pub deps: ModuleDeps,
}

/// Cheap pre-pass used for build ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleScan {
  pub uses_macros: bool,
  /// Calls `loadRoutes`, `loadMenus` or `loadI18n`
  pub registers: bool,
}

fn is_macro_module(source: &str, specifier: &str) -> bool {
  source == specifier
    || source.strip_suffix(specifier).is_some_and(|head| head.ends_with('/'))
}

/// Map local binding names to macros. Returns the bindings and the indices of the
/// macro import declarations.
fn macro_bindings(
  imports: &[ImportDecl],
  config: &PagemacroConfig,
) -> Result<(HashMap<String, MacroName>, Vec<usize>)> {
  let mut bindings = HashMap::new();
  let mut decls = Vec::new();
  for (i, decl) in imports.iter().enumerate() {
    let available = if is_macro_module(&decl.source, &config.macros.pages) {
      MacroName::PAGES
    } else if is_macro_module(&decl.source, &config.macros.i18n) {
      MacroName::I18N
    } else {
      continue;
    };
    decls.push(i);
    if decl.type_only {
      continue;
    }
    if decl.default.is_some() || decl.namespace.is_some() {
      return Err(MacroError::configuration(format!(
        "\"{}\" only provides named imports",
        decl.source
      )));
    }
    for named in decl.named.iter().filter(|n| !n.type_only) {
      let name = available
        .iter()
        .find(|m| m.as_str() == named.imported)
        .ok_or_else(|| {
          MacroError::configuration(format!(
            "\"{}\" does not export {}",
            decl.source, named.imported
          ))
        })?;
      bindings.insert(named.local.clone(), *name);
    }
  }
  Ok((bindings, decls))
}

fn mentions_macro_module(src: &str, config: &PagemacroConfig) -> bool {
  src.contains(&config.macros.pages) || src.contains(&config.macros.i18n)
}

pub fn scan_module(src: &str, file: &Path, config: &PagemacroConfig) -> ModuleScan {
  let allocator = Allocator::default();
  let parsed = parser::parse(&allocator, src, file);
  let imports = parser::collect_imports(&parsed.program);
  let Ok((bindings, decls)) = macro_bindings(&imports, config) else {
    return ModuleScan { uses_macros: true, registers: false };
  };
  if decls.is_empty() {
    let uses_macros = parsed.error.is_some() && mentions_macro_module(src, config);
    return ModuleScan { uses_macros, registers: false };
  }
  let registers = parser::find_calls(src, &parsed.program, &bindings).is_ok_and(|calls| {
    calls.iter().any(|c| {
      matches!(c.name, MacroName::LoadRoutes | MacroName::LoadMenus | MacroName::LoadI18n)
    })
  });
  ModuleScan { uses_macros: true, registers }
}

/// Expand every macro call in `src`. `None` when the module imports no macro module.
pub fn transform_module(
  src: &str,
  file: &Path,
  root: &Path,
  config: &PagemacroConfig,
  registry: &mut ProjectRegistry,
) -> Result<Option<Transformed>> {
  let allocator = Allocator::default();
  let parsed = parser::parse(&allocator, src, file);
  if let Some(error) = &parsed.error {
    if !mentions_macro_module(src, config) {
      return Ok(None);
    }
    return Err(MacroError::configuration(format!(
      "cannot expand macros in {}: {error}",
      file.display()
    )));
  }
  let imports = parser::collect_imports(&parsed.program);
  let (bindings, macro_decls) = macro_bindings(&imports, config)?;
  if macro_decls.is_empty() {
    return Ok(None);
  }
  let calls = parser::find_calls(src, &parsed.program, &bindings)?;

  let kept: Vec<&ImportDecl> = imports
    .iter()
    .enumerate()
    .filter(|(i, _)| !macro_decls.contains(i))
    .map(|(_, d)| d)
    .collect();
  let mut scope = ModuleScope::new(parser::collect_identifiers(&parsed.program), &kept);
  let mut env =
    MacroEnv { registry, config, root, file, deps: ModuleDeps::default(), prelude: Vec::new() };

  let mut edits = Vec::new();
  for call in &calls {
    let expr = macros::expand(&mut env, call, &mut scope)?;
    let mut text = render_expr(&expr, indent_depth(src, call.start));
    if needs_asi_guard(src, call.start, &text) {
      text.insert(0, ';');
    }
    edits.push(Edit::replace(call.start, call.end, text));
  }

  for &i in &macro_decls {
    let decl = &imports[i];
    edits.push(Edit::replace(decl.start, line_end(src, decl.end), ""));
  }

  let mut header = scope.render_imports();
  for stmt in &env.prelude {
    header.push_str(&render_expr(stmt, 0));
    header.push_str(";\n");
  }
  if !header.is_empty() {
    let last_import_end = imports.iter().map(|d| line_end(src, d.end)).max().unwrap_or(0);
    let at_line_start = last_import_end == 0 || src[..last_import_end].ends_with('\n');
    if !at_line_start {
      header.insert(0, '\n');
    }
    edits.push(Edit::insert(last_import_end, header));
  }

  tracing::debug!(file = %file.display(), calls = calls.len(), "module transformed");
  Ok(Some(Transformed { code: apply(src, edits), deps: env.deps }))
}
