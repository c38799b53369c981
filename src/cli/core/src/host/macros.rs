/* src/cli/core/src/host/macros.rs */

// One handler per macro. Each returns the expression that replaces the call site
// and records what the module now depends on.

use std::path::{Path, PathBuf};

use pagemacro_codegen::glob::{relative_import, resolve_glob};
use pagemacro_codegen::i18n::{
  LoadRequest, load_namespace, load_page_translations, resolve_namespace,
};
use pagemacro_codegen::typescript::{
  ImportScope, JsExpr, emit_get, emit_menus, emit_registration, emit_route, emit_use,
  namespace_value, route_path_expr,
};
use pagemacro_codegen::{
  LoadOptions, MacroError, PageTree, ProjectRegistry, Result, RouteArg, load_page_tree,
  resolve_route, synthesize_menus, synthesize_routes,
};

use super::ModuleDeps;
use super::ast::{MacroCall, MacroName};
use crate::config::PagemacroConfig;

pub(crate) struct MacroEnv<'a> {
  pub registry: &'a mut ProjectRegistry,
  pub config: &'a PagemacroConfig,
  pub root: &'a Path,
  pub file: &'a Path,
  pub deps: ModuleDeps,
  /// Statements emitted after the import block
  pub prelude: Vec<JsExpr>,
}

impl MacroEnv<'_> {
  fn importer_dir(&self) -> &Path {
    self.file.parent().unwrap_or(self.root)
  }
}

pub(crate) fn expand(
  env: &mut MacroEnv<'_>,
  call: &MacroCall,
  scope: &mut dyn ImportScope,
) -> Result<JsExpr> {
  tracing::debug!(file = %env.file.display(), name = call.name.as_str(), "expanding macro");
  match call.name {
    MacroName::LoadRoutes => load_routes(env, call, scope),
    MacroName::LoadMenus => load_menus(env, call, scope),
    MacroName::ResolveRoute => resolve_route_call(env, call),
    MacroName::LoadI18n => load_i18n(env, call, scope),
    MacroName::UseI18n | MacroName::GetI18n | MacroName::ResolveNamespace => {
      use_namespace(env, call, scope)
    }
  }
}

/// Argument `index` as a string literal; `None` when not supplied.
fn literal_arg(call: &MacroCall, index: usize) -> Result<Option<String>> {
  let Some(arg) = call.args.get(index) else { return Ok(None) };
  match &arg.literal {
    Some(value) => Ok(Some(value.clone())),
    None => Err(MacroError::ArgumentType {
      macro_name: call.name.as_str().to_string(),
      position: index + 1,
      found: arg.text.clone(),
    }),
  }
}

fn required_literal(call: &MacroCall, index: usize, what: &str) -> Result<String> {
  literal_arg(call, index)?.ok_or_else(|| {
    MacroError::configuration(format!("{}() requires {what}", call.name.as_str()))
  })
}

fn no_args(call: &MacroCall) -> Result<()> {
  if call.args.is_empty() {
    Ok(())
  } else {
    Err(MacroError::configuration(format!("{}() takes no arguments", call.name.as_str())))
  }
}

/// Load the pages tree and register every node's directory as it completes.
fn load_tree(env: &mut MacroEnv<'_>, pages: &str, prefix: &str) -> Result<PageTree> {
  let importer_dir = env.importer_dir().to_path_buf();
  let opts = LoadOptions {
    pages,
    prefix,
    root: env.root,
    importer_dir: &importer_dir,
    allow_no_meta: env.config.pages.allow_no_meta,
  };
  let registry = &mut *env.registry;
  let tree = load_page_tree(&opts, &mut |node| {
    registry.register_route(&node.dir_path, &node.route.full);
  })?;
  env.deps.page_structure = true;
  env.deps.registers = true;
  env.deps.watched_dirs.push(tree.root.dir_path.clone());
  Ok(tree)
}

fn load_routes(
  env: &mut MacroEnv<'_>,
  call: &MacroCall,
  scope: &mut dyn ImportScope,
) -> Result<JsExpr> {
  let pages = required_literal(call, 0, "a pages directory")?;
  let prefix = match literal_arg(call, 1)? {
    Some(prefix) => prefix,
    None => env
      .registry
      .enclosing_route(env.importer_dir())
      .map_or_else(|| "/".to_string(), |(_, route)| route.to_string()),
  };
  let tree = load_tree(env, &pages, &prefix)?;
  let routes = synthesize_routes(&tree.root);

  let importer_dir = env.importer_dir().to_path_buf();
  let runtime = env.config.i18n.runtime();
  let languages = env.config.i18n.languages.as_deref();
  for route in routes.walk() {
    let Some((id, dir)) = &route.translations else { continue };
    let import_for = |path: &Path| {
      tree.import_path(path).unwrap_or_else(|| relative_import(&importer_dir, path))
    };
    let ns = load_page_translations(env.registry, id, dir, languages, &import_for)?;
    env.prelude.push(emit_registration(&ns, scope, &runtime));
    env.deps.watched_dirs.push(dir.clone());
  }

  Ok(emit_route(&routes, scope, &env.config.pages.lazy))
}

fn load_menus(
  env: &mut MacroEnv<'_>,
  call: &MacroCall,
  scope: &mut dyn ImportScope,
) -> Result<JsExpr> {
  let pages = required_literal(call, 0, "a pages directory")?;
  let prefix = match literal_arg(call, 1)? {
    Some(prefix) => prefix,
    None => env
      .registry
      .enclosing_route(env.importer_dir())
      .map(|(_, route)| route.to_string())
      .ok_or_else(|| MacroError::UnregisteredCallSite(env.file.to_path_buf()))?,
  };
  let tree = load_tree(env, &pages, &prefix)?;
  Ok(emit_menus(&synthesize_menus(&tree.root), scope))
}

fn resolve_route_call(env: &mut MacroEnv<'_>, call: &MacroCall) -> Result<JsExpr> {
  let relative = literal_arg(call, 0)?.unwrap_or_else(|| ".".to_string());
  let params: Vec<RouteArg> = call
    .args
    .iter()
    .skip(1)
    .map(|a| match &a.literal {
      Some(v) => RouteArg::Literal(v.clone()),
      None => RouteArg::Expr(a.text.clone()),
    })
    .collect();
  env.deps.page_structure = true;
  let path = resolve_route(env.registry, env.file, &relative)?;
  Ok(route_path_expr(&path.bind(&params)?))
}

fn load_i18n(
  env: &mut MacroEnv<'_>,
  call: &MacroCall,
  scope: &mut dyn ImportScope,
) -> Result<JsExpr> {
  let glob = match literal_arg(call, 0)? {
    Some(glob) => glob,
    None => env.config.i18n.default_glob.clone().ok_or_else(|| {
      MacroError::configuration("loadI18n() needs a glob argument or i18n.default_glob")
    })?,
  };
  let importer_dir = env.importer_dir().to_path_buf();
  let cwd: PathBuf = match literal_arg(call, 1)? {
    Some(cwd) => resolve_glob(&cwd, &importer_dir, env.root)?.target(),
    None => importer_dir.clone(),
  };

  let req = LoadRequest {
    glob: &glob,
    cwd: &cwd,
    importer_dir: &importer_dir,
    root: env.root,
    languages: env.config.i18n.languages.as_deref(),
  };
  let ns = load_namespace(env.registry, &req)?;
  env.deps.registers = true;
  env.deps.watched_dirs.push(cwd);
  Ok(emit_registration(&ns, scope, &env.config.i18n.runtime()))
}

fn use_namespace(
  env: &mut MacroEnv<'_>,
  call: &MacroCall,
  scope: &mut dyn ImportScope,
) -> Result<JsExpr> {
  no_args(call)?;
  env.deps.namespaces = true;
  let globals = &env.config.i18n.global_namespaces;
  let ns = resolve_namespace(env.registry, env.file, env.root, globals)?;
  let runtime = env.config.i18n.runtime();
  Ok(match call.name {
    MacroName::UseI18n => emit_use(&ns, scope, &runtime),
    MacroName::GetI18n => emit_get(&ns, scope, &runtime),
    _ => namespace_value(&ns),
  })
}
