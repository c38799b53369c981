/* src/cli/core/src/host/hygiene.rs */

// Import allocation for a module being rewritten: reuse equivalent imports,
// otherwise add one under a fresh `__pm_` name.

use std::collections::{HashMap, HashSet};

use pagemacro_codegen::typescript::ImportScope;

use super::ast::ImportDecl;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Binding {
  Default,
  Named(String),
}

#[derive(Debug, Clone)]
struct AddedImport {
  local: String,
  source: String,
  binding: Binding,
}

pub(crate) struct ModuleScope {
  taken: HashSet<String>,
  bound: HashMap<(String, Binding), String>,
  added: Vec<AddedImport>,
}

impl ModuleScope {
  /// `taken` holds every identifier already in the module; `imports` are the
  /// declarations that stay.
  pub fn new(taken: HashSet<String>, imports: &[&ImportDecl]) -> Self {
    let mut bound = HashMap::new();
    for decl in imports.iter().filter(|d| !d.type_only) {
      if let Some(local) = &decl.default {
        bound.insert((decl.source.clone(), Binding::Default), local.clone());
      }
      for n in decl.named.iter().filter(|n| !n.type_only) {
        let binding = if n.imported == "default" {
          Binding::Default
        } else {
          Binding::Named(n.imported.clone())
        };
        bound.insert((decl.source.clone(), binding), n.local.clone());
      }
    }
    Self { taken, bound, added: Vec::new() }
  }

  fn allocate(&mut self, source: &str, binding: Binding, hint: &str) -> String {
    let key = (source.to_string(), binding);
    if let Some(local) = self.bound.get(&key) {
      return local.clone();
    }
    let base = format!("__pm_{}", sanitize(hint));
    let mut local = base.clone();
    let mut n = 1;
    while self.taken.contains(&local) {
      local = format!("{base}_{n}");
      n += 1;
    }
    self.taken.insert(local.clone());
    self.bound.insert(key.clone(), local.clone());
    self.added.push(AddedImport { local: local.clone(), source: key.0, binding: key.1 });
    local
  }

  /// Declarations for every import allocated so far, one per line.
  pub fn render_imports(&self) -> String {
    let mut out = String::new();
    for imp in &self.added {
      let source = pagemacro_codegen::typescript::quote_str(&imp.source);
      match &imp.binding {
        Binding::Default => out.push_str(&format!("import {} from {source};\n", imp.local)),
        Binding::Named(name) if *name == imp.local => {
          out.push_str(&format!("import {{ {name} }} from {source};\n"));
        }
        Binding::Named(name) => {
          out.push_str(&format!("import {{ {name} as {} }} from {source};\n", imp.local));
        }
      }
    }
    out
  }
}

impl ImportScope for ModuleScope {
  fn default_import(&mut self, source: &str, hint: &str) -> String {
    self.allocate(source, Binding::Default, hint)
  }

  fn named_import(&mut self, source: &str, name: &str) -> String {
    self.allocate(source, Binding::Named(name.to_string()), name)
  }
}

fn sanitize(hint: &str) -> String {
  hint.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect()
}
