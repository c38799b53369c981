/* src/cli/core/src/host/parser.rs */

// Module analysis on the oxc AST: top-level import declarations, and call sites of
// macro bindings at any depth. Everything is copied out as owned spans and text so
// the arena can be dropped before rewriting.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::AstKind;
use oxc_ast::Visit;
use oxc_ast::ast::{
  Argument, CallExpression, Expression, IdentifierReference, ImportDeclarationSpecifier, Program,
  Statement,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use pagemacro_codegen::{MacroError, Result};

use super::ast::{Arg, ImportDecl, MacroCall, MacroName, NamedImport};

pub(crate) struct Parsed<'a> {
  pub program: Program<'a>,
  /// First syntax error, if any
  pub error: Option<String>,
}

/// Parse a module, choosing TS/JSX syntax from the file extension.
pub(crate) fn parse<'a>(allocator: &'a Allocator, src: &'a str, file: &Path) -> Parsed<'a> {
  let source_type = SourceType::from_path(file).unwrap_or_else(|_| SourceType::tsx());
  let ret = Parser::new(allocator, src, source_type).parse();
  let error = match ret.errors.first() {
    Some(e) => Some(e.to_string()),
    None if ret.panicked => Some("unrecoverable syntax error".to_string()),
    None => None,
  };
  Parsed { program: ret.program, error }
}

fn range(span: Span) -> (usize, usize) {
  (span.start as usize, span.end as usize)
}

/// Collect every static import declaration in the module.
pub(crate) fn collect_imports(program: &Program<'_>) -> Vec<ImportDecl> {
  let mut imports = Vec::new();
  for stmt in &program.body {
    let Statement::ImportDeclaration(import) = stmt else { continue };
    let (start, end) = range(import.span);
    let mut decl = ImportDecl {
      start,
      end,
      source: import.source.value.to_string(),
      type_only: import.import_kind.is_type(),
      default: None,
      namespace: None,
      named: Vec::new(),
    };
    for spec in import.specifiers.iter().flatten() {
      match spec {
        ImportDeclarationSpecifier::ImportSpecifier(s) => decl.named.push(NamedImport {
          imported: s.imported.name().to_string(),
          local: s.local.name.to_string(),
          type_only: s.import_kind.is_type(),
        }),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
          decl.default = Some(s.local.name.to_string());
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
          decl.namespace = Some(s.local.name.to_string());
        }
      }
    }
    imports.push(decl);
  }
  imports
}

/// Find every call of a macro binding. A binding used any other way, or a macro
/// call nested inside another macro's arguments, is an error.
pub(crate) fn find_calls(
  src: &str,
  program: &Program<'_>,
  bindings: &HashMap<String, MacroName>,
) -> Result<Vec<MacroCall>> {
  let mut finder =
    CallFinder { src, bindings, calls: Vec::new(), callees: HashSet::new(), error: None };
  finder.visit_program(program);
  match finder.error {
    Some(err) => Err(err),
    None => Ok(finder.calls),
  }
}

struct CallFinder<'s> {
  src: &'s str,
  bindings: &'s HashMap<String, MacroName>,
  calls: Vec<MacroCall>,
  /// Start offsets of callee identifiers already accounted for
  callees: HashSet<u32>,
  error: Option<MacroError>,
}

impl CallFinder<'_> {
  fn enter_call(&mut self, call: &CallExpression<'_>) {
    let Expression::Identifier(callee) = &call.callee else { return };
    let Some(&name) = self.bindings.get(callee.name.as_str()) else { return };
    self.callees.insert(callee.span.start);

    let (start, end) = range(call.span);
    // pre-order: an enclosing macro call is already recorded
    if let Some(outer) = self.calls.iter().find(|c| c.start <= start && end <= c.end) {
      let position = outer.args.iter().position(|a| a.start <= start && end <= a.end);
      let found = match position {
        Some(i) => outer.args[i].text.clone(),
        None => self.src[start..end].to_string(),
      };
      self.error = Some(MacroError::ArgumentType {
        macro_name: outer.name.as_str().to_string(),
        position: position.map_or(1, |i| i + 1),
        found,
      });
      return;
    }

    let args = call.arguments.iter().map(|a| self.arg(a)).collect();
    self.calls.push(MacroCall { name, start, end, args });
  }

  fn enter_reference(&mut self, ident: &IdentifierReference<'_>) {
    let Some(name) = self.bindings.get(ident.name.as_str()) else { return };
    if self.callees.contains(&ident.span.start) {
      return;
    }
    self.error = Some(MacroError::configuration(format!(
      "{} is a build-time macro and can only be called directly",
      name.as_str()
    )));
  }

  fn arg(&self, arg: &Argument<'_>) -> Arg {
    let (start, end) = range(arg.span());
    let literal = match arg {
      Argument::StringLiteral(s) => Some(s.value.to_string()),
      Argument::TemplateLiteral(t) if t.expressions.is_empty() => {
        t.quasis.first().and_then(|q| q.value.cooked.as_ref()).map(ToString::to_string)
      }
      _ => None,
    };
    Arg { start, end, text: self.src[start..end].to_string(), literal }
  }
}

impl<'a> Visit<'a> for CallFinder<'_> {
  fn enter_node(&mut self, kind: AstKind<'a>) {
    if self.error.is_some() {
      return;
    }
    match kind {
      AstKind::CallExpression(call) => self.enter_call(call),
      AstKind::IdentifierReference(ident) => self.enter_reference(ident),
      _ => {}
    }
  }
}

/// Every identifier bound or referenced anywhere in the module.
pub(crate) fn collect_identifiers(program: &Program<'_>) -> HashSet<String> {
  let mut names = IdentifierNames::default();
  names.visit_program(program);
  names.0
}

#[derive(Default)]
struct IdentifierNames(HashSet<String>);

impl<'a> Visit<'a> for IdentifierNames {
  fn enter_node(&mut self, kind: AstKind<'a>) {
    match kind {
      AstKind::BindingIdentifier(id) => {
        self.0.insert(id.name.to_string());
      }
      AstKind::IdentifierReference(id) => {
        self.0.insert(id.name.to_string());
      }
      _ => {}
    }
  }
}
