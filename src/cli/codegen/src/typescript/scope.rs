/* src/cli/codegen/src/typescript/scope.rs */

use serde::Deserialize;

/// Allocates import bindings in the module being rewritten. Implementations must
/// return an existing binding when an equivalent import is already present.
pub trait ImportScope {
  /// `import <local> from "<source>"`
  fn default_import(&mut self, source: &str, hint: &str) -> String;
  /// `import { <name> as <local> } from "<source>"`
  fn named_import(&mut self, source: &str, name: &str) -> String;
}

/// A named export of a runtime module, e.g. `lazy` from `react`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeImport {
  pub name: String,
  pub from: String,
}

impl RuntimeImport {
  pub fn new(name: impl Into<String>, from: impl Into<String>) -> Self {
    Self { name: name.into(), from: from.into() }
  }
}
