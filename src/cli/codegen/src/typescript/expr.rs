/* src/cli/codegen/src/typescript/expr.rs */

/// The subset of JS expressions the macros emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsExpr {
  Str(String),
  Bool(bool),
  Null,
  Undefined,
  Ident(String),
  /// Source text copied verbatim from the call site
  Raw(String),
  Array(Vec<JsExpr>),
  Object(Vec<(String, JsExpr)>),
  Member(Box<JsExpr>, String),
  Call(Box<JsExpr>, Vec<JsExpr>),
  Arrow { params: Vec<String>, body: ArrowBody },
  /// Dynamic `import("...")`
  Import(String),
  Cond(Box<JsExpr>, Box<JsExpr>, Box<JsExpr>),
  Template(Vec<TemplatePart>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowBody {
  Expr(Box<JsExpr>),
  /// Expression statements
  Block(Vec<JsExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
  Text(String),
  Expr(JsExpr),
}

impl JsExpr {
  pub fn str(s: impl Into<String>) -> Self {
    Self::Str(s.into())
  }

  pub fn ident(s: impl Into<String>) -> Self {
    Self::Ident(s.into())
  }

  pub fn member(self, prop: impl Into<String>) -> Self {
    Self::Member(Box::new(self), prop.into())
  }

  pub fn call(self, args: Vec<JsExpr>) -> Self {
    Self::Call(Box::new(self), args)
  }

  pub fn arrow(params: &[&str], body: JsExpr) -> Self {
    Self::Arrow {
      params: params.iter().map(|p| (*p).to_string()).collect(),
      body: ArrowBody::Expr(Box::new(body)),
    }
  }

  pub fn arrow_block(params: &[&str], statements: Vec<JsExpr>) -> Self {
    Self::Arrow {
      params: params.iter().map(|p| (*p).to_string()).collect(),
      body: ArrowBody::Block(statements),
    }
  }

  pub fn cond(test: JsExpr, then: JsExpr, otherwise: JsExpr) -> Self {
    Self::Cond(Box::new(test), Box::new(then), Box::new(otherwise))
  }
}
