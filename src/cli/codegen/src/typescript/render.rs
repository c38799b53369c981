/* src/cli/codegen/src/typescript/render.rs */

use super::expr::{ArrowBody, JsExpr, TemplatePart};

const INDENT: &str = "  ";

/// Render an expression as source text. Nested literals are laid out one
/// property per line, starting at `depth` levels of indentation.
pub fn render_expr(expr: &JsExpr, depth: usize) -> String {
  let mut out = String::new();
  write_expr(&mut out, expr, depth);
  out
}

fn write_expr(out: &mut String, expr: &JsExpr, depth: usize) {
  match expr {
    JsExpr::Str(s) => out.push_str(&quote_str(s)),
    JsExpr::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
    JsExpr::Null => out.push_str("null"),
    JsExpr::Undefined => out.push_str("undefined"),
    JsExpr::Ident(s) | JsExpr::Raw(s) => out.push_str(s),
    JsExpr::Array(items) => {
      if items.is_empty() {
        out.push_str("[]");
        return;
      }
      out.push_str("[\n");
      for item in items {
        push_indent(out, depth + 1);
        write_expr(out, item, depth + 1);
        out.push_str(",\n");
      }
      push_indent(out, depth);
      out.push(']');
    }
    JsExpr::Object(props) => {
      if props.is_empty() {
        out.push_str("{}");
        return;
      }
      out.push_str("{\n");
      for (key, value) in props {
        push_indent(out, depth + 1);
        out.push_str(&quote_key(key));
        out.push_str(": ");
        write_expr(out, value, depth + 1);
        out.push_str(",\n");
      }
      push_indent(out, depth);
      out.push('}');
    }
    JsExpr::Member(obj, prop) => {
      write_operand(out, obj, depth);
      out.push('.');
      out.push_str(prop);
    }
    JsExpr::Call(callee, args) => {
      write_operand(out, callee, depth);
      out.push('(');
      for (i, arg) in args.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_expr(out, arg, depth);
      }
      out.push(')');
    }
    JsExpr::Arrow { params, body } => {
      out.push('(');
      out.push_str(&params.join(", "));
      out.push_str(") => ");
      match body {
        ArrowBody::Expr(e) if matches!(**e, JsExpr::Object(_)) => {
          out.push('(');
          write_expr(out, e, depth);
          out.push(')');
        }
        ArrowBody::Expr(e) => write_expr(out, e, depth),
        ArrowBody::Block(stmts) => {
          out.push_str("{\n");
          for stmt in stmts {
            push_indent(out, depth + 1);
            write_expr(out, stmt, depth + 1);
            out.push_str(";\n");
          }
          push_indent(out, depth);
          out.push('}');
        }
      }
    }
    JsExpr::Import(source) => {
      out.push_str("import(");
      out.push_str(&quote_str(source));
      out.push(')');
    }
    JsExpr::Cond(test, then, otherwise) => {
      write_operand(out, test, depth);
      out.push_str(" ? ");
      write_operand(out, then, depth);
      out.push_str(" : ");
      write_operand(out, otherwise, depth);
    }
    JsExpr::Template(parts) => {
      out.push('`');
      for part in parts {
        match part {
          TemplatePart::Text(t) => out.push_str(&escape_template(t)),
          TemplatePart::Expr(e) => {
            out.push_str("${");
            write_expr(out, e, depth);
            out.push('}');
          }
        }
      }
      out.push('`');
    }
  }
}

/// Callees and conditional branches need parens around arrows and conditionals.
fn write_operand(out: &mut String, expr: &JsExpr, depth: usize) {
  if matches!(expr, JsExpr::Arrow { .. } | JsExpr::Cond(..)) {
    out.push('(');
    write_expr(out, expr, depth);
    out.push(')');
  } else {
    write_expr(out, expr, depth);
  }
}

fn push_indent(out: &mut String, depth: usize) {
  for _ in 0..depth {
    out.push_str(INDENT);
  }
}

/// JSON string escaping is valid JS string literal syntax.
pub fn quote_str(s: &str) -> String {
  serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Wrap a property name in quotes unless it is a plain identifier.
fn quote_key(name: &str) -> String {
  let mut chars = name.chars();
  let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
  if valid { name.to_string() } else { quote_str(name) }
}

fn escape_template(text: &str) -> String {
  text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    None => String::new(),
  }
}
