/* src/cli/core/src/ui.rs */

// Terminal output helpers: coloured status lines on stdout.
#![allow(clippy::print_stdout)]

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn banner(title: &str, subtitle: Option<&str>) {
  println!();
  match subtitle {
    Some(sub) => println!("  {BOLD}pagemacro {title}{RESET} {DIM}{sub}{RESET}"),
    None => println!("  {BOLD}pagemacro {title}{RESET}"),
  }
  println!();
}

pub fn step(n: usize, total: usize, msg: &str) {
  println!("  {DIM}[{n}/{total}]{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {CYAN}>{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("      {msg}");
}

pub fn ok(msg: &str) {
  println!("  {GREEN}ok{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}warn{RESET} {msg}");
}

pub fn error(msg: &str) {
  println!("  {RED}error{RESET} {msg}");
}
