/* src/cli/codegen/src/page/mod.rs */

// Page-tree loading: directory names are the routing DSL.

mod loader;
mod name;

#[cfg(test)]
mod tests;

pub use loader::{
  LoadOptions, ModuleRef, PageImports, PageNode, PageRoute, PageTree, is_convention_file,
  is_translation_dir, load_page_tree,
};
pub use name::{PageKind, ParsedName, clean_name, parse_dir_name};
