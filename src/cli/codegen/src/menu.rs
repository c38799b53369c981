/* src/cli/codegen/src/menu.rs */

use serde::Serialize;

use crate::page::{ModuleRef, PageKind, PageNode};
use crate::route::{display_name, ordered_children};

#[derive(Debug, Clone, Serialize)]
pub struct Menu {
  pub id: String,
  pub name: String,
  pub path: String,
  pub meta: Option<ModuleRef>,
  pub children: Vec<Menu>,
}

/// Menu entries under the pages root: positive-index pages only, recursively,
/// with `[protect]` pages keeping their entry but losing their subtree.
pub fn synthesize_menus(root: &PageNode) -> Vec<Menu> {
  menu_children(root)
}

fn menu_children(node: &PageNode) -> Vec<Menu> {
  if node.protect {
    return Vec::new();
  }
  ordered_children(node)
    .into_iter()
    .filter(|c| matches!(c.kind, Some(PageKind::MenuItem(_))))
    .map(|c| Menu {
      id: c.id.clone(),
      name: display_name(c),
      path: c.route.full.clone(),
      meta: c.imports.meta.clone(),
      children: menu_children(c),
    })
    .collect()
}
