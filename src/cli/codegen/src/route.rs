/* src/cli/codegen/src/route.rs */

// Page tree -> routing tree. Children are emitted in three passes:
// positive indices ascending, negative indices by magnitude, then the fallback.

use std::path::PathBuf;

use serde::Serialize;

use crate::page::{ModuleRef, PageKind, PageNode};
use crate::typescript::capitalize;
use crate::urlpath::wildcard_of;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "module", rename_all = "camelCase")]
pub enum RouteComponent {
  Module(ModuleRef),
  /// Renders its children unchanged
  PassThrough,
  /// Exact route without an index view
  NotImplemented,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
  pub id: String,
  pub name: String,
  pub path: String,
  pub exact: bool,
  pub is_menu_item: bool,
  pub sync: bool,
  pub component: RouteComponent,
  pub meta: Option<ModuleRef>,
  #[serde(skip)]
  pub translations: Option<(String, PathBuf)>,
  pub children: Vec<Route>,
}

impl Route {
  /// Depth-first iteration over this route and all descendants.
  pub fn walk(&self) -> Vec<&Route> {
    let mut out = vec![self];
    for child in &self.children {
      out.extend(child.walk());
    }
    out
  }
}

/// Sort a node's page children into the three emission passes.
pub fn ordered_children(node: &PageNode) -> Vec<&PageNode> {
  let mut visible: Vec<(u32, &PageNode)> = Vec::new();
  let mut hidden: Vec<(u32, &PageNode)> = Vec::new();
  let mut fallback: Vec<&PageNode> = Vec::new();
  for child in &node.children {
    match child.kind {
      Some(PageKind::MenuItem(n)) => visible.push((n, child)),
      Some(PageKind::Hidden(n)) => hidden.push((n, child)),
      Some(PageKind::Fallback) => fallback.push(child),
      None => {}
    }
  }
  // children arrive sorted by name, so stable sorts break ties by name
  visible.sort_by_key(|(n, _)| *n);
  hidden.sort_by_key(|(n, _)| *n);

  visible
    .into_iter()
    .map(|(_, c)| c)
    .chain(hidden.into_iter().map(|(_, c)| c))
    .chain(fallback)
    .collect()
}

/// Build the route tree rooted at the pages root.
pub fn synthesize_routes(root: &PageNode) -> Route {
  build_route(root, false)
}

fn build_route(node: &PageNode, is_menu_item: bool) -> Route {
  let mut children = Vec::new();

  // A section with its own index view gets an exact child route at the same path
  if !node.is_leaf()
    && let Some(index) = &node.imports.index
  {
    children.push(Route {
      id: format!("{}|index", node.id),
      name: display_name(node),
      path: node.route.full.clone(),
      exact: true,
      is_menu_item: false,
      sync: index.sync,
      component: RouteComponent::Module(index.clone()),
      meta: node.imports.meta.clone(),
      translations: None,
      children: Vec::new(),
    });
  }

  for child in ordered_children(node) {
    children.push(match child.kind {
      Some(PageKind::MenuItem(_)) => build_route(child, true),
      Some(PageKind::Fallback) => fallback_route(child),
      _ => build_route(child, false),
    });
  }

  let component = if node.is_leaf() {
    node.imports.index.clone().map_or(RouteComponent::NotImplemented, RouteComponent::Module)
  } else {
    node.imports.layout.clone().map_or(RouteComponent::PassThrough, RouteComponent::Module)
  };
  let sync = match &component {
    RouteComponent::Module(m) => m.sync,
    RouteComponent::PassThrough | RouteComponent::NotImplemented => true,
  };

  Route {
    id: node.id.clone(),
    name: display_name(node),
    path: node.route.full.clone(),
    exact: node.is_leaf(),
    is_menu_item,
    sync,
    component,
    meta: node.imports.meta.clone(),
    translations: node.imports.translations.clone().map(|dir| (node.id.clone(), dir)),
    children,
  }
}

fn fallback_route(node: &PageNode) -> Route {
  let mut route = build_route(node, false);
  route.exact = false;
  route.path = wildcard_of(&route.path);
  route
}

pub(crate) fn display_name(node: &PageNode) -> String {
  capitalize(&node.route.endpoint)
}
