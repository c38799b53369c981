/* src/cli/codegen/src/lib.rs */

// Build-time synthesis behind the pages and i18n macros: everything here works on
// plain data and the filesystem; splicing into modules is the host's job.

pub mod error;
pub mod glob;
pub mod i18n;
pub mod menu;
pub mod page;
pub mod registry;
pub mod resolve;
pub mod route;
pub mod typescript;
pub mod urlpath;

pub use error::{MacroError, Result};
pub use menu::{Menu, synthesize_menus};
pub use page::{LoadOptions, PageKind, PageNode, PageTree, load_page_tree};
pub use registry::ProjectRegistry;
pub use resolve::{Piece, RouteArg, RoutePath, resolve_route};
pub use route::{Route, RouteComponent, synthesize_routes};
