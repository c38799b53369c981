/* src/cli/core/src/dev/classify.rs */

// Maps one filesystem event to what has to be redone.

use std::path::{Path, PathBuf};

use notify::EventKind;
use notify::event::ModifyKind;
use pagemacro_codegen::page::{is_convention_file, is_translation_dir, parse_dir_name};

use crate::build::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsChange {
  Created,
  Removed,
  Modified,
}

impl FsChange {
  /// Renames arrive as name-modify events; whether the path still exists decides
  /// which side of the rename it is.
  pub fn from_event(kind: &EventKind, path: &Path) -> Option<Self> {
    match kind {
      EventKind::Create(_) => Some(Self::Created),
      EventKind::Remove(_) => Some(Self::Removed),
      EventKind::Modify(ModifyKind::Name(_)) => {
        Some(if path.exists() { Self::Created } else { Self::Removed })
      }
      EventKind::Modify(_) | EventKind::Any => Some(Self::Modified),
      EventKind::Access(_) | EventKind::Other => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
  /// Page shape changed: every page-structure module is stale
  Structure,
  /// A module's own text changed
  Source(PathBuf),
  /// A translation resource in this directory changed
  Translation(PathBuf),
  /// Any other file, mirrored as-is
  Asset(PathBuf),
  Ignored,
}

pub fn classify(session: &Session, path: &Path, change: FsChange) -> Change {
  let out_dir = session.out_dir();
  if !path.starts_with(session.src_dir())
    || path.starts_with(&out_dir)
    || path.components().any(|c| c.as_os_str() == "node_modules")
  {
    return Change::Ignored;
  }
  let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
  let added_or_removed = change != FsChange::Modified;

  if added_or_removed
    && (is_convention_file(&name) || is_translation_dir(&name) || parse_dir_name(&name).is_some())
  {
    return Change::Structure;
  }
  if name.ends_with(".yaml") || name.ends_with(".yml") {
    let dir = path.parent().unwrap_or(path).to_path_buf();
    return Change::Translation(dir);
  }
  if session.is_module(path) {
    return Change::Source(path.to_path_buf());
  }
  if change == FsChange::Modified && path.is_dir() {
    return Change::Ignored;
  }
  Change::Asset(path.to_path_buf())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::PagemacroConfig;

  fn session() -> Session {
    Session::new(PathBuf::from("/p"), PagemacroConfig::default())
  }

  #[test]
  fn convention_files_change_structure_when_added_or_removed() {
    let s = session();
    let meta = Path::new("/p/src/pages/[1]a/meta.tsx");
    assert_eq!(classify(&s, meta, FsChange::Created), Change::Structure);
    assert_eq!(classify(&s, meta, FsChange::Removed), Change::Structure);
    assert_eq!(classify(&s, meta, FsChange::Modified), Change::Source(meta.to_path_buf()));
  }

  #[test]
  fn page_and_translation_directories() {
    let s = session();
    assert_eq!(classify(&s, Path::new("/p/src/pages/[2]b"), FsChange::Removed), Change::Structure);
    assert_eq!(
      classify(&s, Path::new("/p/src/pages/[1]a/translations"), FsChange::Created),
      Change::Structure
    );
  }

  #[test]
  fn resources_map_to_their_directory() {
    let s = session();
    assert_eq!(
      classify(&s, Path::new("/p/src/app/translations/en.yaml"), FsChange::Modified),
      Change::Translation(PathBuf::from("/p/src/app/translations"))
    );
  }

  #[test]
  fn other_files() {
    let s = session();
    let view = Path::new("/p/src/app/view.tsx");
    assert_eq!(classify(&s, view, FsChange::Modified), Change::Source(view.to_path_buf()));
    let css = Path::new("/p/src/app/a.css");
    assert_eq!(classify(&s, css, FsChange::Created), Change::Asset(css.to_path_buf()));
  }

  #[test]
  fn outside_source_tree_is_ignored() {
    let s = session();
    assert_eq!(classify(&s, Path::new("/p/package.json"), FsChange::Modified), Change::Ignored);
    assert_eq!(
      classify(&s, Path::new("/p/src/node_modules/x/index.tsx"), FsChange::Created),
      Change::Ignored
    );
  }

  #[test]
  fn rename_side_follows_existence() {
    let kind = EventKind::Modify(ModifyKind::Name(notify::event::RenameMode::Any));
    let gone = Path::new("/definitely/not/here");
    assert_eq!(FsChange::from_event(&kind, gone), Some(FsChange::Removed));
    let access = EventKind::Access(notify::event::AccessKind::Any);
    assert_eq!(FsChange::from_event(&access, Path::new("/")), None);
  }
}
