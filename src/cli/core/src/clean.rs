/* src/cli/core/src/clean.rs */

// `pagemacro clean` command: removes the expanded output tree.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PagemacroConfig;
use crate::ui;

pub fn run_clean(config: &PagemacroConfig, root: &Path) -> Result<()> {
  ui::arrow("cleaning project");
  delete_dir_if_exists(&root.join(&config.source.out_dir))?;
  ui::ok("clean complete");
  Ok(())
}

fn delete_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}
