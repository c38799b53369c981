/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::PagemacroConfig;

pub const CONFIG_FILE: &str = "pagemacro.toml";

/// Walk upward from `start` until a directory containing `package.json` is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
  let start = start
    .canonicalize()
    .with_context(|| format!("failed to resolve {}", start.display()))?;
  for dir in start.ancestors() {
    if dir.join("package.json").is_file() {
      return Ok(dir.to_path_buf());
    }
  }
  bail!("configuration error: no package.json found in {} or any parent directory", start.display())
}

/// Load `pagemacro.toml` from the project root; a missing file yields defaults.
pub fn load_config(root: &Path) -> Result<PagemacroConfig> {
  let path = root.join(CONFIG_FILE);
  let config = if path.is_file() {
    let content = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("failed to parse {}", path.display()))?
  } else {
    tracing::debug!(root = %root.display(), "no {CONFIG_FILE}, using defaults");
    PagemacroConfig::default()
  };
  config.validate()?;
  Ok(config)
}

pub fn parse_config(content: &str) -> Result<PagemacroConfig> {
  Ok(toml::from_str(content)?)
}
