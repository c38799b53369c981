/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use pagemacro_codegen::typescript::{I18nRuntime, RuntimeImport};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagemacroConfig {
  #[serde(default)]
  pub source: SourceSection,
  #[serde(default)]
  pub macros: MacrosSection,
  #[serde(default)]
  pub pages: PagesSection,
  #[serde(default)]
  pub i18n: I18nSection,
  #[serde(default)]
  pub dev: DevSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
  #[serde(default = "default_source_dir")]
  pub dir: String,
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  #[serde(default = "default_extensions")]
  pub extensions: Vec<String>,
}

impl Default for SourceSection {
  fn default() -> Self {
    Self { dir: default_source_dir(), out_dir: default_out_dir(), extensions: default_extensions() }
  }
}

fn default_source_dir() -> String {
  "src".to_string()
}

fn default_out_dir() -> String {
  ".pagemacro/out".to_string()
}

fn default_extensions() -> Vec<String> {
  ["ts", "tsx", "js", "jsx"].iter().map(|s| (*s).to_string()).collect()
}

/// Module specifiers the macros are imported from.
#[derive(Debug, Clone, Deserialize)]
pub struct MacrosSection {
  #[serde(default = "default_pages_macro")]
  pub pages: String,
  #[serde(default = "default_i18n_macro")]
  pub i18n: String,
}

impl Default for MacrosSection {
  fn default() -> Self {
    Self { pages: default_pages_macro(), i18n: default_i18n_macro() }
  }
}

fn default_pages_macro() -> String {
  "pages.macro".to_string()
}

fn default_i18n_macro() -> String {
  "i18n.macro".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesSection {
  #[serde(default)]
  pub allow_no_meta: bool,
  #[serde(default = "default_lazy")]
  pub lazy: RuntimeImport,
}

impl Default for PagesSection {
  fn default() -> Self {
    Self { allow_no_meta: false, lazy: default_lazy() }
  }
}

fn default_lazy() -> RuntimeImport {
  RuntimeImport::new("lazy", "react")
}

#[derive(Debug, Clone, Deserialize)]
pub struct I18nSection {
  pub default_glob: Option<String>,
  pub languages: Option<Vec<String>>,
  #[serde(default)]
  pub global_namespaces: Vec<String>,
  #[serde(default = "default_runtime")]
  pub runtime: String,
  #[serde(default = "default_hook")]
  pub hook: RuntimeImport,
}

impl Default for I18nSection {
  fn default() -> Self {
    Self {
      default_glob: None,
      languages: None,
      global_namespaces: Vec::new(),
      runtime: default_runtime(),
      hook: default_hook(),
    }
  }
}

impl I18nSection {
  pub fn runtime(&self) -> I18nRuntime {
    I18nRuntime { instance: self.runtime.clone(), hook: self.hook.clone() }
  }
}

fn default_runtime() -> String {
  "i18next".to_string()
}

fn default_hook() -> RuntimeImport {
  RuntimeImport::new("useTranslation", "react-i18next")
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevSection {
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
}

impl Default for DevSection {
  fn default() -> Self {
    Self { debounce_ms: default_debounce_ms() }
  }
}

fn default_debounce_ms() -> u64 {
  300
}

impl PagemacroConfig {
  pub fn validate(&self) -> Result<()> {
    let src = self.source.dir.trim_matches('/');
    if src.is_empty() || src == "." {
      bail!("source.dir must name a subdirectory of the project root");
    }
    let out = self.source.out_dir.trim_matches('/');
    if out.is_empty() || out == src || out.starts_with(&format!("{src}/")) {
      bail!(
        "source.out_dir \"{}\" must lie outside source.dir \"{}\"",
        self.source.out_dir,
        self.source.dir
      );
    }
    if self.source.extensions.is_empty() {
      bail!("source.extensions must not be empty");
    }
    if self.i18n.languages.as_ref().is_some_and(Vec::is_empty) {
      bail!("i18n.languages must not be empty when set");
    }
    if self.dev.debounce_ms == 0 {
      bail!("dev.debounce_ms must be positive");
    }
    Ok(())
  }

  /// Whether `ext` (without the dot) names a module the macros may appear in.
  pub fn is_source_ext(&self, ext: &str) -> bool {
    self.source.extensions.iter().any(|e| e == ext)
  }
}
