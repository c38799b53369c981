/* src/cli/core/src/config/tests/parsing.rs */

use super::*;

#[test]
fn empty_file_uses_defaults() {
  let config = parse_config("").unwrap();
  assert_eq!(config.source.dir, "src");
  assert_eq!(config.source.out_dir, ".pagemacro/out");
  assert_eq!(config.macros.pages, "pages.macro");
  assert_eq!(config.macros.i18n, "i18n.macro");
  assert_eq!(config.pages.lazy.name, "lazy");
  assert_eq!(config.pages.lazy.from, "react");
  assert_eq!(config.i18n.runtime, "i18next");
  assert_eq!(config.i18n.hook.from, "react-i18next");
  assert_eq!(config.dev.debounce_ms, 300);
  assert!(config.validate().is_ok());
}

#[test]
fn full_file_overrides_every_section() {
  let config = parse_config(
    r#"
[source]
dir = "app"
out_dir = "build/app"
extensions = ["tsx"]

[macros]
pages = "@acme/pages.macro"

[pages]
allow_no_meta = true
lazy = { name = "lazyLoad", from = "@acme/lazy" }

[i18n]
default_glob = "./locales/*.yaml"
languages = ["en", "zh"]
global_namespaces = ["common"]
runtime = "@acme/i18n"
hook = { name = "useT", from = "@acme/i18n-react" }

[dev]
debounce_ms = 50
"#,
  )
  .unwrap();
  config.validate().unwrap();
  assert_eq!(config.source.dir, "app");
  assert!(config.is_source_ext("tsx"));
  assert!(!config.is_source_ext("ts"));
  assert!(config.pages.allow_no_meta);
  assert_eq!(config.pages.lazy.name, "lazyLoad");
  assert_eq!(config.i18n.default_glob.as_deref(), Some("./locales/*.yaml"));
  assert_eq!(config.i18n.global_namespaces, vec!["common"]);
  let runtime = config.i18n.runtime();
  assert_eq!(runtime.instance, "@acme/i18n");
  assert_eq!(runtime.hook.name, "useT");
  assert_eq!(config.dev.debounce_ms, 50);
}

#[test]
fn unknown_section_is_rejected() {
  assert!(parse_config("[bundler]\ncommand = \"vite\"\n").is_err());
}

#[test]
fn out_dir_inside_source_is_rejected() {
  let config = parse_config("[source]\ndir = \"src\"\nout_dir = \"src/out\"\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("outside source.dir"));
}

#[test]
fn empty_language_whitelist_is_rejected() {
  let config = parse_config("[i18n]\nlanguages = []\n").unwrap();
  assert!(config.validate().is_err());
}

#[test]
fn zero_debounce_is_rejected() {
  let config = parse_config("[dev]\ndebounce_ms = 0\n").unwrap();
  assert!(config.validate().is_err());
}

#[test]
fn project_root_found_from_nested_dir() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join("package.json"), "{}").unwrap();
  let nested = tmp.path().join("src/pages/[1]a");
  std::fs::create_dir_all(&nested).unwrap();
  let root = find_project_root(&nested).unwrap();
  assert_eq!(root, tmp.path().canonicalize().unwrap());
}

#[test]
fn missing_config_file_yields_defaults() {
  let tmp = tempfile::tempdir().unwrap();
  let config = load_config(tmp.path()).unwrap();
  assert_eq!(config.source.dir, "src");
}

#[test]
fn invalid_config_file_names_the_file() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join(CONFIG_FILE), "[source]\ndir = 3\n").unwrap();
  let err = load_config(tmp.path()).unwrap_err();
  assert!(format!("{err:#}").contains(CONFIG_FILE));
}
