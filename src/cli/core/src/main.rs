/* src/cli/core/src/main.rs */

mod build;
mod clean;
mod config;
mod dev;
mod host;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagemacro_codegen::{LoadOptions, load_page_tree, synthesize_menus, synthesize_routes};
use tracing_subscriber::EnvFilter;

use build::Session;
use config::{PagemacroConfig, find_project_root, load_config};

#[derive(Parser)]
#[command(name = "pagemacro", about = "Build-time pages and i18n macros")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Expand every module under the source dir into the output dir
  Build {
    /// Project root (nearest package.json if omitted)
    #[arg(short, long)]
    root: Option<PathBuf>,
  },
  /// Print the expanded text of one module
  Expand {
    file: PathBuf,
    #[arg(short, long)]
    root: Option<PathBuf>,
  },
  /// Print the route tree (or menus) synthesized from a pages directory as JSON
  Routes {
    pages_dir: PathBuf,
    /// Route prefix of the pages root
    #[arg(short, long, default_value = "/")]
    prefix: String,
    /// Print menus instead of routes
    #[arg(short, long)]
    menus: bool,
    #[arg(short, long)]
    root: Option<PathBuf>,
  },
  /// Build, then rebuild affected modules on change
  Dev {
    #[arg(short, long)]
    root: Option<PathBuf>,
  },
  /// Remove the output dir
  Clean {
    #[arg(short, long)]
    root: Option<PathBuf>,
  },
}

/// Warn if `.pagemacro/` is not covered by any gitignore rule
fn warn_output_not_gitignored(root: &Path) {
  use std::process::Command;
  let output =
    Command::new("git").args(["check-ignore", "-q", ".pagemacro"]).current_dir(root).output();
  // exit 1 = not ignored; other codes mean not a repo or no git, skip
  if let Ok(o) = output
    && o.status.code() == Some(1)
  {
    ui::warn(".pagemacro/ is not in .gitignore -- add it to avoid tracking build output");
  }
}

/// Resolve the project root (explicit or auto-detected) and load its config
fn resolve_project(explicit: Option<PathBuf>) -> Result<(PathBuf, PagemacroConfig)> {
  let start = match explicit {
    Some(p) => p,
    None => std::env::current_dir().context("failed to get cwd")?,
  };
  let root = find_project_root(&start)?;
  let config = load_config(&root)?;
  Ok((root, config))
}

fn print_routes(
  pages_dir: &Path,
  prefix: &str,
  menus: bool,
  root: &Path,
  config: &PagemacroConfig,
) -> Result<()> {
  let pages_dir = pages_dir
    .canonicalize()
    .with_context(|| format!("failed to resolve {}", pages_dir.display()))?;
  let name = pages_dir.file_name().and_then(|n| n.to_str()).context("invalid pages directory")?;
  let importer_dir = pages_dir.parent().unwrap_or(root);
  let pattern = format!("./{name}");
  let opts = LoadOptions {
    pages: &pattern,
    prefix,
    root,
    importer_dir,
    allow_no_meta: config.pages.allow_no_meta,
  };
  let tree = load_page_tree(&opts, &mut |_| {})?;
  let json = if menus {
    serde_json::to_string_pretty(&synthesize_menus(&tree.root))?
  } else {
    serde_json::to_string_pretty(&synthesize_routes(&tree.root))?
  };
  println!("{json}");
  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_env("PAGEMACRO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Build { root } => {
      let (root, config) = resolve_project(root)?;
      warn_output_not_gitignored(&root);
      let mut session = Session::new(root, config);
      build::run_build(&mut session)?;
    }
    Command::Expand { file, root } => {
      let (root, config) = resolve_project(root)?;
      let mut session = Session::new(root, config);
      let code = build::expand_file(&mut session, &file)?;
      print!("{code}");
    }
    Command::Routes { pages_dir, prefix, menus, root } => {
      let (root, config) = resolve_project(root)?;
      print_routes(&pages_dir, &prefix, menus, &root, &config)?;
    }
    Command::Dev { root } => {
      let (root, config) = resolve_project(root)?;
      warn_output_not_gitignored(&root);
      dev::run_dev(Session::new(root, config)).await?;
    }
    Command::Clean { root } => {
      let (root, config) = resolve_project(root)?;
      clean::run_clean(&config, &root)?;
    }
  }

  Ok(())
}
