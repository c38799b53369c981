/* src/cli/core/src/dev/mod.rs */

// `pagemacro dev`: full build, then watch the source tree and re-expand only
// the modules a change invalidates.

mod batch;
mod classify;


use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::signal;
use tokio::sync::mpsc::Receiver;

use batch::apply_batch;
use classify::FsChange;

use crate::build::{Session, describe_failure, pipeline};
use crate::ui::{self, CYAN, DIM, GREEN, RED, RESET};

fn setup_watcher() -> Result<(RecommendedWatcher, Receiver<notify::Event>)> {
  let (tx, rx) = tokio::sync::mpsc::channel(256);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| match res {
      Ok(event) => {
        let _ = tx.blocking_send(event);
      }
      Err(e) => tracing::warn!(error = %e, "watcher error"),
    },
    notify::Config::default(),
  )?;
  Ok((watcher, rx))
}

fn collect_event(event: notify::Event, pending: &mut Vec<(PathBuf, FsChange)>) {
  for path in event.paths {
    if let Some(change) = FsChange::from_event(&event.kind, &path) {
      pending.push((path, change));
    }
  }
}

async fn handle_batch(session: Session, events: Vec<(PathBuf, FsChange)>) -> Result<Session> {
  let started = Instant::now();
  let (session, summary) = tokio::task::spawn_blocking(move || {
    let mut session = session;
    let summary = apply_batch(&mut session, &events);
    (session, summary)
  })
  .await
  .context("rebuild task panicked")?;

  if summary.is_empty() {
    return Ok(session);
  }
  for (path, msg) in &summary.failures {
    let rel = path.strip_prefix(&session.root).unwrap_or(path);
    println!("  {RED}[pagemacro]{RESET} {}: {msg}", rel.display());
  }
  let pruned = if summary.pruned > 0 {
    format!(", {} route(s) pruned", summary.pruned)
  } else {
    String::new()
  };
  println!(
    "  {GREEN}[pagemacro]{RESET} {} module(s) rebuilt, {} file(s) copied{pruned} ({:.1}s)",
    summary.rebuilt,
    summary.copied,
    started.elapsed().as_secs_f64()
  );
  Ok(session)
}

pub async fn run_dev(mut session: Session) -> Result<()> {
  ui::banner("dev", Some(&session.config.source.dir));
  let report = pipeline::run_pipeline(&mut session, true)?;
  for (path, msg) in &report.failures {
    ui::error(&format!("{}", path.strip_prefix(&session.root).unwrap_or(path).display()));
    ui::detail(&format!("{DIM}{msg}{RESET}"));
  }
  ui::ok(&format!("{} module(s) expanded, {} file(s) copied", report.transformed, report.copied));

  let (mut watcher, mut rx) = setup_watcher()?;
  let src_dir = session.src_dir();
  watcher
    .watch(&src_dir, RecursiveMode::Recursive)
    .with_context(|| format!("failed to watch {}", src_dir.display()))?;
  let debounce = Duration::from_millis(session.config.dev.debounce_ms);
  println!("  {DIM}watching {}/ (Ctrl+C to stop){RESET}", session.config.source.dir);

  loop {
    tokio::select! {
      _ = signal::ctrl_c() => {
        println!();
        println!("  {DIM}shutting down...{RESET}");
        break;
      }
      Some(event) = rx.recv() => {
        // Debounce: wait, then drain pending events into one batch
        let mut pending = Vec::new();
        collect_event(event, &mut pending);
        tokio::time::sleep(debounce).await;
        while let Ok(event) = rx.try_recv() {
          collect_event(event, &mut pending);
        }
        if pending.is_empty() {
          continue;
        }
        println!("  {CYAN}[pagemacro]{RESET} {} change(s), rebuilding...", pending.len());
        session = match handle_batch(session, pending).await {
          Ok(s) => s,
          Err(e) => {
            println!("  {RED}[pagemacro]{RESET} {}", describe_failure(&e));
            return Err(e);
          }
        };
      }
    }
  }
  Ok(())
}
