//! tinydiff entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::Config;
use core_render::{Renderer, Theme};
use core_terminal::{TerminalSession, restore_best_effort};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

mod view;

use view::DiffView;

const LOG_FILE: &str = "tinydiff.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tinydiff", version, about = "Side-by-side terminal diff viewer")]
struct Args {
    /// Original file, shown on the left.
    pub left: PathBuf,
    /// Modified file, shown on the right.
    pub right: PathBuf,
    /// Configuration file path (overrides discovery of `tinydiff.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    /// Log to `<dir>/tinydiff.log`; the terminal itself is never written to.
    fn configure_logging(&mut self, log_dir: &Path) -> Result<()> {
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE)
            .build(log_dir)
            .with_context(|| format!("creating log file in {}", log_dir.display()))?;
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                // The session guard sees the terminal as restored and leaves
                // the message below on screen.
                restore_best_effort();
                default_panic(info);
            }));
        });
    }
}

fn build_view(args: &Args, config: &Config) -> DiffView {
    let renderer = Renderer::new(Theme::from_config(config.theme()), config.tab_width());
    DiffView::from_paths(&args.left, &args.right, config.diff_algorithm(), renderer)
}

fn main() -> Result<()> {
    // Usage errors exit here, before the terminal is touched.
    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;

    let mut startup = AppStartup::new();
    startup.configure_logging(&config.log_dir())?;
    config.report_load();
    AppStartup::install_panic_hook();

    info!(
        target: "runtime",
        left = %args.left.display(),
        right = %args.right.display(),
        config = ?config.path,
        "startup"
    );

    let mut view = build_view(&args, &config);
    let end = {
        let mut session = TerminalSession::open(config.input_timeout())
            .context("taking over the terminal")?;
        let end = session.run(&mut view);
        session.close().context("restoring the terminal")?;
        end?
    };

    info!(
        target: "runtime",
        ?end,
        rows = view.rows().len(),
        cursor = view.viewport().cursor_line(),
        "shutdown"
    );
    drop(startup.log_guard.take());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn requires_exactly_two_paths() {
        let err = Args::try_parse_from(["tinydiff", "a.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
        let err = Args::try_parse_from(["tinydiff", "a", "b", "c"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parses_paths_and_config_override() {
        let args =
            Args::try_parse_from(["tinydiff", "old.rs", "new.rs", "--config", "/etc/td.toml"])
                .unwrap();
        assert_eq!(args.left, PathBuf::from("old.rs"));
        assert_eq!(args.right, PathBuf::from("new.rs"));
        assert_eq!(args.config, Some(PathBuf::from("/etc/td.toml")));
    }

    #[test]
    fn view_builds_from_config_with_unreadable_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("tinydiff.toml");
        std::fs::write(&cfg_path, "[view]\ntab_width = 2\n").unwrap();
        let config = core_config::load_from(Some(cfg_path)).unwrap();
        let args = Args {
            left: dir.path().join("missing-a"),
            right: dir.path().join("missing-b"),
            config: None,
        };
        assert_eq!(config.tab_width(), 2);
        let view = build_view(&args, &config);
        assert!(view.rows().is_empty());
    }
}
