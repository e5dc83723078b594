use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use odontogram::app::App;
use odontogram::config::Config;
use odontogram::event_loop::run_app;
use odontogram::logging;

/// Command line: `odontogram [--read-only] [RECORD]`
struct Args {
    record_path: Option<PathBuf>,
    read_only: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        record_path: None,
        read_only: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--read-only" => args.read_only = true,
            flag if flag.starts_with('-') => bail!("unknown option: {flag}"),
            path if args.record_path.is_none() => args.record_path = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument: {extra}"),
        }
    }
    Ok(args)
}

/// Owns the terminal modes for the lifetime of the chart.
///
/// Key-release reporting is what delivers modifier releases, so it is pushed
/// here and popped in `Drop` together with raw mode and mouse capture.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .context("Failed to enable key release reporting")?;
        } else {
            log::warn!("terminal lacks key release reporting; falling back to mouse motion");
        }

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore terminal (always try to restore even on error)
        if self.keyboard_enhanced {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    // Check if we're in a proper terminal
    if !io::stdin().is_terminal() {
        bail!("odontogram must be run in an interactive terminal");
    }

    let args = parse_args()?;

    let mut config = Config::load().context("Failed to load configuration")?;
    config.read_only |= args.read_only;

    // Logging is diagnostic only; the chart still works without it
    match logging::default_log_dir() {
        Ok(dir) => {
            if let Err(e) = logging::init_logging(&config.log_level, &dir) {
                eprintln!("warning: logging disabled: {e:#}");
            }
        }
        Err(e) => eprintln!("warning: logging disabled: {e:#}"),
    }

    let record_path = config.resolve_record_path(args.record_path)?;
    let mut app = App::new(config, record_path).context("Failed to initialize application")?;

    let result = {
        let mut guard = TerminalGuard::acquire()?;
        run_app(&mut guard.terminal, &mut app)
    };

    if let Err(e) = app.persist_if_changed() {
        log::error!("failed to save chart record on exit: {e:#}");
        logging::flush_logging();
        return Err(e);
    }

    logging::flush_logging();
    result
}
