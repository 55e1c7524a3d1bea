use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use shoe3d::animator::AnimatorConfig;
use shoe3d::cli::Cli;
use shoe3d::clock::Clock;
use shoe3d::terminal::{self, TerminalGuard};
use shoe3d::variant::Catalog;
use shoe3d::widget::{Control, ViewerWidget};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    // The terminal is the UI, so logs only ever go to a file
    let path = match log_file.or_else(|| std::env::var_os("RUST_LOG").map(|_| "shoe3d.log".into())) {
        Some(path) => path,
        None => return Ok(()),
    };
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match &cli.catalog {
        Some(path) => {
            let catalog = Catalog::from_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
            log::info!("loaded {} variants from {}", catalog.len(), path.display());
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

fn run(widget: &mut ViewerWidget, fps: u32) -> Result<()> {
    let mut term = TerminalGuard::enter(io::stdout()).context("Failed to set up terminal")?;
    let frame_budget = Duration::from_secs_f64(1.0 / fps as f64);
    let mut clock = Clock::new();

    loop {
        // Drain input until the frame budget runs out
        loop {
            let remaining = clock.remaining(frame_budget);
            if remaining.is_zero() || !event::poll(remaining)? {
                break;
            }
            if widget.handle_event(&event::read()?) == Control::Quit {
                return Ok(());
            }
        }

        let delta = clock.tick();
        if widget.frame(delta) {
            term.present(widget.framebuffer(), widget.overlay())?;
        }
    }
}

/// Main function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let catalog = load_catalog(&cli)?;
    if cli.dump_catalog {
        println!("{}", catalog.to_ron().context("Failed to serialize catalog")?);
        return Ok(());
    }

    let config = AnimatorConfig {
        max_delta: cli.max_delta,
        ..AnimatorConfig::default()
    };
    let mut widget = ViewerWidget::new(catalog, config)
        .with_debug(cli.debug)
        .with_wireframe(cli.wireframe);
    let (columns, rows) = terminal::size().context("Failed to query terminal size")?;
    widget.resize(columns, rows);

    log::info!("session started at {} fps", cli.fps);
    let result = run(&mut widget, cli.fps);
    log::info!(
        "session ended on variant {}",
        widget.catalog().active().name
    );
    result
}
