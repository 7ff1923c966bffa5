// scrambler - scramble-text effects in the terminal
//
// Text scrambles through random letters and resolves left to right into its
// real characters, one position every couple of ticks.
//
// Architecture:
// - Effect: ScrambleText labels, each driving at most one timer task
// - TUI (ratatui): a project showcase whose labels scramble on mount, on
//   slide activation and on hover
// - Play: a single headless session printed to stdout
// - Event system: labels report their lifecycle over an mpsc channel

mod cli;
mod config;
mod effect;
mod events;
mod logging;
mod play;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use effect::EffectTiming;
use logging::{LogBuffer, LogSink};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, path, reset }) => cli::handle_config(show, path, reset),
        Some(Commands::Play {
            text,
            seed,
            json,
            tick_ms,
        }) => {
            let config = Config::from_env();
            // Keep the guard alive so buffered file logs are flushed on exit
            let _file_guard = logging::init(&config.logging, LogSink::Stderr)?;

            let timing = match tick_ms {
                Some(ms) => EffectTiming::new(ms, config.effect.ticks_per_char),
                None => config.effect.timing(),
            };
            play::run(play::PlayOptions {
                text,
                seed,
                json,
                timing,
            })
            .await
        }
        None => {
            // Write the config template on first run
            Config::ensure_config_exists();
            let config = Config::from_env();

            // Logs are captured in memory so they don't corrupt the TUI display
            let log_buffer = LogBuffer::new();
            let _file_guard = logging::init(&config.logging, LogSink::Tui(log_buffer.clone()))?;

            tracing::info!(
                theme = config.theme.as_str(),
                projects = config.projects.len(),
                tick_ms = config.effect.tick_interval_ms,
                "starting showcase"
            );
            tui::run_tui(config, log_buffer).await
        }
    }
}
