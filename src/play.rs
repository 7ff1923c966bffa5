// Headless playback - one scramble session on stdout
//
// Frames are drawn in place with a carriage return; `--json` prints every
// lifecycle event as one JSON object per line instead. Ctrl-C stops the
// session, which still ends with the resolved text.

use crate::effect::{EffectTiming, ScrambleOptions, ScrambleText};
use crate::events::ScrambleEvent;
use anyhow::{Context, Result};
use std::future::Future;
use std::io::Write;
use tokio::sync::mpsc;

const EVENT_CHANNEL_SIZE: usize = 1024;

/// Parameters of the `play` command
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub text: String,
    pub seed: Option<u64>,
    pub json: bool,
    pub timing: EffectTiming,
}

/// Run the `play` command against the process's stdout
pub async fn run(options: PlayOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    play(options, &mut out, interrupt).await
}

/// Play one session, writing to `out`, until it finishes
///
/// `interrupt` resolving stops the session early.
pub async fn play<W: Write>(
    options: PlayOptions,
    out: &mut W,
    interrupt: impl Future<Output = ()>,
) -> Result<()> {
    play_buffered(options, out, interrupt, EVENT_CHANNEL_SIZE).await
}

/// [`play`] with an explicit event channel capacity
///
/// Events that find the channel full are dropped by the label, so the loop
/// ends on the label's running state rather than on the `Finished` event.
async fn play_buffered<W: Write>(
    options: PlayOptions,
    out: &mut W,
    interrupt: impl Future<Output = ()>,
    capacity: usize,
) -> Result<()> {
    tracing::debug!(
        chars = options.text.chars().count(),
        duration = ?options.timing.session_duration(&options.text),
        "playing"
    );
    let (tx, mut rx) = mpsc::channel(capacity);
    let mut label = ScrambleText::with_sender(
        "play",
        options.text,
        ScrambleOptions {
            seed: options.seed,
            ..Default::default()
        },
        options.timing,
        tx,
    );

    tokio::pin!(interrupt);
    let mut interrupted = false;
    let mut running = label.subscribe_running();
    label.start();

    loop {
        tokio::select! {
            biased;

            _ = &mut interrupt, if !interrupted => {
                interrupted = true;
                tracing::info!("interrupted, resolving");
                label.stop();
            }
            event = rx.recv() => {
                let Some(event) = event else {
                    break;
                };
                write_event(out, &event, options.json, label.text())?;
                if matches!(event, ScrambleEvent::Finished { .. }) {
                    return Ok(());
                }
            }
            _ = running.wait_for(|running| !*running) => {
                break;
            }
        }
    }

    // The session is over; flush what is still queued
    let mut finished = false;
    while let Ok(event) = rx.try_recv() {
        finished |= matches!(event, ScrambleEvent::Finished { .. });
        write_event(out, &event, options.json, label.text())?;
    }
    if !finished {
        tracing::debug!("finished event was dropped, resolving from session state");
        if !options.json {
            write_line(out, &format!("\r{}\n", label.text()))?;
        }
    }

    Ok(())
}

fn write_event<W: Write>(out: &mut W, event: &ScrambleEvent, json: bool, target: &str) -> Result<()> {
    match render_event(event, json, target)? {
        Some(line) => write_line(out, &line),
        None => Ok(()),
    }
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    out.write_all(line.as_bytes()).context("Failed to write frame")?;
    out.flush().context("Failed to flush stdout")
}

/// What to print for `event`
///
/// Plain mode redraws the line for each frame and ends with the target and a
/// newline; JSON mode prints every event.
pub fn render_event(event: &ScrambleEvent, json: bool, target: &str) -> Result<Option<String>> {
    if json {
        let line = serde_json::to_string(event).context("Failed to serialize event")?;
        return Ok(Some(format!("{}\n", line)));
    }
    Ok(match event {
        ScrambleEvent::Started { .. } => None,
        ScrambleEvent::Frame { text, .. } => Some(format!("\r{}", text)),
        ScrambleEvent::Finished { .. } => Some(format!("\r{}\n", target)),
    })
}
