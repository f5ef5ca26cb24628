//! Command-line runner (default binary).
//!
//! Reads one command per line from stdin, drives the engine with a gravity
//! clock, and writes engine events to stdout as JSON lines. A final snapshot
//! and stat summary are written on exit.

use anyhow::{anyhow, Result};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use tetris_board::core::{Change, GameEngine, GameEvent, PieceSource};
use tetris_board::driver::{
    parse_args, read_inputs, run_session, Input, RecordWriter, SessionConfig, StatTracker,
};

const USAGE: &str = "\
usage: tetris-board [--width N] [--height N] [--seed N] [--step-ms N]
                    [--initial-delay-ms N] [--randomizer bag|uniform] [--verbose]

stdin commands: moveLeft moveRight moveDown rotate hardDrop step pause resume new quit";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    let config = parse_args(&args, SessionConfig::from_env())?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to create tokio runtime: {}", e))?;
    let result = rt.block_on(run(config));

    // The stdin reader may still be parked in a blocking read.
    rt.shutdown_background();
    result
}

/// Per-row movement events are only written with `--verbose`.
fn is_noise(event: &GameEvent) -> bool {
    matches!(
        event,
        GameEvent::StateChanged(Change::Moved | Change::Rotated | Change::Dropped)
    )
}

async fn run(config: SessionConfig) -> Result<()> {
    let (input_tx, input_rx) = mpsc::channel::<Input>(config.max_pending.max(1));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();

    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = read_inputs(stdin, input_tx).await {
            eprintln!("[Input] stdin error: {}", e);
        }
    });

    let verbose = config.verbose;
    let printer = tokio::spawn(async move {
        let mut writer = RecordWriter::new();
        let mut stats = StatTracker::new();
        let mut out = tokio::io::stdout();
        while let Some(event) = event_rx.recv().await {
            stats.record(&event);
            if !verbose && is_noise(&event) {
                continue;
            }
            let line = writer.record(&event).to_line()?;
            out.write_all(line.as_bytes()).await?;
        }
        out.flush().await?;
        Ok::<_, anyhow::Error>((writer, stats))
    });

    let mut engine = GameEngine::new(PieceSource::default());
    let subscription = engine.subscribe(move |event: &GameEvent| {
        let _ = event_tx.send(event.clone());
    });

    eprintln!(
        "[Session] Starting {}x{} ({} randomizer, step {}ms)",
        config.width,
        config.height,
        config.randomizer.as_str(),
        config.clock.period.as_millis()
    );
    let summary = run_session(&mut engine, &config, input_rx).await?;

    // Closes the event channel so the printer drains and returns.
    engine.unsubscribe(subscription);
    let (mut writer, stats) = printer
        .await
        .map_err(|e| anyhow!("printer task failed: {}", e))??;

    let snapshot = engine.snapshot();
    let mut out = tokio::io::stdout();
    out.write_all(writer.record(&snapshot).to_line()?.as_bytes())
        .await?;
    out.write_all(writer.record(&stats).to_line()?.as_bytes())
        .await?;
    out.flush().await?;

    eprintln!(
        "[Session] Finished: games={} ticks={} commands={} dropped={} status={}",
        summary.games,
        summary.ticks,
        summary.commands,
        summary.dropped,
        summary.final_status.as_str()
    );
    Ok(())
}
