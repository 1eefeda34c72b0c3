//! morse-rx - decode recorded key activity into text
//!
//! Reads a tick log (`1` = key down, `0` = key up, one character per sampling
//! period, anything else ignored) or a JSON array of `{ "on", "seconds" }`
//! intervals, runs it through a decoding session and streams the decoded text
//! to stdout. Diagnostics go to stderr via `RUST_LOG`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use morse_rx::{
    replay, timing, MorseDecodeParams, MorseDecoder, MorseSignal, MorseTimingParams, OutputSink,
};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// One character per tick
    Ticks,
    /// JSON array of timed intervals
    Signals,
}

/// Command-line arguments for morse-rx
#[derive(Parser, Debug)]
#[command(name = "morse-rx")]
#[command(about = "Decode Morse key activity into text")]
#[command(version)]
struct Args {
    /// Input file (stdin when omitted)
    #[arg(short, long, env = "MORSE_RX_INPUT")]
    input: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum, default_value = "ticks")]
    format: InputFormat,

    /// Key this text with ITU timing instead of reading input
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Keying speed for --text
    #[arg(long, default_value = "20", env = "MORSE_RX_WPM")]
    wpm: i32,

    /// Sampling period in milliseconds
    #[arg(long, default_value = "1", env = "MORSE_RX_TICK_MS")]
    tick_ms: f32,

    /// Print a JSON summary instead of streaming text
    #[arg(long)]
    json: bool,
}

/// Writes each emission straight to stdout. The first write error is kept
/// and reported once decoding stops.
struct StdoutSink {
    out: io::Stdout,
    enabled: bool,
    error: Option<io::Error>,
}

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        if !self.enabled || self.error.is_some() {
            return;
        }
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            self.error = Some(e);
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn parse_tick_log(input: &str) -> impl Iterator<Item = bool> + '_ {
    input.bytes().filter_map(|b| match b {
        b'1' => Some(true),
        b'0' => Some(false),
        _ => None,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let params = MorseDecodeParams {
        tick_seconds: args.tick_ms / 1000.0,
    };

    let mut decoder = MorseDecoder::with_sink(StdoutSink {
        out: io::stdout(),
        enabled: !args.json,
        error: None,
    });
    info!(tick_ms = args.tick_ms, "decoder ready");

    let ticks_processed = if let Some(text) = &args.text {
        let timing_params = MorseTimingParams {
            wpm: args.wpm,
            ..Default::default()
        };
        let signals = timing::morse_timing(text, &timing_params)
            .context("Failed to synthesize keying")?;
        debug!(signals = signals.len(), "keying synthesized");
        let ticks = replay::signals_to_ticks(&signals, &params)?;
        replay::replay_into(&mut decoder, ticks)
    } else {
        let input = read_input(args.input.as_ref())?;
        match args.format {
            InputFormat::Ticks => replay::replay_into(&mut decoder, parse_tick_log(&input)),
            InputFormat::Signals => {
                let signals: Vec<MorseSignal> =
                    serde_json::from_str(&input).context("Invalid signals JSON")?;
                let ticks = replay::signals_to_ticks(&signals, &params)?;
                replay::replay_into(&mut decoder, ticks)
            }
        }
    };

    let result = replay::summarize(&decoder, ticks_processed);
    let sink = decoder.into_sink();
    if let Some(e) = sink.error {
        return Err(e).context("Failed to write decoded text");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
    }

    info!(
        ticks = result.ticks_processed,
        characters = result.characters_decoded,
        unknown = result.unknown_characters,
        unit_ticks = result.unit_ticks,
        wpm = result.estimated_wpm,
        "decoding finished"
    );

    Ok(())
}
