//! EchoTicker client — collect up to three ticker symbols and request a narrative
//! report about them.
//!
//! Reports are written by a Gemini model from synthetic market data. The client reads
//! commands from stdin (`add`, `remove`, `list`, `generate`, `quit`), prints a
//! notification for every outcome, and prints each report in full.
//!
//! Usage example (CLI):
//! ```bash
//! GEMINI_API_KEY=... echo_client --tickers aapl,msft
//! echo_client --path ./tickers.txt --offline --generate
//! ```
//!
//! The ticker file should contain symbols separated by commas, spaces, or new lines.
//! Without a key, or with `--offline`, requests fail fast or use the template report.
#![warn(missing_docs)]
mod args;
mod command;
mod render;

use crate::args::Args;
use crate::command::{Command, HELP};
use clap::Parser;
use crossbeam_channel::unbounded;
use echo_common::tickers::TickerParser;
use echo_common::{EchoError, Notifier, Result, TickerList, TickerSymbol, UiEvent};
use echo_report::{
    GeminiClient, MockGenerator, ReportConfig, ReportService, TextGenerator, WordRange,
};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader as AsyncBufReader};

type Generator = Box<dyn TextGenerator>;

#[tokio::main]
async fn main() -> Result<(), EchoError> {
    init_logger();
    let args = Args::parse();

    let mut config = ReportConfig::from_env()?;
    if let Some(model) = &args.model {
        config.model = model.trim().to_string();
    }
    config.words = WordRange::new(args.words_min, args.words_max)?;

    let generator: Generator = if args.offline {
        info!("Offline mode: reports use the template report");
        Box::new(MockGenerator::offline())
    } else {
        if !config.has_credential() {
            warn!("GEMINI_API_KEY is not set; report requests will be refused");
        }
        Box::new(GeminiClient::new(&config)?)
    };

    let (event_tx, event_rx) = unbounded::<UiEvent>();
    let renderer = render::spawn(event_rx);
    let notifier = Notifier::new(event_tx);

    let mut list = TickerList::new(notifier.clone());
    let mut service = ReportService::new(generator, notifier).with_words(config.words);

    for raw in starting_tickers(&args)? {
        let _ = list.submit(&raw);
    }

    let outcome = if args.generate {
        generate(&mut service, &list, args.dump_series).await
    } else {
        run_console(&mut service, &mut list, args.dump_series).await
    };

    drop(list);
    drop(service);
    if renderer.join().is_err() {
        return Err(EchoError::Format("notification renderer panicked".to_string()));
    }
    outcome
}

/// Read commands until `quit` or end of input.
async fn run_console(
    service: &mut ReportService<Generator>,
    list: &mut TickerList,
    dump_series: bool,
) -> Result<()> {
    println!("EchoTicker: add up to {} stock tickers, then `generate`.", list.capacity());
    println!("{HELP}");

    let mut lines = AsyncBufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt_marker()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        debug!("command: {:?}", command);

        match command {
            Command::Add(raw) => {
                let _ = list.submit(&raw);
            }
            Command::Remove(raw) => match TickerSymbol::parse(&raw) {
                Ok(symbol) => {
                    if !list.remove(&symbol) {
                        println!("{symbol} is not in the list");
                    }
                }
                Err(reason) => println!("{reason}"),
            },
            Command::List => print_list(list),
            Command::Generate => generate(service, list, dump_series).await?,
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    info!("Session ended");
    Ok(())
}

/// Request one report. Refusals and failures are shown by the renderer.
async fn generate(
    service: &mut ReportService<Generator>,
    list: &TickerList,
    dump_series: bool,
) -> Result<()> {
    match service.generate_report(list.symbols()).await {
        Ok(report) => {
            info!("Report ready ({}, state {})", report.source, service.state());
            if dump_series {
                println!("{}", serde_json::to_string_pretty(&report.series)?);
            }
        }
        Err(e) => debug!("report request ended without a report: {:?}", e),
    }
    Ok(())
}

fn print_list(list: &TickerList) {
    let names: Vec<&str> = list.symbols().iter().map(TickerSymbol::as_str).collect();
    if names.is_empty() {
        println!("Your tickers will appear here...");
    } else {
        println!("{}", names.join(", "));
    }
    println!("{} / {} tickers added", list.len(), list.capacity());
}

fn prompt_marker() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

/// Raw ticker entries from `--path` then `--tickers`, in order.
fn starting_tickers(args: &Args) -> Result<Vec<String>> {
    let mut raw = Vec::new();

    if let Some(path) = &args.path {
        let file_path = normalize_path(path);
        let file = File::open(&file_path)?;
        let tickers = TickerSymbol::parse_from_reader(BufReader::new(file))?;
        info!("Tickers from {}: {:?}", file_path.display(), tickers);
        raw.extend(tickers.into_iter().map(String::from));
    }
    if let Some(list) = &args.tickers {
        raw.extend(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    Ok(raw)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
