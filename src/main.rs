use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use studland::application::engine::PageEngine;
use studland::domain::page::PageConfig;
use studland::domain::ports::{EventSource, SessionStep};
use studland::infrastructure::manual::ManualScheduler;
use studland::infrastructure::tokio_timer::TokioScheduler;
use studland::interfaces::csv::report_writer::ReportWriter;
use studland::interfaces::csv::script_reader::ScriptReader;
use studland::interfaces::stdin::stdin_source;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session script CSV file
    #[arg(required_unless_present = "live", conflicts_with = "live")]
    script: Option<PathBuf>,

    /// Page description JSON (optional). Defaults to the built-in page.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Read events from stdin with real timers instead of replaying a script
    #[arg(long)]
    live: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    studland::logging::init(cli.verbose);

    let config = match &cli.page {
        Some(path) => load_page(path)?,
        None => PageConfig::standard(),
    };

    let engine = match (cli.live, cli.script) {
        (true, _) => run_live(config).await,
        (false, Some(script)) => run_replay(config, &script)?,
        (false, None) => {
            // clap rules this out already
            return Err(miette::miette!("a script file is required unless --live is set"));
        }
    };

    // Output final state
    let stdout = io::stdout();
    let writer = ReportWriter::new(stdout.lock());
    writer.write_report(engine.state()).into_diagnostic()?;

    Ok(())
}

fn load_page(path: &Path) -> Result<PageConfig> {
    let file = File::open(path).into_diagnostic()?;
    let config: PageConfig = serde_json::from_reader(file).into_diagnostic()?;
    config.validate().into_diagnostic()?;
    Ok(config)
}

/// Replays a script under virtual time: events go straight to the engine and
/// `advance` rows move the clock, feeding whatever came due back in.
fn run_replay(config: PageConfig, script: &Path) -> Result<PageEngine> {
    let scheduler = ManualScheduler::new();
    let mut engine = PageEngine::new(config, Box::new(scheduler.clone()));

    let file = File::open(script).into_diagnostic()?;
    let reader = ScriptReader::new(file);
    for step in reader.steps() {
        match step {
            Ok(SessionStep::Event(event)) => {
                engine.handle(&event);
            }
            Ok(SessionStep::Advance { ms }) => {
                scheduler.advance_with(ms, |action| engine.apply(action));
            }
            Err(e) => {
                eprintln!("Error reading script: {}", e);
            }
        }
    }
    Ok(engine)
}

/// Runs a live session: steps come from stdin, delayed actions come back on
/// the real clock. Ends at stdin EOF.
async fn run_live(config: PageConfig) -> PageEngine {
    let (due_tx, mut due_rx) = tokio::sync::mpsc::unbounded_channel();
    let scheduler = TokioScheduler::new(due_tx);
    let mut engine = PageEngine::new(config, Box::new(scheduler));
    let mut source = stdin_source();

    loop {
        tokio::select! {
            Some(action) = due_rx.recv() => {
                engine.apply(action);
            }
            step = source.next_step() => match step {
                Some(Ok(SessionStep::Event(event))) => {
                    engine.handle(&event);
                }
                Some(Ok(SessionStep::Advance { .. })) => {
                    eprintln!("Error reading script: advance is only valid in replays");
                }
                Some(Err(e)) => {
                    eprintln!("Error reading script: {}", e);
                }
                None => break,
            },
        }
    }
    engine
}
