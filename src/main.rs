use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tcp_fsm::session::Session;
use tcp_fsm::telemetry::tracing_init;
use tcp_fsm::topology::{tcp, Topology, TopologySpec};
use tracing::{info, Level};

/// Drive a table-driven state machine with event names read from input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON topology to load instead of the built-in TCP lifecycle
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// File of whitespace-separated event names (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Record every transition and dump the history as JSON to stderr
    #[arg(long)]
    trace: bool,

    /// Print the topology and exit
    #[arg(long)]
    describe: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

fn load_topology(path: Option<&PathBuf>) -> anyhow::Result<Topology> {
    let topology = match path {
        Some(path) => TopologySpec::from_path(path)
            .and_then(|spec| spec.assemble())
            .with_context(|| format!("loading topology from {}", path.display()))?,
        None => tcp::topology().context("assembling the built-in TCP topology")?,
    };
    Ok(topology)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_init(cli.log_level);

    let topology = load_topology(cli.topology.as_ref())?;
    if cli.describe {
        print!("{topology}");
        return Ok(());
    }

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut session = Session::new(topology, io::stdout().lock());
    if cli.trace {
        session.fsm_mut().trace_on();
    }

    session.run_reader(reader).context("processing input")?;

    let stats = session.stats();
    info!(
        tokens = stats.tokens,
        dispatched = stats.dispatched,
        errors = stats.errors(),
        state = session.current_state().name(),
        "input exhausted"
    );

    if let Some(history) = session.fsm().history() {
        let json = serde_json::to_string_pretty(history).context("serializing history")?;
        eprintln!("{json}");
    }

    Ok(())
}
