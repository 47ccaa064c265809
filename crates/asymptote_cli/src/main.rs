use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use asymptote_cli::{
    extract_all, load_config, read_inputs, to_json_lines, AtomicFileWriter, InputOptions,
};
use asymptote_core::PageExtractor;
use asymptote_logging::{asy_debug, asy_info, LogDestination};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogArg {
    Terminal,
    File,
    Both,
    Off,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
            LogArg::Off => LogDestination::Off,
        }
    }
}

#[derive(Parser)]
#[command(name = "asymptote")]
#[command(about = "Extract search channels (html, text, headings, links) from wikitext pages")]
struct Args {
    /// Page files to read; stdin when none is given
    inputs: Vec<PathBuf>,

    /// Treat every input line as a {"title": ..., "text": ...} JSON object
    #[arg(long)]
    jsonl: bool,

    /// RON file overriding the built-in vocabulary
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write JSON lines here instead of stdout (replaced atomically)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encoding of inputs without a byte order mark (guessed when omitted)
    #[arg(long)]
    encoding: Option<String>,

    /// Worker threads (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogArg::Terminal)]
    log: LogArg,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let level = match args.verbose {
        0 => config.level_filter()?.unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    asymptote_logging::initialize(args.log.into(), level);
    asy_debug!("Vocabulary: max depth {}", config.vocabulary.max_depth);

    if args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    let options = InputOptions {
        jsonl: args.jsonl,
        encoding: args.encoding,
    };
    let pages = read_inputs(&args.inputs, &options)?;
    asy_info!("Read {} pages", pages.len());

    let extractor = PageExtractor::new(config.vocabulary);
    let records = extract_all(&extractor, &pages);
    let lines = to_json_lines(&records).context("failed to serialize results")?;

    match args.output {
        Some(path) => {
            let writer = AtomicFileWriter::new(path);
            let written = writer
                .write(&lines)
                .with_context(|| format!("failed to write {:?}", writer.target()))?;
            asy_info!("Wrote {} records to {:?}", records.len(), written);
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(lines.as_bytes())
                .context("failed to write to stdout")?;
            handle.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}
