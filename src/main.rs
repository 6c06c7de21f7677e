use anyhow::{Context, Result};
use clap::Parser;
use statbuf::util::report;
use statbuf::{Config, OutputFormat, StatsBuffer, StatsSnapshot};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "statbuf", about = "Windowed stats and percentiles over integer samples", version = "0.1")]
struct Cli {
    /// File of integer samples (whitespace or newline separated); stdin if omitted
    input: Option<PathBuf>,

    /// Buffer capacity (overrides stats.sample_size)
    #[arg(short, long)]
    size: Option<usize>,

    /// Comma-separated percentile targets, e.g. 50,95,99.9 (overrides stats.percentiles)
    #[arg(short, long, value_delimiter = ',')]
    percentiles: Option<Vec<f64>>,

    /// Compute and print after every N samples
    #[arg(short, long)]
    window: Option<usize>,

    /// Print snapshots as JSON
    #[arg(long)]
    json: bool,

    /// Load configuration from this TOML file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None       => Config::load(),
    };
    if let Some(size) = cli.size {
        cfg.stats.sample_size = size;
    }
    if let Some(p) = &cli.percentiles {
        cfg.stats.percentiles = p.clone();
    }
    if cli.json {
        cfg.output.format = OutputFormat::Json;
    }

    if cli.print_config {
        return run_print_config(&cli, &cfg);
    }

    let mut buf = StatsBuffer::from_config(&cfg.stats)?;
    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    run(reader, &mut buf, &cfg, cli.window)?;
    Ok(())
}

/// Feed every sample into `buf`, emitting a window each time `window`
/// samples have been recorded and once more for any trailing partial window.
/// Returns the emitted snapshots in order.
///
/// Windowing requires `reset_on_read`: without a reset the buffer keeps
/// serving its first computation, so later windows would repeat it.
fn run(
    reader: impl BufRead,
    buf: &mut StatsBuffer,
    cfg: &Config,
    window: Option<usize>,
) -> Result<Vec<StatsSnapshot>> {
    let window = window.filter(|w| *w > 0);
    if window.is_some() && !cfg.output.reset_on_read {
        anyhow::bail!("--window needs output.reset_on_read = true");
    }
    let mut emitted = Vec::new();
    let mut pending = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("reading input")?;
        for token in line.split_whitespace() {
            let v: i64 = token.parse()
                .with_context(|| format!("line {}: not an integer: {:?}", lineno + 1, token))?;
            buf.record(v);
            pending += 1;
            if window == Some(pending) {
                emitted.push(emit(buf, cfg, emitted.len())?);
                pending = 0;
            }
        }
    }

    if pending > 0 || emitted.is_empty() {
        emitted.push(emit(buf, cfg, emitted.len())?);
    }
    Ok(emitted)
}

fn emit(buf: &mut StatsBuffer, cfg: &Config, index: usize) -> Result<StatsSnapshot> {
    buf.compute_stats();
    let snap = StatsSnapshot::capture(buf);
    match cfg.output.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "timestamp":   chrono::Local::now().to_rfc3339(),
                "window":      index,
                "stats":       snap,
                "data_points": snap.data_points(&cfg.stats),
            });
            println!("{}", serde_json::to_string(&out)?);
        }
        OutputFormat::Text => {
            print!("{}", report::generate(&snap, &format!("statbuf window {}", index)));
        }
    }
    if cfg.output.reset_on_read {
        buf.reset();
    }
    Ok(snap)
}

fn run_print_config(cli: &Cli, cfg: &Config) -> Result<()> {
    let path = cli.config.clone()
        .or_else(Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let s = &cfg.stats;
    println!("Config: {}", path);
    println!();
    println!("[stats]");
    println!("  sample_size          = {}", s.sample_size);
    println!("  percentiles          = {:?}", s.percentiles);
    println!("  publish_count        = {}", s.publish_count);
    println!("  publish_total        = {}", s.publish_total);
    println!("  publish_min          = {}", s.publish_min);
    println!("  publish_max          = {}", s.publish_max);
    println!("  publish_mean         = {}", s.publish_mean);
    println!("  publish_variance     = {}", s.publish_variance);
    println!("  publish_stddev       = {}", s.publish_stddev);
    println!();
    println!("[output]");
    println!("  format        = {:?}", cfg.output.format);
    println!("  reset_on_read = {}", cfg.output.reset_on_read);
    Ok(())
}
