use std::borrow::Cow;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{ArgGroup, Parser};
use tracing::Level;

use uni2ascii_core::{ResidualPolicy, Transliterator, Uni2AsciiConfig, to_ascii_lossy, trim_line};

#[derive(Parser, Debug)]
#[command(
    name = "uni2ascii",
    version,
    about = "Convert unicode characters that resemble ASCII to their ASCII equivalent"
)]
#[command(group(ArgGroup::new("residual").args(["error", "drop", "replace"])))]
struct Cli {
    /// Exit with an error if a line still has non-ASCII after conversion
    #[arg(short, long)]
    error: bool,
    /// Silently drop lines that still have non-ASCII after conversion
    #[arg(short, long)]
    drop: bool,
    /// Replace remaining non-ASCII runs with STR (empty deletes them)
    #[arg(short, long, value_name = "STR")]
    replace: Option<String>,
    /// Strip leading and trailing whitespace from each output line
    #[arg(short, long)]
    trim: bool,
    /// Extra `<source> <replacement>` entries layered over the builtin table
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,
    /// TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// error | warn (warning) | info | debug | trace
    #[arg(long, value_name = "LEVEL")]
    loglevel: Option<String>,
}

/// Everything the line loop needs, resolved from config and flags.
#[derive(Debug, Clone)]
struct RunOptions {
    policy: ResidualPolicy,
    trim: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct RunStats {
    lines: usize,
    dropped: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = load_config(cli.config.as_deref())?;
    init_logging(cli.loglevel.as_deref().unwrap_or(&cfg.log.level))?;

    if let Some(path) = &cli.table {
        cfg.table.extra = Some(path.clone());
    }
    let translit = Transliterator::new(Arc::new(cfg.build_table()?));
    let opts = resolve_options(&cli, &cfg);
    tracing::debug!(
        policy = opts.policy.as_str(),
        trim = opts.trim,
        entries = translit.table().len(),
        "starting"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = run(stdin.lock(), &mut out, &translit, &opts)?;
    out.flush().context("flush stdout")?;
    tracing::info!(lines = stats.lines, dropped = stats.dropped, "done");
    Ok(())
}

/// A config named on the command line must exist.
fn load_config(path: Option<&Path>) -> Result<Uni2AsciiConfig> {
    match path {
        Some(path) => {
            anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
            Uni2AsciiConfig::load(path)
        }
        None => Ok(Uni2AsciiConfig::default()),
    }
}

fn parse_level(level: &str) -> Result<Level> {
    let level = level.trim();
    let name = if level.eq_ignore_ascii_case("warning") { "warn" } else { level };
    Level::from_str(name).map_err(|_| {
        anyhow!("unknown log level {level:?} (expected error, warn, info, debug or trace)")
    })
}

fn init_logging(level: &str) -> Result<()> {
    let level = parse_level(level)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// Flags win over the config file.
fn resolve_options(cli: &Cli, cfg: &Uni2AsciiConfig) -> RunOptions {
    let policy = if cli.error {
        ResidualPolicy::Error
    } else if cli.drop {
        ResidualPolicy::DropLine
    } else if let Some(with) = &cli.replace {
        ResidualPolicy::Replace(with.clone())
    } else {
        cfg.residual.clone()
    };
    RunOptions {
        policy,
        trim: cli.trim || cfg.output.trim,
    }
}

/// Convert `input` line by line into `output`, keeping line terminators.
fn run<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    translit: &Transliterator,
    opts: &RunOptions,
) -> Result<RunStats> {
    let mut stats = RunStats::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = input.read_until(b'\n', &mut buf).context("read stdin")?;
        if n == 0 {
            break;
        }
        stats.lines += 1;
        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            tracing::warn!(line = stats.lines, "invalid UTF-8 replaced");
        }

        let converted = translit.transliterate(&line);
        let kept = opts
            .policy
            .apply(&converted)
            .with_context(|| format!("line {}", stats.lines))?;
        let Some(kept) = kept else {
            tracing::debug!(line = stats.lines, "dropped");
            stats.dropped += 1;
            continue;
        };
        let kept = if opts.trim { trim_line(&kept) } else { kept };
        output
            .write_all(to_ascii_lossy(&kept).as_bytes())
            .context("write stdout")?;
    }
    Ok(stats)
}
