use anyhow::{anyhow, bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use bioutil::error::SeqError;
use bioutil::io::fasta::{FastaReader, FastaRecord, HeaderMode};
use bioutil::select::{self, Direction, Selected, TieBreak};
use bioutil::stats::{self, DescriptiveStats, LinearFit};
use bioutil::util::{codon, dna, tabbed::write_tabbed};

// records handed to the thread pool at a time
const BATCH_SIZE: usize = 4096;

#[derive(Parser, Debug)]
#[command(name = "bioutil", author, version, about = "Small numeric and sequence utilities", arg_required_else_help = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reverse-complement every record of a FASTA file
    Revcomp {
        /// FASTA file ("-" for stdin)
        fasta: String,
        /// Use the whole header line as the record id
        #[arg(long = "full-header")]
        full_header: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Translate every record of a FASTA file with the standard genetic code
    Translate {
        /// FASTA file ("-" for stdin)
        fasta: String,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Descriptive statistics of whitespace-separated numbers
    Stats {
        /// Input file ("-" for stdin)
        input: String,
        /// Quantile fraction in [0, 1]; may be repeated
        #[arg(short = 'q', long = "quantile")]
        quantiles: Vec<f64>,
        /// Split the values into this many approximate quantile bins
        #[arg(long)]
        bins: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Least-squares line and Pearson r of "x y" pairs, one per line
    Fit {
        /// Input file ("-" for stdin)
        input: String,
        #[arg(long)]
        json: bool,
    },
    /// Pick the position of the smallest (or largest) value
    Pick {
        /// Lines of "value" or "key<TAB>value" ("-" for stdin)
        input: String,
        /// Select the maximum instead of the minimum
        #[arg(long)]
        max: bool,
        /// Tie-break policy: first, random or all
        #[arg(long, default_value = "first")]
        tie: TieBreak,
        /// Seed for the random tie-break (entropy if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    match cli.command {
        Commands::Revcomp { fasta, full_header, threads } => {
            let mode = if full_header { HeaderMode::Full } else { HeaderMode::Token };
            run_per_record(open_input(&fasta)?, &fasta, mode, threads, &mut out, dna::revcomp)
        }
        Commands::Translate { fasta, threads } => run_per_record(
            open_input(&fasta)?,
            &fasta,
            HeaderMode::Token,
            threads,
            &mut out,
            codon::translate,
        ),
        Commands::Stats { input, quantiles, bins, json } => {
            run_stats(open_input(&input)?, &input, &quantiles, bins, json, &mut out)
        }
        Commands::Fit { input, json } => run_fit(open_input(&input)?, &input, json, &mut out),
        Commands::Pick { input, max, tie, seed } => {
            let direction = if max { Direction::Max } else { Direction::Min };
            run_pick(open_input(&input)?, &input, direction, tie, seed, &mut out)
        }
    }?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, &directives))
        .init();
}

/// `-v` 只决定默认级别；`RUST_LOG` 中的任何指令都优先
fn log_filter(verbose: u8, directives: &str) -> EnvFilter {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    EnvFilter::builder().with_default_directive(level.into()).parse_lossy(directives)
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(std::io::BufReader::new(std::io::stdin())));
    }
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open input '{}': {}", path, e))?;
    Ok(Box::new(std::io::BufReader::new(fh)))
}

/// 读取 FASTA，按批交给线程池处理，按输入顺序输出 `id<TAB>结果`
fn run_per_record<R, F>(
    input: R,
    label: &str,
    mode: HeaderMode,
    threads: usize,
    out: &mut dyn Write,
    transform: F,
) -> Result<()>
where
    R: BufRead,
    F: Fn(&[u8]) -> Result<Vec<u8>, SeqError> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let mut reader = FastaReader::with_mode(input, mode);

    let mut n_records = 0usize;
    let mut batch: Vec<FastaRecord> = Vec::with_capacity(BATCH_SIZE);
    loop {
        batch.clear();
        while batch.len() < BATCH_SIZE {
            match reader.next_record()? {
                Some(rec) => batch.push(rec),
                None => break,
            }
        }
        if batch.is_empty() {
            break;
        }

        let results: Vec<Result<Vec<u8>, SeqError>> =
            pool.install(|| batch.par_iter().map(|rec| transform(rec.seq.as_slice())).collect());
        for (rec, res) in batch.iter().zip(results) {
            let converted = res.map_err(|e| anyhow!("record '{}': {}", rec.id, e))?;
            write_tabbed(out, &[&rec.id, &String::from_utf8_lossy(&converted)])?;
        }
        n_records += batch.len();
        debug!(n_records, "batch done");
    }

    info!(input = label, n_records, threads, "processed FASTA records");
    Ok(())
}

fn read_numbers<R: BufRead>(input: R, label: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for tok in line.split_whitespace() {
            let v: f64 = tok
                .parse()
                .map_err(|e| anyhow!("{}:{}: cannot parse '{}' as a number: {}", label, i + 1, tok, e))?;
            values.push(v);
        }
    }
    Ok(values)
}

#[derive(Serialize)]
struct QuantileValue {
    fraction: f64,
    value: f64,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    summary: DescriptiveStats,
    quantiles: Vec<QuantileValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bins: Option<Vec<(f64, f64)>>,
}

fn run_stats<R: BufRead>(
    input: R,
    label: &str,
    fractions: &[f64],
    bins: Option<usize>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let values = read_numbers(input, label)?;
    if values.is_empty() {
        bail!("'{}' contains no numbers", label);
    }
    info!(input = label, n = values.len(), "read values");

    let summary = stats::describe(&values)?;
    let quantiles = fractions
        .iter()
        .map(|&fraction| -> Result<QuantileValue> {
            Ok(QuantileValue { fraction, value: stats::quantile(&values, fraction)? })
        })
        .collect::<Result<Vec<_>>>()?;
    let bins = bins.map(|n| stats::approximate_quantile_bins(&values, n)).transpose()?;
    let report = StatsReport { summary, quantiles, bins };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let s = &report.summary;
    write_tabbed(out, &[&"count", &s.count])?;
    write_tabbed(out, &[&"mean", &s.mean])?;
    write_tabbed(out, &[&"variance", &s.variance])?;
    write_tabbed(out, &[&"std_dev", &s.std_dev])?;
    write_tabbed(out, &[&"min", &s.min])?;
    write_tabbed(out, &[&"median", &s.median])?;
    write_tabbed(out, &[&"max", &s.max])?;
    for q in &report.quantiles {
        write_tabbed(out, &[&format!("q{}", q.fraction), &q.value])?;
    }
    for (i, (lo, hi)) in report.bins.iter().flatten().enumerate() {
        write_tabbed(out, &[&format!("bin{}", i + 1), lo, hi])?;
    }
    Ok(())
}

#[derive(Serialize)]
struct FitReport {
    n: usize,
    #[serde(flatten)]
    fit: LinearFit,
    r: Option<f64>,
}

/// 读取每行两列的 `x y` 点；空行和 `#` 开头的行被跳过
fn read_points<R: BufRead>(input: R, label: &str) -> Result<Vec<(f64, f64)>> {
    let mut points = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [first, ..] if first.starts_with('#') => continue,
            [x, y] => {
                let parse = |s: &str| {
                    s.parse::<f64>()
                        .map_err(|e| anyhow!("{}:{}: cannot parse '{}' as a number: {}", label, i + 1, s, e))
                };
                points.push((parse(*x)?, parse(*y)?));
            }
            _ => bail!("{}:{}: expected two columns, found {}", label, i + 1, fields.len()),
        }
    }
    Ok(points)
}

fn run_fit<R: BufRead>(input: R, label: &str, json: bool, out: &mut dyn Write) -> Result<()> {
    let points = read_points(input, label)?;
    let fit = stats::least_squares_linear_fit(&points)?;
    let r = match stats::pearson_r(&points) {
        Ok(r) => Some(r),
        Err(e) => {
            warn!("correlation undefined: {}", e);
            None
        }
    };
    let report = FitReport { n: points.len(), fit, r };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }
    write_tabbed(out, &[&"n", &report.n])?;
    write_tabbed(out, &[&"slope", &report.fit.slope])?;
    write_tabbed(out, &[&"intercept", &report.fit.intercept])?;
    match report.r {
        Some(r) => write_tabbed(out, &[&"r", &r])?,
        None => write_tabbed(out, &[&"r", &"NA"])?,
    }
    Ok(())
}

/// 解析后的输入：纯数值列，或按出现顺序排列的键值对
enum PickInput {
    Values(Vec<f64>),
    Keyed(Vec<(String, f64)>),
}

fn read_pick_input<R: BufRead>(input: R, label: &str) -> Result<PickInput> {
    let mut values = Vec::new();
    let mut keyed = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|e| anyhow!("{}:{}: cannot parse '{}' as a number: {}", label, i + 1, s, e))
        };
        match line.split_once('\t') {
            Some((key, value)) => keyed.push((key.to_string(), parse(value)?)),
            None => values.push(parse(line.as_str())?),
        }
    }
    match (values.is_empty(), keyed.is_empty()) {
        (_, true) => Ok(PickInput::Values(values)),
        (true, false) => Ok(PickInput::Keyed(keyed)),
        (false, false) => bail!("'{}' mixes plain values and key<TAB>value lines", label),
    }
}

fn run_pick<R: BufRead>(
    input: R,
    label: &str,
    direction: Direction,
    tie: TieBreak,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    debug!(%direction, %tie, ?seed, "picking");

    match read_pick_input(input, label)? {
        PickInput::Values(values) => {
            let picked = select::select(values.iter().enumerate(), direction, tie, &mut rng)?;
            write_positions(out, &picked)
        }
        PickInput::Keyed(pairs) => {
            let picked = select::select(
                pairs.iter().map(|(k, v)| (k.as_str(), *v)),
                direction,
                tie,
                &mut rng,
            )?;
            write_positions(out, &picked)
        }
    }
}

fn write_positions<P: std::fmt::Display>(out: &mut dyn Write, picked: &Selected<P>) -> Result<()> {
    for p in picked.positions() {
        writeln!(out, "{}", p)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    fn output_of(run: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn pick(input: &str, direction: Direction, tie: TieBreak, seed: Option<u64>) -> Result<String> {
        let mut out = Vec::new();
        run_pick(Cursor::new(input), "test", direction, tie, seed, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged(verbose: u8, directives: &str) -> String {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_env_filter(log_filter(verbose, directives))
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            debug!("debug-line");
            info!("info-line");
            warn!("warn-line");
        });
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn verbosity_sets_default_level() {
        let quiet = logged(0, "");
        assert!(quiet.contains("warn-line"));
        assert!(!quiet.contains("info-line"));

        let loud = logged(2, "");
        assert!(loud.contains("debug-line"));
        assert!(loud.contains("info-line"));
    }

    #[test]
    fn rust_log_overrides_verbosity() {
        let text = logged(0, "debug");
        assert!(text.contains("debug-line"), "{:?}", text);
        assert!(text.contains("info-line"));

        let text = logged(2, "warn");
        assert!(!text.contains("info-line"));
        assert!(text.contains("warn-line"));

        let text = logged(0, "bioutil=info");
        assert!(text.contains("info-line"));
        assert!(!text.contains("debug-line"));
    }

    #[test]
    fn pick_plain_values() {
        let input = "3\n1\n\n1\n2\n1\n";
        assert_eq!(pick(input, Direction::Min, TieBreak::First, None).unwrap(), "1\n");
        assert_eq!(pick(input, Direction::Max, TieBreak::First, None).unwrap(), "0\n");
        // the blank line is not a position
        assert_eq!(pick(input, Direction::Min, TieBreak::All, None).unwrap(), "1\n2\n4\n");
    }

    #[test]
    fn pick_keyed_values() {
        let input = "a\t2\nb\t5\nc\t2\n";
        assert_eq!(pick(input, Direction::Max, TieBreak::First, None).unwrap(), "b\n");
        assert_eq!(pick(input, Direction::Min, TieBreak::All, None).unwrap(), "a\nc\n");

        let picked = pick(input, Direction::Min, TieBreak::Random, Some(3)).unwrap();
        assert!(picked == "a\n" || picked == "c\n", "{:?}", picked);
    }

    #[test]
    fn pick_seed_is_reproducible() {
        let input = "0\n0\n0\n0\n0\n0\n0\n0\n";
        for seed in 0..20 {
            let first = pick(input, Direction::Min, TieBreak::Random, Some(seed)).unwrap();
            let again = pick(input, Direction::Min, TieBreak::Random, Some(seed)).unwrap();
            assert_eq!(first, again);
            let pos: usize = first.trim().parse().unwrap();
            assert!(pos < 8);
        }
    }

    #[test]
    fn pick_rejects_bad_input() {
        let err = pick("1\nk\t2\n", Direction::Min, TieBreak::First, None).unwrap_err();
        assert!(err.to_string().contains("mixes"), "{}", err);

        let err = pick("1\nx\n", Direction::Min, TieBreak::First, None).unwrap_err();
        assert!(err.to_string().starts_with("test:2:"), "{}", err);

        assert!(pick("", Direction::Min, TieBreak::First, None).is_err());
    }

    #[test]
    fn fit_prints_na_for_undefined_r() {
        let text = output_of(|out| run_fit(Cursor::new("1 4\n2 4\n3 4\n"), "test", false, out));
        assert!(text.starts_with("n\t3\n"), "{:?}", text);
        assert!(text.contains("intercept\t4\n"));
        assert!(text.ends_with("r\tNA\n"));

        let text = output_of(|out| run_fit(Cursor::new("1 4\n2 4\n3 4\n"), "test", true, out));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["n"], 3);
        assert!(v["r"].is_null());
    }

    #[test]
    fn fit_reads_points() {
        let text = output_of(|out| {
            run_fit(Cursor::new("# x y\n1 2\n\n2 3\n3 5\n4 4\n"), "test", true, out)
        });
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["n"], 4);
        assert!((v["slope"].as_f64().unwrap() - 0.8).abs() < 1e-9);
        assert!((v["intercept"].as_f64().unwrap() - 1.5).abs() < 1e-9);
        assert!((v["r"].as_f64().unwrap() - 0.8).abs() < 1e-9);

        let err = read_points(Cursor::new("1 2 3\n"), "test").unwrap_err();
        assert!(err.to_string().contains("expected two columns"), "{}", err);
    }

    #[test]
    fn stats_text_and_json() {
        let input = "1 2\n# skipped\n3 4\n";
        let text = output_of(|out| run_stats(Cursor::new(input), "test", &[0.5], Some(2), false, out));
        assert!(text.starts_with("count\t4\nmean\t2.5\n"), "{:?}", text);
        assert!(text.contains("median\t2.5\n"));
        assert!(text.contains("q0.5\t2.5\n"));
        assert!(text.ends_with("bin1\t1\t2\nbin2\t3\t4\n"));

        let text = output_of(|out| run_stats(Cursor::new(input), "test", &[], None, true, out));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["count"], 4);
        assert!(v.get("bins").is_none());

        let mut out = Vec::new();
        assert!(run_stats(Cursor::new("# nothing\n"), "test", &[], None, false, &mut out).is_err());
        assert!(run_stats(Cursor::new("1\n"), "test", &[2.0], None, false, &mut out).is_err());
    }

    #[test]
    fn per_record_keeps_input_order() {
        let fasta = ">r1 first\nACGT\nTT\n>r2\nGGC\n>r3\n\n";
        let text = output_of(|out| {
            run_per_record(Cursor::new(fasta), "test", HeaderMode::Token, 2, out, dna::revcomp)
        });
        assert_eq!(text, "r1\tAAACGT\nr2\tGCC\nr3\t\n");

        let text = output_of(|out| {
            let fasta = Cursor::new(">p\nATGGCCTAA\n");
            run_per_record(fasta, "test", HeaderMode::Token, 1, out, codon::translate)
        });
        assert_eq!(text, "p\tMA*\n");
    }

    #[test]
    fn per_record_reports_failing_record() {
        let mut out = Vec::new();
        let err = run_per_record(
            Cursor::new(">ok\nATG\n>bad\nATGNNN\n"),
            "test",
            HeaderMode::Token,
            1,
            &mut out,
            codon::translate,
        )
        .unwrap_err();
        assert!(err.to_string().contains("record 'bad'"), "{}", err);
    }
}
