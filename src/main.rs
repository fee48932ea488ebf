use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use adjcount::{pipeline, report, Config, Report, RunSummary, Vocabulary};

#[derive(Parser)]
#[command(
    name = "adjcount",
    about = "Count indicator adjectives in academic PDFs",
    version
)]
struct Cli {
    /// PDF files or folders to scan recursively
    #[arg(default_value = "./input_pdfs")]
    paths: Vec<PathBuf>,

    /// Output spreadsheet path (".xlsx" is appended when missing)
    #[arg(short, long, default_value = "results.xlsx")]
    output: PathBuf,

    /// Count matches inside trailing reference/appendix sections too
    #[arg(long)]
    include_refs: bool,

    /// Adjective list, one term per line ('#' for comments); bundled
    /// defaults when omitted
    #[arg(long)]
    adjectives: Option<PathBuf>,

    /// Worker threads (0 = available parallelism)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Per-document extraction timeout in seconds (0 disables)
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Also print the report as JSON to stdout
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run(Cli::parse()) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let output = if cli
        .output
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
    {
        cli.output
    } else {
        PathBuf::from(format!("{}.xlsx", cli.output.display()))
    };

    let vocab = match &cli.adjectives {
        Some(path) => Vocabulary::load(path).context("loading adjective list")?,
        None => {
            let vocab = Vocabulary::default();
            log::info!("no adjective list given, using {} bundled terms", vocab.len());
            vocab
        }
    };

    let config = Config {
        include_refs: cli.include_refs,
        jobs: cli.jobs,
        timeout: (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout)),
    };

    let jobs = pipeline::discover(&cli.paths);
    if jobs.is_empty() {
        anyhow::bail!("no PDF files found under the given paths");
    }
    log::info!(
        "found {} PDF file(s) from {} input path(s)",
        jobs.len(),
        cli.paths.len()
    );

    let cancel = AtomicBool::new(false);
    let records = pipeline::process_batch(&jobs, &vocab, &config, &cancel);

    let summary = RunSummary::tally(&records);
    for (file, reason) in &summary.failed {
        log::warn!("{file}: {reason}");
    }
    if summary.empty > 0 {
        log::warn!("{} document(s) had no extractable words (score 0)", summary.empty);
    }
    log::info!(
        "attempted {}, succeeded {}, empty {}, failed {}",
        summary.attempted,
        summary.succeeded,
        summary.empty,
        summary.failed.len()
    );

    let report = Report::build(records, &vocab);
    report::write_xlsx(&report, &output).context("writing report")?;
    log::info!("results saved to {}", output.display());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if summary.succeeded + summary.empty == 0 {
        anyhow::bail!("no documents could be processed");
    }
    Ok(())
}
