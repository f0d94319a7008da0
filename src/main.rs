// src/main.rs
use std::process;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use month_translate::cli::Cli;
use month_translate::{translate_batch, Job, ReplacementTable, Translator};

/// Exit code for usage, table and setup errors.
const EXIT_USAGE: i32 = 1;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Keep 2 and 3 free for read and write failures.
            process::exit(if e.use_stderr() { EXIT_USAGE } else { 0 });
        }
    };

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let (translator, jobs) = match setup(&cli) {
        Ok(ready) => ready,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(EXIT_USAGE);
        }
    };

    let start = Instant::now();
    let results = translate_batch(&translator, &jobs);
    log::info!("translated {} file(s) in {:?}", jobs.len(), start.elapsed());

    let mut exit_code = 0;
    for result in results {
        match result {
            Ok(path) => println!("Wrote translated file: {}", path.display()),
            Err(e) => {
                eprintln!("{}", e);
                // First failure in input order decides the exit code.
                if exit_code == 0 {
                    exit_code = e.exit_code();
                }
            }
        }
    }
    process::exit(exit_code);
}

fn setup(cli: &Cli) -> Result<(Translator, Vec<Job>)> {
    if cli.output.is_some() && cli.inputs.len() > 1 {
        bail!("--output can only be used with a single input");
    }

    if let Some(threads) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let table = match &cli.table {
        Some(path) => ReplacementTable::load(path)
            .with_context(|| format!("Failed to load replacement table {}", path.display()))?,
        None => ReplacementTable::english_arabic_months().clone(),
    };
    let translator = Translator::new(table, cli.translator_options()).context("Invalid replacement table")?;

    let jobs = match &cli.output {
        Some(output) => vec![Job::new(&cli.inputs[0], output)],
        None => cli
            .inputs
            .iter()
            .map(|input| Job::with_suffix(input, &cli.suffix))
            .collect(),
    };
    Ok((translator, jobs))
}
