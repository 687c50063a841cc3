use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rayon::prelude::*;
use thiserror::Error;

use wordclean::core::{
    clean_word_html, print_error_message, print_info_message, CleanError, CleanOptions,
};
use wordclean::logging::init_tracing;

const STDIN_TARGET: &str = "-";
const OUTPUT_SUFFIX: &str = "clean.html";

/// Cleans HTML exported from Microsoft Word.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// HTML files to clean. "-" or no input at all reads standard input.
    inputs: Vec<String>,
    /// Write the cleaned document to this file instead of standard output (single input only)
    #[clap(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,
    /// Write cleaned documents into this directory as <name>.clean.html
    #[clap(short = 'O', long)]
    output_dir: Option<PathBuf>,
    /// Charset of the input, overriding the one the document declares
    #[clap(short, long)]
    encoding: Option<String>,
    /// Suppress informational messages
    #[clap(short, long)]
    silent: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("could not read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("could not write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("{path}: {source}")]
    Clean { path: String, source: CleanError },
}

#[derive(Debug, PartialEq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug)]
struct Job {
    input: String,
    destination: Destination,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let jobs = match plan_jobs(&cli) {
        Ok(jobs) => jobs,
        Err(e) => {
            print_error_message(&e.to_string());
            process::exit(1);
        }
    };

    let options = CleanOptions {
        encoding: cli.encoding.clone(),
        silent: cli.silent,
    };

    let failures = jobs
        .par_iter()
        .map(|job| run_job(job, &options))
        .filter_map(Result::err)
        .inspect(|e| print_error_message(&e.to_string()))
        .count();

    if failures > 0 {
        process::exit(1);
    }
}

/// Works out where each input goes
fn plan_jobs(cli: &Cli) -> Result<Vec<Job>, CliError> {
    let mut inputs = cli.inputs.clone();
    if inputs.is_empty() {
        inputs.push(STDIN_TARGET.to_string());
    }

    if inputs.len() > 1 {
        if cli.output.is_some() {
            return Err(CliError::Usage(
                "--output takes a single input; use --output-dir for several",
            ));
        }
        if inputs.iter().any(|input| input == STDIN_TARGET) {
            return Err(CliError::Usage(
                "standard input cannot be combined with other inputs",
            ));
        }

        return Ok(inputs
            .into_iter()
            .map(|input| {
                let destination =
                    Destination::File(default_output_path(&input, cli.output_dir.as_deref()));
                Job { input, destination }
            })
            .collect());
    }

    let input = inputs.remove(0);
    let destination = match (&cli.output, &cli.output_dir) {
        (Some(path), _) => Destination::File(path.clone()),
        (None, Some(_)) if input == STDIN_TARGET => {
            return Err(CliError::Usage(
                "--output-dir needs named inputs; use --output for standard input",
            ));
        }
        (None, Some(dir)) => Destination::File(default_output_path(&input, Some(dir))),
        (None, None) => Destination::Stdout,
    };

    Ok(vec![Job { input, destination }])
}

/// `<dir>/<stem>.clean.html`, or next to the input when no directory is given
fn default_output_path(input: &str, output_dir: Option<&Path>) -> PathBuf {
    let input_path = Path::new(input);
    let stem = input_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let file_name = format!("{stem}.{OUTPUT_SUFFIX}");

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input_path.with_file_name(file_name),
    }
}

fn run_job(job: &Job, options: &CleanOptions) -> Result<(), CliError> {
    let input_data = read_input(&job.input).map_err(|source| CliError::Read {
        path: job.input.clone(),
        source,
    })?;

    tracing::info!(input = %job.input, bytes = input_data.len(), "cleaning document");

    let html = clean_word_html(&input_data, options).map_err(|source| CliError::Clean {
        path: job.input.clone(),
        source,
    })?;

    match &job.destination {
        Destination::Stdout => io::stdout()
            .lock()
            .write_all(&html)
            .map_err(|source| CliError::Write {
                path: "standard output".to_string(),
                source,
            }),
        Destination::File(path) => {
            fs::write(path, &html).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;

            if !options.silent {
                print_info_message(&format!("{} -> {}", job.input, path.display()));
            }

            Ok(())
        }
    }
}

fn read_input(input: &str) -> io::Result<Vec<u8>> {
    if input == STDIN_TARGET {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(input)
    }
}
