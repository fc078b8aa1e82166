//! phraselink - split etexts into chapters and cross-link phrases

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use phraselink::batch::{self, BatchReport};
use phraselink::{BookProfile, LinkOptions, ProfileSet};

#[derive(Parser)]
#[command(name = "phraselink")]
#[command(version, about = "Split etexts into chapters and cross-link phrases", long_about = None)]
#[command(after_help = "EXAMPLES:
    phraselink split moby.html -o chapters/         Split a book into chapter files
    phraselink split books/ -p profiles.toml -o out/ Split every book in a directory
    phraselink link chapters/ -o linked/            Apply .links directive files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress output messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Split whole-book files into chapter files
    Split {
        /// Book files, or directories to search for them
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory to write chapter files to
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// TOML file of per-book profiles
        #[arg(short, long, value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Text in the first paragraph to keep
        #[arg(long, value_name = "TEXT")]
        front_marker: Option<String>,

        /// Text in the first paragraph of back matter
        #[arg(long, value_name = "TEXT")]
        back_sentinel: Option<String>,

        /// Extension of the chapter files written (overrides profiles)
        #[arg(short, long)]
        extension: Option<String>,
    },

    /// Insert links described by .links files next to chapter files
    Link {
        /// Directory of chapter files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Directory to write linked chapters to. Linking already linked
        /// chapters nests the anchors, so keep DIR and the output apart
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Extension of chapter files
        #[arg(short, long, default_value = "html")]
        extension: String,

        /// Class attribute of inserted anchors
        #[arg(long, default_value = "echo")]
        class: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(report) => {
            if !cli.quiet {
                println!(
                    "{} processed, {} failed",
                    report.processed,
                    report.failed.len()
                );
                for (path, error) in &report.failed {
                    println!("  {}: {error}", path.display());
                }
            }
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }
}

fn run(command: Command) -> anyhow::Result<BatchReport> {
    match command {
        Command::Split {
            inputs,
            output,
            profiles,
            front_marker,
            back_sentinel,
            extension,
        } => {
            let files = expand_inputs(&inputs, extension.as_deref().unwrap_or("html"));
            let mut set = match &profiles {
                Some(path) => ProfileSet::load(path)
                    .with_context(|| format!("loading profiles from {}", path.display()))?,
                None => ProfileSet::default(),
            };
            for file in &files {
                let book = file
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .context("book file name is not valid UTF-8")?;
                let profile = override_profile(
                    set.get_or_default(book),
                    front_marker.as_deref(),
                    back_sentinel.as_deref(),
                    extension.as_deref(),
                );
                set.insert(profile);
            }
            batch::split_files(&files, &set, &output)
                .with_context(|| format!("splitting into {}", output.display()))
        }
        Command::Link {
            dir,
            output,
            extension,
            class,
        } => {
            let options = LinkOptions { extension, class };
            batch::link_directory(&dir, &output, &options)
                .with_context(|| format!("linking {}", dir.display()))
        }
    }
}

/// Command-line flags win over the profiles file.
fn override_profile(
    mut profile: BookProfile,
    front_marker: Option<&str>,
    back_sentinel: Option<&str>,
    extension: Option<&str>,
) -> BookProfile {
    if let Some(marker) = front_marker {
        profile = profile.with_front_marker(marker);
    }
    if let Some(sentinel) = back_sentinel {
        profile = profile.with_back_sentinel(sentinel);
    }
    if let Some(extension) = extension {
        profile = profile.with_extension(extension);
    }
    profile
}

fn expand_inputs(inputs: &[PathBuf], extension: &str) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                batch::discover(input, extension)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}
