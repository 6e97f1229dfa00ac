use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use easyzip::{
    ArchiverBuilder, CompressionMethod, ExtractorBuilder, NoProgressReporter,
    PrintProgressReporter, ProgressReporter,
};
use tracing_subscriber::EnvFilter;

/// Zip and unzip files and directories
#[derive(Debug, Parser)]
#[command(name = "easyzip", version, about)]
struct Opt {
    #[command(subcommand)]
    command: Command,

    /// Do not print a line for every added or extracted file
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Compression method for new archives (stored or deflated)
    #[arg(long, global = true, default_value_t = CompressionMethod::Deflated)]
    compression: CompressionMethod,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Archive a directory, keeping the directory itself as the archive root
    Zip {
        /// Directory to archive
        source: PathBuf,
        /// Archive to create, replaced if it exists
        destination: PathBuf,
    },

    /// Extract an archive into a directory
    Unzip {
        /// Archive to extract
        source: PathBuf,
        /// Directory to extract into
        destination: PathBuf,
    },

    /// Archive a list of files and directories
    #[command(name = "zipfiles")]
    ZipFiles {
        /// Archive to create
        destination: PathBuf,
        /// Files and directories to add, each stored under its own name
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn destination(&self) -> &Path {
        match self {
            Command::Zip { destination, .. }
            | Command::Unzip { destination, .. }
            | Command::ZipFiles { destination, .. } => destination,
        }
    }
}

fn main() -> ExitCode {
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", console::style("error:").red().bold());
            remove_destination(opt.command.destination());
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> anyhow::Result<()> {
    if opt.quiet {
        return execute(opt, NoProgressReporter);
    }

    #[cfg(feature = "progress")]
    if console::Term::stdout().is_term() {
        return execute(opt, easyzip::IndicatifProgressReporter::with_default_style());
    }

    execute(opt, PrintProgressReporter)
}

fn execute<P: ProgressReporter>(opt: &Opt, reporter: P) -> anyhow::Result<()> {
    match &opt.command {
        Command::Zip {
            source,
            destination,
        } => ArchiverBuilder::new()
            .with_compression(opt.compression)
            .with_progress_reporter(reporter)
            .build()
            .zip_dir(source, destination, true, true)
            .with_context(|| format!("failed to archive {}", source.display())),
        Command::Unzip {
            source,
            destination,
        } => ExtractorBuilder::new()
            .with_progress_reporter(reporter)
            .build()
            .extract(source, destination)
            .with_context(|| format!("failed to extract {}", source.display())),
        Command::ZipFiles { destination, files } => ArchiverBuilder::new()
            .with_compression(opt.compression)
            .with_progress_reporter(reporter)
            .build()
            .zip_files(files, destination)
            .with_context(|| format!("failed to create {}", destination.display())),
    }
}

/// Remove whatever a failed command left at `destination`
///
/// The working directory and its ancestors are never removed.
fn remove_destination(destination: &Path) {
    let Ok(metadata) = fs_err::symlink_metadata(destination) else {
        return;
    };

    if metadata.is_dir() && contains_working_dir(destination) {
        tracing::warn!(
            "not removing {} because it contains the working directory",
            destination.display()
        );
        return;
    }

    tracing::debug!("removing {}", destination.display());
    let result = if metadata.is_dir() {
        fs_err::remove_dir_all(destination)
    } else {
        fs_err::remove_file(destination)
    };
    if let Err(err) = result {
        tracing::warn!("{err}");
    }
}

fn contains_working_dir(dir: &Path) -> bool {
    match (
        fs_err::canonicalize(dir),
        std::env::current_dir().and_then(fs_err::canonicalize),
    ) {
        (Ok(dir), Ok(cwd)) => cwd.starts_with(dir),
        // Unknown means protected
        _ => true,
    }
}
