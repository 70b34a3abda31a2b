//! loxcc-unpack - Command-line interface for loxcc
//!
//! Decompresses a Loxone compressed container into its raw bytes.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use loxcc::{read_header, unpack_bytes_with_options, LoxCcError, UnpackOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "loxcc-unpack")]
#[command(about = "Decompress a Loxone compressed container (magic 0xAABBCCEE)")]
#[command(version)]
struct Cli {
    /// Compressed source file
    source: PathBuf,

    /// Destination for the decompressed bytes
    dest: PathBuf,

    /// Refuse to replace an existing destination file
    #[arg(short, long)]
    no_clobber: bool,

    /// Refuse to produce more than this many output bytes
    #[arg(short, long, value_name = "BYTES")]
    max_output: Option<usize>,

    /// Do not pre-allocate output from the header size hint
    #[arg(long)]
    ignore_size_hint: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Decompression failed: {0}")]
    Unpack(#[from] LoxCcError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Io { .. } => 1,
            CliError::Unpack(e) => e.exit_code(),
        }
    }

    fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        CliError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut options = UnpackOptions::default().with_size_hint(!cli.ignore_size_hint);
    if let Some(limit) = cli.max_output {
        options = options.with_max_output_size(limit);
    }

    if let Err(e) = unpack_file(
        &cli.source,
        &cli.dest,
        &options,
        cli.no_clobber,
        cli.verbose,
        cli.quiet,
    ) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn unpack_file(
    source: &Path,
    dest: &Path,
    options: &UnpackOptions,
    no_clobber: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if no_clobber && dest.exists() {
        return Err(CliError::Usage(format!(
            "Destination file '{}' already exists and --no-clobber was given",
            dest.display()
        )));
    }

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            source.display(),
            dest.display()
        );
    }

    let start_time = Instant::now();

    let data = fs::read(source).map_err(|e| CliError::io("read", source, e))?;
    let input_size = data.len();

    if verbose {
        let header = read_header(&data)?;
        println!("Container size: {} bytes", input_size);
        println!("  Compressed size: {} bytes", header.compressed_size);
        println!("  Size hint:       {} bytes", header.size_hint);
        println!("  Reserved:        0x{:08X}", header.reserved);
    }

    // Show progress bar for large files
    let progress = if !quiet && input_size > 1024 * 1024 {
        let pb = ProgressBar::new(2);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Decompressing...");
        Some(pb)
    } else {
        None
    };

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let result = unpack_bytes_with_options(&data, options);
    if let Some(ref pb) = progress {
        match &result {
            Ok(_) => {
                pb.inc(1);
                pb.finish_with_message("Decompression complete");
            }
            Err(_) => pb.abandon_with_message("Decompression failed"),
        }
    }
    let (decompressed, stats) = result?;

    write_atomically(dest, &decompressed)?;

    let elapsed = start_time.elapsed();
    let output_size = decompressed.len();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if input_size > 0 {
            println!(
                "  Ratio:  {:.1}%",
                (output_size as f64 / input_size as f64) * 100.0
            );
        }
        println!("  Time:   {:.2?}", elapsed);

        if verbose {
            println!(
                "  Tokens: {} ({} literal bytes, {} back-references, longest {})",
                stats.token_count, stats.literal_bytes, stats.match_count, stats.longest_match
            );
        }
    }

    Ok(())
}

/// Write `bytes` to a temporary file next to `dest` and rename it into place
fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file =
        NamedTempFile::new_in(dir).map_err(|e| CliError::io("create temporary file in", dir, e))?;
    file.write_all(bytes)
        .map_err(|e| CliError::io("write", file.path(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| CliError::io("sync", file.path(), e))?;
    file.persist(dest)
        .map_err(|e| CliError::io("write", dest, e.error))?;
    Ok(())
}
