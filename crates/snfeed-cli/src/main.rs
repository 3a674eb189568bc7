//! snfeed: CLI tool to convert JSON feed descriptions to SmartNews-flavored RSS 2.0

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

use config::{CONFIG_FILE_NAME, Config};
use snfeed_core::{ConverterOptions, Feed, WriterOptions, serialize_with_options};

#[derive(Parser, Debug)]
#[command(name = "snfeed")]
#[command(about = "Convert JSON feed descriptions to SmartNews-flavored RSS 2.0")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Examples:
  snfeed feed.json                  # Convert single file to feed.xml
  snfeed feed.json -o -             # Write the RSS document to stdout
  snfeed feeds/ -o public/          # Convert directory
  snfeed feeds/ -o public/ -j4      # Use 4 parallel jobs
  snfeed init                       # Write a sample _snfeed.toml")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sample configuration file
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Print the configuration JSON schema instead
        #[arg(long)]
        schema: bool,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input JSON feed file or directory
    input: Option<PathBuf>,

    /// Output file or directory ("-" writes a single feed to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to _snfeed.toml next to the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Spaces per nesting level; 0 writes a single line
    #[arg(long)]
    indent: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Settings shared by every file in one run
struct ConvertSettings {
    converter: ConverterOptions,
    writer: WriterOptions,
    extension: String,
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.convert.verbose, cli.convert.quiet);

    match cli.command {
        Some(Commands::Init { output, schema }) => run_init(&output, schema),
        None => run_convert(&cli.convert),
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the flag-derived level
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run_init(output: &Path, schema: bool) -> Result<()> {
    if schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if output.exists() {
        anyhow::bail!("Config file already exists: {}", output.display());
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(output, content)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    tracing::info!("Wrote {}", output.display());
    Ok(())
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("No input given; run `snfeed --help` for usage");
    };

    let config = load_config(args.config.as_deref(), input)?;
    let settings = ConvertSettings {
        converter: config.converter_options(),
        writer: config.writer_options(args.indent),
        extension: config.extension().to_string(),
        quiet: args.quiet,
    };

    if input.is_file() {
        convert_file(input, args.output.as_deref(), &settings)
    } else if input.is_dir() {
        convert_directory(
            input,
            args.output.as_deref(),
            args.recursive,
            args.jobs,
            &settings,
        )
    } else {
        anyhow::bail!("Input path does not exist: {}", input.display());
    }
}

/// Explicit `--config`, else `_snfeed.toml` beside the input, else defaults
fn load_config(explicit: Option<&Path>, input: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let dir = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Path::new(""))
    };

    match Config::load_from_dir(dir)? {
        Some(config) => {
            tracing::debug!("Using config from {}", dir.join(CONFIG_FILE_NAME).display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Convert a single feed file
fn convert_file(input: &Path, output: Option<&Path>, settings: &ConvertSettings) -> Result<()> {
    if output == Some(Path::new("-")) {
        let xml = render_feed(input, settings)?;
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(xml.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension(&settings.extension),
    };

    tracing::debug!(
        "Converting: {} -> {}",
        input.display(),
        output_path.display()
    );

    convert_file_inner(input, &output_path, settings)?;

    if !settings.quiet {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Convert a directory of feed files
fn convert_directory(
    input: &Path,
    output: Option<&Path>,
    recursive: bool,
    jobs: Option<usize>,
    settings: &ConvertSettings,
) -> Result<()> {
    if output == Some(Path::new("-")) {
        anyhow::bail!("Writing to stdout (-o -) requires a single input file");
    }

    let output_dir = output.unwrap_or(input);

    let files = collect_feed_files(input, recursive)?;

    if files.is_empty() {
        tracing::warn!("No .json feed files found in {}", input.display());
        return Ok(());
    }

    tracing::debug!("Found {} feed files", files.len());

    // Configure thread pool if jobs specified
    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let errors: Vec<_> = files
        .par_iter()
        .filter_map(|file| {
            let relative = file.strip_prefix(input).unwrap_or(file);
            let output_file = output_dir.join(relative).with_extension(&settings.extension);

            match convert_file_inner(file, &output_file, settings) {
                Ok(()) => {
                    success.fetch_add(1, Ordering::Relaxed);
                    if !settings.quiet {
                        println!("{}", output_file.display());
                    }
                    None
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    Some((file.clone(), e))
                }
            }
        })
        .collect();

    for (file, e) in &errors {
        tracing::error!("Error converting {}: {:#}", file.display(), e);
    }

    let success_count = success.load(Ordering::Relaxed);
    let failed_count = failed.load(Ordering::Relaxed);

    tracing::info!("Converted {} files, {} failed", success_count, failed_count);

    if failed_count > 0 {
        anyhow::bail!("{} files failed to convert", failed_count);
    }

    Ok(())
}

/// Convert and write one file without reporting (for parallel use)
fn convert_file_inner(input: &Path, output: &Path, settings: &ConvertSettings) -> Result<()> {
    if is_same_file(input, output) {
        anyhow::bail!(
            "Output would overwrite the input feed: {} (check the output extension)",
            output.display()
        );
    }

    let xml = render_feed(input, settings)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(output, xml).with_context(|| format!("Failed to write: {}", output.display()))?;

    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    a == b
        || matches!(
            (fs::canonicalize(a), fs::canonicalize(b)),
            (Ok(a), Ok(b)) if a == b
        )
}

/// Read a JSON feed and serialize it to RSS text
fn render_feed(input: &Path, settings: &ConvertSettings) -> Result<String> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    let feed = Feed::from_json(&content)
        .with_context(|| format!("Failed to parse feed: {}", input.display()))?;

    Ok(serialize_with_options(
        &feed,
        &settings.converter,
        &settings.writer,
    ))
}

/// Collect all .json files in a directory
fn collect_feed_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("json") {
                    files.push(path);
                }
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_feed_files(&path, recursive)?);
        }
    }

    files.sort();
    Ok(files)
}
