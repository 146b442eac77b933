use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use enum_reflector::config::{DEFAULT_MARKER, DEFAULT_MODULE_NAME, LookupOperation, ReflectConfig};
use enum_reflector::output::{generate_from_source, write_artifacts};
use enum_reflector::resolver::resolve_all;
use enum_reflector::source::{EnumSource, ManifestSource};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Resolve annotated enums and generate lookup code for them
#[derive(Parser, Debug)]
#[command(name = "enum-reflector", version, about, after_help = AFTER_HELP)]
struct Cli {
    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the lookup module from a declaration manifest
    Generate(GenerateArgs),
    /// Print the resolved value of every member
    Resolve(ResolveArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Declaration manifest (.json, .yaml, .yml or .toml)
    #[arg(short, long, value_name = "FILE")]
    manifest: PathBuf,

    /// Directory that receives the generated module directory
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Name of the generated module
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MODULE_NAME)]
    module: String,

    /// Marker name quoted in the unsupported-type message
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MARKER)]
    marker: String,

    /// Generate only these operations (name-lookup, value-table, try-parse)
    #[arg(long, value_name = "OP", num_args = 1..)]
    only: Vec<LookupOperation>,

    /// Re-format generated files with prettyplease
    #[arg(long)]
    pretty: bool,

    /// Print generated files instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Fail if any enum cannot be resolved
    #[arg(long)]
    strict: bool,

    /// Print a JSON summary of the run
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct ResolveArgs {
    /// Declaration manifest (.json, .yaml, .yml or .toml)
    #[arg(short, long, value_name = "FILE")]
    manifest: PathBuf,

    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
}

const AFTER_HELP: &str = "\
MANIFEST FORMAT:
  { \"enums\": [ { \"name\": \"palette.Color\", \"underlying\": \"u8\",
                 \"members\": [ { \"name\": \"Red\" }, { \"name\": \"Green\", \"value\": 5 } ] } ] }

  Examples:
    enum-reflector resolve -m enums.json
    enum-reflector generate -m enums.yaml -o src
    enum-reflector generate -m enums.toml -o src --only try-parse --dry-run
";

/// Picks the tracing filter: `RUST_LOG` wins, otherwise one level per `-v`.
///
/// Returns `None` when nothing should be logged.
fn log_filter(verbose: u8, rust_log: Option<String>) -> Option<String> {
    if let Some(filter) = rust_log {
        return Some(filter);
    }

    let filter = match verbose {
        0 => return None,
        1 => "info",
        2 => "info,enum_reflector=debug",
        _ => "debug,enum_reflector=trace",
    };
    Some(filter.to_string())
}

fn init_tracing(verbose: u8) {
    let Some(base_filter) = log_filter(verbose, std::env::var("RUST_LOG").ok()) else {
        return;
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Resolve(args) => resolve(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let mut config = ReflectConfig::new()
        .module_name(args.module)
        .marker(args.marker)
        .pretty(args.pretty);
    if !args.only.is_empty() {
        config = config.only(args.only);
    }

    debug!(manifest = %args.manifest.display(), operations = ?config.enabled_operations(), "generating");
    let source = ManifestSource::new(&args.manifest);
    let report = generate_from_source(&source, &config)
        .with_context(|| format!("Failed to generate from {}", args.manifest.display()))?;

    for skipped in &report.skipped {
        eprintln!("warning: skipped {}: {}", skipped.name, skipped.error);
    }
    if args.strict && !report.skipped.is_empty() {
        return Err(eyre!(
            "{} enum(s) could not be resolved; nothing was written",
            report.skipped.len()
        ));
    }

    let module_dir = args.output.join(&config.module_name);
    let written = write_artifacts(&module_dir, &report.artifacts, args.dry_run)
        .with_context(|| format!("Failed to write {}", module_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else if !args.dry_run {
        println!(
            "Generated {} file(s) for {} enum(s) in {}",
            written.len(),
            report.resolved.len(),
            module_dir.display()
        );
    }

    Ok(())
}

fn resolve(args: ResolveArgs) -> Result<()> {
    let source = ManifestSource::new(&args.manifest);
    let descriptors = source.list_enums_with_marker()?;
    let outcomes = resolve_all(&descriptors);

    if args.json {
        let entries: Vec<serde_json::Value> = descriptors
            .iter()
            .zip(&outcomes)
            .map(|(descriptor, outcome)| match outcome {
                Ok(resolved) => serde_json::json!({
                    "name": resolved.name,
                    "underlying": resolved.width,
                    "values": resolved.values,
                }),
                Err(err) => serde_json::json!({
                    "name": descriptor.name,
                    "error": err.to_string(),
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (descriptor, outcome) in descriptors.iter().zip(&outcomes) {
        match outcome {
            Ok(resolved) => {
                println!("{}: {}", resolved.name, resolved.width);
                for member in &resolved.values {
                    println!("  {} = {}", member.name, member.value);
                }
            }
            Err(err) => eprintln!("warning: skipped {}: {}", descriptor.name, err),
        }
    }

    Ok(())
}
