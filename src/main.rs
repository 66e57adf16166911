use clap::{Parser, Subcommand};
use roundel::compose::{self, IconEvent, WritePolicy};
use roundel::config::{self, IconConfig, TargetConfig};
use roundel::imaging::RustBackend;
use roundel::output;
use std::path::PathBuf;
use std::process::ExitCode;

/// Overrides shared by commands that read the source image.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Source image (overrides `source` in the config)
    #[arg(long)]
    source: Option<PathBuf>,

    /// White border width as a fraction of the icon side, in [0, 0.5)
    #[arg(long)]
    border_ratio: Option<f64>,

    /// Output PNG files; sizes are inferred from the filenames.
    /// Replaces the config's targets when given.
    outputs: Vec<PathBuf>,
}

#[derive(Parser)]
#[command(name = "roundel")]
#[command(about = "Turn an image into circular app and PWA icons")]
#[command(long_about = "\
Turn an image into circular app and PWA icons

The source is center-cropped to a square, masked to a circle, optionally
framed with a white ring, and written as PNG at each target size.

Target sizes come from the filename:
  *192x192*  -> 192x192
  *512x512*  -> 512x512
  otherwise  -> the icon's own size, capped at 512x512

Settings are read from ./roundel.toml when present.
Run 'roundel gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file [default: ./roundel.toml if it exists]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the icons and write every target
    Make {
        #[command(flatten)]
        args: SourceArgs,

        /// Keep writing the remaining targets after a failed write
        #[arg(long)]
        keep_going: bool,
    },
    /// Validate the config and source, and show what would be written
    Check(SourceArgs),
    /// Print a stock roundel.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the run finished but some targets failed.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Make { args, keep_going } => {
            let mut icon_config = resolve_config(cli.config.as_deref(), &args)?;
            if keep_going {
                icon_config.on_write_error = WritePolicy::Continue;
            }
            init_thread_pool(&icon_config.processing);

            let options = icon_config.icon_options()?;
            let targets = icon_config.output_targets();
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    let is_failure = matches!(event, IconEvent::SaveFailed { .. });
                    for line in output::format_icon_event(&event) {
                        if is_failure {
                            eprintln!("{}", line);
                        } else {
                            println!("{}", line);
                        }
                    }
                }
            });
            let result = compose::compose_with_backend(
                &RustBackend::new(),
                &icon_config.source,
                &targets,
                &options,
                Some(tx),
            );
            let _ = printer.join();
            let report = result?;

            let summary = output::format_report_summary(&report);
            if report.is_success() {
                for line in summary {
                    println!("{}", line);
                }
            } else {
                for line in summary {
                    eprintln!("{}", line);
                }
            }
            Ok(report.is_success())
        }
        Command::Check(args) => {
            let icon_config = resolve_config(cli.config.as_deref(), &args)?;
            let options = icon_config.icon_options()?;
            let plan =
                compose::plan_with_backend(&RustBackend::new(), &icon_config.source, options.border)?;
            output::print_plan(
                &icon_config.source,
                plan.source_dimensions,
                plan.side,
                plan.border_width,
                &icon_config.output_targets(),
            );
            Ok(true)
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(true)
        }
    }
}

/// Load the config file and apply command-line overrides on top.
fn resolve_config(
    explicit: Option<&std::path::Path>,
    args: &SourceArgs,
) -> Result<IconConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut icon_config = config::load_config(explicit, &cwd)?;
    if let Some(source) = &args.source {
        icon_config.source = source.clone();
    }
    if let Some(ratio) = args.border_ratio {
        icon_config.border_ratio = ratio;
    }
    if !args.outputs.is_empty() {
        icon_config.targets = args.outputs.iter().map(TargetConfig::hinted).collect();
    }
    icon_config.validate()?;
    Ok(icon_config)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
