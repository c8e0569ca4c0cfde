use album_press::{config, output, process, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shared flags for commands that generate derivatives.
#[derive(clap::Args, Clone)]
struct ForceArgs {
    /// Regenerate every derivative, even ones that already exist
    #[arg(long)]
    force: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "album-press")]
#[command(about = "Derivative generator for static photo portfolios")]
#[command(long_about = "\
Derivative generator for static photo portfolios

Your filesystem is the data source. Subdirectories of the source root become
albums, and every image inside one gets a square thumbnail and a size-capped
web copy. A JSON manifest tells the gallery viewer what exists.

Source structure:

  public/images/
  ├── config.toml                  # Generator config (optional)
  ├── beach/                       # Album
  │   ├── B.png                    # Any .jpg/.jpeg/.png/.gif (case-insensitive)
  │   ├── a.jpg
  │   ├── thumbs/                  # Generated: 200x200 contain-fit thumbnails
  │   └── web/                     # Generated: max-1920px JPEG copies
  └── mountains/
      └── 001.jpg

Derivatives keep the source file name. Existing derivatives are skipped, so
reruns only touch new images; pass --force to rebuild everything.

Run 'album-press gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source image root (albums are its subdirectories)
    #[arg(long, default_value = "public/images", global = true)]
    source: PathBuf,

    /// Where to write the album manifest
    #[arg(long, default_value = "public/albums-manifest.json", global = true)]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate derivatives and write the album manifest
    Build(ForceArgs),
    /// Scan the source tree and report without generating anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(force_args) => {
            let config = config::load_config(&cli.source)?;

            println!("==> Scanning {}", cli.source.display());
            let scanned = scan::scan(&cli.source)?;
            output::print_scan_summary(&scanned);

            println!("==> Generating derivatives");
            init_thread_pool(&config.processing);
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_process_event(&event);
                }
            });
            let report = process::process(&scanned, &config, force_args.force, Some(tx))?;
            printer.join().ok();

            println!("==> Writing {}", cli.manifest.display());
            report.manifest.write(&cli.manifest)?;

            // Per-file failures were logged and dropped from the manifest;
            // they do not fail the run.
            output::print_run_summary(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let scanned = scan::scan(&cli.source)?;
            output::print_scan_summary(&scanned);
            for album in &scanned.albums {
                println!("  {}: {} images", album.name, album.files.len());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
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
