//! Asset Variants CLI
//!
//! Usage:
//!   asset-variants [OPTIONS] <COMMAND>
//!
//! Commands:
//!   plan <MANIFEST> [--json]         List every variant a manifest produces
//!   preview <MANIFEST> --out <DIR>   Render SVG previews of every variant
//!   place --frame WxH <CONSTRAINTS>  Resolve constraint text inside a frame
//!
//! Options:
//!   -v, --verbose  Log generation and rendering steps
//!   -h, --help     Print help

use std::fs;
use std::path::{Component, Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;

use asset_variants::{build, place, Frame, Manifest, SvgBackend, SvgConfig};

#[derive(Parser)]
#[command(name = "asset-variants")]
#[command(about = "Expand image asset declarations and lay out their contents")]
struct Cli {
    /// Log generation and rendering steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every variant a manifest produces
    Plan {
        /// Manifest file (TOML format)
        manifest: PathBuf,

        /// Print full variant records as JSON instead of paths
        #[arg(long)]
        json: bool,
    },

    /// Render every variant's layers to SVG previews
    Preview {
        /// Manifest file (TOML format)
        manifest: PathBuf,

        /// Output directory; previews are written to <DIR>/<path>.svg
        #[arg(short, long)]
        out: PathBuf,

        /// Directory layer sources are resolved against (defaults to the manifest's)
        #[arg(long)]
        assets: Option<PathBuf>,
    },

    /// Resolve constraint text inside a frame and print the box
    Place {
        /// Frame size, e.g. 320x480
        #[arg(long, value_parser = parse_frame)]
        frame: Frame,

        /// Constraint text, e.g. "top: 10, left: 50%, size: (20, 20)"
        constraints: String,
    },
}

fn parse_frame(raw: &str) -> Result<Frame, String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", raw))?;
    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height))?;
    Ok(Frame::new(width, height))
}

/// Where the preview of a variant path lands under `out`
///
/// Absolute variant paths are re-rooted at `out`; paths climbing out of it
/// with `..` are refused.
fn preview_target(out: &Path, variant_path: &str) -> Result<PathBuf, String> {
    let mut target = out.to_path_buf();
    for component in Path::new(&format!("{}.svg", variant_path)).components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => {
                return Err(format!(
                    "variant path '{}' escapes the output directory",
                    variant_path
                ))
            }
        }
    }
    Ok(target)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Plan { manifest, json } => plan(&manifest, json),
        Command::Preview {
            manifest,
            out,
            assets,
        } => preview(&manifest, &out, assets),
        Command::Place { frame, constraints } => match place(frame, &constraints) {
            Ok(resolved) => {
                println!(
                    "x={} y={} width={} height={} top={} right={} bottom={} left={}",
                    resolved.x,
                    resolved.y,
                    resolved.width,
                    resolved.height,
                    resolved.top,
                    resolved.right,
                    resolved.bottom,
                    resolved.left
                );
            }
            Err(asset_variants::Error::Parse(errors)) => {
                for error in &errors {
                    eprintln!("{}", error.format(&constraints, "<constraints>"));
                }
                std::process::exit(1);
            }
            Err(e) => fail(e),
        },
    }
}

fn load(path: &Path) -> Manifest {
    match Manifest::from_file(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Error loading manifest '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

fn plan(path: &Path, json: bool) {
    let manifest = load(path);
    let variants = manifest.variants().unwrap_or_else(|e| fail(e));

    if json {
        match serde_json::to_string_pretty(&variants) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(e),
        }
    } else {
        for variant in &variants {
            println!("{}", variant.path);
        }
    }
}

fn preview(path: &Path, out: &Path, assets: Option<PathBuf>) {
    let manifest = load(path);
    let variants = manifest.variants().unwrap_or_else(|e| fail(e));
    let basepath = assets.unwrap_or_else(|| {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });

    let mut backend = SvgBackend::new(SvgConfig::default());
    let rendered = build(&variants, &basepath, &mut backend, |canvas| {
        manifest.draw(canvas)
    })
    .unwrap_or_else(|e| fail(e));

    for file in rendered {
        let target = preview_target(out, &file.path).unwrap_or_else(|e| fail(e));
        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                fail(format!("cannot create '{}': {}", parent.display(), e));
            }
        }
        if let Err(e) = fs::write(&target, file.output) {
            fail(format!("cannot write '{}': {}", target.display(), e));
        }
        println!("{}", target.display());
    }
}
