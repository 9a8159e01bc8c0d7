//! texload CLI - Inspect and decode DDS, Radiance HDR and PFM textures.
//!
//! This is the main entry point for the texload command-line application.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level};
use rayon::prelude::*;
use serde::Serialize;

use texload::prelude::*;

/// texload - texture container inspection and decoding tool
#[derive(Parser)]
#[command(name = "texload")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header information of texture files
    Info {
        /// Input files or glob patterns
        #[arg(required = true)]
        files: Vec<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode texture files to raw pixel buffers
    Decode {
        /// Input files or glob patterns
        #[arg(required = true)]
        files: Vec<String>,

        /// Output directory
        #[arg(short, long, env = "TEXLOAD_OUTPUT")]
        output: PathBuf,

        /// Flip images vertically
        #[arg(long)]
        flip_y: bool,

        /// Keep Radiance pixels as raw RGBE bytes
        #[arg(long)]
        rgbe: bool,

        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;

    match cli.command {
        Commands::Info { files, json } => {
            cmd_info(&expand_inputs(&files)?, json)?;
        }
        Commands::Decode {
            files,
            output,
            flip_y,
            rgbe,
            jobs,
        } => {
            if let Some(jobs) = jobs {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build_global()
                    .context("Failed to configure worker threads")?;
            }
            cmd_decode(&expand_inputs(&files)?, &output, flip_y, rgbe)?;
        }
    }

    Ok(())
}

fn setup_logger(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level).context("Failed to initialize logger")?;
    info!("Log level: {level}");
    Ok(())
}

/// Expand glob patterns, keeping plain paths as given.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(input));
            continue;
        }
        let before = paths.len();
        for entry in glob::glob(input).with_context(|| format!("Invalid pattern {input}"))? {
            paths.push(entry?);
        }
        if paths.len() == before {
            warn!("Pattern {input} matched no files");
        }
    }
    Ok(paths)
}

#[derive(Serialize)]
struct InfoReport {
    path: PathBuf,
    container: String,
    #[serde(flatten)]
    info: ImageInfo,
    warnings: Vec<String>,
}

fn cmd_info(files: &[PathBuf], json: bool) -> Result<()> {
    let key = TextureKey::default();
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        let (reader, kind) = open_texture(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut warnings = Vec::new();
        let info = read_info(reader, kind, &key, &mut warnings)
            .with_context(|| format!("Failed to read header of {}", path.display()))?;

        reports.push(InfoReport {
            path: path.clone(),
            container: kind.to_string(),
            info,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        let info = &report.info;
        println!("{}", report.path.display());
        println!("  container: {}", report.container);
        println!("  format:    {}", info.format);
        println!("  size:      {}x{}x{}", info.width, info.height, info.depth);
        println!("  kind:      {:?}", info.kind);
        println!("  mips:      {}", info.mip_count);
        if info.normal_map {
            println!("  normal map");
        }
        for warning in &report.warnings {
            println!("  warning:   {warning}");
        }
    }

    Ok(())
}

/// JSON sidecar written next to the raw buffers.
#[derive(Serialize)]
struct Sidecar<'a> {
    source: &'a Path,
    #[serde(flatten)]
    info: ImageInfo,
    mip_sizes: &'a [usize],
    faces: Vec<String>,
}

fn cmd_decode(files: &[PathBuf], output: &Path, flip_y: bool, rgbe: bool) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    println!("Decoding {} files to {}...", files.len(), output.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let stems = output_stems(files);
    let start = Instant::now();
    let failures: Vec<(PathBuf, anyhow::Error)> = files
        .par_iter()
        .zip(stems.par_iter())
        .filter_map(|(path, stem)| {
            let key = TextureKey::new(path).with_flip_y(flip_y).with_force_rgbe(rgbe);
            let result = decode_one(path, stem, output, &key);
            pb.inc(1);
            result.err().map(|e| (path.clone(), e))
        })
        .collect();

    pb.finish_with_message("Done");

    for (path, error) in &failures {
        eprintln!("Error decoding {}: {error:#}", path.display());
    }
    println!(
        "Decoded {} files in {:?} ({} errors)",
        files.len() - failures.len(),
        start.elapsed(),
        failures.len()
    );

    if !failures.is_empty() {
        anyhow::bail!("{} of {} files failed to decode", failures.len(), files.len());
    }

    Ok(())
}

/// Output name stem per input: the file stem, suffixed `-N` on repeats.
fn output_stems(files: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    files
        .iter()
        .map(|path| {
            let base = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("texture");
            let mut stem = base.to_string();
            let mut n = 0;
            while !taken.insert(stem.clone()) {
                n += 1;
                stem = format!("{base}-{n}");
            }
            stem
        })
        .collect()
}

fn decode_one(path: &Path, stem: &str, output: &Path, key: &TextureKey) -> Result<()> {
    let (reader, kind) = open_texture(path)?;
    let mut warnings = Vec::new();
    let image = load_texture(reader, kind, key, &mut warnings)?;
    for warning in &warnings {
        warn!("{}: {warning}", path.display());
    }

    let mut faces = Vec::with_capacity(image.data.len());
    for (index, face) in image.data.iter().enumerate() {
        let name = format!("{stem}.{index}.raw");
        fs::write(output.join(&name), face)
            .with_context(|| format!("Failed to write {name}"))?;
        faces.push(name);
    }

    let sidecar = Sidecar {
        source: path,
        info: image.info(),
        mip_sizes: &image.mip_sizes,
        faces,
    };
    fs::write(
        output.join(format!("{stem}.json")),
        serde_json::to_string_pretty(&sidecar)?,
    )?;

    info!("{} -> {} ({} bytes)", path.display(), output.display(), image.total_size());
    Ok(())
}
