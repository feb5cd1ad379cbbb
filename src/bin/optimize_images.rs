use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use image::GenericImageView;
use image::imageops::FilterType;
use webp::Encoder;

const MAX_WIDTH: u32 = 2800; // Shots wider than this are scaled down
const QUALITY: f32 = 85.0;   // WebP quality

/// One-shot optimizer for the high-resolution product shots: resizes
/// anything wider than the maximum width (preserving aspect ratio) and
/// re-encodes everything as WebP.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Directory with the original images
    input: PathBuf,

    /// Directory the optimized .webp files are written to
    output: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory {:?}", args.output))?;

    let mut files = Vec::new();
    let entries = fs::read_dir(&args.input)
        .with_context(|| format!("Failed to read input directory {:?}", args.input))?;
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            match ext.to_lowercase().as_str() {
                "png" | "jpg" | "jpeg" => files.push(path),
                _ => {}
            }
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    println!("Found {} images to optimize\n", files.len());

    // One bad file must not sink the batch
    for path in &files {
        if let Err(e) = optimize_one(path, &args.output) {
            eprintln!(
                "x Error processing {}: {:#}",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
                e
            );
        }
    }

    println!("Done! Optimized images saved to: {:?}", args.output);
    Ok(())
}

fn optimize_one(input: &Path, output_dir: &Path) -> Result<()> {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow!("No file stem for {:?}", input))?;
    let output_path = output_dir.join(stem).with_extension("webp");

    let original_bytes = fs::metadata(input)
        .with_context(|| format!("Failed to stat {:?}", input))?
        .len();

    let img = image::open(input).with_context(|| format!("Failed to decode {:?}", input))?;
    let (orig_w, orig_h) = img.dimensions();

    let img = if orig_w > MAX_WIDTH {
        let new_h = (orig_h as u64 * MAX_WIDTH as u64 / orig_w as u64) as u32;
        img.resize_exact(MAX_WIDTH, new_h.max(1), FilterType::Lanczos3)
    } else {
        img
    };
    let (new_w, new_h) = img.dimensions();

    // The image crate only does lossless WebP, so encode through libwebp
    let rgba = img.to_rgba8();
    let encoded = Encoder::from_rgba(&rgba, new_w, new_h).encode(QUALITY);
    fs::write(&output_path, &*encoded)
        .with_context(|| format!("Failed to write {:?}", output_path))?;

    let new_bytes = fs::metadata(&output_path)?.len();
    let saved = (original_bytes.saturating_sub(new_bytes)) as f64 / original_bytes as f64 * 100.0;

    println!("+ {}", file_name);
    println!(
        "  Original: {:.2}MB -> Optimized: {:.2}MB ({:.1}% smaller)",
        original_bytes as f64 / 1024.0 / 1024.0,
        new_bytes as f64 / 1024.0 / 1024.0,
        saved
    );
    println!("  Dimensions: {}x{} -> {}x{}\n", orig_w, orig_h, new_w, new_h);

    Ok(())
}
