//! Fill command: run the bucket fill engine on a PNG file.

use std::fs;

use anyhow::{Context, Result};
use doodle::{AppConfig, Canvas, FillRequest, parse_hex_color, to_hex};

pub struct FillArgs {
    pub x: u32,
    pub y: u32,
    pub color: String,
    pub tolerance: Option<u8>,
    pub no_diagonals: bool,
    pub erase: bool,
}

pub fn run(config: &AppConfig, input: &str, output: &str, args: FillArgs) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input))?;
    let mut canvas = Canvas::from_png(&bytes).context("Failed to decode input image")?;

    let color = parse_hex_color(&args.color)?;
    let base = if args.erase {
        FillRequest::erase(args.x, args.y)
    } else {
        FillRequest::new(args.x, args.y, color)
    };
    let request = base
        .with_tolerance(args.tolerance.unwrap_or(config.fill.tolerance))
        .with_diagonals(config.fill.diagonals && !args.no_diagonals);

    let report = canvas.bucket_fill(&request)?;

    fs::write(output, canvas.to_png()?).with_context(|| format!("Failed to write {}", output))?;

    let (width, height) = canvas.dimensions();
    let target = if request.erase {
        "transparent".to_string()
    } else {
        to_hex(request.color)
    };
    println!(
        "Filled {} pixels (+{} sealed) with {} at ({}, {}) on {}x{}, tolerance {}",
        report.filled,
        report.sealed,
        target,
        request.x,
        request.y,
        width,
        height,
        request.tolerance()
    );
    if report.is_noop() {
        eprintln!("Seed pixel already matches the fill color; image unchanged");
    }
    Ok(())
}
