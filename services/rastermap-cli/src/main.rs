//! Raster map inspector.
//!
//! Builds a raster map from a bounding box and prints its geometry as JSON,
//! optionally resolving probe points to pixels and back.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use geo_common::{GeoBounds, GeoPoint, PixelPos};
use rastermap::{RasterMapConfig, RasterMapSummary};

#[derive(Parser, Debug)]
#[command(name = "rastermap-cli")]
#[command(about = "Inspect the geo to raster mapping of a bounding box")]
struct Args {
    /// Bounding box as "minLon,minLat,maxLon,maxLat"
    #[arg(short, long, env = "RASTERMAP_BBOX", required_unless_present = "config_json")]
    bbox: Option<String>,

    /// Pixels along the longer side of the raster
    #[arg(short, long, env = "RASTERMAP_SIZE", default_value = "512")]
    size: u32,

    /// Leave the alpha channel at zero
    #[arg(long)]
    no_alpha: bool,

    /// Full configuration as inline JSON, overrides --bbox/--size/--no-alpha
    #[arg(long, env = "RASTERMAP_CONFIG_JSON")]
    config_json: Option<String>,

    /// Geo position "lat,lon" to resolve (repeatable)
    #[arg(short, long)]
    probe: Vec<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pixel: Option<PixelPos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pixel_center: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buffer_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    map: RasterMapSummary,
    probes: Vec<ProbeReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the report, logs go to stderr
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let config = load_config(&args)?;
    info!(
        min = %config.min,
        max = %config.max,
        longest_pixel_size = config.longest_pixel_size,
        "Building raster map"
    );

    let map = config.build().context("Failed to build raster map")?;
    info!(
        width = map.raster_width(),
        height = map.raster_height(),
        "Raster map ready"
    );

    let probes = args
        .probe
        .iter()
        .map(|input| {
            let resolved = input.parse::<GeoPoint>().and_then(|geo| {
                let pixel = map.geo_to_pixel(&geo)?;
                let center = map.raster_pos_to_geo_pos(&pixel)?;
                let offset = map.raster_position_to_buffer_position(&pixel)?;
                Ok((pixel, center, offset))
            });

            match resolved {
                Ok((pixel, center, offset)) => ProbeReport {
                    input: input.clone(),
                    pixel: Some(pixel),
                    pixel_center: Some(center),
                    buffer_offset: Some(offset),
                    error: None,
                },
                Err(e) => {
                    warn!(probe = %input, code = e.code(), error = %e, "Probe failed");
                    ProbeReport {
                        input: input.clone(),
                        pixel: None,
                        pixel_center: None,
                        buffer_offset: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    let report = Report {
        map: map.summary(),
        probes,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn load_config(args: &Args) -> Result<RasterMapConfig> {
    if let Some(json) = &args.config_json {
        return RasterMapConfig::from_json_str(json).context("Invalid --config-json");
    }

    let bbox = args
        .bbox
        .as_deref()
        .context("Either --bbox or --config-json is required")?;
    let bounds = GeoBounds::from_bbox_string(bbox)?;

    let mut config = RasterMapConfig::from_bounds(&bounds, args.size);
    config.alpha_to_max = !args.no_alpha;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_bbox_flags() {
        let args =
            Args::try_parse_from(["rastermap-cli", "--bbox", "5,45,8,46", "--size", "300", "--no-alpha"])
                .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.min, GeoPoint::new(45.0, 5.0));
        assert_eq!(config.max, GeoPoint::new(46.0, 8.0));
        assert_eq!(config.longest_pixel_size, 300);
        assert!(!config.alpha_to_max);
    }

    #[test]
    fn test_config_json_overrides_bbox() {
        let args = Args::try_parse_from([
            "rastermap-cli",
            "--bbox",
            "5,45,8,46",
            "--config-json",
            r#"{"min": {"lat": 0, "lon": 0}, "max": {"lat": 1, "lon": 1}, "longest_pixel_size": 10}"#,
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.longest_pixel_size, 10);
        assert!(config.alpha_to_max);
    }

    #[test]
    fn test_invalid_bbox() {
        let args = Args::try_parse_from(["rastermap-cli", "--bbox", "5,45,8"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
