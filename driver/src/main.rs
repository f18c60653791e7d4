use altimcore::prelude::{Bounds, RetrackerConfig};
use anyhow::{bail, Context};
use clap::Parser;
use generator::export::write_netcdf;
use generator::profile::{build_synthetic_pass, GeneratorConfig};
use log::info;
use report::model::{write_report, SeriesReport, WaveformReport};
use std::path::PathBuf;
use workflow::config::ProjectConfig;
use workflow::runner::{append_summaries, HeightSeries, Runner, SeriesResult};

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Radar-altimeter height extraction driver")]
struct Args {
    /// Project YAML with data directory, passes and retracker calibration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pass to process; required when the project configures several
    #[arg(long)]
    pass: Option<u32>,
    /// Direct bounds; the project file supplies them when --config is given
    #[arg(long, allow_hyphen_values = true, conflicts_with = "config")]
    min_lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, conflicts_with = "config")]
    max_lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, conflicts_with = "config")]
    min_lon: Option<f64>,
    #[arg(long, allow_hyphen_values = true, conflicts_with = "config")]
    max_lon: Option<f64>,
    /// Dump masked waveforms of the first input instead of heights
    #[arg(long, default_value_t = false)]
    waveforms: bool,
    /// Clip waveform power to [0, CLIP]
    #[arg(long)]
    clip: Option<f64>,
    /// Process a generated pass instead of data files
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Also write the generated pass to this netCDF file
    #[arg(long)]
    write_synthetic: Option<PathBuf>,
    /// Report destination; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
    /// Sensor data record files, one per cycle
    files: Vec<PathBuf>,
}

struct Selection {
    pass: Option<u32>,
    bounds: Bounds,
    retracker: RetrackerConfig,
    files: Vec<PathBuf>,
}

fn select(args: &Args) -> anyhow::Result<Selection> {
    if let Some(path) = &args.config {
        let project = ProjectConfig::load(path)?;
        let pass = project.select_pass(args.pass)?;
        return Ok(Selection {
            pass: Some(pass.number),
            bounds: pass.bounds,
            retracker: project.retracker,
            files: args.files.iter().map(|file| project.resolve(file)).collect(),
        });
    }

    let bounds = match (args.min_lat, args.max_lat) {
        (Some(min), Some(max)) => Bounds::latitude_only(min, max),
        (None, None) if args.synthetic => Bounds::latitude_only(-90.0, 90.0),
        _ => bail!("either --config or both --min-lat and --max-lat are required"),
    };
    Ok(Selection {
        pass: args.pass,
        bounds: bounds.with_longitude(args.min_lon, args.max_lon),
        retracker: RetrackerConfig::default(),
        files: args.files.clone(),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let selection = select(&args)?;
    let runner = Runner::new(selection.bounds, selection.retracker);
    let output = args.output.as_deref();

    if args.synthetic {
        let generator = GeneratorConfig {
            seed: args.seed,
            ..Default::default()
        };
        let store = build_synthetic_pass(&generator)?;
        if let Some(path) = &args.write_synthetic {
            write_netcdf(&store, path)
                .with_context(|| format!("writing synthetic pass {}", path.display()))?;
            info!("synthetic pass written to {}", path.display());
        }

        if args.waveforms {
            let waveforms = runner.waveforms_for_store(&store, args.clip)?;
            return write_report(&WaveformReport::new("synthetic".to_string(), &waveforms), output);
        }

        let combined = runner.heights_for_store(&store)?;
        let mut series = HeightSeries::new();
        append_summaries(&mut series, &combined);
        let result = SeriesResult {
            series,
            processed: vec![PathBuf::from("synthetic")],
            skipped: Vec::new(),
        };
        return write_report(&SeriesReport::new(selection.pass, selection.bounds, result), output);
    }

    if selection.files.is_empty() {
        bail!("no data files given (use --synthetic to run on a generated pass)");
    }

    if args.waveforms {
        let path = &selection.files[0];
        let waveforms = runner.waveforms_for_file(path, args.clip)?;
        info!("{} waveforms selected from {}", waveforms.len(), path.display());
        return write_report(
            &WaveformReport::new(path.display().to_string(), &waveforms),
            output,
        );
    }

    let result = runner.heights_for_files(&selection.files);
    if result.processed.is_empty() {
        bail!("none of the {} data files could be processed", selection.files.len());
    }
    write_report(&SeriesReport::new(selection.pass, selection.bounds, result), output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_flags_conflict_with_config() {
        for flag in ["--min-lat", "--max-lat", "--min-lon", "--max-lon"] {
            let result = Args::try_parse_from(["altimetry", "--config", "project.yaml", flag, "-10"]);
            assert!(result.is_err(), "{} accepted alongside --config", flag);
        }
    }

    #[test]
    fn bounds_flags_accept_negative_values() {
        let args = Args::try_parse_from(["altimetry", "--min-lat", "-10", "--max-lat", "5", "--synthetic"])
            .unwrap();
        let selection = select(&args).unwrap();
        assert_eq!(selection.bounds, Bounds::latitude_only(-10.0, 5.0));
    }
}
