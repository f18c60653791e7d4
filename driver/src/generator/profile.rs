use altimcore::prelude::SUBSAMPLES_PER_RECORD;
use altimcore::store::{names, MemoryStore};
use anyhow::{bail, Context};
use ndarray::{Array1, Array2, Array3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub records: usize,
    pub bins: usize,
    pub start_latitude: f64,
    /// Latitude advance per 1Hz record, in degrees.
    pub latitude_step: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub sea_surface_height: f64,
    /// Gate at the middle of the simulated leading edge.
    pub leading_edge_gate: f64,
    pub peak_power: f64,
    /// Relative multiplicative speckle on waveform power.
    pub noise: f64,
    /// Standard jitter on ranges, in metres.
    pub range_jitter: f64,
    /// First record time, seconds since 2000-01-01.
    pub start_time: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records: 40,
            bins: 104,
            start_latitude: 60.0,
            latitude_step: 0.06,
            longitude: 25.0,
            altitude: 1_336_000.0,
            sea_surface_height: 18.5,
            leading_edge_gate: 32.0,
            peak_power: 1500.0,
            noise: 0.05,
            range_jitter: 0.08,
            start_time: 4.2e8,
            seed: 0,
        }
    }
}

fn jitter(rng: &mut StdRng, amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        rng.gen_range(-amplitude..amplitude)
    } else {
        0.0
    }
}

/// Brown-like echo: thermal floor, linear leading edge over four gates, slow trailing decay.
fn echo_power(config: &GeneratorConfig, gate: f64) -> f64 {
    let floor = 0.03 * config.peak_power;
    let rise = ((gate - config.leading_edge_gate) / 4.0 + 0.5).clamp(0.0, 1.0);
    let decay = (-(gate - config.leading_edge_gate - 2.0).max(0.0) / 80.0).exp();
    floor + (config.peak_power - floor) * rise * decay
}

pub fn build_synthetic_pass(config: &GeneratorConfig) -> anyhow::Result<MemoryStore> {
    if config.records == 0 || config.bins == 0 {
        bail!("synthetic pass needs at least one record and one bin");
    }
    let samples = config
        .records
        .checked_mul(SUBSAMPLES_PER_RECORD)
        .context("overflow computing sample count for generator")?;
    samples
        .checked_mul(config.bins)
        .context("overflow computing waveform size for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let shape = (config.records, SUBSAMPLES_PER_RECORD);
    let sub_step = config.latitude_step / SUBSAMPLES_PER_RECORD as f64;

    let latitude = Array2::from_shape_fn(shape, |(r, s)| {
        config.start_latitude + (r * SUBSAMPLES_PER_RECORD + s) as f64 * sub_step
    });
    let longitude = Array2::from_shape_fn(shape, |(r, s)| {
        config.longitude + (r * SUBSAMPLES_PER_RECORD + s) as f64 * sub_step * 0.3
    });
    let altitude = Array2::from_shape_fn(shape, |(r, s)| {
        let t = (r * SUBSAMPLES_PER_RECORD + s) as f64 / samples as f64;
        config.altitude + 40.0 * (t * std::f64::consts::PI).sin()
    });

    let dry = Array1::from_shape_fn(config.records, |r| -2.31 + 0.001 * r as f64);
    let wet = Array1::from_shape_fn(config.records, |_| -0.12 + jitter(&mut rng, 0.01));
    let iono = Array1::from_elem(config.records, -0.045);
    let solid = Array1::from_shape_fn(config.records, |r| 0.12 * (r as f64 / 10.0).sin());
    let pole = Array1::from_elem(config.records, 0.004);
    let correction = &dry + &wet + &iono + &solid + &pole;

    let range = Array2::from_shape_fn(shape, |(r, s)| {
        altitude[[r, s]] - correction[r] - config.sea_surface_height + jitter(&mut rng, config.range_jitter)
    });
    let mle3 = range.mapv(|v| v + 0.015);
    let ice = range.mapv(|v| v - 0.21);

    let waveforms = Array3::from_shape_fn((config.records, SUBSAMPLES_PER_RECORD, config.bins), |(_, _, b)| {
        echo_power(config, b as f64) * (1.0 + jitter(&mut rng, config.noise))
    });
    let time = Array1::from_shape_fn(config.records, |r| config.start_time + r as f64);

    let store = MemoryStore::new()
        .with_variable(names::LATITUDE_20HZ, latitude)
        .with_variable(names::LONGITUDE_20HZ, longitude)
        .with_variable(names::ALTITUDE_20HZ, altitude)
        .with_variable(names::TIME, time)
        .with_variable(names::WAVEFORMS_20HZ_KU, waveforms)
        .with_variable(names::RANGE_20HZ_KU, range)
        .with_variable(names::RANGE_20HZ_KU_MLE3, mle3)
        .with_variable(names::ICE_RANGE_20HZ_KU, ice)
        .with_variable(names::DRY_TROPO_CORRECTION, dry)
        .with_variable(names::WET_TROPO_CORRECTION, wet)
        .with_variable(names::IONO_CORRECTION, iono)
        .with_variable(names::SOLID_EARTH_TIDE, solid)
        .with_variable(names::POLE_TIDE, pole);
    Ok(store)
}
