use approx::assert_abs_diff_eq;
use hyd_core::models::{ForecastFactor, Period};
use hyd_solver::{EngineSettings, PlantBids, current_offers, forecast_offers, io::Scenario};
use rstest::*;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::PathBuf};

// For every (input.json, output.json) pair in `./samples/**`,
//   1. Read in the scenario and the period to evaluate,
//   2. Read in the known-good bids,
//   3. Compute the bids, as a forecast if the input names a demand factor,
//   4. Compare plant by plant and segment by segment.

#[derive(Deserialize)]
struct Sample {
    period: Period,
    #[serde(default)]
    forecast: Option<f64>,
    scenario: Scenario,
}

#[rstest]
fn compute_bids(#[files("tests/samples/**/input.json")] input: PathBuf) {
    let mut output = input.clone();
    output.set_file_name("output.json");

    let sample: Sample =
        serde_json::from_reader(BufReader::new(File::open(input).unwrap())).unwrap();

    let reference: Vec<PlantBids> =
        serde_json::from_reader(BufReader::new(File::open(output).unwrap())).unwrap();

    let settings = EngineSettings::default();
    let solution = match sample.forecast {
        Some(factor) => forecast_offers(
            &sample.scenario,
            ForecastFactor(factor),
            sample.period,
            settings,
        ),
        None => current_offers(&sample.scenario, sample.period, settings),
    }
    .unwrap();

    cmp(&solution, &reference, 1e-6);
}

fn cmp(a: &[PlantBids], b: &[PlantBids], eps: f64) {
    assert_eq!(a.len(), b.len());
    for (p1, p2) in a.iter().zip(b.iter()) {
        assert_eq!(p1.plant, p2.plant);
        assert_eq!(p1.bids.len(), p2.bids.len());

        for (b1, b2) in p1.bids.iter().zip(p2.bids.iter()) {
            assert_eq!(b1.segment, b2.segment);
            assert_abs_diff_eq!(b1.capacity, b2.capacity, epsilon = eps);
            assert_eq!(b1.price, 0.0);
        }
    }
}
