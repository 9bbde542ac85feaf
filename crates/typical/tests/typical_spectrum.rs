//! Integration tests for calibrated typical spectra

use nflux_typical::{read_config, Error, FluxTypical};
use nflux_utils::logspace;

use approx::assert_relative_eq;
use rstest::{fixture, rstest};

#[fixture]
fn bins() -> Vec<f64> {
    logspace(-2.5, 7.1, 100)
}

#[fixture]
fn reference(bins: Vec<f64>) -> FluxTypical {
    FluxTypical::new(&bins, 1.0, 1.0 / 7.0, 600.0).unwrap()
}

#[rstest]
fn reference_scenario(reference: FluxTypical) {
    // thermal/epithermal crossover a few kT above the Maxwellian peak
    let e1 = reference.model().transition_energy_1();
    assert!(e1 > 0.1 && e1 < 0.2, "E1 = {e1}");

    // sharply peaked thermal flux against the tail of the fission spectrum
    let values = reference.values();
    assert_eq!(values.len(), 99);
    assert!(values[0] > 100.0 * values[values.len() - 1]);
}

#[rstest]
#[case(600.0, 1.0 / 7.0)] // case 1
#[case(600.0, 2.0)] // case 2
#[case(300.0, 0.5)] // case 3
#[case(1000.0, 10.0)] // case 4
fn flux_is_continuous(bins: Vec<f64>, #[case] temperature: f64, #[case] ratio: f64) {
    let flux = FluxTypical::new(&bins, 1.0, ratio, temperature).unwrap();
    let model = flux.model();

    for transition in [model.transition_energy_1(), model.transition_energy_2()] {
        let below = model.flux(transition).unwrap();
        let above = model.flux(transition * (1.0 + 1e-12)).unwrap();
        assert_relative_eq!(below, above, max_relative = 1e-6);
    }
}

#[rstest]
#[case(600.0, 1.0 / 7.0)] // case 1
#[case(600.0, 0.05)] // case 2
#[case(300.0, 1.0)] // case 3
#[case(900.0, 50.0)] // case 4
fn calibrated_ratio_is_reproduced(bins: Vec<f64>, #[case] temperature: f64, #[case] ratio: f64) {
    let flux = FluxTypical::new(&bins, 1.0, ratio, temperature).unwrap();
    let realised = flux.model().thermal_to_fast_ratio().unwrap();
    assert_relative_eq!(realised, ratio, max_relative = 0.01);
}

#[rstest]
fn discretisation_conserves_flux(reference: FluxTypical) {
    let bins = reference.bins();
    let grouped: f64 = reference
        .values()
        .iter()
        .zip(bins.windows(2))
        .map(|(value, pair)| value * (pair[1] - pair[0]))
        .sum();

    let continuous = reference
        .model()
        .integrate(bins[0], bins[bins.len() - 1])
        .unwrap();

    assert_relative_eq!(grouped, continuous, max_relative = 1e-7);
    assert_relative_eq!(reference.spectrum().total(), continuous, max_relative = 1e-7);
}

#[rstest]
fn refined_groups_collapse_to_coarse(reference: FluxTypical) {
    // every coarse edge is also a fine edge
    let fine_bins = logspace(-2.5, 7.1, 397);
    let coarse_bins: Vec<f64> = fine_bins.iter().step_by(4).copied().collect();
    assert_eq!(coarse_bins.len(), 100);

    let fine = reference.rebin(&fine_bins, 1.0).unwrap();
    let coarse = reference.rebin(&coarse_bins, 1.0).unwrap();

    let fine_totals = fine.group_totals();
    for (i, pair) in coarse_bins.windows(2).enumerate() {
        let collapsed: f64 = fine_totals[4 * i..4 * i + 4].iter().sum::<f64>() / (pair[1] - pair[0]);
        assert_relative_eq!(collapsed, coarse.values[i], max_relative = 1e-7);
    }
}

#[rstest]
#[case(1.0)] // case 1
#[case(3.5)] // case 2
#[case(1.0e12)] // case 3
fn groups_are_positive_and_scaled(reference: FluxTypical, bins: Vec<f64>, #[case] scaling: f64) {
    let scaled = reference.rebin(&bins, scaling).unwrap();

    for (value, unscaled) in scaled.values.iter().zip(reference.values()) {
        assert!(*value > 0.0);
        assert_relative_eq!(*value, scaling * unscaled, max_relative = 1e-12);
    }
}

#[rstest]
#[case(0.0, 600.0)] // case 1
#[case(-1.0, 600.0)] // case 2
#[case(f64::NAN, 600.0)] // case 3
#[case(1.0, 0.0)] // case 4
#[case(1.0, -300.0)] // case 5
fn degenerate_parameters_are_rejected(bins: Vec<f64>, #[case] ratio: f64, #[case] temperature: f64) {
    let result = FluxTypical::new(&bins, 1.0, ratio, temperature);
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
}

#[rstest]
#[case(vec![1.0, 2.0, 2.0, 3.0])] // case 1
#[case(vec![1.0, 3.0, 2.0])] // case 2
#[case(vec![1.0])] // case 3
#[case(vec![0.0, 1.0, 2.0])] // case 4
#[case(vec![1.0, 1.0e6, 2.5e7])] // case 5
fn degenerate_bins_are_rejected(#[case] bins: Vec<f64>) {
    let result = FluxTypical::new(&bins, 1.0, 1.0 / 7.0, 600.0);
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
}

#[rstest]
fn unreachable_ratio_is_an_error(bins: Vec<f64>) {
    // even the lowest candidate transition gives more thermal flux than this
    let result = FluxTypical::new(&bins, 1.0, 0.01, 600.0);
    assert!(matches!(result, Err(Error::CalibrationOutOfRange { .. })));
}

#[rstest]
fn evaluation_outside_domain(reference: FluxTypical) {
    assert!(matches!(reference.flux(0.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(reference.flux(-5.0), Err(Error::InvalidParameter(_))));
    assert!(reference.flux(1.0e-9).unwrap() > 0.0);
}

#[rstest]
fn config_matches_direct_construction(reference: FluxTypical) {
    let flux = read_config("./data/typical_600K.json")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(flux.bins(), reference.bins());
    for (a, b) in flux.values().iter().zip(reference.values()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }
}

#[rstest]
fn config_with_explicit_bins() {
    let config = read_config("./data/explicit_bins.json").unwrap();
    assert_eq!(config.scaling, 1.0);
    assert_eq!(config.thermal_temperature, 600.0);

    let flux = config.build().unwrap();
    assert_eq!(flux.values().len(), 5);
    assert_relative_eq!(
        flux.model().thermal_to_fast_ratio().unwrap(),
        2.0,
        max_relative = 0.01
    );
}
