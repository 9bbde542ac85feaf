use nflux_quadrature::{integrate, integrate_estimate, Error, Tolerance};

use approx::assert_relative_eq;
use rstest::rstest;
use std::f64::consts::{E, PI};

#[rstest]
#[case(|x: f64| x.powi(3), 0.0, 2.0, 4.0)] // case 1
#[case(|x: f64| x.exp(), 0.0, 1.0, E - 1.0)] // case 2
#[case(|x: f64| 1.0 / x, 1.0, 1.0e6, 6.0 * 10.0f64.ln())] // case 3
#[case(|x: f64| 1.0 / (1.0 + x * x), 0.0, 1.0, PI / 4.0)] // case 4
#[case(|x: f64| x.sqrt() * (-x).exp(), 0.0, 60.0, 0.5 * PI.sqrt())] // case 5
fn known_integrals(
    #[case] f: fn(f64) -> f64,
    #[case] lower: f64,
    #[case] upper: f64,
    #[case] expected: f64,
) {
    let value = integrate(f, lower, upper, &Tolerance::default()).unwrap();
    assert_relative_eq!(value, expected, max_relative = 1e-8);
}

#[rstest]
fn absolute_tolerance_for_vanishing_integrals() {
    let tolerance = Tolerance {
        relative: 0.0,
        absolute: 1e-10,
        limit: 500,
    };
    let estimate = integrate_estimate(|x: f64| x.sin(), 0.0, 2.0 * PI, &tolerance).unwrap();
    assert!(estimate.value.abs() < 1e-10);
    assert!(estimate.error <= 1e-10);
}

#[rstest]
fn refinement_concentrates_on_peaks() {
    // the smooth exponential converges on the first rule application
    let smooth = integrate_estimate(|x: f64| (-x).exp(), 0.0, 1.0, &Tolerance::default()).unwrap();
    assert_eq!(smooth.intervals, 1);

    let peaked = integrate_estimate(
        |x: f64| (-((x - 1.0) / 1e-2).powi(2)).exp(),
        0.0,
        2.0,
        &Tolerance::default(),
    )
    .unwrap();
    assert!(peaked.intervals > 1);
    assert_relative_eq!(peaked.value, 1e-2 * PI.sqrt(), max_relative = 1e-7);
}

#[rstest]
fn undefined_integrand_is_reported() {
    let result = integrate(|x: f64| (x - 0.5).sqrt(), 0.0, 1.0, &Tolerance::default());
    assert!(matches!(result, Err(Error::NonFiniteIntegrand { .. })));
}

#[rstest]
#[case(1e-3)] // case 1
#[case(1e-6)] // case 2
#[case(1e-10)] // case 3
fn tighter_tolerance_is_honoured(#[case] relative: f64) {
    let estimate =
        integrate_estimate(|x: f64| x.ln(), 1.0, 100.0, &Tolerance::relative(relative)).unwrap();
    let exact = 100.0 * 100.0f64.ln() - 99.0;
    assert!(estimate.error <= relative * estimate.value.abs());
    assert_relative_eq!(estimate.value, exact, max_relative = relative.max(1e-12));
}
