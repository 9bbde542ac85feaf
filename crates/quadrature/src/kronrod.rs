//! The 7-point Gauss and 15-point Kronrod rule pair

use crate::error::{Error, Result};

/// Kronrod abscissae on [-1, 1], odd indices are shared with the Gauss rule
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.000_000_000_000_000_000_000_000_000_000_000,
];

/// Weights of the 15-point Kronrod rule
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Weights of the 7-point Gauss rule
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// A single application of the rule pair to one subinterval
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub lower: f64,
    pub upper: f64,
    pub value: f64,
    pub error: f64,
}

impl Segment {
    /// Apply G7/K15 over `[lower, upper]`
    ///
    /// The Kronrod estimate is the value, and the difference to the embedded
    /// Gauss estimate is used as the error. Endpoints are never evaluated, so
    /// integrands undefined at a bound (e.g. 1/x from zero) are fine as long as
    /// they are integrable.
    pub fn new<F: Fn(f64) -> f64>(f: &F, lower: f64, upper: f64) -> Result<Self> {
        let centre = 0.5 * (lower + upper);
        let half = 0.5 * (upper - lower);

        let fc = sample(f, centre)?;
        let mut gauss = fc * WG[3];
        let mut kronrod = fc * WGK[7];

        for (j, xk) in XGK[..7].iter().enumerate() {
            let offset = half * xk;
            let pair = sample(f, centre - offset)? + sample(f, centre + offset)?;
            kronrod += WGK[j] * pair;

            // odd Kronrod nodes are the Gauss nodes
            if j % 2 == 1 {
                gauss += WG[j / 2] * pair;
            }
        }

        Ok(Self {
            lower,
            upper,
            value: kronrod * half,
            error: ((kronrod - gauss) * half).abs(),
        })
    }
}

/// Evaluate the integrand, refusing anything undefined
fn sample<F: Fn(f64) -> f64>(f: &F, x: f64) -> Result<f64> {
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(Error::NonFiniteIntegrand { x })
    }
}
