use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// Flux values span tens of orders of magnitude across a typical group
    /// structure, so a fixed width exponent keeps tables aligned.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait.
    ///
    /// ```rust
    /// # use nflux_utils::ValueExt;
    /// assert_eq!((-1.0_f64).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((2.5e-7_f64).sci(3, 2), "2.500e-07".to_string());
    /// assert_eq!((1.0e6_f64).sci(2, 3), "1.00e+006".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);
        // `LowerExp` always writes an 'e', so splitting cannot fail
        let (mantissa, exp) = num.split_once('e').unwrap_or((num.as_str(), "0"));
        let (sign, exp) = match exp.strip_prefix('-') {
            Some(exp) => ('-', exp),
            None => ('+', exp),
        };
        f!("{mantissa}e{sign}{exp:0>exp_pad$}")
    }
}
