//! The table of named mathematical constants.
//!
//! This is the single process-wide lookup consulted by every component that resolves constant
//! names: the symbolic parser folds these names into `Constant` nodes at parse time, and the
//! runtime calculator's default environment seeds its variables from the same table. Keeping one
//! table means the two pipelines can never disagree about what `pi` is.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::f64::consts;

pub const PI: f64 = consts::PI;

pub const TWO_PI: f64 = consts::TAU;

pub const HALF_PI: f64 = consts::FRAC_PI_2;

/// Euler's number.
pub const E: f64 = consts::E;

pub const LOG2_E: f64 = consts::LOG2_E;

pub const LOG10_E: f64 = consts::LOG10_E;

pub const LN_2: f64 = consts::LN_2;

pub const LN_10: f64 = consts::LN_10;

pub const SQRT_2: f64 = consts::SQRT_2;

pub const SQRT_1_2: f64 = consts::FRAC_1_SQRT_2;

/// Multiply by this to convert degrees to radians.
pub const DEG_TO_RAD: f64 = consts::PI / 180.0;

/// Multiply by this to convert radians to degrees.
pub const RAD_TO_DEG: f64 = 180.0 / consts::PI;

/// Every named constant, keyed by the lowercase name it is written as in source text.
pub static CONSTANTS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("pi", PI),
        ("e", E),
        ("ln2", LN_2),
        ("ln10", LN_10),
        ("sqrt2", SQRT_2),
        ("sqrt1_2", SQRT_1_2),
        ("deg2rad", DEG_TO_RAD),
        ("rad2deg", RAD_TO_DEG),
        ("log2e", LOG2_E),
        ("log10e", LOG10_E),
        ("two_pi", TWO_PI),
        ("half_pi", HALF_PI),
    ])
});

/// Looks up a named constant, returning its value if the name is in the table.
pub fn lookup(name: &str) -> Option<f64> {
    CONSTANTS.get(name).copied()
}
