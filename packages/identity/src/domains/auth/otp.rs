//! One-time code generation.

use rand::rngs::OsRng;
use rand::Rng;

/// Generate a fixed-length numeric code from OS randomness.
///
/// Leading zeros are allowed; the code is always exactly `length` digits.
pub fn generate_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length).map(|_| rng.gen_range(0..10).to_string()).collect()
}
