//! Rounding conventions for reported figures
//!
//! Revenue predictions are reported in whole CAD millions and customer
//! counts in whole customers; the one-year-ahead revenue series is
//! reported to two decimal places. All rounding is half away from zero.

/// Round to the nearest integer, halves away from zero.
pub fn round_half_away(value: f64) -> f64 {
    value.round()
}

/// Round to `places` decimal places, halves away from zero.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(round_half_away(1.5), 2.0);
        assert_eq!(round_half_away(2.5), 3.0);
        assert_eq!(round_half_away(-1.5), -2.0);
        assert_eq!(round_half_away(0.4999), 0.0);
    }

    #[test]
    fn two_place_rounding() {
        // 0.125 is exactly representable, so the half-away rule is visible
        assert_eq!(round_to_places(0.125, 2), 0.13);
        assert_eq!(round_to_places(-0.125, 2), -0.13);
        assert_eq!(round_to_places(891.2345, 2), 891.23);
        assert_eq!(round_to_places(891.2, 2), 891.2);
    }
}
