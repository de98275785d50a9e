//! Loyalty-point math for room packages.
//!
//! Both point balances are fixed percentages of the package base price:
//! Almosafer at 10%, Shukran at 20%. This module is the only place the
//! formulas live; the form preview and the package insert path must agree
//! bit-for-bit, so both call through here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Points {
    pub almosafer_points: f64,
    pub shukran_points: f64,
}

/// Round to 2 decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sanitize(base_price: f64) -> f64 {
    if base_price.is_finite() && base_price > 0.0 {
        base_price
    } else {
        0.0
    }
}

/// Base price as stored on the package row: non-finite or negative input
/// collapses to zero, everything else is rounded to 2 decimals.
pub fn normalize_base_price(base_price: f64) -> f64 {
    round2(sanitize(base_price))
}

pub fn derive_points(base_price: f64) -> Points {
    let base = sanitize(base_price);
    Points {
        almosafer_points: round2(base * 0.10),
        shukran_points: round2(base * 0.20),
    }
}

/// Packages without an explicit first price get base + 10%.
pub fn default_first_price(base_price: f64) -> f64 {
    round2(sanitize(base_price) * 1.10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_fixed_percentages_of_base() {
        let points = derive_points(250.0);
        assert_eq!(points.almosafer_points, 25.0);
        assert_eq!(points.shukran_points, 50.0);

        let points = derive_points(99.99);
        assert_eq!(points.almosafer_points, 10.0);
        assert_eq!(points.shukran_points, 20.0);
    }

    #[test]
    fn points_round_to_two_decimals() {
        let points = derive_points(123.45);
        assert_eq!(points.almosafer_points, 12.35);
        assert_eq!(points.shukran_points, 24.69);
    }

    #[test]
    fn negative_and_non_numeric_base_coerce_to_zero() {
        for base in [-1.0, -250.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let points = derive_points(base);
            assert_eq!(points.almosafer_points, 0.0);
            assert_eq!(points.shukran_points, 0.0);
            assert_eq!(normalize_base_price(base), 0.0);
        }
    }

    #[test]
    fn first_price_defaults_to_base_plus_ten_percent() {
        assert_eq!(default_first_price(100.0), 110.0);
        assert_eq!(default_first_price(0.0), 0.0);
        assert_eq!(default_first_price(99.99), 109.99);
    }
}
