// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable path lengths.
//!
//! Lengths come in as metres (what [`Projection::distance`](crate::Projection::distance)
//! returns for geographic projections) and are rendered in the selected
//! [`LengthUnit`] with a fixed number of decimals per unit.
//!
//! ```rust
//! use waymark_geom::measure::{LengthUnit, readable_distance};
//!
//! assert_eq!(readable_distance(850.0, LengthUnit::Metric), "850 m");
//! assert_eq!(readable_distance(12_346.0, LengthUnit::Metric), "12.35 km");
//! assert_eq!(readable_distance(100.0, LengthUnit::Feet), "328 ft");
//! assert_eq!(readable_distance(5_000.0, LengthUnit::Yards), "3.11 miles");
//! ```

use alloc::format;
use alloc::string::String;

const YARDS_PER_METRE: f64 = 1.09361;
const NAUTICAL_MILES_PER_KILOMETRE: f64 = 0.53996;
const YARDS_PER_MILE: f64 = 1760.0;

/// Unit system used when rendering a length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LengthUnit {
    /// Metres, switching to kilometres above 1000 m.
    Metric,
    /// Feet.
    Feet,
    /// Nautical miles.
    NauticalMiles,
    /// Yards, switching to statute miles above 1760 yd.
    #[default]
    Yards,
}

/// Render a length given in metres.
pub fn readable_distance(metres: f64, unit: LengthUnit) -> String {
    match unit {
        LengthUnit::Metric => {
            if metres > 1000.0 {
                format!("{} km", formatted_number(metres / 1000.0, 2))
            } else {
                format!("{} m", formatted_number(metres, 0))
            }
        }
        LengthUnit::Feet => {
            format!("{} ft", formatted_number(metres * YARDS_PER_METRE * 3.0, 0))
        }
        LengthUnit::NauticalMiles => {
            let nm = metres * NAUTICAL_MILES_PER_KILOMETRE / 1000.0;
            format!("{} nm", formatted_number(nm, 2))
        }
        LengthUnit::Yards => {
            let yards = metres * YARDS_PER_METRE;
            if yards > YARDS_PER_MILE {
                format!("{} miles", formatted_number(yards / YARDS_PER_MILE, 2))
            } else {
                format!("{} yd", formatted_number(yards, 0))
            }
        }
    }
}

/// Fixed-decimal rendering with `,` thousands separators.
fn formatted_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let (sign, body) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_switches_to_kilometres() {
        assert_eq!(readable_distance(0.0, LengthUnit::Metric), "0 m");
        assert_eq!(readable_distance(1000.0, LengthUnit::Metric), "1,000 m");
        assert_eq!(readable_distance(1500.0, LengthUnit::Metric), "1.50 km");
    }

    #[test]
    fn nautical_miles() {
        assert_eq!(readable_distance(10_000.0, LengthUnit::NauticalMiles), "5.40 nm");
    }

    #[test]
    fn yards_below_a_mile() {
        assert_eq!(readable_distance(100.0, LengthUnit::Yards), "109 yd");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(formatted_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(formatted_number(-12_345.0, 0), "-12,345");
        assert_eq!(formatted_number(999.0, 0), "999");
    }

    #[test]
    fn default_unit_is_yards() {
        assert_eq!(LengthUnit::default(), LengthUnit::Yards);
    }
}
