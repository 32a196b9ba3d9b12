use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{GeoError, Result};

const FEET_PER_METER: f64 = 3.2808399;
const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;
const FEET_PER_MILE: f64 = 5280.0;
const FEET_PER_YARD: f64 = 3.0;

/// A length.
///
/// Only the named unit factories build a `Distance`; there is no bare numeric
/// constructor and the canonical meters field is private. Feet are cached at
/// construction for the imperial getters, but meters stay authoritative for
/// equality, ordering and arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Distance {
    meters: f64,
    feet: f64,
}

impl Distance {
    pub const ZERO: Distance = Distance {
        meters: 0.0,
        feet: 0.0,
    };

    pub const fn from_meters(meters: f64) -> Self {
        Self {
            meters,
            feet: meters * FEET_PER_METER,
        }
    }

    pub const fn from_feet(feet: f64) -> Self {
        Self {
            meters: feet / FEET_PER_METER,
            feet,
        }
    }

    pub fn from_yards(yards: f64) -> Self {
        Self::from_feet(yards * FEET_PER_YARD)
    }

    pub fn from_miles(miles: f64) -> Self {
        Self::from_feet(miles * FEET_PER_MILE)
    }

    pub const fn from_kilometers(kilometers: f64) -> Self {
        Self::from_meters(kilometers * METERS_PER_KILOMETER)
    }

    pub fn from_nautical_miles(nautical_miles: f64) -> Self {
        Self::from_meters(nautical_miles * METERS_PER_NAUTICAL_MILE)
    }

    #[inline]
    pub fn meters(self) -> f64 {
        self.meters
    }

    #[inline]
    pub fn feet(self) -> f64 {
        self.feet
    }

    pub fn yards(self) -> f64 {
        self.feet / FEET_PER_YARD
    }

    pub fn miles(self) -> f64 {
        self.feet / FEET_PER_MILE
    }

    pub fn kilometers(self) -> f64 {
        self.meters / METERS_PER_KILOMETER
    }

    pub fn nautical_miles(self) -> f64 {
        self.meters / METERS_PER_NAUTICAL_MILE
    }

    pub fn add(self, other: Distance) -> Distance {
        Distance::from_meters(self.meters + other.meters)
    }

    pub fn subtract(self, other: Distance) -> Distance {
        Distance::from_meters(self.meters - other.meters)
    }

    pub fn multiplied_by(self, factor: f64) -> Distance {
        Distance::from_meters(self.meters * factor)
    }

    pub fn divided_by(self, divisor: f64) -> Distance {
        Distance::from_meters(self.meters / divisor)
    }

    /// Dimensionless ratio `self / other`. The only operation that cancels
    /// units; there is deliberately no `Distance * Distance`.
    pub fn ratio_to(self, other: Distance) -> Result<f64> {
        if other.is_zero() {
            return Err(GeoError::DivisionByZero {
                operation: "Distance::ratio_to",
            });
        }
        Ok(self.meters / other.meters)
    }

    pub fn is_zero(self) -> bool {
        self.meters == 0.0
    }

    pub fn is_finite(self) -> bool {
        self.meters.is_finite()
    }

    pub fn is_negative(self) -> bool {
        self.meters < 0.0
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.meters == other.meters
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.meters.partial_cmp(&other.meters)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance::add(self, rhs)
    }
}

impl Sub for Distance {
    type Output = Distance;

    fn sub(self, rhs: Distance) -> Distance {
        self.subtract(rhs)
    }
}

impl Mul<f64> for Distance {
    type Output = Distance;

    fn mul(self, rhs: f64) -> Distance {
        self.multiplied_by(rhs)
    }
}

impl Div<f64> for Distance {
    type Output = Distance;

    fn div(self, rhs: f64) -> Distance {
        self.divided_by(rhs)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.meters.abs() >= METERS_PER_KILOMETER {
            write!(f, "{:.1} km", self.kilometers())
        } else {
            write!(f, "{:.0} m", self.meters)
        }
    }
}
