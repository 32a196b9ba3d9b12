use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A planar angle.
///
/// The canonical value is held in degrees so that folding into the
/// latitude/longitude ranges is exact: a latitude that lands on a pole
/// compares bit-for-bit equal to [`Angle::POS90`] or [`Angle::NEG90`].
/// No range invariant holds unless one of the `normalized_*` methods is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { degrees: 0.0 };
    pub const POS90: Angle = Angle { degrees: 90.0 };
    pub const NEG90: Angle = Angle { degrees: -90.0 };
    pub const POS180: Angle = Angle { degrees: 180.0 };
    pub const NEG180: Angle = Angle { degrees: -180.0 };
    /// One arc-minute.
    pub const MINUTE: Angle = Angle { degrees: 1.0 / 60.0 };

    #[inline]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.degrees
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.degrees.to_radians()
    }

    /// Plain angular sum, no normalization.
    pub fn add(self, other: Angle) -> Angle {
        Angle::from_degrees(self.degrees + other.degrees)
    }

    /// Plain angular difference, no normalization.
    pub fn subtract(self, other: Angle) -> Angle {
        Angle::from_degrees(self.degrees - other.degrees)
    }

    pub fn multiplied_by(self, factor: f64) -> Angle {
        Angle::from_degrees(self.degrees * factor)
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.radians().cos()
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.radians().sin()
    }

    /// Tangent of half this angle. Relates a half-extent to an eye distance
    /// for a symmetric field of view.
    #[inline]
    pub fn tan_half_angle(self) -> f64 {
        (0.5 * self.radians()).tan()
    }

    /// Fold into [-90, 90]. Values past a pole reflect back
    /// (100° becomes 80°, -100° becomes -80°).
    pub fn normalized_latitude(self) -> Angle {
        let lat = self.degrees % 180.0;
        let folded = if lat > 90.0 {
            180.0 - lat
        } else if lat < -90.0 {
            -180.0 - lat
        } else {
            lat
        };
        Angle::from_degrees(folded)
    }

    /// Fold into [-180, 180] (200° becomes -160°).
    pub fn normalized_longitude(self) -> Angle {
        let lon = self.degrees % 360.0;
        let folded = if lon > 180.0 {
            lon - 360.0
        } else if lon < -180.0 {
            lon + 360.0
        } else {
            lon
        };
        Angle::from_degrees(folded)
    }

    pub fn is_valid_latitude(self) -> bool {
        (-90.0..=90.0).contains(&self.degrees)
    }

    pub fn is_valid_longitude(self) -> bool {
        (-180.0..=180.0).contains(&self.degrees)
    }

    pub fn is_finite(self) -> bool {
        self.degrees.is_finite()
    }

    /// Clamp into [min, max] (by degrees).
    pub fn clamp(self, min: Angle, max: Angle) -> Angle {
        Angle::from_degrees(self.degrees.clamp(min.degrees, max.degrees))
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::add(self, rhs)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        self.subtract(rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_degrees(-self.degrees)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}°", p, self.degrees),
            None => write!(f, "{}°", self.degrees),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_degree_radian_conversion() {
        assert_relative_eq!(Angle::from_degrees(180.0).radians(), PI);
        assert_relative_eq!(Angle::from_radians(FRAC_PI_2).degrees(), 90.0);
        assert_relative_eq!(Angle::MINUTE.degrees() * 60.0, 1.0);
    }

    #[test]
    fn test_arithmetic_does_not_normalize() {
        let a = Angle::from_degrees(170.0) + Angle::from_degrees(30.0);
        assert_eq!(a.degrees(), 200.0);
        let b = Angle::from_degrees(-170.0).subtract(Angle::from_degrees(30.0));
        assert_eq!(b.degrees(), -200.0);
        assert_eq!((-Angle::POS90), Angle::NEG90);
    }

    #[test]
    fn test_trig_helpers() {
        assert_relative_eq!(Angle::from_degrees(60.0).cos(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(Angle::from_degrees(90.0).tan_half_angle(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(Angle::from_degrees(30.0).sin(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_latitude() {
        assert_eq!(Angle::from_degrees(100.0).normalized_latitude().degrees(), 80.0);
        assert_eq!(Angle::from_degrees(-100.0).normalized_latitude().degrees(), -80.0);
        assert_eq!(Angle::from_degrees(45.0).normalized_latitude().degrees(), 45.0);
        assert_eq!(Angle::from_degrees(190.0).normalized_latitude().degrees(), 10.0);
    }

    #[test]
    fn test_normalized_latitude_lands_exactly_on_poles() {
        assert_eq!(Angle::from_degrees(90.0).normalized_latitude(), Angle::POS90);
        assert_eq!(Angle::from_degrees(270.0).normalized_latitude(), Angle::POS90);
        assert_eq!(Angle::from_degrees(-90.0).normalized_latitude(), Angle::NEG90);
        assert_eq!(Angle::from_degrees(-270.0).normalized_latitude(), Angle::NEG90);
    }

    #[test]
    fn test_normalized_longitude() {
        assert_eq!(Angle::from_degrees(200.0).normalized_longitude().degrees(), -160.0);
        assert_eq!(Angle::from_degrees(-200.0).normalized_longitude().degrees(), 160.0);
        assert_eq!(Angle::from_degrees(540.0).normalized_longitude().degrees(), 180.0);
        assert_eq!(Angle::from_degrees(180.0).normalized_longitude(), Angle::POS180);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.1}", Angle::from_degrees(12.345)), "12.3°");
        assert_eq!(Angle::POS90.to_string(), "90°");
    }
}
