//! crates/opp_core/src/geo.rs
//! WGS84 positions and the validity guard applied before any coordinate
//! reaches a marker or a camera target.

use core::fmt;

/// Longitude/latitude pair in degrees (map libraries take `[lng, lat]`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        is_valid_coordinate(self.lng, self.lat)
    }

    /// `Some(self)` iff the pair passes the bounds check.
    #[inline]
    pub fn validated(self) -> Option<Self> {
        if self.is_valid() { Some(self) } else { None }
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lng, self.lat)
    }
}

/// Both finite, `lng ∈ [-180, 180]`, `lat ∈ [-90, 90]`.
#[inline]
pub fn is_valid_coordinate(lng: f64, lat: f64) -> bool {
    lng.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lng)
        && (-90.0..=90.0).contains(&lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(is_valid_coordinate(180.0, 90.0));
        assert!(is_valid_coordinate(-180.0, -90.0));
        assert!(is_valid_coordinate(28.04, -26.2));
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert!(!is_valid_coordinate(28.0, 95.0));
        assert!(!is_valid_coordinate(180.5, 0.0));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
        assert!(!is_valid_coordinate(0.0, f64::INFINITY));
        assert_eq!(LngLat::new(0.0, -91.0).validated(), None);
    }
}
