//! crates/opp_core/src/bins.rs
//! Fixed inclusive bins for headcount and distance filtering.
//!
//! Bin keys arrive as strings from the presentation layer. Any key outside the
//! enumeration maps to `All` (full range) with a warning; it never errors.

use core::fmt;
use core::ops::RangeInclusive;

/// Full headcount range used by `EmployeeBin::All`.
pub const EMPLOYEE_FULL_RANGE: RangeInclusive<u32> = 0..=4000;
/// Full distance range (km) used by `DistanceBin::All`.
pub const DISTANCE_FULL_RANGE: RangeInclusive<f64> = 0.0..=30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmployeeBin {
    #[default]
    All,
    Small,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceBin {
    #[default]
    All,
    Close,
    Nearby,
    Far,
}

/// Which bin family a toggle addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinKind {
    Employee,
    Distance,
}

impl EmployeeBin {
    /// Selectable bins in display order (excludes `All`).
    pub const CHOICES: [EmployeeBin; 3] = [EmployeeBin::Small, EmployeeBin::Medium, EmployeeBin::Large];

    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            EmployeeBin::All => EMPLOYEE_FULL_RANGE,
            EmployeeBin::Small => 0..=250,
            EmployeeBin::Medium => 251..=1000,
            EmployeeBin::Large => 1001..=4000,
        }
    }

    #[inline]
    pub fn contains(self, max_employees: u32) -> bool {
        self.range().contains(&max_employees)
    }

    pub fn key(self) -> &'static str {
        match self {
            EmployeeBin::All => "All",
            EmployeeBin::Small => "Small",
            EmployeeBin::Medium => "Medium",
            EmployeeBin::Large => "Large",
        }
    }

    /// Short tag label shown on the filter chip.
    pub fn label(self) -> &'static str {
        match self {
            EmployeeBin::All => "All",
            EmployeeBin::Small => "0-250",
            EmployeeBin::Medium => "251-1k",
            EmployeeBin::Large => "1k+",
        }
    }

    /// Parse a bin key; unknown keys degrade to `All`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "All" => EmployeeBin::All,
            "Small" => EmployeeBin::Small,
            "Medium" => EmployeeBin::Medium,
            "Large" => EmployeeBin::Large,
            other => {
                tracing::warn!("unknown employee bin '{}', falling back to All", other);
                EmployeeBin::All
            }
        }
    }
}

impl DistanceBin {
    pub const CHOICES: [DistanceBin; 3] = [DistanceBin::Close, DistanceBin::Nearby, DistanceBin::Far];

    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            DistanceBin::All => DISTANCE_FULL_RANGE,
            DistanceBin::Close => 0.0..=5.0,
            DistanceBin::Nearby => 6.0..=15.0,
            DistanceBin::Far => 16.0..=30.0,
        }
    }

    #[inline]
    pub fn contains(self, distance_km: f64) -> bool {
        self.range().contains(&distance_km)
    }

    pub fn key(self) -> &'static str {
        match self {
            DistanceBin::All => "All",
            DistanceBin::Close => "Close",
            DistanceBin::Nearby => "Nearby",
            DistanceBin::Far => "Far",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistanceBin::All => "All",
            DistanceBin::Close => "0-5 km",
            DistanceBin::Nearby => "6-15 km",
            DistanceBin::Far => "16-30 km",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "All" => DistanceBin::All,
            "Close" => DistanceBin::Close,
            "Nearby" => DistanceBin::Nearby,
            "Far" => DistanceBin::Far,
            other => {
                tracing::warn!("unknown distance bin '{}', falling back to All", other);
                DistanceBin::All
            }
        }
    }
}

impl fmt::Display for EmployeeBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for DistanceBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_boundaries_are_inclusive() {
        assert!(EmployeeBin::Small.contains(250));
        assert!(!EmployeeBin::Small.contains(251));
        assert!(EmployeeBin::Medium.contains(251));
        assert!(EmployeeBin::Medium.contains(1000));
        assert!(EmployeeBin::Large.contains(1001));
        assert!(EmployeeBin::Large.contains(4000));
        assert!(!EmployeeBin::All.contains(4001));
    }

    #[test]
    fn distance_boundaries_are_inclusive() {
        assert!(DistanceBin::Close.contains(5.0));
        assert!(DistanceBin::Nearby.contains(6.0));
        assert!(DistanceBin::Nearby.contains(15.0));
        assert!(DistanceBin::Far.contains(16.0));
        assert!(!DistanceBin::Close.contains(5.5));
        assert!(DistanceBin::All.contains(30.0));
    }

    #[test]
    fn unknown_keys_fall_back_to_all() {
        assert_eq!(EmployeeBin::from_key("Huge"), EmployeeBin::All);
        assert_eq!(DistanceBin::from_key(""), DistanceBin::All);
        assert_eq!(EmployeeBin::from_key("Medium"), EmployeeBin::Medium);
        assert_eq!(DistanceBin::from_key("Far"), DistanceBin::Far);
    }
}
