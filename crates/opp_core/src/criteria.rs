//! crates/opp_core/src/criteria.rs
//! User-facing filter criteria. One instance per session; every change goes
//! through a method returning a **new** value (the caller swaps it in).

use std::collections::BTreeSet;
use core::fmt;

use crate::bins::{BinKind, DistanceBin, EmployeeBin};
use crate::ids::BranchCode;

/// Sentinel key for the national view.
pub const ALL_BRANCHES: &str = "All";

/// Branch filter: the national view or one concrete branch code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum BranchSelection {
    #[default]
    All,
    Branch(BranchCode),
}

impl BranchSelection {
    /// `"All"` → national view; a valid token → that branch; anything else
    /// degrades to the national view.
    pub fn from_key(key: &str) -> Self {
        if key == ALL_BRANCHES {
            return BranchSelection::All;
        }
        match key.parse::<BranchCode>() {
            Ok(code) => BranchSelection::Branch(code),
            Err(_) => {
                tracing::warn!("invalid branch key '{}', falling back to All", key);
                BranchSelection::All
            }
        }
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, BranchSelection::All)
    }

    #[inline]
    pub fn code(&self) -> Option<&BranchCode> {
        match self {
            BranchSelection::All => None,
            BranchSelection::Branch(c) => Some(c),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            BranchSelection::All => ALL_BRANCHES,
            BranchSelection::Branch(c) => c.as_str(),
        }
    }
}

impl From<String> for BranchSelection {
    fn from(s: String) -> Self {
        BranchSelection::from_key(&s)
    }
}

impl From<BranchSelection> for String {
    fn from(b: BranchSelection) -> Self {
        b.key().to_owned()
    }
}

impl From<BranchCode> for BranchSelection {
    fn from(c: BranchCode) -> Self {
        BranchSelection::Branch(c)
    }
}

impl fmt::Display for BranchSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct FilterCriteria {
    pub branch: BranchSelection,
    /// Empty = no department constraint.
    pub departments: BTreeSet<String>,
    pub employee_bin: EmployeeBin,
    pub distance_bin: DistanceBin,
    /// Case-insensitive substring against the opportunity name; empty = no constraint.
    pub search_term: String,
}

/// Whole-field replacement addressed by key (`setFilterField(key, value)`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterUpdate {
    Branch(BranchSelection),
    Departments(BTreeSet<String>),
    EmployeeBin(EmployeeBin),
    DistanceBin(DistanceBin),
    SearchTerm(String),
}

impl FilterUpdate {
    /// String entry point for the presentation layer. `departments` takes a
    /// comma-separated list. Unknown field keys yield `None`.
    pub fn from_key_value(key: &str, value: &str) -> Option<Self> {
        let update = match key {
            "branch" => FilterUpdate::Branch(BranchSelection::from_key(value)),
            "departments" => FilterUpdate::Departments(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            "employeeBin" => FilterUpdate::EmployeeBin(EmployeeBin::from_key(value)),
            "distanceBin" => FilterUpdate::DistanceBin(DistanceBin::from_key(value)),
            "searchTerm" => FilterUpdate::SearchTerm(value.to_owned()),
            _ => return None,
        };
        Some(update)
    }
}

impl FilterCriteria {
    #[inline]
    pub fn is_national_view(&self) -> bool {
        self.branch.is_all()
    }

    /// Departments or either bin narrowed (branch and search are not "filters" here).
    pub fn has_active_filters(&self) -> bool {
        !self.departments.is_empty()
            || self.employee_bin != EmployeeBin::All
            || self.distance_bin != DistanceBin::All
    }

    /// Replace one field.
    pub fn with_update(&self, update: FilterUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FilterUpdate::Branch(b) => next.branch = b,
            FilterUpdate::Departments(d) => next.departments = d,
            FilterUpdate::EmployeeBin(b) => next.employee_bin = b,
            FilterUpdate::DistanceBin(b) => next.distance_bin = b,
            FilterUpdate::SearchTerm(s) => next.search_term = s,
        }
        next
    }

    /// Add the department if absent, remove it if present.
    pub fn with_department_toggled(&self, dept: &str) -> Self {
        let mut departments = self.departments.clone();
        if !departments.remove(dept) {
            departments.insert(dept.to_owned());
        }
        self.with_update(FilterUpdate::Departments(departments))
    }

    /// Select `key` in the given bin family; selecting the active key again
    /// reverts the family to `All`.
    pub fn with_bin_toggled(&self, kind: BinKind, key: &str) -> Self {
        match kind {
            BinKind::Employee => {
                let bin = EmployeeBin::from_key(key);
                let next = if self.employee_bin == bin { EmployeeBin::All } else { bin };
                self.with_update(FilterUpdate::EmployeeBin(next))
            }
            BinKind::Distance => {
                let bin = DistanceBin::from_key(key);
                let next = if self.distance_bin == bin { DistanceBin::All } else { bin };
                self.with_update(FilterUpdate::DistanceBin(next))
            }
        }
    }

    /// Reset departments and bins; branch and search term are kept.
    pub fn cleared(&self) -> Self {
        FilterCriteria {
            branch: self.branch.clone(),
            departments: BTreeSet::new(),
            employee_bin: EmployeeBin::All,
            distance_bin: DistanceBin::All,
            search_term: self.search_term.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_department_twice_restores() {
        let c = FilterCriteria::default();
        let on = c.with_department_toggled("Mining");
        assert!(on.departments.contains("Mining"));
        assert!(on.has_active_filters());
        let off = on.with_department_toggled("Mining");
        assert_eq!(off, c);
    }

    #[test]
    fn toggling_active_bin_reverts_to_all() {
        let c = FilterCriteria::default().with_bin_toggled(BinKind::Employee, "Large");
        assert_eq!(c.employee_bin, EmployeeBin::Large);
        let c = c.with_bin_toggled(BinKind::Employee, "Large");
        assert_eq!(c.employee_bin, EmployeeBin::All);
        let c = c.with_bin_toggled(BinKind::Distance, "Close").with_bin_toggled(BinKind::Distance, "Far");
        assert_eq!(c.distance_bin, DistanceBin::Far);
    }

    #[test]
    fn clear_keeps_branch_and_search() {
        let c = FilterCriteria {
            branch: BranchSelection::from_key("12"),
            departments: ["Retail".to_string()].into_iter().collect(),
            employee_bin: EmployeeBin::Small,
            distance_bin: DistanceBin::Far,
            search_term: "mine".into(),
        };
        let cleared = c.cleared();
        assert_eq!(cleared.branch, c.branch);
        assert_eq!(cleared.search_term, "mine");
        assert!(!cleared.has_active_filters());
    }

    #[test]
    fn key_value_updates() {
        let up = FilterUpdate::from_key_value("departments", "Sales, Retail,").unwrap();
        let c = FilterCriteria::default().with_update(up);
        assert_eq!(c.departments.len(), 2);
        assert_eq!(
            FilterUpdate::from_key_value("employeeBin", "bogus"),
            Some(FilterUpdate::EmployeeBin(EmployeeBin::All))
        );
        assert!(FilterUpdate::from_key_value("colour", "red").is_none());
        assert_eq!(BranchSelection::from_key("not a code"), BranchSelection::All);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn branch_selection_wire_form() {
        let b: BranchSelection = serde_json::from_str("\"All\"").unwrap();
        assert!(b.is_all());
        let b: BranchSelection = serde_json::from_str("\"104\"").unwrap();
        assert_eq!(b.key(), "104");
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"104\"");
    }
}
