//! crates/opp_io/src/catalog.rs
//! The catalog provider boundary and its in-memory implementation.
//!
//! A `StaticCatalog` is validated once at construction and immutable after
//! that, so it is shared read-only (`Arc`) by every consumer.

use std::collections::BTreeSet;
use std::sync::Arc;

use opp_core::{Branch, BranchCode, Opportunity, OpportunityId};
use serde::Serialize;

use crate::{IoError, IoResult};

/// Read side of the catalog. Sequences keep catalog order.
pub trait CatalogProvider {
    fn branches(&self) -> &[Branch];
    fn opportunities(&self) -> &[Opportunity];

    fn branch(&self, code: &BranchCode) -> Option<&Branch> {
        self.branches().iter().find(|b| &b.code == code)
    }

    fn opportunity(&self, id: &OpportunityId) -> Option<&Opportunity> {
        self.opportunities().iter().find(|o| &o.id == id)
    }
}

/// How sessions hold the catalog.
pub type SharedCatalog = Arc<dyn CatalogProvider + Send + Sync>;

/// Validated, immutable catalog. Serializes to the same shape it loads from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StaticCatalog {
    branches: Vec<Branch>,
    opportunities: Vec<Opportunity>,
}

impl StaticCatalog {
    /// Build and validate. Coordinates are not checked here; render-time
    /// guards skip invalid positions.
    pub fn new(branches: Vec<Branch>, opportunities: Vec<Opportunity>) -> IoResult<Self> {
        validate(&branches, &opportunities)?;
        let invalid = branches.iter().filter(|b| !b.position().is_valid()).count()
            + opportunities.iter().filter(|o| !o.position().is_valid()).count();
        if invalid > 0 {
            tracing::debug!(invalid, "catalog holds entities with invalid coordinates");
        }
        Ok(Self { branches, opportunities })
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}

impl CatalogProvider for StaticCatalog {
    fn branches(&self) -> &[Branch] {
        &self.branches
    }

    fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    fn branches(&self) -> &[Branch] {
        (**self).branches()
    }

    fn opportunities(&self) -> &[Opportunity] {
        (**self).opportunities()
    }
}

fn validate(branches: &[Branch], opportunities: &[Opportunity]) -> IoResult<()> {
    let mut codes = BTreeSet::new();
    for b in branches {
        if !codes.insert(&b.code) {
            return Err(IoError::Invalid(format!("duplicate branch code {}", b.code)));
        }
    }
    let mut ids = BTreeSet::new();
    for o in opportunities {
        if !ids.insert(&o.id) {
            return Err(IoError::Invalid(format!("duplicate opportunity id {}", o.id)));
        }
        if !codes.contains(&o.branch_code) {
            return Err(IoError::Invalid(format!(
                "opportunity {} references unknown branch {}",
                o.id, o.branch_code
            )));
        }
        if o.current_penetration > o.max_employees {
            return Err(IoError::Invalid(format!(
                "opportunity {}: currentPenetration {} exceeds maxEmployees {}",
                o.id, o.current_penetration, o.max_employees
            )));
        }
    }
    Ok(())
}

/// Departments in first-seen catalog order, without duplicates.
pub fn unique_departments<P: CatalogProvider + ?Sized>(catalog: &P) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    catalog
        .opportunities()
        .iter()
        .map(|o| o.department.as_str())
        .filter(|d| seen.insert(*d))
        .collect()
}

/* ---------------------------------- Tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use opp_core::{BranchStatus, StrategicValue};

    fn branch(code: &str) -> Branch {
        Branch {
            code: code.parse().unwrap(),
            city: format!("City {code}"),
            latitude: -26.0,
            longitude: 28.0,
            median_income: 10_000.0,
            avg_travel_cost: "R40".into(),
            opportunity_clusters: "Mining".into(),
            strategic_actions: String::new(),
            status: BranchStatus::Validated,
        }
    }

    fn opp(id: &str, code: &str, dept: &str, max: u32, cur: u32) -> Opportunity {
        Opportunity {
            id: id.parse().unwrap(),
            name: id.to_uppercase(),
            department: dept.into(),
            branch_code: code.parse().unwrap(),
            employees: String::new(),
            max_employees: max,
            current_penetration: cur,
            strategic_value: StrategicValue::Medium,
            distance: 4.0,
            latitude: -26.1,
            longitude: 28.1,
        }
    }

    #[test]
    fn rejects_duplicates_and_dangling_refs() {
        let err = StaticCatalog::new(vec![branch("1"), branch("1")], vec![]).unwrap_err();
        assert!(err.to_string().contains("duplicate branch code 1"));

        let err = StaticCatalog::new(
            vec![branch("1")],
            vec![opp("a", "1", "Mining", 10, 1), opp("a", "1", "Mining", 10, 1)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate opportunity id a"));

        let err = StaticCatalog::new(vec![branch("1")], vec![opp("a", "2", "Mining", 10, 1)]).unwrap_err();
        assert!(err.to_string().contains("unknown branch 2"));

        let err = StaticCatalog::new(vec![branch("1")], vec![opp("a", "1", "Mining", 10, 11)]).unwrap_err();
        assert!(matches!(err, IoError::Invalid(_)));
    }

    #[test]
    fn invalid_coordinates_are_not_load_errors() {
        let mut b = branch("1");
        b.latitude = 95.0;
        let cat = StaticCatalog::new(vec![b], vec![opp("a", "1", "Retail", 10, 1)]).unwrap();
        assert_eq!(cat.branches().len(), 1);
        assert!(cat.branch(&"1".parse().unwrap()).is_some());
    }

    #[test]
    fn departments_first_seen_order() {
        let cat = StaticCatalog::new(
            vec![branch("1")],
            vec![
                opp("a", "1", "Retail", 10, 0),
                opp("b", "1", "Mining", 10, 0),
                opp("c", "1", "Retail", 10, 0),
            ],
        )
        .unwrap();
        assert_eq!(unique_departments(&cat), vec!["Retail", "Mining"]);
        let shared = cat.shared();
        assert_eq!(unique_departments(&shared), vec!["Retail", "Mining"]);
        assert!(shared.opportunity(&"c".parse().unwrap()).is_some());
    }
}
