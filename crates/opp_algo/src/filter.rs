//! Filter & Ranking Engine.
//!
//! `filter_opportunities(catalog, criteria)` keeps every opportunity that
//! passes all five predicates and returns them ranked by `max_employees`
//! descending. Ties keep catalog order (stable sort over catalog-ordered input).
//!
//! Distance is relative to the owning branch, so the distance predicate is
//! ignored entirely in the national view.

use opp_core::determinism::{cmp_potential_desc, sort_by_potential_desc};
use opp_core::{BranchSelection, FilterCriteria, Opportunity};

/// Lowercased search needle, computed once per engine call.
struct Needle(Option<String>);

impl Needle {
    fn new(term: &str) -> Self {
        if term.is_empty() { Needle(None) } else { Needle(Some(term.to_lowercase())) }
    }

    fn matches(&self, name: &str) -> bool {
        match &self.0 {
            None => true,
            Some(n) => name.to_lowercase().contains(n.as_str()),
        }
    }
}

/// Does one opportunity pass every predicate of `criteria`?
pub fn matches(o: &Opportunity, criteria: &FilterCriteria) -> bool {
    passes(o, criteria, &Needle::new(&criteria.search_term))
}

fn passes(o: &Opportunity, c: &FilterCriteria, needle: &Needle) -> bool {
    let branch_ok = match &c.branch {
        BranchSelection::All => true,
        BranchSelection::Branch(code) => &o.branch_code == code,
    };
    let dept_ok = c.departments.is_empty() || c.departments.contains(&o.department);
    let employees_ok = c.employee_bin.contains(o.max_employees);
    let distance_ok = c.is_national_view() || c.distance_bin.contains(o.distance);

    branch_ok && dept_ok && employees_ok && distance_ok && needle.matches(&o.name)
}

/// Catalog indices of the visible subset, ranked. Lets callers that own the
/// catalog behind a shared pointer cache the result without borrowing it.
pub fn filter_indices(opportunities: &[Opportunity], criteria: &FilterCriteria) -> Vec<usize> {
    let needle = Needle::new(&criteria.search_term);
    let mut out: Vec<usize> = opportunities
        .iter()
        .enumerate()
        .filter(|(_, o)| passes(o, criteria, &needle))
        .map(|(i, _)| i)
        .collect();
    out.sort_by(|&a, &b| cmp_potential_desc(&opportunities[a], &opportunities[b]));
    out
}

/// Visible subset of `opportunities`, ranked.
pub fn filter_opportunities<'a>(
    opportunities: &'a [Opportunity],
    criteria: &FilterCriteria,
) -> Vec<&'a Opportunity> {
    let needle = Needle::new(&criteria.search_term);
    let mut out: Vec<&Opportunity> = opportunities
        .iter()
        .filter(|o| passes(o, criteria, &needle))
        .collect();
    sort_by_potential_desc(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use opp_core::{BinKind, DistanceBin, EmployeeBin, StrategicValue};

    fn opp(id: &str, branch: &str, dept: &str, max: u32, dist: f64) -> Opportunity {
        Opportunity {
            id: id.parse().unwrap(),
            name: format!("{id} Holdings"),
            department: dept.into(),
            branch_code: branch.parse().unwrap(),
            employees: String::new(),
            max_employees: max,
            current_penetration: 0,
            strategic_value: StrategicValue::High,
            distance: dist,
            latitude: -26.0,
            longitude: 28.0,
        }
    }

    fn catalog() -> Vec<Opportunity> {
        vec![
            opp("alpha", "1", "Sales", 250, 3.0),
            opp("bravo", "1", "Retail", 251, 20.0),
            opp("charlie", "2", "Mining", 1000, 8.0),
            opp("delta", "2", "Retail", 1001, 40.0),
        ]
    }

    fn ids(v: &[&Opportunity]) -> Vec<String> {
        v.iter().map(|o| o.id.to_string()).collect()
    }

    #[test]
    fn ranks_by_potential_descending() {
        let cat = catalog();
        let got = filter_opportunities(&cat, &FilterCriteria::default());
        assert_eq!(ids(&got), vec!["delta", "charlie", "bravo", "alpha"]);
    }

    #[test]
    fn employee_bins_are_inclusive() {
        let cat = catalog();
        let base = FilterCriteria::default();
        let small = filter_opportunities(&cat, &base.with_bin_toggled(BinKind::Employee, "Small"));
        assert_eq!(ids(&small), vec!["alpha"]);
        let medium = filter_opportunities(&cat, &base.with_bin_toggled(BinKind::Employee, "Medium"));
        assert_eq!(ids(&medium), vec!["charlie", "bravo"]);
        let large = filter_opportunities(&cat, &base.with_bin_toggled(BinKind::Employee, "Large"));
        assert_eq!(ids(&large), vec!["delta"]);
    }

    #[test]
    fn distance_ignored_nationally() {
        let cat = catalog();
        let national = FilterCriteria { distance_bin: DistanceBin::Close, ..Default::default() };
        assert_eq!(filter_opportunities(&cat, &national).len(), 4);

        let local = FilterCriteria {
            branch: BranchSelection::from_key("2"),
            ..Default::default()
        };
        // delta sits 40 km out, beyond the full 0-30 range
        assert_eq!(ids(&filter_opportunities(&cat, &local)), vec!["charlie"]);
        let close = FilterCriteria { distance_bin: DistanceBin::Close, ..local };
        assert!(filter_opportunities(&cat, &close).is_empty());
    }

    #[test]
    fn departments_are_a_union() {
        let cat = catalog();
        let c = FilterCriteria::default()
            .with_department_toggled("Sales")
            .with_department_toggled("Retail");
        assert_eq!(ids(&filter_opportunities(&cat, &c)), vec!["delta", "bravo", "alpha"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let cat = catalog();
        let c = FilterCriteria { search_term: "CHAR".into(), ..Default::default() };
        assert_eq!(ids(&filter_opportunities(&cat, &c)), vec!["charlie"]);
        let c = FilterCriteria { search_term: "holdings".into(), ..Default::default() };
        assert_eq!(filter_opportunities(&cat, &c).len(), 4);
        assert!(matches(&cat[0], &FilterCriteria { employee_bin: EmployeeBin::Small, ..Default::default() }));
    }

    #[test]
    fn indices_agree_with_references() {
        let cat = catalog();
        let c = FilterCriteria::default().with_department_toggled("Retail");
        let by_idx: Vec<&Opportunity> = filter_indices(&cat, &c).into_iter().map(|i| &cat[i]).collect();
        assert_eq!(by_idx, filter_opportunities(&cat, &c));
    }

    #[test]
    fn unknown_branch_yields_empty() {
        let cat = catalog();
        let c = FilterCriteria { branch: BranchSelection::from_key("999"), ..Default::default() };
        assert!(filter_opportunities(&cat, &c).is_empty());
    }
}
