//! crates/opp_io/src/demo.rs
//! Built-in demo catalog: five South African branches and their prospects.

use crate::catalog::StaticCatalog;
use crate::loader::parse_catalog;
use crate::IoResult;

pub const DEMO_CATALOG_JSON: &str = include_str!("../data/demo_catalog.json");

pub fn demo_catalog() -> IoResult<StaticCatalog> {
    parse_catalog(DEMO_CATALOG_JSON)
}
