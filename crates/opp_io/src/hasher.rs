//! crates/opp_io/src/hasher.rs
//! SHA-256 digests over raw bytes and canonical JSON. Hex is lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::catalog::CatalogProvider;
use crate::IoResult;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Digest of the canonical JSON form of `value`.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// Stable fingerprint of a catalog's content, independent of source formatting
/// and of whether branch codes were written as numbers or strings.
pub fn catalog_fingerprint<P: CatalogProvider + ?Sized>(catalog: &P) -> IoResult<String> {
    #[derive(Serialize)]
    struct Wire<'a> {
        branches: &'a [opp_core::Branch],
        opportunities: &'a [opp_core::Opportunity],
    }
    sha256_canonical(&Wire {
        branches: catalog.branches(),
        opportunities: catalog.opportunities(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_catalog;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn fingerprint_ignores_formatting() {
        let a = parse_catalog(r#"{"branches":[{"code":1,"city":"A","latitude":0,"longitude":0,"medianIncome":1,"avgTravelCost":"R1","opportunityClusters":"","strategicActions":"","status":"VALIDATED"}],"opportunities":[]}"#).unwrap();
        let b = parse_catalog(r#"{
            "opportunities": [],
            "branches": [{"status":"VALIDATED","code":"1","city":"A","latitude":0.0,"longitude":0.0,
                          "medianIncome":1.0,"avgTravelCost":"R1","opportunityClusters":"","strategicActions":""}]
        }"#).unwrap();
        let fa = catalog_fingerprint(&a).unwrap();
        assert_eq!(fa, catalog_fingerprint(&b).unwrap());
        assert_eq!(fa.len(), 64);
    }
}
