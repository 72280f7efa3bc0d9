//! crates/opp_io/src/canonical_json.rs
//! Canonical JSON for snapshots and fingerprints.
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (caller is responsible for stable ordering)
//! - Output: compact, no trailing newline
//! - Atomic write: staged sibling file, fsync, rename; in-place write when
//!   the rename fails (e.g. cross-device).

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{IoError, IoResult};

/// Serialize `value` and emit canonical bytes.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> IoResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    to_canonical_json_bytes(&v)
}

/// Canonical bytes of an already-built `Value`.
pub fn to_canonical_json_bytes(v: &Value) -> IoResult<Vec<u8>> {
    Ok(serde_json::to_vec(&sorted(v.clone()))?)
}

/// Write canonical JSON of `value` to `path` atomically.
pub fn write_canonical_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> IoResult<()> {
    let bytes = to_canonical_bytes(value)?;
    write_bytes_atomic(path, &bytes)
}

/// Rebuild every object with its keys in sorted order. Holds whether or not
/// serde_json's `preserve_order` feature is on somewhere in the graph.
fn sorted(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let keyed: BTreeMap<String, Value> = map.into_iter().map(|(k, v)| (k, sorted(v))).collect();
            Value::Object(keyed.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        leaf => leaf,
    }
}

/// Replace `path` with `bytes`, creating parent directories. Readers see the
/// old file or the new one, never a partial write (same-filesystem rename).
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> IoResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;

    let staging = staging_path(&dir, path);
    write_synced(&staging, bytes, true)?;

    if let Err(e) = fs::rename(&staging, path) {
        tracing::debug!(error = %e, "rename failed, writing {} in place", path.display());
        let fallback = write_synced(path, bytes, false);
        let _ = fs::remove_file(&staging);
        fallback.map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    }
    sync_dir(&dir);
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8], fresh: bool) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true);
    if fresh {
        opts.create_new(true);
    } else {
        opts.create(true).truncate(true);
    }
    let mut f = opts.open(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// `.<name>.<pid>-<seq>.partial` in the target directory.
fn staging_path(dir: &Path, target: &Path) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let name = target.file_name().and_then(|s| s.to_str()).unwrap_or("out");
    dir.join(format!(".{name}.{}-{seq}.partial", std::process::id()))
}

fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Ok(d) = fs::File::open(dir) {
            let _ = d.sync_all();
        }
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_sorted_arrays_preserved() {
        let v = json!({
            "pageSize": 6,
            "criteria": { "searchTerm": "", "branch": "All" },
            "page": [ {"id": "b", "maxEmployees": 900}, {"id": "a", "maxEmployees": 100} ]
        });
        let s = String::from_utf8(to_canonical_json_bytes(&v).unwrap()).unwrap();
        assert_eq!(
            s,
            r#"{"criteria":{"branch":"All","searchTerm":""},"page":[{"id":"b","maxEmployees":900},{"id":"a","maxEmployees":100}],"pageSize":6}"#
        );
        assert!(!s.ends_with('\n'));
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("snapshot.json");
        write_canonical_file(&path, &json!({"b": 1, "a": 2})).unwrap();
        write_canonical_file(&path, &json!({"z": "é"})).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"z":"é"}"#);
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
