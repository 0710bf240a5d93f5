//! Persistence for generated datasets.
//!
//! A [`Store`] is a directory holding one JSON document per dataset:
//!
//! | File              | Dataset              | Shape on disk                    |
//! |-------------------|----------------------|----------------------------------|
//! | `semiprimes.json` | semiprime sequence   | ascending list of values         |
//! | `kernel.json`     | kernel grid          | shape, origin, sparse triples    |
//!
//! Every call opens, writes and closes its own file handles. Saves are
//! atomic: the document is written to a temporary sibling and renamed over
//! the target, so a failed save leaves the previous dataset in place.
//!
//! The kernel grid is stored sparsely. Zero cells are omitted and come
//! back as zero when the dense grid is rebuilt on load.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::generator::MAX_GRID_SPAN;
use crate::grid::{Grid, Triple};

const SEMIPRIMES_FILE: &str = "semiprimes.json";
const KERNEL_FILE: &str = "kernel.json";
const FORMAT_VERSION: u32 = 1;

const SEMIPRIMES: &str = "semiprime sequence";
const KERNEL: &str = "kernel grid";

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SequenceDoc {
    version: u32,
    values: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GridDoc {
    version: u32,
    rows: usize,
    cols: usize,
    x_start: i64,
    y_start: i64,
    cells: Vec<Triple>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A directory of stored datasets.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "opened store");
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn semiprimes_path(&self) -> PathBuf {
        self.dir.join(SEMIPRIMES_FILE)
    }

    #[must_use]
    pub fn kernel_path(&self) -> PathBuf {
        self.dir.join(KERNEL_FILE)
    }

    // -- Semiprime sequence -------------------------------------------------

    /// Replace the stored sequence.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] or [`StoreError::Json`].
    pub fn save_semiprimes(&self, values: &[u64]) -> Result<(), StoreError> {
        let doc = SequenceDoc {
            version: FORMAT_VERSION,
            values: values.to_vec(),
        };
        let path = self.semiprimes_path();
        write_atomic(&path, &serde_json::to_vec(&doc)?)?;
        info!(path = %path.display(), count = values.len(), "saved semiprimes");
        Ok(())
    }

    /// Load the stored sequence.
    ///
    /// # Errors
    ///
    /// [`StoreError::Missing`] if nothing was generated yet,
    /// [`StoreError::Corrupt`] for an unreadable document or a sequence
    /// that is not strictly ascending.
    pub fn load_semiprimes(&self) -> Result<Vec<u64>, StoreError> {
        let path = self.semiprimes_path();
        let doc: SequenceDoc = read_doc(&path, SEMIPRIMES)?;
        check_version(SEMIPRIMES, doc.version)?;
        if let Some(w) = doc.values.windows(2).find(|w| w[0] >= w[1]) {
            return Err(StoreError::Corrupt {
                dataset: SEMIPRIMES,
                reason: format!("values not strictly ascending at {} then {}", w[0], w[1]),
            });
        }
        debug!(path = %path.display(), count = doc.values.len(), "loaded semiprimes");
        Ok(doc.values)
    }

    // -- Kernel grid --------------------------------------------------------

    /// Replace the stored grid. Only non-zero cells are written.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] or [`StoreError::Json`].
    pub fn save_kernel_grid(&self, grid: &Grid) -> Result<(), StoreError> {
        let doc = GridDoc {
            version: FORMAT_VERSION,
            rows: grid.rows(),
            cols: grid.cols(),
            x_start: grid.x_start(),
            y_start: grid.y_start(),
            cells: grid.triples().collect(),
        };
        let path = self.kernel_path();
        write_atomic(&path, &serde_json::to_vec(&doc)?)?;
        info!(
            path = %path.display(),
            rows = doc.rows,
            cols = doc.cols,
            stored = doc.cells.len(),
            "saved kernel grid"
        );
        Ok(())
    }

    /// Load the stored grid, rebuilding it densely.
    ///
    /// # Errors
    ///
    /// [`StoreError::Missing`] if nothing was generated yet,
    /// [`StoreError::Corrupt`] for an unreadable document, a shape larger
    /// than the generator can produce, or a triple outside the declared
    /// shape or above 9.
    pub fn load_kernel_grid(&self) -> Result<Grid, StoreError> {
        let path = self.kernel_path();
        let doc: GridDoc = read_doc(&path, KERNEL)?;
        check_version(KERNEL, doc.version)?;
        check_grid_doc(&doc)?;
        let grid = Grid::from_triples(doc.rows, doc.cols, doc.x_start, doc.y_start, doc.cells)
            .map_err(|e| StoreError::Corrupt {
                dataset: KERNEL,
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "loaded kernel grid");
        Ok(grid)
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

fn read_doc<T: for<'de> Deserialize<'de>>(path: &Path, dataset: &'static str) -> Result<T, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::Missing(dataset)),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
        dataset,
        reason: e.to_string(),
    })
}

fn check_version(dataset: &'static str, version: u32) -> Result<(), StoreError> {
    if version == FORMAT_VERSION {
        Ok(())
    } else {
        Err(StoreError::Corrupt {
            dataset,
            reason: format!("unsupported format version {version}"),
        })
    }
}

/// Reject a grid document before allocating for it.
fn check_grid_doc(doc: &GridDoc) -> Result<(), StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        dataset: KERNEL,
        reason,
    };
    if doc.rows > MAX_GRID_SPAN || doc.cols > MAX_GRID_SPAN {
        return Err(corrupt(format!(
            "shape {}x{} exceeds {MAX_GRID_SPAN} per side",
            doc.rows, doc.cols
        )));
    }
    if let Some(&(row, col, value)) = doc.cells.iter().find(|&&(_, _, v)| v > 9) {
        return Err(corrupt(format!("cell ({row}, {col}) holds {value}, not a digit")));
    }
    Ok(())
}

/// Write `bytes` to a temporary sibling of `path`, then rename over it.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    write_and_rename(&tmp, path, bytes).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("data")).unwrap();
        (dir, store)
    }

    // ── Sequence ────────────────────────────────────────────────────────

    #[test]
    fn open_creates_directory() {
        let (dir, store) = temp_store();
        assert!(dir.path().join("data").is_dir());
        assert_eq!(store.dir(), dir.path().join("data"));
    }

    #[test]
    fn semiprimes_roundtrip() {
        let (_dir, store) = temp_store();
        store.save_semiprimes(&[4, 6, 9, 10, 14]).unwrap();
        assert_eq!(store.load_semiprimes().unwrap(), vec![4, 6, 9, 10, 14]);
    }

    #[test]
    fn save_replaces_previous_sequence() {
        let (_dir, store) = temp_store();
        store.save_semiprimes(&[4, 6, 9]).unwrap();
        store.save_semiprimes(&[25]).unwrap();
        assert_eq!(store.load_semiprimes().unwrap(), vec![25]);
        assert!(!store.semiprimes_path().with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_sequence_is_reported() {
        let (_dir, store) = temp_store();
        let err = store.load_semiprimes().unwrap_err();
        assert!(matches!(err, StoreError::Missing(SEMIPRIMES)));
    }

    #[test]
    fn garbage_sequence_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(store.semiprimes_path(), b"{not json").unwrap();
        assert!(matches!(
            store.load_semiprimes().unwrap_err(),
            StoreError::Corrupt { dataset: SEMIPRIMES, .. }
        ));
    }

    #[test]
    fn unsorted_sequence_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(store.semiprimes_path(), br#"{"version":1,"values":[6,4]}"#).unwrap();
        let err = store.load_semiprimes().unwrap_err();
        assert!(err.to_string().contains("not strictly ascending"));
    }

    // ── Grid ────────────────────────────────────────────────────────────

    #[test]
    fn grid_roundtrip_with_zero_cells() {
        let (_dir, store) = temp_store();
        let grid = Grid::from_fn(3, 3, -1, -1, |r, c| u8::try_from((r + c) % 3).unwrap());
        store.save_kernel_grid(&grid).unwrap();
        assert_eq!(store.load_kernel_grid().unwrap(), grid);
    }

    #[test]
    fn zero_cells_are_not_written() {
        let (_dir, store) = temp_store();
        let mut grid = Grid::with_origin(2, 2, 0, 0);
        grid.set(1, 1, 7);
        store.save_kernel_grid(&grid).unwrap();
        let text = fs::read_to_string(store.kernel_path()).unwrap();
        let doc: GridDoc = serde_json::from_str(&text).unwrap();
        assert_eq!(doc.cells, vec![(1, 1, 7)]);
    }

    #[test]
    fn missing_grid_is_reported() {
        let (_dir, store) = temp_store();
        let err = store.load_kernel_grid().unwrap_err();
        assert!(err.to_string().contains("kernel grid"));
    }

    #[test]
    fn triple_outside_shape_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(
            store.kernel_path(),
            br#"{"version":1,"rows":2,"cols":2,"x_start":0,"y_start":0,"cells":[[3,0,1]]}"#,
        )
        .unwrap();
        assert!(matches!(
            store.load_kernel_grid().unwrap_err(),
            StoreError::Corrupt { dataset: KERNEL, .. }
        ));
    }

    #[test]
    fn oversized_grid_shape_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(
            store.kernel_path(),
            br#"{"version":1,"rows":4294967296,"cols":4294967297,"x_start":0,"y_start":0,"cells":[]}"#,
        )
        .unwrap();
        let err = store.load_kernel_grid().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { dataset: KERNEL, .. }));
        assert!(err.to_string().contains("exceeds"), "{err}");

        fs::write(
            store.kernel_path(),
            br#"{"version":1,"rows":10001,"cols":1,"x_start":0,"y_start":0,"cells":[]}"#,
        )
        .unwrap();
        assert!(matches!(
            store.load_kernel_grid().unwrap_err(),
            StoreError::Corrupt { dataset: KERNEL, .. }
        ));
    }

    #[test]
    fn non_digit_cell_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(
            store.kernel_path(),
            br#"{"version":1,"rows":2,"cols":2,"x_start":0,"y_start":0,"cells":[[0,0,200]]}"#,
        )
        .unwrap();
        let err = store.load_kernel_grid().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { dataset: KERNEL, .. }));
        assert!(err.to_string().contains("200"), "{err}");
    }

    #[test]
    fn unknown_version_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(store.semiprimes_path(), br#"{"version":9,"values":[]}"#).unwrap();
        assert!(matches!(
            store.load_semiprimes().unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }
}
