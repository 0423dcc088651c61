use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{DatasetError, Result};

/// One image/mask pair joined on a shared stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemPair {
    pub stem: String,
    pub image_path: PathBuf,
    pub mask_path: PathBuf,
}

/// Outcome of joining the image folder with the mask folder
#[derive(Debug, Clone, Default)]
pub struct PairingReport {
    /// Matched pairs, sorted by stem
    pub pairs: Vec<StemPair>,
    /// Stems found only in the image folder
    pub image_only: Vec<String>,
    /// Stems found only in the mask folder
    pub mask_only: Vec<String>,
}

/// Get the file name without directory and without its last extension.
///
/// `tile_01.png` -> `tile_01`, `scene.v2.jpg` -> `scene.v2`.
/// Returns `None` when the stem is not valid UTF-8.
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
}

/// List every non-directory entry of `dir`.
///
/// # Returns
/// * `Ok(paths)` in whatever order the filesystem yields them
/// * `Err(DatasetError::DirectoryUnreadable)` if `dir` is missing or cannot be read
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let unreadable = |source| DatasetError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if path.is_dir() {
            debug!("Skipping subdirectory {:?}", path);
            continue;
        }
        files.push(path);
    }

    debug!("Listed {} files in {:?}", files.len(), dir);
    Ok(files)
}

/// Index paths by stem. When several files share a stem, the one whose file
/// name sorts first is kept and the rest are reported. Names that are not
/// valid UTF-8 are skipped.
pub fn index_by_stem(paths: &[PathBuf]) -> BTreeMap<String, PathBuf> {
    let mut sorted: Vec<&PathBuf> = paths.iter().collect();
    sorted.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut by_stem = BTreeMap::new();
    for path in sorted {
        let Some(stem) = file_stem(path) else {
            warn!("Skipping {:?}: file name is not valid UTF-8", path);
            continue;
        };
        if let Some(kept) = by_stem.get(&stem) {
            warn!(
                "Duplicate stem {:?}: keeping {:?}, ignoring {:?}",
                stem, kept, path
            );
            continue;
        }
        by_stem.insert(stem, path.clone());
    }
    by_stem
}

/// Join image and mask paths on their stems.
pub fn pair_by_stem(images: &[PathBuf], masks: &[PathBuf]) -> PairingReport {
    let image_index = index_by_stem(images);
    let mut mask_index = index_by_stem(masks);

    let mut report = PairingReport::default();
    for (stem, image_path) in image_index {
        match mask_index.remove(&stem) {
            Some(mask_path) => report.pairs.push(StemPair {
                stem,
                image_path,
                mask_path,
            }),
            None => report.image_only.push(stem),
        }
    }
    report.mask_only = mask_index.into_keys().collect();

    report
}
