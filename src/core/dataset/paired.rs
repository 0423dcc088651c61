use ndarray::Array2;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{SegmentationDataset, SegmentationSample};
use crate::config::DatasetConfig;
use crate::core::image::{load_image_chw, load_mask};
use crate::core::mask::ClassMapping;
use crate::core::operations::{list_files, pair_by_stem};
use crate::error::{DatasetError, Result};

/// Aerial images paired with their label masks by file stem.
///
/// The root holds `images/` and `masks/`. Only stems present in both folders
/// are kept, ordered by stem, so `image_paths()[i]` and `mask_paths()[i]`
/// always share a stem. Files are decoded on every [`get`](SegmentationDataset::get);
/// nothing is cached.
#[derive(Debug, Clone)]
pub struct PairedImageMaskDataset {
    root: PathBuf,
    stems: Vec<String>,
    image_paths: Vec<PathBuf>,
    mask_paths: Vec<PathBuf>,
    class_mapping: ClassMapping,
    orphaned_images: Vec<String>,
    orphaned_masks: Vec<String>,
}

impl PairedImageMaskDataset {
    /// Scan `root/images` and `root/masks` with the default layout and class table
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, &DatasetConfig::default())
    }

    /// Scan a dataset root using the folder names and class table from `config`.
    ///
    /// # Returns
    /// * `Ok(dataset)`, possibly empty if no stems match
    /// * `Err(DatasetError::DirectoryUnreadable)` if either folder is missing or unreadable
    pub fn with_config(root: impl AsRef<Path>, config: &DatasetConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let images_dir = config.images_path(&root);
        let masks_dir = config.masks_path(&root);

        let images = list_files(&images_dir)?;
        let masks = list_files(&masks_dir)?;
        let report = pair_by_stem(&images, &masks);

        info!(
            "Paired {} image/mask files under {:?} ({} images without mask, {} masks without image)",
            report.pairs.len(),
            root,
            report.image_only.len(),
            report.mask_only.len()
        );

        let mut stems = Vec::with_capacity(report.pairs.len());
        let mut image_paths = Vec::with_capacity(report.pairs.len());
        let mut mask_paths = Vec::with_capacity(report.pairs.len());
        for pair in report.pairs {
            stems.push(pair.stem);
            image_paths.push(pair.image_path);
            mask_paths.push(pair.mask_path);
        }

        Ok(Self {
            root,
            stems,
            image_paths,
            mask_paths,
            class_mapping: config.class_mapping.clone(),
            orphaned_images: report.image_only,
            orphaned_masks: report.mask_only,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn image_paths(&self) -> &[PathBuf] {
        &self.image_paths
    }

    pub fn mask_paths(&self) -> &[PathBuf] {
        &self.mask_paths
    }

    /// Stem shared by the pair at `index`
    pub fn stem(&self, index: usize) -> Option<&str> {
        self.stems.get(index).map(String::as_str)
    }

    pub fn class_mapping(&self) -> &ClassMapping {
        &self.class_mapping
    }

    /// Image stems that had no mask
    pub fn orphaned_images(&self) -> &[String] {
        &self.orphaned_images
    }

    /// Mask stems that had no image
    pub fn orphaned_masks(&self) -> &[String] {
        &self.orphaned_masks
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.stems.len() {
            return Err(DatasetError::IndexOutOfBounds {
                index,
                len: self.stems.len(),
            });
        }
        Ok(())
    }

    /// Mask at `index` with its raw intensities, before class remapping
    pub fn raw_mask(&self, index: usize) -> Result<Array2<u8>> {
        self.check_index(index)?;
        load_mask(&self.mask_paths[index])
    }

    /// Decode every pair in order
    pub fn iter(&self) -> impl Iterator<Item = Result<SegmentationSample>> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }
}

impl SegmentationDataset for PairedImageMaskDataset {
    type Item = SegmentationSample;

    fn len(&self) -> usize {
        self.stems.len()
    }

    fn get(&self, index: usize) -> Result<SegmentationSample> {
        self.check_index(index)?;
        debug!("Loading pair {} ({})", index, self.stems[index]);

        let image = load_image_chw(&self.image_paths[index])?;
        let mut mask = load_mask(&self.mask_paths[index])?;
        self.class_mapping.remap(&mut mask);

        Ok(SegmentationSample { image, mask })
    }
}
