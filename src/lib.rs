//! Paired image/mask dataset for aerial semantic segmentation.
//!
//! A dataset root holds an `images/` and a `masks/` folder. Files are joined
//! by stem, decoded on every read, and mask intensities are remapped to dense
//! class indices (see [`ClassMapping`]).

pub mod config;
pub mod core;
pub mod error;
pub mod logging;

pub use crate::config::DatasetConfig;
pub use crate::core::dataset::{
    random_split, PairedImageMaskDataset, SegmentationDataset, SegmentationSample, Subset,
};
pub use crate::core::image::{load_image_chw, load_mask};
pub use crate::core::mask::{class_histogram, AerialClass, ClassMapping};
pub use crate::error::{DatasetError, Result};
