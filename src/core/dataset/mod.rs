mod paired;
mod subset;

use ndarray::{Array2, Array3};

use crate::error::Result;

pub use paired::PairedImageMaskDataset;
pub use subset::{random_split, Subset};

/// Indexable dataset consumed by a training loop: a length and a fallible
/// fetch by index. Implementations hold no mutable state, so worker threads
/// may share one instance.
pub trait SegmentationDataset: Send + Sync {
    type Item;

    fn len(&self) -> usize;

    /// Load the item at `index`, failing with
    /// [`DatasetError::IndexOutOfBounds`](crate::DatasetError::IndexOutOfBounds)
    /// outside `[0, len)`
    fn get(&self, index: usize) -> Result<Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One decoded training pair
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationSample {
    /// `[3, height, width]`, RGB
    pub image: Array3<u8>,
    /// `[height, width]` class indices
    pub mask: Array2<u8>,
}

impl SegmentationSample {
    pub fn into_pair(self) -> (Array3<u8>, Array2<u8>) {
        (self.image, self.mask)
    }
}
