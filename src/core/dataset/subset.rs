use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::SegmentationDataset;
use crate::error::{DatasetError, Result};

/// Shuffle `0..len` with a fixed seed and cut it into `(train, val)` indices.
///
/// `val_fraction` is clamped to `[0, 1]`; the validation size is rounded to
/// the nearest whole item.
pub fn random_split(len: usize, val_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let fraction = if val_fraction.is_nan() {
        0.0
    } else {
        val_fraction.clamp(0.0, 1.0)
    };
    let val_len = ((len as f64) * fraction).round() as usize;

    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(val_len);
    (train, indices)
}

/// View of another dataset through a list of indices
pub struct Subset<'a, D: SegmentationDataset> {
    dataset: &'a D,
    indices: Vec<usize>,
}

impl<'a, D: SegmentationDataset> Subset<'a, D> {
    pub fn new(dataset: &'a D, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<'a, D: SegmentationDataset> SegmentationDataset for Subset<'a, D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Result<D::Item> {
        let inner = *self
            .indices
            .get(index)
            .ok_or(DatasetError::IndexOutOfBounds {
                index,
                len: self.indices.len(),
            })?;
        self.dataset.get(inner)
    }
}
