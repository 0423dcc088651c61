use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Land-cover classes of the aerial segmentation masks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AerialClass {
    Unlabeled,
    Building,
    Land,
    Water,
    Road,
    Vegetation,
}

impl AerialClass {
    /// All classes in class-index order
    pub const ALL: [AerialClass; 6] = [
        AerialClass::Unlabeled,
        AerialClass::Building,
        AerialClass::Land,
        AerialClass::Water,
        AerialClass::Road,
        AerialClass::Vegetation,
    ];

    /// Dense class index used by the training pipeline
    pub fn index(&self) -> u8 {
        match self {
            AerialClass::Unlabeled => 0,
            AerialClass::Building => 1,
            AerialClass::Land => 2,
            AerialClass::Water => 3,
            AerialClass::Road => 4,
            AerialClass::Vegetation => 5,
        }
    }

    /// Grayscale intensity the class is painted with in the raw masks
    pub fn raw_intensity(&self) -> u8 {
        match self {
            AerialClass::Unlabeled => 155,
            AerialClass::Building => 44,
            AerialClass::Land => 91,
            AerialClass::Water => 171,
            AerialClass::Road => 172,
            AerialClass::Vegetation => 212,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AerialClass::Unlabeled => "unlabeled",
            AerialClass::Building => "building",
            AerialClass::Land => "land",
            AerialClass::Water => "water",
            AerialClass::Road => "road",
            AerialClass::Vegetation => "vegetation",
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// A single raw intensity -> class index rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub raw: u8,
    pub class: u8,
}

/// Lookup table from raw mask intensities to class indices.
///
/// Values without an entry pass through unchanged. Each pixel is looked up
/// exactly once, so a class index that happens to equal another entry's raw
/// intensity is never remapped a second time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMapping {
    entries: Vec<ClassEntry>,
}

impl Default for ClassMapping {
    fn default() -> Self {
        Self::new(
            AerialClass::ALL
                .iter()
                .map(|c| (c.raw_intensity(), c.index())),
        )
    }
}

impl ClassMapping {
    /// Build a mapping from `(raw, class)` pairs. The first rule for a raw
    /// value wins.
    pub fn new(pairs: impl IntoIterator<Item = (u8, u8)>) -> Self {
        let mut entries: Vec<ClassEntry> = Vec::new();
        for (raw, class) in pairs {
            if !entries.iter().any(|e| e.raw == raw) {
                entries.push(ClassEntry { raw, class });
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    /// Class index for a raw intensity, if the table knows it
    pub fn lookup(&self, raw: u8) -> Option<u8> {
        self.entries.iter().find(|e| e.raw == raw).map(|e| e.class)
    }

    pub fn is_known(&self, raw: u8) -> bool {
        self.lookup(raw).is_some()
    }

    /// Remap one value, passing unknown intensities through
    pub fn remap_value(&self, raw: u8) -> u8 {
        self.lookup(raw).unwrap_or(raw)
    }

    /// Number of distinct class indices the table produces
    pub fn num_classes(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.class as usize + 1)
            .max()
            .unwrap_or(0)
    }

    fn lut(&self) -> [u8; 256] {
        let mut table = [0u8; 256];
        for (value, slot) in table.iter_mut().enumerate() {
            *slot = self.remap_value(value as u8);
        }
        table
    }

    /// Remap every pixel of `mask` in place
    pub fn remap(&self, mask: &mut Array2<u8>) {
        let table = self.lut();
        mask.mapv_inplace(|v| table[v as usize]);
    }

    /// Remapped copy of `mask`
    pub fn remapped(&self, mask: &Array2<u8>) -> Array2<u8> {
        let table = self.lut();
        mask.mapv(|v| table[v as usize])
    }
}

/// Count pixels per class index in a remapped mask.
/// Values `>= num_classes` (unmapped intensities) are skipped.
pub fn class_histogram(mask: &Array2<u8>, num_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; num_classes];
    for &value in mask.iter() {
        if let Some(count) = counts.get_mut(value as usize) {
            *count += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_default_table() {
        let mapping = ClassMapping::default();
        assert_eq!(mapping.lookup(155), Some(0));
        assert_eq!(mapping.lookup(44), Some(1));
        assert_eq!(mapping.lookup(91), Some(2));
        assert_eq!(mapping.lookup(171), Some(3));
        assert_eq!(mapping.lookup(172), Some(4));
        assert_eq!(mapping.lookup(212), Some(5));
        assert_eq!(mapping.num_classes(), 6);
    }

    #[test]
    fn test_remap_known_values() {
        let mapping = ClassMapping::default();
        let mut mask = array![[155u8, 44, 91], [171, 172, 212]];
        mapping.remap(&mut mask);
        assert_eq!(mask, array![[0u8, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn test_unmapped_value_passes_through() {
        let mapping = ClassMapping::default();
        let mask = array![[200u8, 155], [0, 255]];
        let out = mapping.remapped(&mask);
        assert_eq!(out, array![[200u8, 0], [0, 255]]);
        assert!(!mapping.is_known(200));
    }

    #[test]
    fn test_single_lookup_per_pixel() {
        // 10 -> 20 and 20 -> 30: a pixel of 10 must end up 20, not 30
        let mapping = ClassMapping::new([(10, 20), (20, 30)]);
        let out = mapping.remapped(&array![[10u8, 20]]);
        assert_eq!(out, array![[20u8, 30]]);
    }

    #[test]
    fn test_first_rule_wins() {
        let mapping = ClassMapping::new([(7, 1), (7, 2)]);
        assert_eq!(mapping.entries().len(), 1);
        assert_eq!(mapping.lookup(7), Some(1));
    }

    #[test]
    fn test_class_roundtrip() {
        for class in AerialClass::ALL {
            assert_eq!(AerialClass::from_index(class.index()), Some(class));
        }
        assert_eq!(AerialClass::from_index(6), None);
        assert_eq!(AerialClass::Water.name(), "water");
    }

    #[test]
    fn test_histogram_skips_unmapped() {
        let mask = array![[0u8, 0, 5], [3, 200, 5]];
        let counts = class_histogram(&mask, 6);
        assert_eq!(counts, vec![2, 0, 0, 1, 0, 2]);
    }
}
