mod pairing;

pub use pairing::{file_stem, index_by_stem, list_files, pair_by_stem, PairingReport, StemPair};
