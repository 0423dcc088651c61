pub mod dataset;
pub mod image;
pub mod mask;
pub mod operations;

pub use self::dataset::*;
pub use self::image::*;
pub use self::mask::*;
pub use self::operations::*;
