use image::{GrayImage, Luma, RgbImage};
use ndarray::{Array2, Array3};
use std::path::Path;
use tracing::trace;

use crate::error::{DatasetError, Result};

/// Decode an image file into a `[3, height, width]` array in RGB order.
///
/// The codec hands back pixels in RGB already, so the only work left is the
/// channel-first transpose. Alpha is dropped.
pub fn load_image_chw(path: &Path) -> Result<Array3<u8>> {
    let img = image::open(path).map_err(|source| DatasetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    trace!("Decoded image {:?} ({}x{})", path, rgb.width(), rgb.height());
    Ok(rgb_to_chw(&rgb))
}

/// Decode a mask file as single-channel grayscale, shape `[height, width]`.
///
/// Grayscale files are read as stored. Colour files are reduced with
/// [`bt601_luma`], the weighting the class intensities were derived with.
pub fn load_mask(path: &Path) -> Result<Array2<u8>> {
    let img = image::open(path).map_err(|source| DatasetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let luma = if img.color().has_color() {
        rgb_to_luma_bt601(&img.to_rgb8())
    } else {
        img.to_luma8()
    };
    trace!("Decoded mask {:?} ({}x{})", path, luma.width(), luma.height());
    Ok(luma_to_array(&luma))
}

/// Channel-first copy of an RGB buffer
pub fn rgb_to_chw(img: &RgbImage) -> Array3<u8> {
    let (width, height) = img.dimensions();
    Array3::from_shape_fn((3, height as usize, width as usize), |(c, y, x)| {
        img.get_pixel(x as u32, y as u32)[c]
    })
}

/// BT.601 luma in 15-bit fixed point, truncated: 0.299 R + 0.587 G + 0.114 B.
///
/// `image`'s own `to_luma8` uses Rec.709 weights, which move the palette
/// colours off the class table.
pub fn bt601_luma(r: u8, g: u8, b: u8) -> u8 {
    ((9798 * r as u32 + 19235 * g as u32 + 3735 * b as u32) >> 15) as u8
}

pub fn rgb_to_luma_bt601(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        Luma([bt601_luma(r, g, b)])
    })
}

pub fn luma_to_array(img: &GrayImage) -> Array2<u8> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        img.get_pixel(x as u32, y as u32)[0]
    })
}
