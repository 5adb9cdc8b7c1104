//! CLI command implementations

pub mod apply;
pub mod identity;

use anyhow::{bail, Context, Result};
use hald_core::PixelBuffer;
use std::fs;
use std::path::Path;

/// Load a headerless RGBA8 dump.
///
/// `stride` defaults to `width * 4`.
pub fn load_raw(path: &Path, width: u32, height: u32, stride: Option<usize>) -> Result<PixelBuffer> {
    let data = fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let image = match stride {
        Some(stride) => PixelBuffer::from_raw(width, height, stride, data),
        None => PixelBuffer::from_packed(width, height, data),
    };
    image.with_context(|| format!("{} is not a {}x{} RGBA8 image", path.display(), width, height))
}

/// Load a headerless square RGBA8 dump, inferring the side from the file size.
pub fn load_square(path: &Path) -> Result<(Vec<u8>, u32)> {
    let data = fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let pixels = data.len() / 4;
    let side = (pixels as f64).sqrt() as u32;
    if data.len() % 4 != 0 || (side as usize) * (side as usize) != pixels {
        bail!("{} is not a square RGBA8 image ({} bytes)", path.display(), data.len());
    }
    Ok((data, side))
}

/// Save pixels as a tightly packed RGBA8 dump.
pub fn save_raw(path: &Path, image: &PixelBuffer) -> Result<()> {
    let mut packed = Vec::with_capacity(image.pixel_count() * 4);
    for y in 0..image.height() {
        packed.extend_from_slice(image.row(y));
    }
    fs::write(path, packed).with_context(|| format!("Failed to save: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip_drops_padding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.rgba");

        let mut data = vec![0u8; 12 + 8];
        data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let img = PixelBuffer::from_raw(2, 2, 12, data).unwrap();
        save_raw(&path, &img).unwrap();

        assert_eq!(fs::metadata(&path).unwrap().len(), 16);
        let loaded = load_raw(&path, 2, 2, None).unwrap();
        assert_eq!(loaded.pixel(0, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_load_raw_wrong_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.rgba");
        fs::write(&path, [0u8; 8]).unwrap();
        assert!(load_raw(&path, 4, 4, None).is_err());
    }

    #[test]
    fn test_load_raw_with_stride() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("padded.rgba");
        let mut data = vec![0u8; 16 + 8];
        data[16..20].copy_from_slice(&[5, 6, 7, 8]);
        fs::write(&path, &data).unwrap();

        let img = load_raw(&path, 2, 2, Some(16)).unwrap();
        assert_eq!(img.stride(), 16);
        assert_eq!(img.pixel(0, 1), [5, 6, 7, 8]);
        // Padded bytes read as packed rows are too short
        assert!(load_raw(&path, 4, 2, None).is_err());
    }

    #[test]
    fn test_load_square() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sq.rgba");
        fs::write(&path, vec![0u8; 9 * 4]).unwrap();
        let (_, side) = load_square(&path).unwrap();
        assert_eq!(side, 3);

        fs::write(&path, vec![0u8; 10 * 4]).unwrap();
        assert!(load_square(&path).is_err());
    }
}
