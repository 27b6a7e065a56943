use std::path::Path;

use anyhow::{Context, Result};
use scribble_engine::render::TextureImage;

/// Decodes an image file into RGBA8.
pub fn load(path: &Path) -> Result<TextureImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    TextureImage::from_rgba8(width, height, img.into_raw())
        .with_context(|| format!("unusable image {}", path.display()))
}

/// Loads every path; a file that fails is logged and skipped.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<TextureImage> {
    paths
        .iter()
        .filter_map(|p| match load(p.as_ref()) {
            Ok(img) => {
                log::info!("loaded {} ({}x{})", p.as_ref().display(), img.width(), img.height());
                Some(img)
            }
            Err(err) => {
                log::warn!("{err:#}");
                None
            }
        })
        .collect()
}

/// Two generated backgrounds for when no image files are given.
pub fn builtin() -> Result<Vec<TextureImage>> {
    Ok(vec![
        checkerboard(512, 32, [46, 52, 64, 255], [59, 66, 82, 255])?,
        grid_paper(512, 32)?,
    ])
}

fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Result<TextureImage> {
    let cell = cell.max(1);
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let px = if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b };
            rgba.extend_from_slice(&px);
        }
    }
    Ok(TextureImage::from_rgba8(size, size, rgba)?)
}

fn grid_paper(size: u32, spacing: u32) -> Result<TextureImage> {
    let spacing = spacing.max(2);
    let paper = [245, 241, 228, 255];
    let line = [170, 196, 222, 255];
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let px = if x % spacing == 0 || y % spacing == 0 { line } else { paper };
            rgba.extend_from_slice(&px);
        }
    }
    Ok(TextureImage::from_rgba8(size, size, rgba)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_backgrounds_are_square_rgba() {
        let imgs = builtin().unwrap();
        assert_eq!(imgs.len(), 2);
        for img in &imgs {
            assert_eq!(img.width(), img.height());
            assert_eq!(img.pixels().len(), (img.width() * img.height() * 4) as usize);
        }
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let img = checkerboard(4, 2, [1, 1, 1, 255], [2, 2, 2, 255]).unwrap();
        let px = |x: u32, y: u32| img.pixels()[((y * 4 + x) * 4) as usize];
        assert_eq!(px(0, 0), 1);
        assert_eq!(px(2, 0), 2);
        assert_eq!(px(2, 2), 1);
    }

    #[test]
    fn missing_file_is_skipped() {
        let imgs = load_all(&["/nonexistent/background.png"][..]);
        assert!(imgs.is_empty());
    }
}
