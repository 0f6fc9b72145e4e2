use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::color::Rgba8Premul;
use crate::foundation::error::{SquarizeError, SquarizeResult};

/// Largest allowed surface dimension in pixels. Anything larger is treated as
/// a pathological allocation and fails surface acquisition.
pub const MAX_SURFACE_DIM: u32 = 16_384;

/// Drawing surface backed by row-major premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a zeroed surface.
    ///
    /// Fails with [`SquarizeError::Context`] for zero-sized dimensions or
    /// dimensions above [`MAX_SURFACE_DIM`].
    pub fn new(width: u32, height: u32) -> SquarizeResult<Self> {
        if width == 0 || height == 0 {
            return Err(SquarizeError::context(format!(
                "cannot acquire a {width}x{height} drawing surface"
            )));
        }
        if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
            return Err(SquarizeError::context(format!(
                "surface too large: {width}x{height} (max {MAX_SURFACE_DIM}x{MAX_SURFACE_DIM})"
            )));
        }
        Ok(Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the premultiplied RGBA8 pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fill the whole surface with `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    /// Draw a premultiplied RGBA8 image src-over onto the surface with its
    /// top-left corner at `(x, y)`, clipping anything outside the surface.
    pub fn blit_over(
        &mut self,
        src: &[u8],
        src_width: u32,
        src_height: u32,
        x: u32,
        y: u32,
    ) -> SquarizeResult<()> {
        if src.len() != src_width as usize * src_height as usize * 4 {
            return Err(SquarizeError::context(
                "blit source length does not match its dimensions",
            ));
        }

        let cols = src_width.min(self.width.saturating_sub(x)) as usize;
        let rows = src_height.min(self.height.saturating_sub(y)) as usize;
        for row in 0..rows {
            let src_off = row * src_width as usize * 4;
            let dst_off = ((y as usize + row) * self.width as usize + x as usize) * 4;
            let src_row = &src[src_off..src_off + cols * 4];
            let dst_row = &mut self.data[dst_off..dst_off + cols * 4];
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
        Ok(())
    }

    /// Encode the surface as a PNG (straight alpha).
    pub fn encode_png(&self) -> SquarizeResult<Vec<u8>> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);

        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| SquarizeError::context("surface buffer length mismatch"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode surface to png")?;
        Ok(buf)
    }
}

/// Premultiplied src-over for one pixel.
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
        } else if a < 255 {
            for c in 0..3 {
                px[c] = ((u32::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
