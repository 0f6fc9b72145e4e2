use std::sync::Arc;

use crate::assets::store::{AssetMetadata, PreparedSvg, Renderable};
use crate::foundation::color::BackgroundColor;
use crate::foundation::error::{SquarizeError, SquarizeResult};
use crate::render::surface::Surface;

/// Suffix appended to the original file stem in composite output names.
pub const OUTPUT_SUFFIX: &str = "-squared";

/// One square composite derived from an ingested asset.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    /// PNG-encoded square image.
    pub png: Vec<u8>,
    /// Derived output name (`photo.jpg` → `photo-squared.png`).
    pub name: String,
    /// Side length of the square canvas in pixels.
    pub side: u32,
}

/// Derive the output file name: strip the extension (the stem is the whole
/// name when there is no dot, or when the only dot leads the name) and append
/// `-squared.png`.
pub fn output_name(original: &str) -> String {
    let stem = match original.rfind('.') {
        Some(i) if i > 0 => &original[..i],
        _ => original,
    };
    format!("{stem}{OUTPUT_SUFFIX}.png")
}

/// Render a square composite for every asset, in input order.
///
/// A single asset's failure (decode, rasterization or surface acquisition)
/// is logged and skips that asset only; the batch continues. An empty input
/// yields an empty output.
#[tracing::instrument(skip_all, fields(assets = assets.len()))]
pub async fn recompute(
    assets: &[(Renderable, AssetMetadata)],
    background: &BackgroundColor,
) -> Vec<CompositeResult> {
    let mut out = Vec::with_capacity(assets.len());
    for (renderable, metadata) in assets {
        match composite_one(renderable, metadata, background).await {
            Ok(composite) => out.push(composite),
            Err(err) => {
                tracing::warn!(name = %metadata.name, error = %err, "composite skipped");
            }
        }
    }
    out
}

/// Composite a single asset onto a `side × side` canvas, `side = max(w, h)`,
/// background filled first, image centered at its natural dimensions.
async fn composite_one(
    renderable: &Renderable,
    metadata: &AssetMetadata,
    background: &BackgroundColor,
) -> SquarizeResult<CompositeResult> {
    let side = metadata.width.max(metadata.height);
    let mut surface = Surface::new(side, side)?;
    surface.fill(background.to_rgba8_premul());

    let (pixels, width, height) = materialize(renderable).await?;
    // Offsets floor to whole pixels; the margins differ by at most one.
    let x = (side - width) / 2;
    let y = (side - height) / 2;
    surface.blit_over(&pixels, width, height, x, y)?;

    Ok(CompositeResult {
        png: surface.encode_png()?,
        name: output_name(&metadata.name),
        side,
    })
}

/// Materialize a renderable reference into drawable premultiplied pixels.
/// Raster decode completion is a suspension point; vector references
/// rasterize synchronously at their declared dimensions.
async fn materialize(renderable: &Renderable) -> SquarizeResult<(Arc<Vec<u8>>, u32, u32)> {
    match renderable {
        Renderable::Raster(image) => {
            tokio::task::yield_now().await;
            Ok((image.rgba8_premul.clone(), image.width, image.height))
        }
        Renderable::Vector(svg) => {
            let pixels = rasterize_svg(svg)?;
            Ok((Arc::new(pixels), svg.width, svg.height))
        }
    }
}

/// Rasterize a prepared SVG tree into premultiplied RGBA8 at its declared
/// dimensions, scaling the tree's intrinsic size to fit.
fn rasterize_svg(svg: &PreparedSvg) -> SquarizeResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(svg.width, svg.height).ok_or_else(|| {
        SquarizeError::context(format!(
            "failed to allocate {}x{} svg pixmap",
            svg.width, svg.height
        ))
    })?;

    let sx = (svg.width as f32) / svg.tree.size().width();
    let sy = (svg.height as f32) / svg.tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&svg.tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
