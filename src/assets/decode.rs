use std::sync::Arc;

use crate::assets::store::{
    AssetMetadata, DecodedAsset, PreparedImage, PreparedSvg, Renderable, ResourceRegistry,
};
use crate::foundation::error::{SquarizeError, SquarizeResult};

/// Declared media type that selects the vector branch of the normalizer.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Fallback width when an SVG root declares no usable `width` attribute.
pub const SVG_DEFAULT_WIDTH: u32 = 300;

/// Fallback height when an SVG root declares no usable `height` attribute.
pub const SVG_DEFAULT_HEIGHT: u32 = 150;

/// A raw file captured by an ingestion source, not yet normalized.
#[derive(Clone, Debug)]
pub struct RawFile {
    /// File bytes, immutable once captured.
    pub bytes: Arc<[u8]>,
    /// Declared media type (e.g. `image/png`).
    pub media_type: String,
    /// File name, extension included.
    pub name: String,
}

impl RawFile {
    /// Capture a raw file.
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            name: name.into(),
        }
    }
}

/// Return `true` when `media_type` selects the vector branch.
pub fn is_vector_type(media_type: &str) -> bool {
    media_type == SVG_MEDIA_TYPE
}

/// Normalize a raw file into a [`DecodedAsset`], branching on its declared
/// media type.
///
/// Single-threaded callers that share the registry through a `RefCell` should
/// call [`normalize_vector`] / [`normalize_raster`] directly instead, so no
/// registry borrow is held across the raster suspension point.
pub async fn normalize(
    file: RawFile,
    resources: &mut ResourceRegistry,
) -> SquarizeResult<DecodedAsset> {
    if is_vector_type(&file.media_type) {
        normalize_vector(file, resources)
    } else {
        normalize_raster(file).await
    }
}

/// Normalize an SVG file: read the root `width`/`height` attributes (300×150
/// defaults), parse the markup into a `usvg` tree and allocate a transient
/// resource holding the markup text.
pub fn normalize_vector(
    file: RawFile,
    resources: &mut ResourceRegistry,
) -> SquarizeResult<DecodedAsset> {
    let markup = std::str::from_utf8(&file.bytes).map_err(|_| {
        SquarizeError::decode(format!("'{}' is not utf-8 svg markup", file.name))
    })?;
    let (width, height) = declared_svg_dimensions(markup);

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(&file.bytes, &opts)
        .map_err(|e| SquarizeError::decode(format!("parse svg '{}': {e}", file.name)))?;

    let resource = resources.allocate(Arc::from(markup));
    Ok(DecodedAsset {
        renderable: Renderable::Vector(PreparedSvg {
            tree: Arc::new(tree),
            width,
            height,
        }),
        metadata: AssetMetadata {
            width,
            height,
            name: file.name,
        },
        raw: file.bytes,
        resource: Some(resource),
    })
}

/// Normalize a raster file. Decode completion is the pipeline's suspension
/// point: the task yields to the scheduler first, so concurrently submitted
/// batches interleave their per-file decodes.
pub async fn normalize_raster(file: RawFile) -> SquarizeResult<DecodedAsset> {
    tokio::task::yield_now().await;

    let image = match decode_raster_image(&file.bytes) {
        Ok(image) => image,
        Err(SquarizeError::Decode(msg)) => {
            return Err(SquarizeError::decode(format!("'{}': {msg}", file.name)));
        }
        Err(err) => return Err(err),
    };
    let metadata = AssetMetadata {
        width: image.width,
        height: image.height,
        name: file.name,
    };
    Ok(DecodedAsset {
        renderable: Renderable::Raster(image),
        metadata,
        raw: file.bytes,
        resource: None,
    })
}

/// Decode encoded raster bytes and convert to premultiplied RGBA8.
pub fn decode_raster_image(bytes: &[u8]) -> SquarizeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SquarizeError::decode(format!("decode raster image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read the root element's declared `width`/`height`, substituting the
/// 300×150 defaults for missing or non-numeric values. Markup that does not
/// parse as XML at all also falls back to the defaults; the subsequent tree
/// parse decides whether the asset is usable.
fn declared_svg_dimensions(markup: &str) -> (u32, u32) {
    let Ok(doc) = roxmltree::Document::parse(markup) else {
        return (SVG_DEFAULT_WIDTH, SVG_DEFAULT_HEIGHT);
    };
    let root = doc.root_element();
    (
        parse_dimension(root.attribute("width"), SVG_DEFAULT_WIDTH),
        parse_dimension(root.attribute("height"), SVG_DEFAULT_HEIGHT),
    )
}

/// Integer-prefix parse: `"300"`, `"300px"` and `"300.5"` all read as 300.
/// Missing values, values with no leading digits and out-of-range values fall
/// back to `default`.
fn parse_dimension(attr: Option<&str>, default: u32) -> u32 {
    let Some(raw) = attr else { return default };
    let digits: &str = {
        let trimmed = raw.trim_start();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(trimmed.len(), |(i, _)| i);
        &trimmed[..end]
    };
    if digits.is_empty() {
        return default;
    }
    digits.parse().unwrap_or(default)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
