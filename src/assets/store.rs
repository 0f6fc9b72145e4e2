use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{SquarizeError, SquarizeResult};

/// Prepared raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels, as reported by the decoder.
    pub width: u32,
    /// Height in pixels, as reported by the decoder.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Prepared SVG asset: a parsed `usvg` tree plus its declared dimensions.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
    /// Width from the root element's `width` attribute (or the 300px default).
    pub width: u32,
    /// Height from the root element's `height` attribute (or the 150px default).
    pub height: u32,
}

/// Renderable content reference produced by the normalizer.
#[derive(Clone, Debug)]
pub enum Renderable {
    /// Decoded raster pixels.
    Raster(PreparedImage),
    /// Parsed vector markup, rasterized on demand at composite time.
    Vector(PreparedSvg),
}

/// Intrinsic dimensions and original file name of an ingested asset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetMetadata {
    /// Intrinsic width in pixels (SVG: declared units).
    pub width: u32,
    /// Intrinsic height in pixels (SVG: declared units).
    pub height: u32,
    /// Original file name, extension included.
    pub name: String,
}

/// Handle to a transient resource held by a [`ResourceRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(u64);

/// Registry of transient vector-content resources.
///
/// The normalizer allocates one entry per vector asset (the object-URL
/// equivalent of the reference behavior). Each entry must be released exactly
/// once, on reset or when a superseded batch is discarded; releasing an
/// unknown or already-released id is an error.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    next: u64,
    alive: HashMap<u64, Arc<str>>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a resource holding `markup` and return its handle.
    pub fn allocate(&mut self, markup: Arc<str>) -> ResourceId {
        let id = self.next;
        self.next += 1;
        self.alive.insert(id, markup);
        ResourceId(id)
    }

    /// Release a resource. Fails if `id` is unknown or already released.
    pub fn release(&mut self, id: ResourceId) -> SquarizeResult<()> {
        if self.alive.remove(&id.0).is_none() {
            return Err(SquarizeError::validation(format!(
                "resource {} is not allocated (double release?)",
                id.0
            )));
        }
        Ok(())
    }

    /// Borrow the markup held by a live resource.
    pub fn get(&self, id: ResourceId) -> Option<&Arc<str>> {
        self.alive.get(&id.0)
    }

    /// Number of live resources.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Return `true` when no resources are live.
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }
}

/// A fully normalized asset, ready for aggregation.
#[derive(Clone, Debug)]
pub struct DecodedAsset {
    /// Renderable content reference.
    pub renderable: Renderable,
    /// Original file bytes, untouched.
    pub raw: Arc<[u8]>,
    /// Intrinsic dimensions and name.
    pub metadata: AssetMetadata,
    /// Transient resource owned by this asset (vector assets only).
    pub resource: Option<ResourceId>,
}

/// Ordered collection of ingested assets.
///
/// Three order-aligned sequences (renderables, raw byte contents, metadata)
/// always have equal length; index `i` across all three refers to the same
/// logical asset. Insertion is append-only; the only removal is a full
/// [`reset`](AssetStore::reset).
#[derive(Debug, Default)]
pub struct AssetStore {
    renderables: Vec<Renderable>,
    raw: Vec<Arc<[u8]>>,
    metadata: Vec<AssetMetadata>,
    resources: Vec<Option<ResourceId>>,
    registry: ResourceRegistry,
    epoch: u64,
}

impl AssetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of assets currently held.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.renderables.len(), self.raw.len());
        debug_assert_eq!(self.renderables.len(), self.metadata.len());
        self.renderables.len()
    }

    /// Return `true` when the store holds no assets.
    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    /// Reset identity. Bumped on every [`reset`](AssetStore::reset); a batch
    /// that observes a different epoch than the one it started under must
    /// discard its results.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Renderable content references, in submission order.
    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    /// Original file bytes, order-aligned with [`renderables`](AssetStore::renderables).
    pub fn raw_contents(&self) -> &[Arc<[u8]>] {
        &self.raw
    }

    /// Asset metadata, order-aligned with [`renderables`](AssetStore::renderables).
    pub fn metadata(&self) -> &[AssetMetadata] {
        &self.metadata
    }

    /// The transient-resource registry backing vector assets.
    pub fn resources(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Mutable access to the resource registry, for the normalizer and for
    /// discarding superseded batches.
    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.registry
    }

    /// Append a decoded batch. All three sequences are extended together, in
    /// the batch's order; ownership of each asset's transient resource moves
    /// to the store.
    pub fn append(&mut self, assets: Vec<DecodedAsset>) {
        self.renderables.reserve(assets.len());
        self.raw.reserve(assets.len());
        self.metadata.reserve(assets.len());
        self.resources.reserve(assets.len());
        for asset in assets {
            self.renderables.push(asset.renderable);
            self.raw.push(asset.raw);
            self.metadata.push(asset.metadata);
            self.resources.push(asset.resource);
        }
    }

    /// Clear all three sequences and release every owned transient resource.
    pub fn reset(&mut self) {
        self.renderables.clear();
        self.raw.clear();
        self.metadata.clear();
        for id in self.resources.drain(..).flatten() {
            if let Err(err) = self.registry.release(id) {
                tracing::error!(error = %err, "owned resource release failed on reset");
            }
        }
        self.epoch += 1;
    }

    /// Clone the renderable/metadata pairs for a recompute pass.
    pub fn snapshot(&self) -> Vec<(Renderable, AssetMetadata)> {
        self.renderables
            .iter()
            .cloned()
            .zip(self.metadata.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
