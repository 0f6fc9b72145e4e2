//! Squarize turns arbitrary user-supplied images (raster formats and SVG)
//! into square-canvas composites with a configurable background fill,
//! packaged into a single ZIP archive for bulk download.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: a source adapter ([`FilePicker`], [`DropZone`],
//!    [`ClipboardPaste`]) validates a batch of [`RawFile`]s against an
//!    [`AcceptList`]; any invalid candidate rejects the whole batch.
//! 2. **Normalize**: each file becomes a [`DecodedAsset`]: decoded raster
//!    pixels, or a parsed SVG tree with its declared dimensions.
//! 3. **Aggregate**: [`AssetStore`] holds three order-aligned sequences
//!    (renderables, raw bytes, metadata), append-only until a full reset.
//! 4. **Composite**: every asset is centered on a `max(w, h)` square canvas
//!    over the background fill and encoded to PNG.
//! 5. **Export**: composites are packaged through an [`ArchivePackager`]
//!    into `squared-images.zip`.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded cooperative**: async entry points suspend at raster
//!   decode and archive packaging; work interleaves, it never runs in
//!   parallel. Within one batch, files are processed in strict input order.
//! - **Per-asset failure isolation**: one undecodable asset never aborts a
//!   batch; it is logged and skipped.
//! - **Premultiplied RGBA8** surfaces end-to-end; PNG output is straight
//!   alpha.
//!
//! [`SquareSession`] ties the stages together and owns all mutable state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod export;
mod foundation;
mod ingest;
mod render;
mod session;

pub use assets::decode::{
    RawFile, SVG_DEFAULT_HEIGHT, SVG_DEFAULT_WIDTH, SVG_MEDIA_TYPE, decode_raster_image,
    is_vector_type, normalize, normalize_raster, normalize_vector,
};
pub use assets::store::{
    AssetMetadata, AssetStore, DecodedAsset, PreparedImage, PreparedSvg, Renderable, ResourceId,
    ResourceRegistry,
};
pub use config::settings::{BACKGROUND_COLOR_KEY, JsonFileSettings, MemorySettings, SettingsStore};
pub use export::archive::{
    ARCHIVE_FILE_NAME, ArchiveEntry, ArchivePackager, ExportArchive, ZipPackager,
};
pub use foundation::color::{BackgroundColor, DEFAULT_BACKGROUND, Rgba8Premul};
pub use foundation::error::{SquarizeError, SquarizeResult};
pub use ingest::accept::{AcceptList, DEFAULT_ACCEPTED_TYPES};
pub use ingest::sources::{ClipboardItem, ClipboardPaste, DropZone, FilePicker};
pub use render::composite::{CompositeResult, OUTPUT_SUFFIX, output_name, recompute};
pub use render::surface::{MAX_SURFACE_DIM, Surface};
pub use session::pipeline::{IngestReport, SquareSession};
