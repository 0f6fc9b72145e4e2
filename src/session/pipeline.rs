use std::cell::{Cell, RefCell};

use crate::assets::decode::{self, RawFile};
use crate::assets::store::{AssetMetadata, AssetStore};
use crate::config::settings::{BACKGROUND_COLOR_KEY, SettingsStore};
use crate::export::archive::{
    ARCHIVE_FILE_NAME, ArchiveEntry, ArchivePackager, ExportArchive,
};
use crate::foundation::color::BackgroundColor;
use crate::foundation::error::SquarizeResult;
use crate::render::composite::{self, CompositeResult};

/// Outcome of one ingestion batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestReport {
    /// Assets appended to the store.
    pub appended: usize,
    /// Names of files that failed to decode; they were excluded and the
    /// batch continued.
    pub failed: Vec<String>,
    /// `true` when the store was reset while this batch was decoding; its
    /// results were discarded and nothing was appended.
    pub superseded: bool,
}

/// State container for the square-image tool.
///
/// Owns the asset aggregator, the background-color setting and the derived
/// composites; all consumers receive it by reference instead of touching
/// shared globals. The scheduling model is single-threaded cooperative:
/// entry points suspend at raster decode and archive packaging, interior
/// mutability is `RefCell`, and no borrow is held across a suspension point,
/// so concurrently submitted batches may interleave freely on one thread.
pub struct SquareSession<S: SettingsStore> {
    store: RefCell<AssetStore>,
    composites: RefCell<Vec<CompositeResult>>,
    background: RefCell<BackgroundColor>,
    revision: Cell<u64>,
    settings: S,
}

impl<S: SettingsStore> SquareSession<S> {
    /// Create a session, loading the persisted background color. With no
    /// persisted (or unparsable) value the background defaults to `"white"`.
    pub fn new(settings: S) -> SquarizeResult<Self> {
        let background = match settings.load(BACKGROUND_COLOR_KEY)? {
            Some(descriptor) => BackgroundColor::parse(&descriptor).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "persisted background ignored");
                BackgroundColor::default()
            }),
            None => BackgroundColor::default(),
        };
        Ok(Self {
            store: RefCell::new(AssetStore::new()),
            composites: RefCell::new(Vec::new()),
            background: RefCell::new(background),
            revision: Cell::new(0),
            settings,
        })
    }

    /// Number of assets currently aggregated.
    pub fn asset_count(&self) -> usize {
        self.store.borrow().len()
    }

    /// Metadata of the aggregated assets, in submission order.
    pub fn metadata(&self) -> Vec<AssetMetadata> {
        self.store.borrow().metadata().to_vec()
    }

    /// The current derived composites, in asset order.
    pub fn composites(&self) -> Vec<CompositeResult> {
        self.composites.borrow().clone()
    }

    /// The current background descriptor.
    pub fn background(&self) -> String {
        self.background.borrow().descriptor().to_owned()
    }

    /// Number of transient resources currently alive (vector assets).
    pub fn live_resources(&self) -> usize {
        self.store.borrow().resources().len()
    }

    /// Ingest a validated batch: normalize each file sequentially in input
    /// order, append the batch atomically, then recompute composites.
    ///
    /// A file that fails to decode is logged, reported by name and excluded;
    /// the batch continues. If the session is [`reset`](Self::reset) while
    /// the batch is decoding, the batch's results are discarded and its
    /// transient resources released. When two batches are in flight
    /// concurrently, they append in completion order, not submission order.
    #[tracing::instrument(skip_all, fields(files = files.len()))]
    pub async fn ingest(&self, files: Vec<RawFile>) -> SquarizeResult<IngestReport> {
        let epoch = self.store.borrow().epoch();

        let mut decoded = Vec::with_capacity(files.len());
        let mut failed = Vec::new();
        for file in files {
            let name = file.name.clone();
            let result = if decode::is_vector_type(&file.media_type) {
                decode::normalize_vector(file, self.store.borrow_mut().resources_mut())
            } else {
                decode::normalize_raster(file).await
            };
            match result {
                Ok(asset) => decoded.push(asset),
                Err(err) => {
                    tracing::warn!(name = %name, error = %err, "asset excluded from batch");
                    failed.push(name);
                }
            }
        }

        let appended = {
            let mut store = self.store.borrow_mut();
            if store.epoch() != epoch {
                for asset in decoded {
                    if let Some(id) = asset.resource {
                        if let Err(err) = store.resources_mut().release(id) {
                            tracing::error!(error = %err, "superseded-batch resource release failed");
                        }
                    }
                }
                return Ok(IngestReport {
                    appended: 0,
                    failed,
                    superseded: true,
                });
            }

            let appended = decoded.len();
            store.append(decoded);
            appended
        };

        self.bump();
        self.recompute().await;
        Ok(IngestReport {
            appended,
            failed,
            superseded: false,
        })
    }

    /// Change the background color: parse the descriptor, persist it, then
    /// recompute composites. An unknown descriptor fails with a validation
    /// error and leaves the previous value (and the persisted value) intact.
    pub async fn set_background(&self, descriptor: &str) -> SquarizeResult<()> {
        let parsed = BackgroundColor::parse(descriptor)?;
        self.settings.save(BACKGROUND_COLOR_KEY, parsed.descriptor())?;
        *self.background.borrow_mut() = parsed;
        self.bump();
        self.recompute().await;
        Ok(())
    }

    /// Clear the aggregator (releasing transient resources) and the derived
    /// composites. Batches still decoding will observe the epoch change and
    /// discard themselves.
    pub fn reset(&self) {
        self.store.borrow_mut().reset();
        self.composites.borrow_mut().clear();
        self.bump();
    }

    /// Package the current composites into an archive.
    ///
    /// Returns `None` when there is nothing to export. Packaging failures
    /// leave all in-memory state intact for retry.
    pub async fn export(
        &self,
        packager: &dyn ArchivePackager,
    ) -> SquarizeResult<Option<ExportArchive>> {
        let entries: Vec<ArchiveEntry> = self
            .composites
            .borrow()
            .iter()
            .map(|c| ArchiveEntry {
                name: c.name.clone(),
                bytes: c.png.clone(),
            })
            .collect();
        if entries.is_empty() {
            return Ok(None);
        }

        // Packaging encode completion is a suspension point.
        tokio::task::yield_now().await;
        let bytes = packager.package(&entries)?;
        Ok(Some(ExportArchive {
            bytes,
            file_name: ARCHIVE_FILE_NAME.to_owned(),
        }))
    }

    fn bump(&self) {
        self.revision.set(self.revision.get() + 1);
    }

    /// Rebuild composites from the store's current assets and background.
    /// A recompute that finishes after further input changes is stale and is
    /// discarded; the newer recompute owns the result.
    async fn recompute(&self) {
        let revision = self.revision.get();
        let assets = self.store.borrow().snapshot();
        let background = self.background.borrow().clone();

        let composites = composite::recompute(&assets, &background).await;
        if self.revision.get() == revision {
            *self.composites.borrow_mut() = composites;
        } else {
            tracing::debug!(revision, "stale composite batch discarded");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/pipeline.rs"]
mod tests;
