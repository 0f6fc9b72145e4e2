use std::cell::Cell;

use crate::assets::decode::RawFile;
use crate::foundation::error::{SquarizeError, SquarizeResult};
use crate::ingest::accept::AcceptList;

fn retain_by_multiplicity(mut files: Vec<RawFile>, multiple: bool) -> Vec<RawFile> {
    if !multiple {
        files.truncate(1);
    }
    files
}

/// Explicit file-picker ingestion source.
#[derive(Clone, Debug)]
pub struct FilePicker {
    accept: AcceptList,
    multiple: bool,
}

impl FilePicker {
    /// Build a picker. `multiple: false` retains only the first candidate.
    pub fn new(accept: AcceptList, multiple: bool) -> Self {
        Self { accept, multiple }
    }

    /// Validate a selection and return the batch to forward. An empty
    /// selection is a no-op (empty batch).
    pub fn select(&self, files: Vec<RawFile>) -> SquarizeResult<Vec<RawFile>> {
        let batch = retain_by_multiplicity(files, self.multiple);
        self.accept.validate_batch(&batch)?;
        Ok(batch)
    }
}

/// Drag-and-drop ingestion source.
///
/// Nested drag-enter/leave events are depth-counted: the drag indicator arms
/// on the first enter carrying items and clears only once the depth returns
/// to zero, so nested child enters/leaves do not flicker it.
#[derive(Debug)]
pub struct DropZone {
    accept: AcceptList,
    multiple: bool,
    depth: Cell<u32>,
    dragging: Cell<bool>,
}

impl DropZone {
    /// Build a drop zone. `multiple: false` retains only the first candidate.
    pub fn new(accept: AcceptList, multiple: bool) -> Self {
        Self {
            accept,
            multiple,
            depth: Cell::new(0),
            dragging: Cell::new(false),
        }
    }

    /// Record a drag entering this zone or one of its nested regions.
    pub fn drag_enter(&self, has_items: bool) {
        self.depth.set(self.depth.get().saturating_add(1));
        if has_items {
            self.dragging.set(true);
        }
    }

    /// Record a drag leaving a region. The indicator clears only at depth 0.
    pub fn drag_leave(&self) {
        let depth = self.depth.get().saturating_sub(1);
        self.depth.set(depth);
        if depth == 0 {
            self.dragging.set(false);
        }
    }

    /// Whether the drag indicator is currently armed.
    pub fn is_dragging(&self) -> bool {
        self.dragging.get()
    }

    /// Validate a dropped batch and return the files to forward. Dropping
    /// clears the drag state regardless of the outcome; an empty drop and a
    /// batch with any unaccepted file are both whole-batch rejections.
    pub fn drop_files(&self, files: Vec<RawFile>) -> SquarizeResult<Vec<RawFile>> {
        self.depth.set(0);
        self.dragging.set(false);

        if files.is_empty() {
            return Err(SquarizeError::validation("no files were dropped"));
        }
        let batch = retain_by_multiplicity(files, self.multiple);
        self.accept.validate_batch(&batch)?;
        Ok(batch)
    }
}

/// One item read from the platform clipboard.
#[derive(Clone, Debug)]
pub struct ClipboardItem {
    /// The item's declared type (e.g. `image/png`, `text/plain`).
    pub media_type: String,
    /// The item's file content, when it has one.
    pub file: Option<RawFile>,
}

/// Clipboard-paste ingestion source.
#[derive(Clone, Debug)]
pub struct ClipboardPaste {
    accept: AcceptList,
}

impl ClipboardPaste {
    /// Build a paste source over an allowlist.
    pub fn new(accept: AcceptList) -> Self {
        Self { accept }
    }

    /// Filter pasted items down to the files to forward.
    ///
    /// Only items whose type starts with `image/` are considered; of those,
    /// only files passing the accept check are retained. Everything else is
    /// silently ignored; pasting never rejects a batch.
    pub fn paste(&self, items: Vec<ClipboardItem>) -> Vec<RawFile> {
        let mut retained = Vec::new();
        for item in items {
            if !item.media_type.starts_with("image/") {
                continue;
            }
            let Some(file) = item.file else { continue };
            if self.accept.accepts(&file.media_type, &file.name) {
                retained.push(file);
            }
        }
        retained
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/sources.rs"]
mod tests;
