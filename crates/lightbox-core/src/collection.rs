// crates/lightbox-core/src/collection.rs
//
// The ordered set of image identifiers plus the canonical position.
// `current` is the single source of truth for "where am I" — the navigation
// cursor translates permutation positions back into collection indices, and
// jump commands bypass the cursor entirely and write `current` directly.

/// Ordered list of image identifiers (paths) and the index of the image
/// currently displayed or about to be displayed.
#[derive(Debug, Default, Clone)]
pub struct Collection {
    items: Vec<String>,
    current: usize,
}

impl Collection {
    /// Replace the whole collection and reset the position to the start.
    /// An empty input yields an empty (inactive) collection — the caller is
    /// responsible for treating "no images found" as fatal at startup.
    pub fn load(identifiers: Vec<String>) -> Self {
        Self { items: identifiers, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the current image. Only meaningful when non-empty.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.items.get(self.current).map(String::as_str)
    }

    /// Set the current position, clamped into bounds. No-op when empty.
    pub fn set_current(&mut self, index: usize) {
        if !self.items.is_empty() {
            self.current = index.min(self.items.len() - 1);
        }
    }

    /// Absolute jump to the first collection entry.
    pub fn first(&mut self) {
        self.current = 0;
    }

    /// Absolute jump to the last collection entry.
    pub fn last(&mut self) {
        if !self.items.is_empty() {
            self.current = self.items.len() - 1;
        }
    }

    /// Remove the current entry after the relocate capability succeeds.
    ///
    /// The relocate closure is handed the current identifier (move to trash,
    /// move to a destination directory, ...). On success the entry is removed
    /// and `current` is clamped to the new last valid index; the removed
    /// identifier is returned so the caller can report it. On failure the
    /// collection is left untouched and the error is passed through — this
    /// never partially mutates.
    ///
    /// Returns `Ok(None)` on an empty collection (no-op).
    pub fn delete_current<E>(
        &mut self,
        relocate: impl FnOnce(&str) -> Result<(), E>,
    ) -> Result<Option<String>, E> {
        if self.items.is_empty() {
            return Ok(None);
        }
        relocate(&self.items[self.current])?;
        let removed = self.items.remove(self.current);
        if self.current >= self.items.len() && !self.items.is_empty() {
            self.current = self.items.len() - 1;
        }
        Ok(Some(removed))
    }
}
