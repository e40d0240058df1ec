// crates/lightbox-core/src/cursor.rs
//
// NavCursor owns the active traversal mode, the permutation for that mode,
// and the position within it. Navigation is resolve-then-commit: `advance` /
// `retreat` return the candidate step without mutating position, so the
// display path can abort on a decode failure and leave both the cursor and
// the collection exactly where they were.

use rand::Rng;

use crate::collection::Collection;
use crate::order::NavMode;

/// A resolved navigation step, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavStep {
    /// New position within the active permutation.
    pub pos: usize,
    /// Collection index the step resolves to (`order[pos]`).
    pub target: usize,
}

#[derive(Debug, Default, Clone)]
pub struct NavCursor {
    mode: NavMode,
    /// Permutation for `mode`; absent until the mode is first used and
    /// dropped whenever the collection mutates (indices shift on delete).
    order: Option<Vec<usize>>,
    /// Position within `order`.
    pos: usize,
}

impl NavCursor {
    pub fn mode(&self) -> NavMode {
        self.mode
    }

    /// Regenerate the permutation if `requested` differs from the active mode
    /// or none exists yet, then relocate the collection's current entry inside
    /// it. A repeated request for the active mode is a no-op — that is what
    /// distinguishes "switching into shuffled" from "advancing while already
    /// shuffled".
    ///
    /// Invariant on return: `order[pos] == collection.current_index()`.
    pub fn ensure_order(
        &mut self,
        requested: NavMode,
        collection: &Collection,
        rng: &mut impl Rng,
    ) {
        if collection.is_empty() {
            self.order = None;
            self.pos = 0;
            return;
        }
        let stale = self
            .order
            .as_ref()
            .map_or(true, |o| o.len() != collection.len());
        if requested == self.mode && !stale {
            return;
        }
        let order = requested.generate(collection.len(), rng);
        // Linear scan is fine: collections are a few thousand entries at
        // most, and this only runs on mode switches.
        self.pos = order
            .iter()
            .position(|&i| i == collection.current_index())
            .unwrap_or(0);
        self.order = Some(order);
        self.mode = requested;
    }

    /// Resolve "forward by `step`" under `mode`. Sequential clamps at the last
    /// position and never wraps; random and locally-shuffled orders wrap.
    /// Returns `None` on an empty collection.
    pub fn advance(
        &mut self,
        mode: NavMode,
        step: usize,
        collection: &Collection,
        rng: &mut impl Rng,
    ) -> Option<NavStep> {
        self.ensure_order(mode, collection, rng);
        let order = self.order.as_ref()?;
        let last = order.len() - 1;
        let pos = match self.mode {
            NavMode::Sequential => (self.pos + step).min(last),
            _ => (self.pos + step) % order.len(),
        };
        Some(NavStep { pos, target: order[pos] })
    }

    /// Resolve "backward by `step`". Symmetric with `advance`: sequential
    /// clamps at position 0, the other modes wrap below the start.
    pub fn retreat(
        &mut self,
        mode: NavMode,
        step: usize,
        collection: &Collection,
        rng: &mut impl Rng,
    ) -> Option<NavStep> {
        self.ensure_order(mode, collection, rng);
        let order = self.order.as_ref()?;
        let len = order.len();
        let pos = match self.mode {
            NavMode::Sequential => self.pos.saturating_sub(step),
            _ => (self.pos + len - step % len) % len,
        };
        Some(NavStep { pos, target: order[pos] })
    }

    /// Apply a resolved step. Called only after the target image displayed
    /// successfully.
    pub fn commit(&mut self, step: NavStep, collection: &mut Collection) {
        self.pos = step.pos;
        collection.set_current(step.target);
    }

    /// Collection indices of the 1–2 logical neighbors of the current
    /// position under the active permutation — the preload set. Wraps for
    /// non-sequential modes, clamps for sequential. Falls back to identity
    /// order around `current` when no permutation has been generated yet.
    pub fn neighbors(&self, collection: &Collection) -> Vec<usize> {
        let len = collection.len();
        if len < 2 {
            return Vec::new();
        }
        let identity: Vec<usize>;
        let (order, pos) = match &self.order {
            Some(order) => (order.as_slice(), self.pos),
            None => {
                identity = (0..len).collect();
                (identity.as_slice(), collection.current_index())
            }
        };
        let mut out = Vec::with_capacity(2);
        match self.mode {
            NavMode::Sequential => {
                if pos + 1 < len {
                    out.push(order[pos + 1]);
                }
                if pos > 0 {
                    out.push(order[pos - 1]);
                }
            }
            _ => {
                out.push(order[(pos + 1) % len]);
                let prev = order[(pos + len - 1) % len];
                if !out.contains(&prev) {
                    out.push(prev);
                }
            }
        }
        out
    }

    /// Re-locate the collection's current entry inside the existing
    /// permutation. Used after absolute jumps (Home/End), which set the
    /// collection index directly without consulting the order.
    pub fn resync(&mut self, collection: &Collection) {
        if let Some(order) = &self.order {
            if let Some(p) = order.iter().position(|&i| i == collection.current_index()) {
                self.pos = p;
            }
        }
    }

    /// Drop the permutation after a collection mutation; it is regenerated
    /// lazily (with current relocated) on the next navigation call.
    pub fn invalidate(&mut self) {
        self.order = None;
        self.pos = 0;
    }
}
