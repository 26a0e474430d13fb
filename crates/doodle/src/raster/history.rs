use std::collections::VecDeque;

use image::RgbaImage;

use crate::config::history::MAX_UNDO;

/// Bounded undo/redo stacks of raster snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<RgbaImage>,
    redo: Vec<RgbaImage>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state before a mutation. Clears the redo stack.
    pub fn record(&mut self, before: &RgbaImage) {
        self.undo.push_back(before.clone());
        if self.undo.len() > MAX_UNDO {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Swap `current` with the previous snapshot. Returns false if there is none.
    pub fn undo(&mut self, current: &mut RgbaImage) -> bool {
        match self.undo.pop_back() {
            Some(previous) => {
                self.redo.push(std::mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone state. Returns false if there is none.
    pub fn redo(&mut self, current: &mut RgbaImage) -> bool {
        match self.redo.pop() {
            Some(next) => {
                self.undo.push_back(std::mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
}
