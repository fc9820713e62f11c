//! Slot grid geometry and serpentine ordering

use super::SlotItem;

/// Row-major slot grid: slot `i` sits at column `i % columns`, row `i / columns`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    columns: usize,
    rows: usize,
}

impl SlotLayout {
    /// Create a layout; zero dimensions are bumped to 1
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of slots in the grid
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    pub fn column(&self, slot: usize) -> usize {
        slot % self.columns
    }

    pub fn row(&self, slot: usize) -> usize {
        slot / self.columns
    }

    /// Sort key for a column-major sweep that reverses direction on odd columns
    fn zigzag_key(&self, slot: usize) -> (usize, isize) {
        let column = self.column(slot);
        let row = self.row(slot) as isize;
        if column % 2 == 0 {
            (column, row)
        } else {
            (column, -row)
        }
    }

    /// Sort items into serpentine order
    pub fn sort_zigzag(&self, items: &mut [SlotItem]) {
        items.sort_by_key(|item| self.zigzag_key(item.slot));
    }

    /// Every slot of the grid in serpentine order
    pub fn zigzag_slots(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = (0..self.capacity()).collect();
        slots.sort_by_key(|slot| self.zigzag_key(*slot));
        slots
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::new(4, 7)
    }
}
