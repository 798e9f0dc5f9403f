use std::collections::BTreeSet;

/// Set of selected unit cells, identified by `(row, col)`.
///
/// Kept ordered so reading it back yields row-major coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    cells: BTreeSet<(u32, u32)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(row: u32, col: u32) -> Self {
        let mut selection = Self::new();
        selection.insert(row, col);
        selection
    }

    pub fn from_coords<I: IntoIterator<Item = (u32, u32)>>(coords: I) -> Self {
        Self {
            cells: coords.into_iter().collect(),
        }
    }

    /// Returns true if the cell was not selected before.
    pub fn insert(&mut self, row: u32, col: u32) -> bool {
        self.cells.insert((row, col))
    }

    /// Returns true if the cell was selected before.
    pub fn remove(&mut self, row: u32, col: u32) -> bool {
        self.cells.remove(&(row, col))
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.cells.contains(&(row, col))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells.iter().copied()
    }

    /// Sorted `(row, col)` list, as handed to host pages.
    pub fn coordinates(&self) -> Vec<(u32, u32)> {
        self.cells.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_sorted_row_major() {
        let selection = Selection::from_coords([(1, 0), (0, 2), (0, 1)]);
        assert_eq!(selection.coordinates(), vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut selection = Selection::single(0, 0);
        assert!(!selection.insert(0, 0));
        assert!(selection.insert(0, 1));
        assert!(selection.remove(0, 0));
        assert!(!selection.remove(0, 0));
        assert_eq!(selection.len(), 1);
    }
}
