//! Constraint blocks: rows, columns, and boxes.

use gridlock_core::{Cell, Position, ValueSet};

/// Index of `pos` into a column-major `size * size` cell vector.
pub(crate) fn cell_index(pos: Position, size: u8) -> usize {
    usize::from(pos.y()) * usize::from(size) + usize::from(pos.x())
}

/// An ordered group of exactly `size` positions enforcing the all-different
/// constraint: one row, one column, or one box.
///
/// Blocks are constructed on demand from the board's geometry and hold
/// positions rather than cell references; they resolve positions against the
/// grid for the duration of a single operation. At most one member cell may
/// hold any given assigned value.
#[derive(Debug, Clone)]
pub(crate) struct ConstraintBlock {
    positions: Vec<Position>,
}

impl ConstraintBlock {
    pub(crate) fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// The set of values currently assigned anywhere in the block.
    pub(crate) fn assigned_values(&self, cells: &[Cell], size: u8) -> ValueSet {
        self.positions
            .iter()
            .filter_map(|&pos| cells[cell_index(pos, size)].value())
            .collect()
    }

    /// Eliminates every assigned value from the candidates of the block's
    /// other members, iterating to a fixed point.
    ///
    /// Each elimination that auto-resolves a cell (see [`Cell::eliminate`])
    /// makes the assigned-value snapshot stale: the newly resolved cell now
    /// removes further candidates from its peers, so the scan restarts until
    /// a full pass makes no new resolution. Returns the positions that
    /// resolved so the board can cascade into their other blocks.
    pub(crate) fn recompute_candidates(
        &self,
        cells: &mut [Cell],
        size: u8,
        solving: bool,
    ) -> Vec<Position> {
        let mut resolved = Vec::new();
        loop {
            let assigned = self.assigned_values(cells, size);
            let mut stale = false;
            'rescan: for value in assigned {
                for &pos in &self.positions {
                    let cell = &mut cells[cell_index(pos, size)];
                    if cell.candidates().len() > 1 && cell.eliminate(value, solving) {
                        resolved.push(pos);
                        stale = true;
                        break 'rescan;
                    }
                }
            }
            if !stale {
                return resolved;
            }
        }
    }

    /// Finds a value that appears in exactly one unassigned member's
    /// candidate set (a hidden single).
    ///
    /// Returns the value only when exactly one such value exists in the
    /// block; zero or several distinct hidden singles yield `None`.
    pub(crate) fn hidden_single(&self, cells: &[Cell], size: u8) -> Option<u8> {
        let mut seen_once = ValueSet::new();
        let mut seen_more = ValueSet::new();
        for &pos in &self.positions {
            let cell = &cells[cell_index(pos, size)];
            if cell.is_assigned() {
                continue;
            }
            for value in cell.candidates() {
                if !seen_once.insert(value) {
                    seen_more.insert(value);
                }
            }
        }
        seen_once.difference(seen_more).sole_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(size: u8, y: u8) -> ConstraintBlock {
        ConstraintBlock::new((0..size).map(|x| Position::new(x, y)).collect())
    }

    fn fresh_cells(size: u8) -> Vec<Cell> {
        vec![Cell::unassigned(size); usize::from(size) * usize::from(size)]
    }

    #[test]
    fn test_recompute_eliminates_assigned_values() {
        let size = 9;
        let mut cells = fresh_cells(size);
        let block = row_of(size, 0);

        cells[cell_index(Position::new(0, 0), size)]
            .try_assign(5)
            .unwrap();
        let resolved = block.recompute_candidates(&mut cells, size, false);
        assert!(resolved.is_empty());
        for x in 1..size {
            let cell = &cells[cell_index(Position::new(x, 0), size)];
            assert!(!cell.candidates().contains(5));
        }
    }

    #[test]
    fn test_recompute_cascades_auto_resolutions_to_fixed_point() {
        let size = 9;
        let mut cells = fresh_cells(size);
        let block = row_of(size, 0);

        // (2, 0)..(7, 0) hold 3..8; (0, 0) keeps {1, 3} and (1, 0) keeps
        // {1, 2}, as if other blocks had narrowed them; (8, 0) is untouched.
        for x in 2..8 {
            cells[cell_index(Position::new(x, 0), size)]
                .try_assign(x + 1)
                .unwrap();
        }
        for value in [2, 4, 5, 6, 7, 8, 9] {
            cells[cell_index(Position::new(0, 0), size)].eliminate(value, false);
        }
        for value in 3..=9 {
            cells[cell_index(Position::new(1, 0), size)].eliminate(value, false);
        }

        // Eliminating 3 resolves (0, 0) to 1; the new 1 resolves (1, 0) to
        // 2; the accumulated assignments leave (8, 0) with only 9.
        let resolved = block.recompute_candidates(&mut cells, size, true);
        assert_eq!(cells[cell_index(Position::new(0, 0), size)].value(), Some(1));
        assert_eq!(cells[cell_index(Position::new(1, 0), size)].value(), Some(2));
        assert_eq!(cells[cell_index(Position::new(8, 0), size)].value(), Some(9));
        assert!(resolved.contains(&Position::new(0, 0)));
        assert!(resolved.contains(&Position::new(1, 0)));
        assert!(resolved.contains(&Position::new(8, 0)));
    }

    #[test]
    fn test_hidden_single_found() {
        let size = 9;
        let mut cells = fresh_cells(size);
        let block = row_of(size, 0);

        // Remove 5 from every cell of the row except (3, 0).
        for x in 0..size {
            if x != 3 {
                cells[cell_index(Position::new(x, 0), size)].eliminate(5, false);
            }
        }

        assert_eq!(block.hidden_single(&cells, size), Some(5));
    }

    #[test]
    fn test_hidden_single_requires_exactly_one_value() {
        let size = 9;
        let mut cells = fresh_cells(size);
        let block = row_of(size, 0);

        assert_eq!(block.hidden_single(&cells, size), None);

        // Two distinct hidden singles in the same block cancel out.
        for x in 0..size {
            if x != 3 {
                cells[cell_index(Position::new(x, 0), size)].eliminate(5, false);
            }
            if x != 6 {
                cells[cell_index(Position::new(x, 0), size)].eliminate(7, false);
            }
        }
        assert_eq!(block.hidden_single(&cells, size), None);
    }

    #[test]
    fn test_hidden_single_ignores_assigned_cells() {
        let size = 9;
        let mut cells = fresh_cells(size);
        let block = row_of(size, 0);

        cells[cell_index(Position::new(0, 0), size)]
            .try_assign(5)
            .unwrap();
        block.recompute_candidates(&mut cells, size, false);
        assert_eq!(block.hidden_single(&cells, size), None);
    }
}
