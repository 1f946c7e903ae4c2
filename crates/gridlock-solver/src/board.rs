//! The board: grid ownership, propagation, and the simulation fallback.

use gridlock_core::{Cell, CellError, Position, ValueSet, geometry};
use log::{debug, trace};

use crate::{
    block::{ConstraintBlock, cell_index},
    error::SolveError,
};

/// An N×N grid of cells solved by constraint propagation with a bounded
/// hypothesis fallback.
///
/// A board is created empty, mutated only through [`Board::assign`], and
/// becomes complete at most once; completion is terminal. Every assignment
/// recomputes the candidate sets of the row, column, and box containing the
/// target cell, and of any cells those recomputations resolve in turn.
///
/// # Examples
///
/// ```
/// use gridlock_core::Position;
/// use gridlock_solver::Board;
///
/// let mut board = Board::new(9)?;
/// board.assign(Position::new(0, 0), 5)?;
///
/// // The assignment eliminates 5 from the row, column, and box peers.
/// let peer = board.cell(Position::new(0, 4))?;
/// assert!(!peer.candidates().contains(5));
/// # Ok::<(), gridlock_solver::SolveError>(())
/// ```
#[derive(Debug)]
pub struct Board {
    size: u8,
    box_dim: u8,
    cells: Vec<Cell>,
    has_progressed: bool,
    complete: bool,
    solving: bool,
}

impl Board {
    /// Creates an empty board with every candidate set full.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidSize`] when the box-dimension derivation
    /// yields no square divisor of at least 3 for `size` (see
    /// [`geometry::is_valid_board_size`]).
    pub fn new(size: u8) -> Result<Self, SolveError> {
        if !geometry::is_valid_board_size(size) {
            return Err(SolveError::InvalidSize { size });
        }
        let box_dim = geometry::box_dimension(size).ok_or(SolveError::InvalidSize { size })?;
        let n = usize::from(size);
        Ok(Self {
            size,
            box_dim,
            cells: vec![Cell::unassigned(size); n * n],
            has_progressed: false,
            complete: false,
            solving: false,
        })
    }

    /// Returns the board dimension.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns the derived box side length.
    #[must_use]
    pub const fn box_dimension(&self) -> u8 {
        self.box_dim
    }

    /// Returns `true` once at least one cell has been pre-filled.
    #[must_use]
    pub const fn has_progressed(&self) -> bool {
        self.has_progressed
    }

    /// Returns `true` once every cell holds a value.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::OutOfRange`] when either coordinate is outside
    /// the board.
    pub fn cell(&self, pos: Position) -> Result<&Cell, SolveError> {
        Ok(&self.cells[self.checked_index(pos)?])
    }

    /// Returns an iterator over every position and its cell.
    #[must_use]
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.positions().map(|pos| (pos, &self.cells[cell_index(pos, self.size)]))
    }

    /// Assigns `value` to the cell at `pos` and cascades the consequences.
    ///
    /// Returns `true` when the cell changed; re-assigning the value a cell
    /// already holds is a no-op returning `false`. On a change, the row,
    /// column, and box of `pos` are recomputed, and the blocks of every cell
    /// those recomputations auto-resolve, until the cascade is quiescent.
    ///
    /// # Errors
    ///
    /// - [`SolveError::OutOfRange`] when `pos` is outside the board.
    /// - [`SolveError::InvalidAssignment`] when the unassigned target cell
    ///   has already had `value` eliminated.
    /// - [`SolveError::ConflictingAssignment`] when the target cell holds a
    ///   different value.
    pub fn assign(&mut self, pos: Position, value: u8) -> Result<bool, SolveError> {
        let index = self.checked_index(pos)?;
        let changed = self.cells[index].try_assign(value).map_err(|error| match error {
            CellError::NotCandidate { value } => SolveError::InvalidAssignment { pos, value },
            CellError::Conflicting { current, value } => {
                SolveError::ConflictingAssignment { pos, current, value }
            }
        })?;
        if changed {
            self.cascade_from(pos);
        }
        Ok(changed)
    }

    /// Attempts to complete the board.
    ///
    /// One column-major sweep visits every unassigned cell: a naked single
    /// is assigned outright; otherwise the values recurring across the two
    /// adjacent rows, the two adjacent columns, and the adjacent boxes are
    /// intersected with each other and the cell's candidates, falling back
    /// to the cell's own box hidden single. Each assignment cascades, so a
    /// single sweep can resolve large parts of the board. If the sweep does
    /// not finish the board, the simulation fallback runs.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InvalidConfiguration`] when the pre-filled board is
    ///   logically inconsistent.
    /// - [`SolveError::NotConfigured`] when no cell has been pre-filled.
    /// - [`SolveError::Unsolvable`] when propagation and simulation are both
    ///   exhausted.
    pub fn solve(&mut self) -> Result<(), SolveError> {
        self.validate()?;
        if !self.has_progressed {
            return Err(SolveError::NotConfigured);
        }
        self.solving = true;

        for x in 0..self.size {
            for y in 0..self.size {
                let pos = Position::new(x, y);
                let cell = &self.cells[cell_index(pos, self.size)];
                if cell.is_assigned() {
                    continue;
                }
                if let Some(single) = cell.candidates().sole_value() {
                    self.assign(pos, single)?;
                    continue;
                }
                if let Some(value) = self.deterministic_value(pos) {
                    self.assign(pos, value)?;
                }
            }
        }

        let open = self.cells.iter().filter(|cell| !cell.is_assigned()).count();
        debug!("propagation sweep finished with {open} open cells");

        if self.check_complete() {
            return Ok(());
        }
        if self.simulate()? {
            Ok(())
        } else {
            Err(SolveError::Unsolvable)
        }
    }

    /// Verifies board sanity and records whether any cell has been
    /// pre-filled.
    ///
    /// A minimum candidate-set size strictly between 1 and N means cells are
    /// constrained while none has collapsed to a single value, which cannot
    /// arise from a consistent pre-fill; it is treated as a fatal
    /// configuration error.
    fn validate(&mut self) -> Result<(), SolveError> {
        let min = self
            .cells
            .iter()
            .map(|cell| cell.candidates().len())
            .min()
            .unwrap_or(self.size);
        if min > 1 && min < self.size {
            return Err(SolveError::InvalidConfiguration);
        }
        if min != self.size {
            self.has_progressed = true;
        }
        Ok(())
    }

    /// Looks for a value forced on the cell at `pos` by its surroundings.
    ///
    /// The elimination signals of the two adjacent rows, the two adjacent
    /// columns, and the orthogonally adjacent boxes are the values assigned
    /// in every block of the respective group; each signal is restricted to
    /// the cell's own candidates and the three are intersected. When that is
    /// inconclusive, a hidden single from the cell's own box is considered
    /// if it is a candidate here and not already part of the intersection.
    /// Only a set collapsed to exactly one value is accepted.
    fn deterministic_value(&self, pos: Position) -> Option<u8> {
        let candidates = self.cells[cell_index(pos, self.size)].candidates();

        let row_values = self.common_assigned(
            geometry::adjacent_lines(pos.y(), self.size, self.box_dim)
                .into_iter()
                .map(|y| self.row_block(y)),
        ) & candidates;
        let column_values = self.common_assigned(
            geometry::adjacent_lines(pos.x(), self.size, self.box_dim)
                .into_iter()
                .map(|x| self.column_block(x)),
        ) & candidates;
        let box_values = self.common_assigned(
            geometry::adjacent_box_origins(pos, self.size, self.box_dim)
                .into_iter()
                .map(|origin| self.box_block_at(origin)),
        ) & candidates;

        let mut forced = row_values & column_values & box_values;

        if forced.len() != 1
            && let Some(unique) = self.box_block_at(geometry::box_origin(pos, self.box_dim))
                .hidden_single(&self.cells, self.size)
            && candidates.contains(unique)
            && !forced.contains(unique)
        {
            forced.insert(unique);
        }

        let value = forced.sole_value();
        if let Some(value) = value {
            trace!("deterministic value {value} at {pos}");
        }
        value
    }

    /// Intersects the assigned-value sets of a group of blocks: the result
    /// is the values present in every block of the group.
    fn common_assigned(&self, blocks: impl Iterator<Item = ConstraintBlock>) -> ValueSet {
        blocks
            .map(|block| block.assigned_values(&self.cells, self.size))
            .reduce(ValueSet::intersection)
            .unwrap_or(ValueSet::EMPTY)
    }

    /// Bounded hypothesis search, run when the propagation sweep stalls.
    ///
    /// Values proven unproductive are memoized in `excluded` and never
    /// retried. Each remaining candidate value is tried on a fresh clone of
    /// the board: the value is tentatively assigned to every still-open
    /// clone cell that admits it, and only a trial set that completes the
    /// clone is accepted and replayed onto the real board. A pass producing
    /// zero trial assignments means no progress is possible.
    fn simulate(&mut self) -> Result<bool, SolveError> {
        let mut excluded = ValueSet::new();
        loop {
            let open = self.unassigned_positions();
            let mut values = ValueSet::new();
            for &pos in &open {
                values |= self.cells[cell_index(pos, self.size)].candidates();
            }
            let values = values.difference(excluded);

            let mut trials_this_pass = 0_usize;
            for value in values {
                let mut trial = self.simulation_clone()?;
                let mut assignments = Vec::new();
                for &pos in &open {
                    let cell = &trial.cells[cell_index(pos, trial.size)];
                    if cell.is_assigned() || !cell.candidates().contains(value) {
                        continue;
                    }
                    trial.assign(pos, value)?;
                    assignments.push((pos, value));
                }
                trials_this_pass += assignments.len();

                if trial.check_complete() {
                    debug!(
                        "simulation of value {value} completed the board after {} trial assignments",
                        assignments.len(),
                    );
                    for (pos, value) in assignments {
                        self.assign(pos, value)?;
                    }
                    return Ok(self.check_complete());
                }
                debug!("simulation excluded value {value}");
                excluded.insert(value);
            }

            if trials_this_pass == 0 {
                return Ok(false);
            }
        }
    }

    /// Deep copy for hypothesis testing: a fresh board of the same size with
    /// only the assigned values replayed, so the clone's candidate sets are
    /// rebuilt from scratch by the assignment cascade. The clone shares no
    /// state with `self` and enters solving mode.
    fn simulation_clone(&self) -> Result<Self, SolveError> {
        let mut clone = Self::new(self.size)?;
        for (pos, cell) in self.cells() {
            if let Some(value) = cell.value() {
                clone.assign(pos, value)?;
            }
        }
        clone.solving = true;
        Ok(clone)
    }

    /// Recomputes the blocks of `pos` and of every cell they resolve, until
    /// the cascade is quiescent.
    fn cascade_from(&mut self, pos: Position) {
        let mut pending = vec![pos];
        while let Some(next) = pending.pop() {
            for block in self.blocks_of(next) {
                let resolved = block.recompute_candidates(&mut self.cells, self.size, self.solving);
                pending.extend(resolved);
            }
        }
    }

    /// Latches and returns the completion flag.
    fn check_complete(&mut self) -> bool {
        if !self.complete && self.cells.iter().all(Cell::is_assigned) {
            self.complete = true;
        }
        self.complete
    }

    /// The row, column, and box containing `pos`.
    fn blocks_of(&self, pos: Position) -> [ConstraintBlock; 3] {
        [
            self.row_block(pos.y()),
            self.column_block(pos.x()),
            self.box_block_at(geometry::box_origin(pos, self.box_dim)),
        ]
    }

    fn row_block(&self, y: u8) -> ConstraintBlock {
        ConstraintBlock::new((0..self.size).map(|x| Position::new(x, y)).collect())
    }

    fn column_block(&self, x: u8) -> ConstraintBlock {
        ConstraintBlock::new((0..self.size).map(|y| Position::new(x, y)).collect())
    }

    fn box_block_at(&self, origin: Position) -> ConstraintBlock {
        let mut positions = Vec::with_capacity(usize::from(self.size));
        for dx in 0..self.box_dim {
            for dy in 0..self.box_dim {
                positions.push(Position::new(origin.x() + dx, origin.y() + dy));
            }
        }
        ConstraintBlock::new(positions)
    }

    fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Position::new(x, y)))
    }

    fn unassigned_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| !self.cells[cell_index(pos, self.size)].is_assigned())
            .collect()
    }

    fn checked_index(&self, pos: Position) -> Result<usize, SolveError> {
        if pos.x() >= self.size || pos.y() >= self.size {
            return Err(SolveError::OutOfRange {
                pos,
                size: self.size,
            });
        }
        Ok(cell_index(pos, self.size))
    }
}
