//! A single grid cell and its remaining candidates.

use crate::value_set::ValueSet;

/// Error produced when a value cannot be assigned to a cell.
///
/// The cell does not know its own coordinates; callers that do (the board)
/// wrap these variants with position context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CellError {
    /// The cell is unassigned but the value is not among its candidates.
    #[display("value {value} is not among the cell's remaining candidates")]
    NotCandidate {
        /// The rejected value.
        value: u8,
    },
    /// The cell already holds a different value.
    #[display("cell already holds {current}, cannot assign {value}")]
    Conflicting {
        /// The value the cell currently holds.
        current: u8,
        /// The rejected value.
        value: u8,
    },
}

/// A single grid position holding an assigned value or a set of candidates.
///
/// Invariant: an assigned cell's candidate set is the singleton of its value.
/// The candidate set is mutated only through [`Cell::try_assign`] and
/// [`Cell::eliminate`], which is how the board keeps cascade recomputation
/// consistent.
///
/// # Examples
///
/// ```
/// use gridlock_core::Cell;
///
/// let mut cell = Cell::unassigned(9);
/// assert_eq!(cell.candidates().len(), 9);
///
/// let changed = cell.try_assign(5)?;
/// assert!(changed);
/// assert_eq!(cell.value(), Some(5));
/// assert_eq!(cell.candidates().sole_value(), Some(5));
/// # Ok::<(), gridlock_core::CellError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    value: Option<u8>,
    candidates: ValueSet,
}

impl Cell {
    /// Creates an unassigned cell with every value in `1..=size` as a
    /// candidate.
    #[must_use]
    pub fn unassigned(size: u8) -> Self {
        Self {
            value: None,
            candidates: ValueSet::full(size),
        }
    }

    /// Returns the assigned value, or `None` while unassigned.
    #[must_use]
    pub const fn value(&self) -> Option<u8> {
        self.value
    }

    /// Returns `true` if the cell holds a value.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the remaining candidate values.
    #[must_use]
    pub const fn candidates(&self) -> ValueSet {
        self.candidates
    }

    /// Attempts to assign `value` to the cell.
    ///
    /// Returns `Ok(true)` when the cell transitions from unassigned to
    /// assigned; the caller must then recompute the constraint blocks the
    /// cell belongs to. Re-assigning the value a cell already holds is a
    /// silent no-op (`Ok(false)`).
    ///
    /// # Errors
    ///
    /// - [`CellError::Conflicting`] if the cell holds a different value.
    /// - [`CellError::NotCandidate`] if the cell is unassigned and `value`
    ///   has been eliminated from its candidates.
    pub fn try_assign(&mut self, value: u8) -> Result<bool, CellError> {
        match self.value {
            Some(current) if current == value => Ok(false),
            Some(current) => Err(CellError::Conflicting { current, value }),
            None if self.candidates.contains(value) => {
                self.value = Some(value);
                self.candidates = ValueSet::singleton(value);
                Ok(true)
            }
            None => Err(CellError::NotCandidate { value }),
        }
    }

    /// Removes `value` from the candidates of an unassigned cell.
    ///
    /// When the removal leaves exactly one candidate and `solving` is true,
    /// the cell resolves itself to that candidate. Returns `true` when such
    /// an auto-resolution occurred; the caller's view of the block's
    /// assigned values is then stale and must be recomputed. Assigned cells
    /// are never mutated.
    pub fn eliminate(&mut self, value: u8, solving: bool) -> bool {
        if self.value.is_none() && self.candidates.contains(value) {
            self.candidates.remove(value);
        }
        if solving
            && self.value.is_none()
            && let Some(last) = self.candidates.sole_value()
        {
            self.value = Some(last);
            return true;
        }
        false
    }

    /// Restores the candidate set to the full range `1..=size`, or to the
    /// singleton of the held value for an assigned cell.
    pub fn reset_candidates(&mut self, size: u8) {
        self.candidates = match self.value {
            Some(value) => ValueSet::singleton(value),
            None => ValueSet::full(size),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_collapses_candidates() {
        let mut cell = Cell::unassigned(9);
        assert_eq!(cell.try_assign(4), Ok(true));
        assert_eq!(cell.value(), Some(4));
        assert_eq!(cell.candidates(), ValueSet::singleton(4));
    }

    #[test]
    fn test_assign_is_idempotent_for_same_value() {
        let mut cell = Cell::unassigned(9);
        assert_eq!(cell.try_assign(4), Ok(true));
        assert_eq!(cell.try_assign(4), Ok(false));
    }

    #[test]
    fn test_assign_rejects_conflicting_value() {
        let mut cell = Cell::unassigned(9);
        assert_eq!(cell.try_assign(4), Ok(true));
        assert_eq!(
            cell.try_assign(7),
            Err(CellError::Conflicting {
                current: 4,
                value: 7
            })
        );
        assert_eq!(cell.value(), Some(4));
    }

    #[test]
    fn test_assign_rejects_eliminated_value() {
        let mut cell = Cell::unassigned(9);
        cell.eliminate(4, false);
        assert_eq!(cell.try_assign(4), Err(CellError::NotCandidate { value: 4 }));
        assert_eq!(cell.value(), None);
    }

    #[test]
    fn test_eliminate_does_not_touch_assigned_cell() {
        let mut cell = Cell::unassigned(9);
        cell.try_assign(4).unwrap();
        assert!(!cell.eliminate(4, true));
        assert_eq!(cell.candidates(), ValueSet::singleton(4));
    }

    #[test]
    fn test_eliminate_auto_resolves_last_candidate() {
        let mut cell = Cell::unassigned(4);
        assert!(!cell.eliminate(1, true));
        assert!(!cell.eliminate(2, true));
        assert!(cell.eliminate(3, true));
        assert_eq!(cell.value(), Some(4));
        assert_eq!(cell.candidates(), ValueSet::singleton(4));
    }

    #[test]
    fn test_eliminate_without_solving_leaves_singleton_unassigned() {
        let mut cell = Cell::unassigned(4);
        assert!(!cell.eliminate(1, false));
        assert!(!cell.eliminate(2, false));
        assert!(!cell.eliminate(3, false));
        assert_eq!(cell.value(), None);
        assert_eq!(cell.candidates().sole_value(), Some(4));
    }

    #[test]
    fn test_reset_candidates() {
        let mut cell = Cell::unassigned(9);
        cell.eliminate(1, false);
        cell.eliminate(2, false);
        cell.reset_candidates(9);
        assert_eq!(cell.candidates(), ValueSet::full(9));

        cell.try_assign(6).unwrap();
        cell.reset_candidates(9);
        assert_eq!(cell.candidates(), ValueSet::singleton(6));
    }
}
