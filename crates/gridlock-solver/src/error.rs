//! Error taxonomy for board construction, assignment, and solving.

use gridlock_core::Position;

/// Errors surfaced by the board and the puzzle facade.
///
/// Every error is reported immediately to the caller of the operation that
/// triggered it. The only internal retry lives in the simulation fallback,
/// where a failed trial value is memoized and the next one tried; callers
/// only ever observe final success or [`SolveError::Unsolvable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    /// Coordinates outside the board on either axis.
    #[display("coordinates {pos} are outside the {size}x{size} board")]
    OutOfRange {
        /// The rejected coordinates.
        pos: Position,
        /// The board dimension.
        size: u8,
    },
    /// The target cell is unassigned and the value is not among its
    /// remaining candidates.
    #[display("invalid assignment of {value} at {pos}: not among the remaining candidates")]
    InvalidAssignment {
        /// The target cell.
        pos: Position,
        /// The rejected value.
        value: u8,
    },
    /// The target cell already holds a different value.
    #[display("conflicting assignment at {pos}: cell holds {current}, attempted {value}")]
    ConflictingAssignment {
        /// The target cell.
        pos: Position,
        /// The value the cell already holds.
        current: u8,
        /// The rejected value.
        value: u8,
    },
    /// The box-dimension derivation yields no square divisor of at least 3
    /// for the requested board size.
    #[display("{size} is not a valid board size: no box of side >= 3 tiles it into {size}-cell blocks")]
    InvalidSize {
        /// The rejected size.
        size: u8,
    },
    /// The pre-filled board is logically inconsistent: cells are partially
    /// constrained but none has collapsed to a single possible value.
    #[display("invalid board configuration: there are constrained cells but none with a single possible value")]
    InvalidConfiguration,
    /// Solving was requested before any initial cell value was assigned; a
    /// blank board cannot be distinguished from one not yet configured.
    #[display("cannot solve before any initial cell value has been assigned")]
    NotConfigured,
    /// Neither propagation nor simulation could complete the board.
    #[display("unable to solve: propagation and simulation are both exhausted")]
    Unsolvable,
}
