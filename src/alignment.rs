//! Four-in-a-row detection through a single cell
//!
//! All checks operate on one player's occupancy mask *after* a candidate
//! move, looking only at the lines through the cell just played, so a
//! check is O(1) rather than a full-board scan.

use crate::bitboard::BitBoard;
use crate::{HEIGHT, WIDTH};

// a mask of `count` bits spaced `stride` apart, starting at bit 0
const fn strided_mask(count: usize, stride: usize) -> u64 {
    let mut mask = 0;
    let mut i = 0;
    while i < count {
        mask |= 1 << (i * stride);
        i += 1;
    }
    mask
}

// within a column field, cells are adjacent bits
const COLUMN_WINDOW: u64 = strided_mask(4, 1);

// along a row, cells are one column field (6 bits) apart
const ROW_WINDOW: u64 = strided_mask(4, HEIGHT);
const ROW_SPAN: u64 = strided_mask(WIDTH, HEIGHT);

// along an up diagonal, stepping one column right goes one row up: 5 bits
const UP_WINDOW: u64 = strided_mask(4, HEIGHT - 1);
const UP_SPAN_5: u64 = strided_mask(5, HEIGHT - 1);
const UP_SPAN_6: u64 = strided_mask(6, HEIGHT - 1);

// along a down diagonal, stepping one column right goes one row down: 7 bits
const DOWN_WINDOW: u64 = strided_mask(4, HEIGHT + 1);
const DOWN_SPAN_5: u64 = strided_mask(5, HEIGHT + 1);
const DOWN_SPAN_6: u64 = strided_mask(6, HEIGHT + 1);

// slides the 4-cell template across the extracted line, one stride at a time
fn line_contains_window(mut line: u64, window: u64, stride: usize) -> bool {
    while line >= window {
        if line & window == window {
            return true;
        }
        line >>= stride;
    }
    false
}

fn column_connects_four(pieces: u64, column: usize) -> bool {
    line_contains_window(BitBoard::column_state(pieces, column), COLUMN_WINDOW, 1)
}

fn row_connects_four(pieces: u64, row: usize) -> bool {
    line_contains_window((pieces >> row) & ROW_SPAN, ROW_WINDOW, HEIGHT)
}

// Up diagonals are indexed by row + column; only the six running through 4
// or more cells can hold an alignment. The shift brings the diagonal's
// lowest cell to bit 0, the span selects its 4, 5 or 6 cells.
fn up_diag_connects_four(pieces: u64, row: usize, column: usize) -> bool {
    let (offset, span) = match row + column {
        3 => (3, UP_WINDOW),
        4 => (4, UP_SPAN_5),
        5 => (5, UP_SPAN_6),
        6 => (11, UP_SPAN_6),
        7 => (17, UP_SPAN_5),
        8 => (23, UP_WINDOW),
        _ => return false,
    };
    line_contains_window((pieces >> offset) & span, UP_WINDOW, HEIGHT - 1)
}

fn down_diag_connects_four(pieces: u64, row: usize, column: usize) -> bool {
    let (offset, span) = match (WIDTH - 1 - column) + row {
        3 => (18, DOWN_WINDOW),
        4 => (12, DOWN_SPAN_5),
        5 => (6, DOWN_SPAN_6),
        6 => (0, DOWN_SPAN_6),
        7 => (1, DOWN_SPAN_5),
        8 => (2, DOWN_WINDOW),
        _ => return false,
    };
    line_contains_window((pieces >> offset) & span, DOWN_WINDOW, HEIGHT + 1)
}

/// Returns true iff the player owning `pieces` has four-in-a-row through
/// the cell at (`row`, `column`)
pub fn connects_four(pieces: u64, row: usize, column: usize) -> bool {
    column_connects_four(pieces, column)
        || row_connects_four(pieces, row)
        || up_diag_connects_four(pieces, row, column)
        || down_diag_connects_four(pieces, row, column)
}
