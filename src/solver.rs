//! A depth-limited agent to evaluate Connect 4 positions
//!
//! The search is a plain negamax over the bitboard representation: every
//! recursive call scores the position for the player about to move there,
//! and the caller flips the sign and counts one more ply on the way back
//! up. The first [`CACHED_PLIES`] plies below the root consult a
//! transposition table so positions reached by move transposition are not
//! searched twice; deeper plies see too little reuse to be worth caching
//! and run unmemoized.

use std::time::{Duration, Instant};

use crate::alignment::connects_four;
use crate::bitboard::BitBoard;
use crate::transposition_table::TranspositionTable;
use crate::{HEIGHT, WIDTH};

/// The number of plies from the root that consult the transposition table
pub const CACHED_PLIES: u32 = 10;

/// The verdict of one searched node, from the perspective of the player
/// about to move there
///
/// `score` is +1 for a forced win, -1 for a forced loss and 0 for a drawn
/// or still-undetermined line; `win_in` counts the plies until the verdict
/// is forced. This pair is what negamax propagates and what the
/// transposition table stores.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Outcome {
    pub score: i8,
    pub win_in: u8,
}

impl Outcome {
    // depth ran out with nothing decided: a draw within the horizon, not
    // a proven draw
    const HORIZON: Self = Self { score: 0, win_in: 0 };

    // no legal move left at the node
    const DRAWN: Self = Self { score: 0, win_in: 0 };

    // a move completing four-in-a-row ends the node outright
    const IMMEDIATE_WIN: Self = Self { score: 1, win_in: 1 };

    // a child's verdict seen from its parent
    fn flipped(self) -> Self {
        Self {
            score: -self.score,
            win_in: self.win_in + 1,
        }
    }

    // Prefer the higher score; between equal losses, the one that holds
    // out longest; otherwise the one that is forced soonest.
    fn is_better_than(self, other: Self) -> bool {
        if self.score != other.score {
            return self.score > other.score;
        }
        if self.score < 0 {
            self.win_in > other.win_in
        } else {
            self.win_in < other.win_in
        }
    }
}

/// The verdict of a root evaluation: position score, best column and plies
/// until the verdict is forced
///
/// `column` is `None` only when the position has no legal move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Evaluation {
    pub score: i8,
    pub column: Option<usize>,
    pub win_in: u32,
}

/// Diagnostic tallies for one `Solver`, accumulated across its calls
#[derive(Copy, Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub cache_inserts: u64,
    pub cache_insert_failures: u64,
}

/// An agent to evaluate Connect 4 positions
#[derive(Clone)]
pub struct Solver {
    board: BitBoard,

    /// Search diagnostics for this `Solver` (never process-wide state, so
    /// repeated or side-by-side evaluations cannot interfere)
    pub stats: SearchStats,
}

impl Solver {
    /// Creates a new `Solver` for a position
    pub fn new(board: BitBoard) -> Self {
        Self {
            board,
            stats: SearchStats::default(),
        }
    }

    /// Evaluates the position to a fixed depth in plies
    ///
    /// Allocates one fresh transposition table for the call and releases
    /// it on return. A score of +1 means the player to move forces a win,
    /// -1 that the opponent does, 0 that nothing is decided within the
    /// horizon (or, with no legal move left, that the game is drawn).
    pub fn evaluate(&mut self, depth: u32) -> Evaluation {
        self.stats.nodes += 1;

        if depth == 0 {
            return Evaluation {
                score: 0,
                column: None,
                win_in: 0,
            };
        }

        let mut table = TranspositionTable::new();
        let (mover, opponent) = self.board.mover_masks();
        let combined = mover | opponent;

        let mut best: Option<(Outcome, usize)> = None;
        for column in 0..WIDTH {
            let row = match BitBoard::open_row(BitBoard::column_state(combined, column)) {
                Some(row) => row,
                None => continue,
            };
            let moved = mover | BitBoard::cell_mask(row, column);

            // a win in one ply dominates any deeper alternative
            if connects_four(moved, row, column) {
                return Evaluation {
                    score: Outcome::IMMEDIATE_WIN.score,
                    column: Some(column),
                    win_in: Outcome::IMMEDIATE_WIN.win_in as u32,
                };
            }

            let candidate = self
                .negamax(opponent, moved, depth - 1, CACHED_PLIES - 1, &mut table)
                .flipped();
            best = match best {
                Some((current, _)) if !candidate.is_better_than(current) => best,
                _ => Some((candidate, column)),
            };
        }

        match best {
            Some((outcome, column)) => Evaluation {
                score: outcome.score,
                column: Some(column),
                win_in: outcome.win_in as u32,
            },
            // no legal moves at the root: a proven draw
            None => Evaluation {
                score: 0,
                column: None,
                win_in: 0,
            },
        }
    }

    /// Returns true if the player to move wins immediately by playing
    /// `column`
    pub fn does_move_win(&self, column: usize) -> bool {
        if column >= WIDTH {
            return false;
        }
        let (mover, opponent) = self.board.mover_masks();
        match BitBoard::open_row(BitBoard::column_state(mover | opponent, column)) {
            Some(row) => connects_four(mover | BitBoard::cell_mask(row, column), row, column),
            None => false,
        }
    }

    /// Evaluates the position with iterative deepening under a wall-clock
    /// budget
    ///
    /// The depth grows one ply at a time and the budget is checked between
    /// iterations; a running iteration is never interrupted. Deepening
    /// stops early once the verdict is decisive, since a proven forced
    /// line cannot be overturned by looking further ahead.
    pub fn solve_with_timeout(&mut self, budget: Duration) -> Evaluation {
        let start = Instant::now();
        let remaining = (WIDTH * HEIGHT) as u32 - self.board.turn_count();

        let mut depth = 1;
        let mut eval = self.evaluate(depth);
        while eval.score == 0 && depth < remaining && start.elapsed() < budget {
            depth += 1;
            eval = self.evaluate(depth);
        }
        eval
    }

    /// The recursive step while the transposition table is still eligible
    fn negamax(
        &mut self,
        mover: u64,
        opponent: u64,
        depth: u32,
        cached_plies_left: u32,
        table: &mut TranspositionTable,
    ) -> Outcome {
        // deep plies have too many distinct positions and too little
        // transposition reuse to be worth caching
        if cached_plies_left == 0 {
            return self.negamax_deep(mover, opponent, depth);
        }
        self.stats.nodes += 1;

        if depth == 0 {
            return Outcome::HORIZON;
        }

        if let Some(cached) = table.get(mover, opponent) {
            self.stats.cache_hits += 1;
            return cached;
        }

        let combined = mover | opponent;
        let mut best: Option<Outcome> = None;
        for column in 0..WIDTH {
            let row = match BitBoard::open_row(BitBoard::column_state(combined, column)) {
                Some(row) => row,
                None => continue,
            };
            let moved = mover | BitBoard::cell_mask(row, column);

            if connects_four(moved, row, column) {
                best = Some(Outcome::IMMEDIATE_WIN);
                break;
            }

            let candidate = self
                .negamax(opponent, moved, depth - 1, cached_plies_left - 1, table)
                .flipped();
            best = match best {
                Some(current) if !candidate.is_better_than(current) => Some(current),
                _ => Some(candidate),
            };
        }
        let outcome = best.unwrap_or(Outcome::DRAWN);

        let ply = (CACHED_PLIES - cached_plies_left) as usize;
        if table.insert(mover, opponent, outcome, ply) {
            self.stats.cache_inserts += 1;
        } else {
            // not an error: the result is still returned, just not cached
            self.stats.cache_insert_failures += 1;
        }
        outcome
    }

    /// The recursive step past the hash-eligible horizon: identical
    /// semantics, no cache lookups or inserts
    fn negamax_deep(&mut self, mover: u64, opponent: u64, depth: u32) -> Outcome {
        self.stats.nodes += 1;

        if depth == 0 {
            return Outcome::HORIZON;
        }

        let combined = mover | opponent;
        let mut best: Option<Outcome> = None;
        for column in 0..WIDTH {
            let row = match BitBoard::open_row(BitBoard::column_state(combined, column)) {
                Some(row) => row,
                None => continue,
            };
            let moved = mover | BitBoard::cell_mask(row, column);

            if connects_four(moved, row, column) {
                best = Some(Outcome::IMMEDIATE_WIN);
                break;
            }

            let candidate = self.negamax_deep(opponent, moved, depth - 1).flipped();
            best = match best {
                Some(current) if !candidate.is_better_than(current) => Some(current),
                _ => Some(candidate),
            };
        }
        best.unwrap_or(Outcome::DRAWN)
    }
}

impl std::ops::Deref for Solver {
    type Target = BitBoard;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
