//! A two-level, fixed-capacity position cache
//!
//! The outer level maps the mask of the player to move to a sub-table; the
//! sub-table maps the opponent's mask to the search result computed for
//! that exact position. Both levels are open-addressing arenas with linear
//! probing and no deletion: capacity is fixed up front and an insert that
//! would push a level past its load limit fails instead of growing, which
//! bounds memory and leaves search correctness to the caller's fallback.

use crate::solver::Outcome;

const OUTER_CAPACITY: usize = 50_000;
const LOAD_LIMIT: f64 = 0.85;
const PROBE_PRIME: u64 = 18_243_357_615_227;

/// Sub-table capacity by plies from the root at creation time; shallow
/// plies hold few distinct positions, deeper tiers level off
const TIER_CAPACITY: [usize; 13] = [
    1, 8, 48, 64, 128, 128, 384, 512, 1024, 1024, 1024, 1024, 1024,
];

// board masks only use the low 42 bits, so bit 63 can mark vacant slots
// (guaranteed by the dimension assert at the crate root)
const VACANT: u64 = 1 << 63;

fn probe_start(key: u64, capacity: usize) -> usize {
    (((key % PROBE_PRIME) + (key >> 32)) % capacity as u64) as usize
}

#[derive(Copy, Clone)]
struct Entry {
    key: u64,
    outcome: Outcome,
}

#[derive(Clone)]
struct SubTable {
    key: u64,
    len: usize,
    entries: Vec<Entry>,
}

impl SubTable {
    fn new(key: u64, capacity: usize) -> Self {
        Self {
            key,
            len: 0,
            entries: vec![
                Entry {
                    key: VACANT,
                    outcome: Outcome::default(),
                };
                capacity
            ],
        }
    }

    fn insert(&mut self, key: u64, outcome: Outcome) -> bool {
        let capacity = self.entries.len();
        // fail closed before the arena fills: probing relies on a vacant
        // slot always existing
        if self.len + 1 == capacity || self.len as f64 / capacity as f64 > LOAD_LIMIT {
            return false;
        }

        let mut idx = probe_start(key, capacity);
        loop {
            if self.entries[idx].key == VACANT {
                self.entries[idx] = Entry { key, outcome };
                self.len += 1;
                return true;
            }
            if self.entries[idx].key == key {
                // an equal key within one root search always carries an
                // equal result
                return true;
            }
            idx = (idx + 1) % capacity;
        }
    }

    fn get(&self, key: u64) -> Option<Outcome> {
        let mut idx = probe_start(key, self.entries.len());
        loop {
            if self.entries[idx].key == VACANT {
                return None;
            }
            if self.entries[idx].key == key {
                return Some(self.entries[idx].outcome);
            }
            idx = (idx + 1) % self.entries.len();
        }
    }
}

/// A transposition cache for one root evaluation
///
/// Keyed by the exact (player to move, opponent) mask pair. Within one
/// root search the remaining depth at a given ply is fixed, so a hit is
/// always a result of the same remaining-depth search; the table must be
/// built fresh for every root call and never reused across calls.
#[derive(Clone)]
pub struct TranspositionTable {
    slots: Vec<Option<SubTable>>,
    len: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            slots: vec![None; OUTER_CAPACITY],
            len: 0,
        }
    }

    fn sub_table(&self, mover: u64) -> Option<&SubTable> {
        let mut idx = probe_start(mover, OUTER_CAPACITY);
        loop {
            match &self.slots[idx] {
                None => return None,
                Some(sub) if sub.key == mover => return Some(sub),
                Some(_) => idx = (idx + 1) % OUTER_CAPACITY,
            }
        }
    }

    fn sub_table_mut(&mut self, mover: u64, ply: usize) -> Option<&mut SubTable> {
        let mut idx = probe_start(mover, OUTER_CAPACITY);
        loop {
            match &self.slots[idx] {
                None => break,
                Some(sub) if sub.key == mover => break,
                Some(_) => idx = (idx + 1) % OUTER_CAPACITY,
            }
        }

        if self.slots[idx].is_none() {
            if self.len + 1 == OUTER_CAPACITY
                || self.len as f64 / OUTER_CAPACITY as f64 > LOAD_LIMIT
            {
                return None;
            }
            let capacity = TIER_CAPACITY[ply.min(TIER_CAPACITY.len() - 1)];
            self.slots[idx] = Some(SubTable::new(mover, capacity));
            self.len += 1;
        }
        self.slots[idx].as_mut()
    }

    /// Looks up the cached result for a position
    pub fn get(&self, mover: u64, opponent: u64) -> Option<Outcome> {
        self.sub_table(mover).and_then(|sub| sub.get(opponent))
    }

    /// Caches the result for a position, sizing a new sub-table by `ply`
    ///
    /// Returns false when either level is at capacity; the result is
    /// simply not cached and the search carries on.
    pub fn insert(&mut self, mover: u64, opponent: u64, outcome: Outcome, ply: usize) -> bool {
        match self.sub_table_mut(mover, ply) {
            Some(sub) => sub.insert(opponent, outcome),
            None => false,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
