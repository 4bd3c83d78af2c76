use std::fmt;
use std::str::FromStr;

use super::Cell;
use crate::error::LifeError;

/// Largest neighbor count a Moore neighborhood can produce.
pub const MAX_NEIGHBORS: u8 = 8;

/// Lookup table for a Life-like automaton.
///
/// Indexed by `[current state][neighbor count]`, so swapping rule families
/// never touches the stepping code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RuleTable {
    table: [[Cell; 9]; 2],
}

impl RuleTable {
    /// Build a table from the neighbor counts that give birth and survival.
    /// Counts above 8 are ignored since no cell can reach them.
    pub fn from_counts(birth: &[u8], survival: &[u8]) -> Self {
        let mut table = [[Cell::Dead; 9]; 2];
        for &n in birth.iter().filter(|&&n| n <= MAX_NEIGHBORS) {
            table[Cell::Dead.index()][n as usize] = Cell::Alive;
        }
        for &n in survival.iter().filter(|&&n| n <= MAX_NEIGHBORS) {
            table[Cell::Alive.index()][n as usize] = Cell::Alive;
        }
        Self { table }
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::from_counts(&[3], &[2, 3])
    }

    /// HighLife (B36/S23), home of the replicator
    pub fn highlife() -> Self {
        Self::from_counts(&[3, 6], &[2, 3])
    }

    /// Diamoeba (B35678/S5678)
    pub fn diamoeba() -> Self {
        Self::from_counts(&[3, 5, 6, 7, 8], &[5, 6, 7, 8])
    }

    /// Day & Night (B3678/S34678), symmetric under inversion
    pub fn day_and_night() -> Self {
        Self::from_counts(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// Seeds (B2/S), every live cell dies each generation
    pub fn seeds() -> Self {
        Self::from_counts(&[2], &[])
    }

    /// Next state of a cell with `neighbors` live neighbors.
    ///
    /// # Panics
    ///
    /// If `neighbors` exceeds 8. Only a broken neighbor count can produce that.
    #[inline]
    pub fn next_state(&self, current: Cell, neighbors: u8) -> Cell {
        assert!(
            neighbors <= MAX_NEIGHBORS,
            "neighbor count {neighbors} outside the Moore range 0..=8"
        );
        self.table[current.index()][neighbors as usize]
    }

    pub fn birth_counts(&self) -> Vec<u8> {
        self.counts_for(Cell::Dead)
    }

    pub fn survival_counts(&self) -> Vec<u8> {
        self.counts_for(Cell::Alive)
    }

    fn counts_for(&self, current: Cell) -> Vec<u8> {
        (0..=MAX_NEIGHBORS)
            .filter(|&n| self.table[current.index()][n as usize].is_alive())
            .collect()
    }

    /// Render as B/S notation, e.g. `B3/S23`
    pub fn rulestring(&self) -> String {
        let digits = |counts: Vec<u8>| counts.iter().map(|n| n.to_string()).collect::<String>();
        format!("B{}/S{}", digits(self.birth_counts()), digits(self.survival_counts()))
    }

    fn parse_rulestring(s: &str) -> Option<Self> {
        let (b, s) = s.split_once('/')?;
        let b = b.strip_prefix(['B', 'b'])?;
        let s = s.strip_prefix(['S', 's'])?;
        let digits = |part: &str| -> Option<Vec<u8>> {
            part.chars()
                .map(|c| c.to_digit(10).filter(|&d| d <= 8).map(|d| d as u8))
                .collect()
        };
        Some(Self::from_counts(&digits(b)?, &digits(s)?))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rulestring())
    }
}

/// Named rule presets, in the order the CLI lists them
pub fn all_rules() -> Vec<(&'static str, RuleTable)> {
    vec![
        ("life", RuleTable::conway()),
        ("highlife", RuleTable::highlife()),
        ("diamoeba", RuleTable::diamoeba()),
        ("daynight", RuleTable::day_and_night()),
        ("seeds", RuleTable::seeds()),
    ]
}

impl FromStr for RuleTable {
    type Err = LifeError;

    /// Accepts a preset name (case-insensitive, `conway` is an alias of `life`)
    /// or a B/S rulestring.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = if wanted == "conway" { "life".to_string() } else { wanted };

        all_rules()
            .into_iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, rule)| rule)
            .or_else(|| Self::parse_rulestring(s.trim()))
            .ok_or_else(|| LifeError::UnknownRule {
                given: s.to_string(),
                valid: all_rules().iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", "),
            })
    }
}
