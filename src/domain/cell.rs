/// State of a single grid position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Row index into a rule table: 0 for dead, 1 for alive
    pub const fn index(self) -> usize {
        match self {
            Cell::Dead => 0,
            Cell::Alive => 1,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dead() {
        assert_eq!(Cell::default(), Cell::Dead);
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(Cell::from(true), Cell::Alive);
        assert_eq!(Cell::from(false), Cell::Dead);
        assert!(Cell::Alive.is_alive());
        assert!(!Cell::Dead.is_alive());
    }

    #[test]
    fn test_table_index() {
        assert_eq!(Cell::Dead.index(), 0);
        assert_eq!(Cell::Alive.index(), 1);
    }
}
