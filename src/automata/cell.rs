/// Age at which a surviving cell stops getting older.
pub const MAX_AGE: u8 = 100;

/// One cell of the 2D grid. The only state is its age: zero means dead,
/// anything else counts consecutive live generations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    age: u8,
}

impl Cell {
    pub const DEAD: Cell = Cell { age: 0 };

    /// A dead cell, or a newborn one.
    pub fn new(alive: bool) -> Self {
        Self { age: alive as u8 }
    }

    pub fn age(self) -> u8 {
        self.age
    }

    pub fn is_alive(self) -> bool {
        self.age > 0
    }

    #[must_use]
    pub fn next_state(self, alive: bool) -> Self {
        match (self.is_alive(), alive) {
            (_, false) => Self::DEAD,
            (false, true) => Self::new(true),
            (true, true) => Self {
                age: (self.age + 1).min(MAX_AGE),
            },
        }
    }

    pub fn set_alive(&mut self, alive: bool) {
        if self.is_alive() != alive {
            *self = Self::new(alive);
        }
    }

    pub fn toggle(&mut self) {
        *self = Self::new(!self.is_alive())
    }
}
