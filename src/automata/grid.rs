use std::collections::VecDeque;

use log::debug;

use crate::auxiliary::randomizer::generate_seed;
use crate::automata::cell::Cell;
use crate::automata::rules::{next_1d, next_2d, rule_bits};
use crate::config::{Config, Mode};

/// Chance that a cell starts alive when a 2D grid is seeded.
const INITIAL_FILL: f32 = 0.15;

/// Owns the simulation state for whichever mode is active.
///
/// In 2D mode this is a toroidal grid of [`Cell`]s. In 1D mode it is a
/// bounded history of rows, oldest first, that scrolls as new generations
/// are appended. Only the structure for the current mode is populated.
pub struct GridStore {
    mode: Mode,
    cells: Vec<Vec<Cell>>,
    history: VecDeque<Vec<bool>>,
    viewport: (u32, u32),
    generation: u64,
    cycle_hue: u16,
    rng: randomize::PCG32,
}

/// Number of cells needed to cover `extent` pixels.
fn cells_across(extent: u32, resolution: u32) -> usize {
    let resolution = u64::from(resolution);
    ((u64::from(extent) + resolution - 1) / resolution) as usize
}

impl GridStore {
    pub fn new() -> Self {
        Self::with_seed(generate_seed())
    }

    pub fn with_seed(seed: (u64, u64)) -> Self {
        Self {
            mode: Mode::TwoD,
            cells: Vec::new(),
            history: VecDeque::new(),
            viewport: (0, 0),
            generation: 0,
            cycle_hue: 0,
            rng: seed.into(),
        }
    }

    /// Throws away all state and rebuilds it for `mode`, sized to cover
    /// `viewport` with cells of `resolution` pixels.
    pub fn initialize(&mut self, mode: Mode, resolution: u32, viewport: (u32, u32)) {
        let cols = cells_across(viewport.0, resolution);
        let rows = cells_across(viewport.1, resolution);
        debug!(
            "initializing {:?} store: {}x{} cells at {}px",
            mode, cols, rows, resolution
        );

        self.mode = mode;
        self.viewport = viewport;
        self.generation = 0;
        self.cells = Vec::new();
        self.history = VecDeque::new();

        match mode {
            Mode::TwoD => {
                let rng = &mut self.rng;
                self.cells = (0..rows)
                    .map(|_| {
                        (0..cols)
                            .map(|_| {
                                let roll = randomize::f32_half_open_right(rng.next_u32());
                                Cell::new(roll < INITIAL_FILL)
                            })
                            .collect()
                    })
                    .collect();
            }
            Mode::OneD => {
                if cols > 0 {
                    self.history.push_back(Self::seed_row(cols));
                }
            }
        }
    }

    fn seed_row(cols: usize) -> Vec<bool> {
        let mut row = vec![false; cols];
        row[cols / 2] = true;
        row
    }

    /// Empties the 2D grid, or restarts the 1D history from a single seed.
    /// The generation counter starts over either way.
    pub fn clear(&mut self) {
        self.generation = 0;
        match self.mode {
            Mode::TwoD => {
                for row in self.cells.iter_mut() {
                    row.fill(Cell::DEAD);
                }
            }
            Mode::OneD => {
                let cols = self.history.back().map_or(0, Vec::len);
                self.history.clear();
                if cols > 0 {
                    self.history.push_back(Self::seed_row(cols));
                }
            }
        }
    }

    /// Advances one generation using the rules in `config`.
    pub fn step(&mut self, config: &Config) {
        match self.mode {
            Mode::TwoD => self.step_2d(config),
            Mode::OneD => self.step_1d(config),
        }
        self.generation += 1;
        self.cycle_hue = (self.cycle_hue + 1) % 360;
    }

    fn step_2d(&mut self, config: &Config) {
        // Built from the untouched current grid and swapped in whole.
        let next = self
            .cells
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let n = self.live_neighbors(x, y);
                        let alive = next_2d(cell.is_alive(), n, config.birth, config.survival);
                        cell.next_state(alive)
                    })
                    .collect()
            })
            .collect();
        self.cells = next;
    }

    fn step_1d(&mut self, config: &Config) {
        let bits = rule_bits(config.rule);
        let Some(last) = self.history.back() else {
            return;
        };
        let width = last.len();
        let next: Vec<bool> = (0..width)
            .map(|i| {
                let left = last[(i + width - 1) % width];
                let right = last[(i + 1) % width];
                next_1d(&bits, left, last[i], right)
            })
            .collect();
        self.history.push_back(next);

        let bound = cells_across(self.viewport.1, config.resolution);
        while self.history.len() > bound {
            self.history.pop_front();
        }
    }

    /// Counts live cells in the toroidal Moore neighborhood of `(x, y)`.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let rows = self.cells.len() as isize;
        if rows == 0 || self.cells.iter().any(Vec::is_empty) {
            return 0;
        }
        let mut count = 0;
        for dy in [-1isize, 0, 1] {
            for dx in [-1isize, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let ny = (y as isize + dy).rem_euclid(rows) as usize;
                let cols = self.cells[ny].len() as isize;
                let nx = (x as isize + dx).rem_euclid(cols) as usize;
                if self.cells[ny][nx].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    fn cell_at(&self, x: isize, y: isize, resolution: u32) -> Option<(usize, usize)> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        let resolution = resolution as usize;
        let (cx, cy) = (x / resolution, y / resolution);
        let row = self.cells.get(cy)?;
        (cx < row.len()).then_some((cx, cy))
    }

    /// Flips the cell under a pixel position. Returns the new state, or
    /// `None` when nothing was touched (1D mode, or outside the grid).
    pub fn toggle_cell(
        &mut self,
        mode: Mode,
        position: (isize, isize),
        resolution: u32,
    ) -> Option<bool> {
        if mode == Mode::OneD {
            return None;
        }
        let (cx, cy) = self.cell_at(position.0, position.1, resolution)?;
        let cell = &mut self.cells[cy][cx];
        cell.toggle();
        Some(cell.is_alive())
    }

    /// Sets every cell on the straight line between two pixel positions.
    /// Painting stops as soon as the line leaves the grid.
    pub fn paint_line(
        &mut self,
        from: (isize, isize),
        to: (isize, isize),
        resolution: u32,
        alive: bool,
    ) {
        if self.mode == Mode::OneD || self.cells.is_empty() || self.cells[0].is_empty() {
            return;
        }
        let res = resolution as isize;
        let rows = self.cells.len() as isize;
        let cols = self.cells[0].len() as isize;
        // Clamp only the start; the far end is allowed to run off the grid.
        let x0 = from.0.div_euclid(res).clamp(0, cols - 1);
        let y0 = from.1.div_euclid(res).clamp(0, rows - 1);
        let (x1, y1) = (to.0.div_euclid(res), to.1.div_euclid(res));
        for (x, y) in line_drawing::Bresenham::new((x0, y0), (x1, y1)) {
            if x < 0 || y < 0 || x >= cols || y >= rows {
                break;
            }
            self.cells[y as usize][x as usize].set_alive(alive);
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cycle_hue(&self) -> u16 {
        self.cycle_hue
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn history(&self) -> &VecDeque<Vec<bool>> {
        &self.history
    }

    pub fn population(&self) -> usize {
        match self.mode {
            Mode::TwoD => self
                .cells
                .iter()
                .map(|row| row.iter().filter(|c| c.is_alive()).count())
                .sum(),
            Mode::OneD => self
                .history
                .back()
                .map_or(0, |row| row.iter().filter(|&&c| c).count()),
        }
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}
