// the pit is a square grid, indexed as board[x][y] where x is the row and y the column
use crate::event::GameEvent;

pub const MIN_PIT_SIZE: usize = 10;
pub const MAX_PIT_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    pub fn offset(&self, delta: (i32, i32)) -> Coordinates {
        Coordinates::new(self.x + delta.0, self.y + delta.1)
    }
}

impl From<(i32, i32)> for Coordinates {
    fn from((x, y): (i32, i32)) -> Self {
        Coordinates::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Tail,
    Apple,
}

/// Is `size` an acceptable pit size?
pub fn is_valid_size(size: usize) -> bool {
    (MIN_PIT_SIZE..=MAX_PIT_SIZE).contains(&size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pit {
    size: usize,
    board: Vec<Vec<Cell>>,
}

impl Pit {
    pub fn new(size: usize) -> Self {
        Pit {
            size,
            board: vec![vec![Cell::Empty; size]; size],
        }
    }

    /// Throw the whole board away and start over with an empty one.
    pub fn reset(&mut self, size: usize) -> GameEvent {
        self.size = size;
        self.board = vec![vec![Cell::Empty; size]; size];
        GameEvent::PitReset { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, position: &Coordinates) -> bool {
        let size = self.size as i32;
        position.x >= 0 && position.x < size && position.y >= 0 && position.y < size
    }

    /// Out of bounds positions read as `None`.
    pub fn get(&self, position: &Coordinates) -> Option<Cell> {
        if !self.contains(position) {
            return None;
        }
        Some(self.board[position.x as usize][position.y as usize])
    }

    /// Mutates exactly one cell and reports the change.
    ///
    /// Callers only ever pass positions they already bound checked.
    pub fn set_cell(&mut self, position: Coordinates, cell: Cell) -> GameEvent {
        debug_assert!(self.contains(&position), "{position:?} is outside the pit");
        self.board[position.x as usize][position.y as usize] = cell;
        GameEvent::CellChanged { position, cell }
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinates, Cell)> + '_ {
        self.board.iter().enumerate().flat_map(|(x, row)| {
            row.iter()
                .enumerate()
                .map(move |(y, cell)| (Coordinates::new(x as i32, y as i32), *cell))
        })
    }

    pub fn empty_cells(&self) -> Vec<Coordinates> {
        self.cells()
            .filter(|(_, cell)| *cell == Cell::Empty)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn count(&self, wanted: Cell) -> usize {
        self.cells().filter(|(_, cell)| *cell == wanted).count()
    }

    pub fn area(&self) -> usize {
        self.size * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pit_is_empty() {
        let pit = Pit::new(12);
        assert_eq!(pit.size(), 12);
        assert_eq!(pit.count(Cell::Empty), 144);
        assert_eq!(pit.empty_cells().len(), 144);
    }

    #[test]
    fn bounds_are_half_open() {
        let pit = Pit::new(10);
        assert!(pit.contains(&Coordinates::new(0, 0)));
        assert!(pit.contains(&Coordinates::new(9, 9)));
        assert!(!pit.contains(&Coordinates::new(10, 3)));
        assert!(!pit.contains(&Coordinates::new(3, 10)));
        assert!(!pit.contains(&Coordinates::new(-1, 0)));
        assert_eq!(pit.get(&Coordinates::new(0, -1)), None);
    }

    #[test]
    fn set_cell_reports_change() {
        let mut pit = Pit::new(10);
        let event = pit.set_cell(Coordinates::new(2, 3), Cell::Apple);
        assert_eq!(
            event,
            GameEvent::CellChanged {
                position: Coordinates::new(2, 3),
                cell: Cell::Apple
            }
        );
        assert_eq!(pit.get(&Coordinates::new(2, 3)), Some(Cell::Apple));
        assert_eq!(pit.count(Cell::Apple), 1);
    }

    #[test]
    fn reset_clears_and_resizes() {
        let mut pit = Pit::new(10);
        pit.set_cell(Coordinates::new(1, 1), Cell::Tail);
        let event = pit.reset(11);
        assert_eq!(event, GameEvent::PitReset { size: 11 });
        assert_eq!(pit.count(Cell::Empty), 121);
    }

    #[test]
    fn size_limits() {
        assert!(!is_valid_size(9));
        assert!(is_valid_size(10));
        assert!(is_valid_size(100));
        assert!(!is_valid_size(101));
    }
}
