// Shared value types for the board and everything moving on it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
}

impl Tile {
    pub fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet | Tile::Power)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// One tile over in `dir`, or `None` when that would leave the
    /// non-negative quadrant.
    pub fn step(self, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = self.x as isize + dx;
        let ny = self.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        Some(Pos {
            x: nx as usize,
            y: ny as usize,
        })
    }
}

/// Facing of the runner or a hunter. Declaration order doubles as the
/// external direction code and as the search order of the path finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    pub fn from_code(code: i32) -> Option<Dir> {
        match code {
            0 => Some(Dir::Up),
            1 => Some(Dir::Right),
            2 => Some(Dir::Down),
            3 => Some(Dir::Left),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Direction of a unit displacement `from -> to`, if the two cells are
    /// orthogonal neighbors.
    pub fn between(from: Pos, to: Pos) -> Option<Dir> {
        Dir::ALL.into_iter().find(|dir| from.step(*dir) == Some(to))
    }
}

/// What a flattened board cell shows once entities are drawn over the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Pellet,
    Power,
    Empty,
    Runner,
    Hunter,
    OutOfRange,
}

impl Glyph {
    /// Character code of the glyph; `0` for an index outside the board.
    pub fn code(self) -> i32 {
        match self {
            Glyph::Wall => '#' as i32,
            Glyph::Pellet => '.' as i32,
            Glyph::Power => 'o' as i32,
            Glyph::Empty => ' ' as i32,
            Glyph::Runner => 'P' as i32,
            Glyph::Hunter => 'G' as i32,
            Glyph::OutOfRange => 0,
        }
    }
}

impl From<Tile> for Glyph {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Wall => Glyph::Wall,
            Tile::Empty => Glyph::Empty,
            Tile::Pellet => Glyph::Pellet,
            Tile::Power => Glyph::Power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_codes_follow_declaration_order() {
        for (code, dir) in Dir::ALL.iter().enumerate() {
            assert_eq!(Dir::from_code(code as i32), Some(*dir));
            assert_eq!(dir.code(), code as i32);
        }
        assert_eq!(Dir::from_code(-1), None);
        assert_eq!(Dir::from_code(4), None);
    }

    #[test]
    fn step_refuses_negative_coordinates() {
        assert_eq!(Pos::new(0, 3).step(Dir::Left), None);
        assert_eq!(Pos::new(2, 0).step(Dir::Up), None);
        assert_eq!(Pos::new(2, 3).step(Dir::Down), Some(Pos::new(2, 4)));
    }

    #[test]
    fn between_recovers_unit_moves_only() {
        let here = Pos::new(4, 4);
        for dir in Dir::ALL {
            let there = here.step(dir).unwrap();
            assert_eq!(Dir::between(here, there), Some(dir));
        }
        assert_eq!(Dir::between(here, Pos::new(6, 4)), None);
        assert_eq!(Dir::between(here, here), None);
    }
}
