use thiserror::Error;

use crate::components::{Dir, Pos, Tile};

pub const HUNTER_COUNT: usize = 4;

/// Built-in maze. `#` wall, `.` pellet, `o` power pellet, space empty,
/// `P` runner spawn, `0`-`3` hunter pen cells.
pub const CLASSIC_LAYOUT: [&str; 21] = [
    "###################",
    "#P...............o#",
    "#.................#",
    "#..##.#######.##..#",
    "#.................#",
    "#..#.....o.....#..#",
    "#..#...........#..#",
    "#..............#..#",
    "#..#...........#..#",
    "#..#...## ##......#",
    "#..#...#012#...#..#",
    "#..#...# 3 #...#..#",
    "#..#...#####...#..#",
    "#..#...........#..#",
    "#..#...........#..#",
    "#..#...........#..#",
    "#.................#",
    "#..#############..#",
    "#.................#",
    "#o...............o#",
    "###################",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("layout has no rows")]
    Empty,
    #[error("layout must be at least 3x3, got {width}x{height}")]
    TooSmall { width: usize, height: usize },
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {ch:?} at ({x}, {y})")]
    UnknownTile { ch: char, x: usize, y: usize },
    #[error("expected exactly one {marker:?} marker, found {count}")]
    Marker { marker: char, count: usize },
    #[error("marker {marker:?} sits on the border at ({x}, {y})")]
    MarkerOnBorder { marker: char, x: usize, y: usize },
}

/// Mutable tile layer of a running maze. Reads outside the board are walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    pellets_left: usize,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.index(pos).map_or(Tile::Wall, |idx| self.tiles[idx])
    }

    pub fn tile_at_index(&self, idx: usize) -> Option<Tile> {
        self.tiles.get(idx).copied()
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Wall
    }

    /// The cell one step from `pos` in `dir`, if it is not a wall.
    pub fn open_neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        pos.step(dir).filter(|next| !self.is_wall(*next))
    }

    pub fn can_move(&self, pos: Pos, dir: Dir) -> bool {
        self.open_neighbor(pos, dir).is_some()
    }

    /// Clears a pellet or power pellet at `pos` and reports which one it was.
    pub fn take_pellet(&mut self, pos: Pos) -> Option<Tile> {
        let idx = self.index(pos)?;
        let tile = self.tiles[idx];
        if !tile.is_pellet() {
            return None;
        }
        self.tiles[idx] = Tile::Empty;
        self.pellets_left = self.pellets_left.saturating_sub(1);
        Some(tile)
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets_left
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos { x, y }))
            .filter(|pos| !self.is_wall(*pos))
    }

    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some(pos.y * self.width + pos.x)
    }
}

/// Starting layout: the pristine grid plus spawn points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub runner_spawn: Pos,
    pub hunter_pens: [Pos; HUNTER_COUNT],
}

impl Level {
    pub fn classic() -> Level {
        Level::parse(&CLASSIC_LAYOUT).expect("built-in layout is well formed")
    }

    pub fn parse(rows: &[&str]) -> Result<Level, LevelError> {
        let height = rows.len();
        if height == 0 {
            return Err(LevelError::Empty);
        }
        let width = rows[0].chars().count();
        if width < 3 || height < 3 {
            return Err(LevelError::TooSmall { width, height });
        }

        let mut tiles = Vec::with_capacity(width * height);
        let mut runner = Vec::new();
        let mut pens: [Vec<Pos>; HUNTER_COUNT] = Default::default();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Pos { x, y };
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Pellet,
                    'o' => Tile::Power,
                    ' ' => Tile::Empty,
                    'P' => {
                        runner.push(pos);
                        Tile::Empty
                    }
                    '0'..='3' => {
                        pens[ch as usize - '0' as usize].push(pos);
                        Tile::Empty
                    }
                    _ => return Err(LevelError::UnknownTile { ch, x, y }),
                };
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if border && tile != Tile::Wall && !matches!(ch, '.' | 'o' | ' ') {
                    return Err(LevelError::MarkerOnBorder { marker: ch, x, y });
                }
                tiles.push(tile);
            }
        }

        let runner_spawn = single_marker('P', &runner)?;
        let mut hunter_pens = [Pos { x: 0, y: 0 }; HUNTER_COUNT];
        for (id, cells) in pens.iter().enumerate() {
            let marker = char::from(b'0' + id as u8);
            hunter_pens[id] = single_marker(marker, cells)?;
        }

        let pellets_left = count_pellets(&tiles);
        Ok(Level {
            grid: Grid {
                width,
                height,
                tiles,
                pellets_left,
            },
            runner_spawn,
            hunter_pens,
        })
    }
}

fn single_marker(marker: char, cells: &[Pos]) -> Result<Pos, LevelError> {
    match cells {
        [pos] => Ok(*pos),
        _ => Err(LevelError::Marker {
            marker,
            count: cells.len(),
        }),
    }
}

fn count_pellets(tiles: &[Tile]) -> usize {
    tiles.iter().filter(|tile| tile.is_pellet()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::distance_field;

    #[test]
    fn classic_layout_parses_with_spawns() {
        let level = Level::classic();
        assert_eq!(level.grid.width(), 19);
        assert_eq!(level.grid.height(), 21);
        assert_eq!(level.runner_spawn, Pos::new(1, 1));
        assert_eq!(level.hunter_pens[0], Pos::new(8, 10));
        assert_eq!(level.hunter_pens[3], Pos::new(9, 11));
        assert_eq!(level.grid.tile(Pos::new(17, 1)), Tile::Power);
        assert!(level.grid.pellets_left() > 0);
    }

    #[test]
    fn classic_layout_is_fully_connected() {
        let level = Level::classic();
        let dist = distance_field(&level.grid, level.runner_spawn);
        for pos in level.grid.open_cells() {
            let idx = pos.y * level.grid.width() + pos.x;
            assert!(dist[idx].is_some(), "{pos:?} unreachable from spawn");
        }
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let level = Level::classic();
        assert_eq!(level.grid.tile(Pos::new(19, 1)), Tile::Wall);
        assert_eq!(level.grid.tile(Pos::new(1, 21)), Tile::Wall);
        assert!(!level.grid.can_move(Pos::new(1, 1), Dir::Up));
        assert!(level.grid.can_move(Pos::new(1, 1), Dir::Right));
    }

    #[test]
    fn take_pellet_clears_once() {
        let mut grid = Level::classic().grid;
        let before = grid.pellets_left();
        assert_eq!(grid.take_pellet(Pos::new(2, 1)), Some(Tile::Pellet));
        assert_eq!(grid.take_pellet(Pos::new(2, 1)), None);
        assert_eq!(grid.tile(Pos::new(2, 1)), Tile::Empty);
        assert_eq!(grid.pellets_left(), before - 1);
        assert_eq!(grid.take_pellet(Pos::new(0, 0)), None);
    }

    #[test]
    fn parse_rejects_malformed_layouts() {
        assert_eq!(Level::parse(&[]), Err(LevelError::Empty));
        assert_eq!(
            Level::parse(&["#####", "#P0#", "#####"]),
            Err(LevelError::Ragged {
                row: 1,
                expected: 5,
                found: 4
            })
        );
        assert_eq!(
            Level::parse(&["#####", "#P0x#", "#####"]),
            Err(LevelError::UnknownTile { ch: 'x', x: 3, y: 1 })
        );
        assert_eq!(
            Level::parse(&["######", "#P012#", "######"]),
            Err(LevelError::Marker {
                marker: '3',
                count: 0
            })
        );
        assert_eq!(
            Level::parse(&["P#####", "#.0123", "######"]),
            Err(LevelError::MarkerOnBorder {
                marker: 'P',
                x: 0,
                y: 0
            })
        );
    }
}
