use crate::components::{Dir, Pos, Tile};
use crate::level::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runner {
    pub pos: Pos,
    pub dir: Dir,
}

/// Outcome of one runner step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerStep {
    Blocked,
    Moved,
    Ate(Tile),
}

impl Runner {
    pub fn spawn(pos: Pos) -> Self {
        Self {
            pos,
            dir: Dir::Right,
        }
    }

    /// Steps along the current facing and eats whatever pellet lies there.
    /// A wall ahead leaves position and facing untouched.
    pub fn advance(&mut self, grid: &mut Grid) -> RunnerStep {
        let Some(next) = grid.open_neighbor(self.pos, self.dir) else {
            return RunnerStep::Blocked;
        };
        self.pos = next;
        match grid.take_pellet(next) {
            Some(tile) => RunnerStep::Ate(tile),
            None => RunnerStep::Moved,
        }
    }
}
