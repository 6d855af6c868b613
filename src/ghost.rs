use rand::Rng;
use tracing::trace;

use crate::components::{Dir, Pos};
use crate::level::{Grid, HUNTER_COUNT};
use crate::mode::Mode;
use crate::pathfinding::first_step;
use crate::player::Runner;

/// Skittish hunters spend the first `SKITTISH_RETREAT` ticks of every
/// `SKITTISH_CYCLE` heading home even while chasing.
const SKITTISH_CYCLE: u64 = 40;
const SKITTISH_RETREAT: u64 = 10;

/// How a hunter picks its chase target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    /// Goes straight for the runner's cell.
    Shadow,
    /// Aims `lead` tiles ahead of the runner's facing.
    Ambush { lead: usize },
    /// Mostly shadows, but keeps breaking off toward home.
    Skittish,
}

/// Personality of each hunter, indexed by identity.
pub const PERSONALITIES: [Personality; HUNTER_COUNT] = [
    Personality::Shadow,
    Personality::Ambush { lead: 2 },
    Personality::Ambush { lead: 4 },
    Personality::Skittish,
];

impl Personality {
    fn chase_target(self, home: Pos, runner: &Runner, tick: u64, grid: &Grid) -> Pos {
        match self {
            Personality::Shadow => runner.pos,
            Personality::Ambush { lead } => lead_target(runner, lead, grid),
            Personality::Skittish => {
                if tick % SKITTISH_CYCLE < SKITTISH_RETREAT {
                    home
                } else {
                    runner.pos
                }
            }
        }
    }
}

/// Scatter corner for a hunter identity: top-right, top-left,
/// bottom-right, bottom-left, inside the border ring.
pub fn home_corner(id: usize, width: usize, height: usize) -> Pos {
    let right = width.saturating_sub(2).max(1);
    let bottom = height.saturating_sub(2).max(1);
    match id % HUNTER_COUNT {
        0 => Pos { x: right, y: 1 },
        1 => Pos { x: 1, y: 1 },
        2 => Pos { x: right, y: bottom },
        _ => Pos { x: 1, y: bottom },
    }
}

fn lead_target(runner: &Runner, lead: usize, grid: &Grid) -> Pos {
    let (dx, dy) = runner.dir.delta();
    let lead = lead as isize;
    let clamp = |value: isize, dim: usize| {
        let hi = (dim as isize - 2).max(1);
        value.clamp(1, hi) as usize
    };
    Pos {
        x: clamp(runner.pos.x as isize + dx * lead, grid.width()),
        y: clamp(runner.pos.y as isize + dy * lead, grid.height()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunter {
    pub id: usize,
    pub pos: Pos,
    pub dir: Dir,
    /// Spawn and respawn cell.
    pub pen: Pos,
    /// Scatter target.
    pub home: Pos,
}

impl Hunter {
    pub fn spawn(id: usize, pen: Pos, grid: &Grid) -> Self {
        Self {
            id,
            pos: pen,
            dir: Dir::Up,
            pen,
            home: home_corner(id, grid.width(), grid.height()),
        }
    }

    pub fn personality(&self) -> Personality {
        PERSONALITIES[self.id % HUNTER_COUNT]
    }

    /// Back to the pen after being eaten.
    pub fn send_home(&mut self) {
        self.pos = self.pen;
        self.dir = Dir::Up;
    }

    pub fn target(&self, mode: Mode, runner: &Runner, tick: u64, grid: &Grid) -> Pos {
        match mode {
            Mode::Scatter | Mode::Frightened => self.home,
            Mode::Chase => self.personality().chase_target(self.home, runner, tick, grid),
        }
    }

    /// Moves one tile toward `target`. A blocked path step falls back to the
    /// current heading, then to the first open direction in fixed order.
    /// Returns whether the hunter moved.
    pub fn advance(&mut self, grid: &Grid, target: Pos, rng: &mut impl Rng) -> bool {
        let wanted = first_step(grid, self.pos, target, Some(self.dir), rng);
        let candidates = [wanted, self.dir].into_iter().chain(Dir::ALL);
        for dir in candidates {
            if let Some(next) = grid.open_neighbor(self.pos, dir) {
                if dir != wanted {
                    trace!(id = self.id, ?wanted, ?dir, "hunter step blocked, rerouting");
                }
                self.pos = next;
                self.dir = dir;
                return true;
            }
        }
        false
    }
}
