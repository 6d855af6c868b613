use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::components::{Dir, Glyph, Pos, Tile};
use crate::config::{ConfigError, SimConfig};
use crate::ghost::Hunter;
use crate::level::{Grid, Level, HUNTER_COUNT};
use crate::mode::Mode;
use crate::player::{Runner, RunnerStep};

/// One run of the maze: board, runner, hunters and counters.
///
/// Everything is mutated only through [`Simulation::tick`],
/// [`Simulation::reset`] and the steering setters, all of which take
/// `&mut self`.
#[derive(Debug, Clone)]
pub struct Simulation<R = StdRng> {
    config: SimConfig,
    level: Level,
    grid: Grid,
    runner: Runner,
    hunters: [Hunter; HUNTER_COUNT],
    tick: u64,
    frighten_timer: u32,
    score: u32,
    game_over: bool,
    rng: R,
}

impl Simulation {
    /// Simulation on the built-in maze.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_level(config, Level::classic())
    }

    pub fn with_level(config: SimConfig, level: Level) -> Result<Self, ConfigError> {
        Self::from_parts(config, level)
    }
}

impl<R: Rng + SeedableRng> Simulation<R> {
    /// Builds a simulation with any seedable generator; it is seeded from
    /// `config.seed` here and again on every reset.
    pub fn from_parts(config: SimConfig, level: Level) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = level.grid.clone();
        let runner = Runner::spawn(level.runner_spawn);
        let hunters = spawn_hunters(&level);
        Ok(Self {
            config,
            level,
            grid,
            runner,
            hunters,
            tick: 0,
            frighten_timer: 0,
            score: 0,
            game_over: false,
            rng: R::seed_from_u64(config.seed),
        })
    }

    pub fn reset(&mut self) {
        self.grid = self.level.grid.clone();
        self.runner = Runner::spawn(self.level.runner_spawn);
        self.hunters = spawn_hunters(&self.level);
        self.tick = 0;
        self.frighten_timer = 0;
        self.score = 0;
        self.game_over = false;
        self.rng = R::seed_from_u64(self.config.seed);
        debug!(seed = self.config.seed, "simulation reset");
    }

    /// Sets the runner's facing from an external direction code
    /// (0 Up, 1 Right, 2 Down, 3 Left). Other codes are ignored.
    pub fn set_runner_direction(&mut self, code: i32) {
        if let Some(dir) = Dir::from_code(code) {
            self.steer(dir);
        }
    }

    pub fn steer(&mut self, dir: Dir) {
        self.runner.dir = dir;
    }

    /// Advances one step. Returns whether the run is still live; once it
    /// is over every call returns `false` without touching any state.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.tick += 1;
        self.frighten_timer = self.frighten_timer.saturating_sub(1);

        self.move_runner();
        let mode = self.mode();
        self.move_hunters(mode);
        self.judge_captures();

        !self.game_over
    }

    fn move_runner(&mut self) {
        match self.runner.advance(&mut self.grid) {
            RunnerStep::Ate(Tile::Power) => {
                self.score += self.config.power_score;
                self.frighten_timer = self.config.frighten_ticks;
                debug!(tick = self.tick, pos = ?self.runner.pos, "power pellet eaten");
            }
            RunnerStep::Ate(_) => self.score += self.config.pellet_score,
            RunnerStep::Moved | RunnerStep::Blocked => {}
        }
    }

    fn move_hunters(&mut self, mode: Mode) {
        for hunter in self.hunters.iter_mut() {
            let target = hunter.target(mode, &self.runner, self.tick, &self.grid);
            hunter.advance(&self.grid, target, &mut self.rng);
        }
    }

    /// Resolves hunters sharing the runner's cell in identity order. The
    /// first one met while the frighten timer is out ends the run.
    fn judge_captures(&mut self) {
        for hunter in self.hunters.iter_mut() {
            if hunter.pos != self.runner.pos {
                continue;
            }
            if self.frighten_timer > 0 {
                self.score += self.config.capture_score;
                info!(tick = self.tick, hunter = hunter.id, score = self.score, "hunter eaten");
                hunter.send_home();
            } else {
                self.game_over = true;
                info!(tick = self.tick, hunter = hunter.id, score = self.score, "runner caught");
                break;
            }
        }
    }
}

impl<R> Simulation<R> {
    /// Board cell at a row-major `index` with the runner drawn over hunters
    /// and hunters over the maze.
    pub fn get_cell(&self, index: i64) -> Glyph {
        let Some(tile) = usize::try_from(index)
            .ok()
            .and_then(|idx| self.grid.tile_at_index(idx))
        else {
            return Glyph::OutOfRange;
        };
        let idx = index as usize;
        let pos = Pos {
            x: idx % self.grid.width(),
            y: idx / self.grid.width(),
        };
        if pos == self.runner.pos {
            return Glyph::Runner;
        }
        if self.hunters.iter().any(|h| h.pos == pos) {
            return Glyph::Hunter;
        }
        tile.into()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn frighten_timer(&self) -> u32 {
        self.frighten_timer
    }

    pub fn is_frightened(&self) -> bool {
        self.frighten_timer > 0
    }

    /// Mode the hunters used on the most recent tick.
    pub fn mode(&self) -> Mode {
        Mode::at(self.tick, self.frighten_timer, &self.config.schedule)
    }

    pub fn runner(&self) -> Runner {
        self.runner
    }

    pub fn hunters(&self) -> &[Hunter] {
        &self.hunters
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.grid.tile(pos)
    }

    pub fn pellets_left(&self) -> usize {
        self.grid.pellets_left()
    }

    /// Every pellet has been eaten. The run itself continues.
    pub fn is_cleared(&self) -> bool {
        self.grid.pellets_left() == 0
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

fn spawn_hunters(level: &Level) -> [Hunter; HUNTER_COUNT] {
    std::array::from_fn(|id| Hunter::spawn(id, level.hunter_pens[id], &level.grid))
}
