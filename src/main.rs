use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

use maze_chase::render::Renderer;
use maze_chase::{Dir, RunSettings, SimConfig, Simulation};

enum Outcome {
    Quit,
    Restart,
}

fn main() -> Result<()> {
    init_tracing();
    let settings = RunSettings::from_env();
    let config = SimConfig {
        seed: settings.seed,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config)?;
    info!(?settings, "starting maze chase");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut sim, &settings);

    if let Err(err) = stdout.execute(Show) {
        error!(?err, "failed to show cursor");
    }
    if let Err(err) = stdout.execute(LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = terminal::disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    info!(score = sim.score(), ticks = sim.tick_count(), "session finished");
    Ok(result?)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn run(stdout: &mut Stdout, sim: &mut Simulation, settings: &RunSettings) -> io::Result<()> {
    let mut renderer = Renderer::new(sim.width(), sim.height());
    let tick_time = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') => {
                        sim.reset();
                        renderer.invalidate();
                    }
                    code => {
                        if let Some(dir) = dir_for_key(code) {
                            sim.steer(dir);
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            let live = sim.tick();
            renderer.render(stdout, &*sim, terminal::size()?)?;
            if !live || sim.is_cleared() {
                let message = if live {
                    format!("MAZE CLEARED - Final Score: {} (r to restart, q to quit)", sim.score())
                } else {
                    format!("GAME OVER - Final Score: {} (r to restart, q to quit)", sim.score())
                };
                renderer.render_banner(stdout, sim.height(), &message)?;
                match wait_for_restart()? {
                    Outcome::Quit => return Ok(()),
                    Outcome::Restart => {
                        sim.reset();
                        renderer.invalidate();
                        last_tick = Instant::now();
                    }
                }
            }
        } else {
            renderer.render(stdout, &*sim, terminal::size()?)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn wait_for_restart() -> io::Result<Outcome> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(Outcome::Quit),
                    KeyCode::Char('r') => return Ok(Outcome::Restart),
                    _ => {}
                }
            }
        }
    }
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        _ => None,
    }
}
