use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::components::Glyph;
use crate::game::Simulation;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    frightened: bool,
}

/// Diffing terminal renderer: only cells that changed since the last
/// frame are redrawn.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    frightened: false,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to repaint everything, e.g. after a reset.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<R>(
        &mut self,
        out: &mut impl Write,
        sim: &Simulation<R>,
        term_size: (u16, u16),
    ) -> io::Result<()> {
        let (width, height) = (sim.width(), sim.height());
        let needed_h = (height + 2) as u16;
        let needed_w = (width * CELL_W) as u16;
        let (term_w, term_h) = term_size;

        out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(sim);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let frightened = sim.is_frightened();
        for idx in 0..width * height {
            let glyph = sim.get_cell(idx as i64);
            let cell = Cell {
                glyph,
                frightened: frightened && glyph == Glyph::Hunter,
            };
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(out, idx % width, idx / width, cell)?;
            }
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let (text, color) = match cell.glyph {
            Glyph::Runner => ("😃", Color::Yellow),
            Glyph::Hunter if cell.frightened => ("😱", Color::Blue),
            Glyph::Hunter => ("👻", Color::Red),
            Glyph::Wall => ("██", Color::Blue),
            Glyph::Pellet => ("· ", Color::White),
            Glyph::Power => ("● ", Color::Magenta),
            Glyph::Empty | Glyph::OutOfRange => ("  ", Color::Reset),
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    /// Writes the end-of-run banner under the board.
    pub fn render_banner(
        &self,
        out: &mut impl Write,
        height: usize,
        message: &str,
    ) -> io::Result<()> {
        out.queue(MoveTo(self.origin_x, self.origin_y + height as u16))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        out.queue(Print(message))?;
        out.flush()
    }
}

fn hud_line<R>(sim: &Simulation<R>) -> String {
    format!(
        "Score: {}  Pellets: {}  Power: {}  Tick: {}  (r reset, q quit)",
        sim.score(),
        sim.pellets_left(),
        sim.frighten_timer(),
        sim.tick_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn small_terminal_gets_a_warning() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        let mut renderer = Renderer::new(sim.width(), sim.height());
        let mut out = Vec::new();
        renderer.render(&mut out, &sim, (20, 10)).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn second_frame_only_redraws_changes() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let mut renderer = Renderer::new(sim.width(), sim.height());
        let mut first = Vec::new();
        renderer.render(&mut first, &sim, (80, 40)).unwrap();
        assert!(String::from_utf8_lossy(&first).contains("Score: 0"));

        let mut idle = Vec::new();
        renderer.render(&mut idle, &sim, (80, 40)).unwrap();
        assert!(idle.len() < first.len() / 10);

        sim.tick();
        let mut after = Vec::new();
        renderer.render(&mut after, &sim, (80, 40)).unwrap();
        assert!(String::from_utf8_lossy(&after).contains("Score: 10"));
        assert!(after.len() < first.len());
    }
}
