/// Rendering layer: all terminal I/O lives here.
///
/// The simulation hands world-space boxes to a [`TerminalCanvas`], which
/// scales them onto a character grid. The grid is flushed once per frame
/// together with the HUD and the home / game-over screens.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use kong_climber::controller::{GameController, Screen};
use kong_climber::entities::{Direction, Rect};
use kong_climber::level::Level;
use kong_climber::render::{Canvas, Held, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Cyan;
const C_HUD_BOSS: Color = Color::Red;
const C_PLATFORM: Color = Color::DarkRed;
const C_LADDER: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_DONKEY: Color = Color::DarkYellow;
const C_BARREL: Color = Color::Yellow;
const C_MONKEY: Color = Color::Green;
const C_SMART_MONKEY: Color = Color::Magenta;
const C_ITEM: Color = Color::Cyan;
const C_PROJECTILE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Rows taken by the HUD above the play field and the hint below it.
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Color,
}

/// A character grid standing in for the world's pixels.
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    scale_x: f64,
    scale_y: f64,
    cells: Vec<Option<Cell>>,
}

impl TerminalCanvas {
    /// Maps a `world_width` x `world_height` world onto the terminal area
    /// left after the HUD, border and hint rows.
    pub fn new(term_width: u16, term_height: u16, world_width: f64, world_height: f64) -> Self {
        let cols = term_width.saturating_sub(2).max(1);
        let rows = term_height
            .saturating_sub(HUD_ROWS + HINT_ROWS + 2)
            .max(1);
        Self {
            cols,
            rows,
            scale_x: f64::from(cols) / world_width,
            scale_y: f64::from(rows) / world_height,
            cells: vec![None; usize::from(cols) * usize::from(rows)],
        }
    }

    fn column(&self, x: f64) -> i32 {
        (x * self.scale_x).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.scale_y).floor() as i32
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let index = row as usize * usize::from(self.cols) + col as usize;
        self.cells[index] = Some(cell);
    }

    fn fill(&mut self, bounds: Rect, glyph: char, color: Color) {
        let (left, right) = (self.column(bounds.left), self.column(bounds.right));
        let (top, bottom) = (self.row(bounds.top), self.row(bounds.bottom));
        // Tiny boxes still get one cell.
        for row in top..=bottom.max(top) {
            for col in left..=right.max(left) {
                self.put(col, row, Cell { glyph, color });
            }
        }
    }

    /// Draws a single glyph at the box centre.
    fn mark(&mut self, bounds: Rect, glyph: char, color: Color) {
        let col = self.column((bounds.left + bounds.right) / 2.0);
        let row = self.row((bounds.top + bounds.bottom) / 2.0);
        self.put(col, row, Cell { glyph, color });
    }

    /// Writes the grid inside the border, starting below the HUD row.
    fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let index = usize::from(row) * usize::from(self.cols) + usize::from(col);
                if let Some(cell) = self.cells[index] {
                    out.queue(cursor::MoveTo(col + 1, row + HUD_ROWS + 1))?;
                    out.queue(style::SetForegroundColor(cell.color))?;
                    out.queue(Print(cell.glyph))?;
                }
            }
        }
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn draw(&mut self, sprite: Sprite, bounds: Rect) {
        match sprite {
            Sprite::Platform => self.fill(bounds, '▀', C_PLATFORM),
            Sprite::Ladder => self.fill(bounds, 'H', C_LADDER),
            Sprite::Hammer => self.mark(bounds, 'T', C_ITEM),
            Sprite::Blaster => self.mark(bounds, 'Г', C_ITEM),
            Sprite::Player { held, facing } => {
                let glyph = match (held, facing) {
                    (Held::Hammer, _) => '¥',
                    (Held::Blaster, Direction::Left) => '«',
                    (Held::Blaster, Direction::Right) => '»',
                    (Held::Nothing, _) => '@',
                };
                self.fill(bounds, glyph, C_PLAYER);
            }
            Sprite::Donkey => self.fill(bounds, '#', C_DONKEY),
            Sprite::Barrel => self.fill(bounds, 'o', C_BARREL),
            Sprite::NormalMonkey { facing } => self.fill(bounds, arrow(facing), C_MONKEY),
            Sprite::IntelligentMonkey { facing } => {
                self.fill(bounds, arrow(facing), C_SMART_MONKEY)
            }
            Sprite::Banana => self.mark(bounds, ')', C_BARREL),
            Sprite::Bullet { .. } => self.mark(bounds, '-', C_PROJECTILE),
        }
    }
}

fn arrow(facing: Direction) -> char {
    match facing {
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of whatever screen the controller shows.
pub fn render<W: Write>(out: &mut W, game: &GameController) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match game.screen() {
        Screen::Home => draw_home(out, width, height)?,
        Screen::Playing(level) => {
            draw_border(out, width, height)?;
            draw_hud(out, level, game.total_score(), width)?;

            let screen = &game.config().screen;
            let mut canvas = TerminalCanvas::new(width, height, screen.width, screen.height);
            level.draw(&mut canvas);
            canvas.present(out)?;

            draw_controls_hint(out, height)?;
        }
        Screen::GameOver { won, score } => draw_game_over(out, *won, *score, width, height)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = usize::from(width);
    let bottom = height.saturating_sub(HINT_ROWS + 1);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, HUD_ROWS))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in HUD_ROWS + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    level: &Level,
    total: u32,
    width: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Level {}  Score:{:>6}  Total:{:>6}",
        level.number(),
        level.score(),
        total
    )))?;

    let time = format!("Time:{:>4}", level.time_remaining());
    let tx = (width / 2).saturating_sub(time.len() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time))?;

    let player = level.player();
    let ammo = if player.has_blaster {
        format!("Ammo:{}  ", player.bullets)
    } else {
        String::new()
    };
    let boss = format!("{}Boss:{}", ammo, "♥".repeat(level.donkey_health().max(0) as usize));
    let rx = width.saturating_sub(boss.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
    out.queue(Print(&boss))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   ↑ ↓ : Climb   SPACE : Jump   S : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Full-screen panels ────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_home<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    KONG CLIMBER    ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (String::new(), Color::Reset),
        ("ENTER - Level 1".to_string(), Color::White),
        ("2 - Level 2".to_string(), Color::White),
        ("Q - Quit".to_string(), C_HINT),
    ];
    draw_centered(out, &lines, width, height)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    won: bool,
    score: u32,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (banner, color) = if won {
        ("║      YOU  WIN      ║", Color::Green)
    } else {
        ("║     GAME  OVER     ║", Color::Red)
    };
    let lines = [
        ("╔════════════════════╗".to_string(), color),
        (banner.to_string(), color),
        ("╚════════════════════╝".to_string(), color),
        (format!("Final Score: {:>6}", score), Color::Yellow),
        ("SPACE - Home  Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, &lines, width, height)
}
