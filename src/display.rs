/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; level pixels are mapped to
/// terminal cells through the camera pivot and the configured cell size.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use archer_arena::compute::GameState;
use archer_arena::config::DisplayConfig;
use archer_arena::entities::{Arrow, Bounds, Direction, Enemy, GameStatus, Outcome};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_ENEMIES: Color = Color::Red;
const C_HUD_TIME: Color = Color::Yellow;
const C_OBSTACLE: Color = Color::DarkGrey;
const C_EDGE: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_ENEMY_DEAD: Color = Color::DarkRed;
const C_ARROW: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Terminal rows above the play area (HUD) and below it (controls hint).
pub const HUD_ROWS: u16 = 1;
pub const HINT_ROWS: u16 = 1;

/// Cell-space view of the level for one frame.
struct Screen {
    pivot_x: f32,
    pivot_y: f32,
    cell_w: f32,
    cell_h: f32,
    cols: u16,
    rows: u16,
}

impl Screen {
    fn new(state: &GameState, cols: u16, rows: u16) -> Self {
        Self {
            pivot_x: state.camera.pivot_x,
            pivot_y: state.camera.pivot_y,
            cell_w: state.config.display.cell_width,
            cell_h: state.config.display.cell_height,
            cols,
            rows: rows.saturating_sub(HUD_ROWS + HINT_ROWS),
        }
    }

    /// Cell under a level point, `None` when off screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = ((x - self.pivot_x) / self.cell_w).floor();
        let row = ((y - self.pivot_y) / self.cell_h).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16 + HUD_ROWS))
    }

    /// Every on-screen cell whose centre falls inside `b`, row by row.
    fn cells_in(&self, b: &Bounds) -> Vec<(u16, u16)> {
        let mut cells = Vec::new();
        let first_col = ((b.left - self.pivot_x) / self.cell_w).floor().max(0.0) as u16;
        let first_row = ((b.top - self.pivot_y) / self.cell_h).floor().max(0.0) as u16;
        for row in first_row..self.rows {
            let cy = self.pivot_y + (row as f32 + 0.5) * self.cell_h;
            if cy >= b.bottom {
                break;
            }
            if cy < b.top {
                continue;
            }
            for col in first_col..self.cols {
                let cx = self.pivot_x + (col as f32 + 0.5) * self.cell_w;
                if cx >= b.right {
                    break;
                }
                if cx >= b.left {
                    cells.push((col, row + HUD_ROWS));
                }
            }
        }
        cells
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Level pixels visible in a terminal of `cols` x `rows` cells.
pub fn view_size(cfg: &DisplayConfig, cols: u16, rows: u16) -> (f32, f32) {
    let rows = rows.saturating_sub(HUD_ROWS + HINT_ROWS);
    (cols as f32 * cfg.cell_width, rows as f32 * cfg.cell_height)
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let screen = Screen::new(state, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_level_edges(out, state, &screen)?;
    for obstacle in state.collider.obstacles() {
        draw_rect(out, &screen, &obstacle.bounds(), '█', C_OBSTACLE)?;
    }
    for enemy in state.enemies.values() {
        draw_enemy(out, &screen, enemy)?;
    }
    for arrow in state.arrows.values() {
        draw_arrow(out, &screen, arrow)?;
    }
    draw_player(out, state, &screen)?;

    draw_hud(out, state, cols)?;
    draw_controls_hint(out, rows)?;

    if let GameStatus::Ended(outcome) = state.status {
        draw_game_over(out, outcome, cols, rows)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Level ─────────────────────────────────────────────────────────────────────

fn draw_level_edges<W: Write>(out: &mut W, state: &GameState, screen: &Screen) -> std::io::Result<()> {
    let level = state.collider.bounds();
    out.queue(style::SetForegroundColor(C_EDGE))?;
    // One cell beyond the right and bottom edges, when it is on screen.
    let right = level.right + screen.cell_w / 2.0;
    let bottom = level.bottom + screen.cell_h / 2.0;
    for row in 0..screen.rows {
        let y = screen.pivot_y + (row as f32 + 0.5) * screen.cell_h;
        if let Some((col, r)) = screen.cell(right, y).filter(|_| y < bottom) {
            out.queue(cursor::MoveTo(col, r))?;
            out.queue(Print("│"))?;
        }
    }
    for col in 0..screen.cols {
        let x = screen.pivot_x + (col as f32 + 0.5) * screen.cell_w;
        if let Some((c, row)) = screen.cell(x, bottom).filter(|_| x < right) {
            out.queue(cursor::MoveTo(c, row))?;
            out.queue(Print("─"))?;
        }
    }
    Ok(())
}

fn draw_rect<W: Write>(
    out: &mut W,
    screen: &Screen,
    bounds: &Bounds,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (col, row) in screen.cells_in(bounds) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn facing_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '▲',
        Direction::Right => '▶',
        Direction::Down => '▼',
        Direction::Left => '◀',
    }
}

/// Draw a body glyph at the centre of its collision rectangle.
fn draw_marker<W: Write>(
    out: &mut W,
    screen: &Screen,
    bounds: &Bounds,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let cx = (bounds.left + bounds.right) / 2.0;
    let cy = (bounds.top + bounds.bottom) / 2.0;
    if let Some((col, row)) = screen.cell(cx, cy) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, screen: &Screen) -> std::io::Result<()> {
    let p = &state.player;
    let glyph = if p.is_dead() {
        '✝'
    } else if p.is_attacking() {
        '➶'
    } else {
        facing_glyph(p.facing())
    };
    draw_marker(out, screen, &p.collision_bounds(), glyph, C_PLAYER)
}

fn draw_enemy<W: Write>(out: &mut W, screen: &Screen, enemy: &Enemy) -> std::io::Result<()> {
    let body = &enemy.body;
    let (glyph, color) = if body.is_dead() {
        ('x', C_ENEMY_DEAD)
    } else if body.is_attacking() {
        ('⚔', C_ENEMY)
    } else {
        ('O', C_ENEMY)
    };
    draw_marker(out, screen, &body.collision_bounds(), glyph, color)
}

fn draw_arrow<W: Write>(out: &mut W, screen: &Screen, arrow: &Arrow) -> std::io::Result<()> {
    let glyph = if arrow.velocity.direction().is_horizontal() {
        '─'
    } else {
        '│'
    };
    draw_marker(out, screen, &arrow.bounds(), glyph, C_ARROW)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Level {}/{}", state.level, state.level_count())))?;

    let alive = state.enemies_alive();
    let enemies = format!("{} Orc{} remaining", alive, if alive == 1 { "" } else { "s" });
    let ex = (cols / 2).saturating_sub(enemies.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(ex, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ENEMIES))?;
    out.queue(Print(&enemies))?;

    let left_ms = (state.config.game.max_time_ms - state.elapsed_ms).max(0.0);
    let time = format!("Time: {:>4.1}s", left_ms / 1000.0);
    let tx = cols.saturating_sub(time.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, outcome: Outcome, cols: u16, rows: u16) -> std::io::Result<()> {
    let (title, color) = match outcome {
        Outcome::Won => ("Win!!", Color::Green),
        Outcome::TimedOut => ("Time out!", Color::Yellow),
        Outcome::Slain => ("Slain!", Color::Red),
    };
    let lines: [(String, Color); 4] = [
        ("╔════════════════════╗".to_string(), color),
        (format!("║{:^20}║", title), color),
        ("╚════════════════════╝".to_string(), color),
        ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}
