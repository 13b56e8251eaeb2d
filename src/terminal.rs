use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::grid::{Direction, Position};
use crate::sim::{Phase, Simulation, Snapshot, UiSink};

const HEAD_SYMBOL: &str = "◆";
const APPLE_SYMBOL: &str = "●";

/// What a key press asks the host to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Quit,
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Steer(Direction::Up)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Steer(Direction::Right)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Steer(Direction::Left)),
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Score line and end screen. Fed by the simulation through [`UiSink`].
#[derive(Debug)]
pub struct Hud {
    score: u32,
    phase: Phase,
    moves: u64,
}

impl Default for Hud {
    fn default() -> Self {
        Hud {
            score: 0,
            phase: Phase::Running,
            moves: 0,
        }
    }
}

impl UiSink for Hud {
    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn phase_changed(&mut self, phase: Phase) {
        info!("Phase changed to {:?} after {} moves", phase, self.moves);
        self.phase = phase;
    }

    fn positions_changed(&mut self, snapshot: &Snapshot<'_>) {
        self.moves += 1;
        debug!(
            "Move {}: head {:?}, apple {:?}, {} segments",
            self.moves,
            snapshot.head,
            snapshot.apple,
            snapshot.tail.len()
        );
    }
}

impl Hud {
    pub fn render(&self, frame: &mut Frame, sim: &Simulation) {
        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Score line
                Constraint::Min(0),    // Board
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(format!(
                "SNAKE    Score: {}    Speed: {}",
                self.score,
                sim.state().speed
            ))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        let title = match self.phase {
            Phase::Running => "Playing",
            Phase::Paused => "Paused. Press SPACE to continue",
            Phase::Won | Phase::Lost => "Press R to restart, Q to quit",
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner_area = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);
        frame.render_widget(sim, inner_area);

        let banner = match self.phase {
            Phase::Won => "YOU WIN",
            Phase::Lost => "GAME OVER",
            _ => return,
        };
        let popup = centered(inner_area, 24, 4);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(format!("{}\nFinal Score: {}", banner, self.score))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Screen cell of the left half of a board cell, two columns per cell and
/// `y` growing upwards. `None` when off the grid or outside `area`.
fn screen_cell(sim: &Simulation, pos: Position, area: Rect) -> Option<(u16, u16)> {
    let grid = sim.grid();
    if !grid.contains(pos) {
        return None;
    }
    let col = (pos.x + grid.offset()) * 2;
    let row = grid.plane_scale() - 1 - (pos.y + grid.offset());
    if col + 1 >= i32::from(area.width) || row >= i32::from(area.height) {
        return None;
    }
    Some((area.x + col as u16, area.y + row as u16))
}

fn paint(buf: &mut Buffer, (x, y): (u16, u16), symbol: &str, style: Style) {
    buf[(x, y)].set_symbol(symbol).set_style(style);
    buf[(x + 1, y)].set_symbol(" ").set_style(style);
}

impl Widget for &Simulation {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for cell in self.grid().cells() {
            if let Some(at) = screen_cell(self, cell, area) {
                let shade = if (cell.x + cell.y).rem_euclid(2) == 0 {
                    Color::Rgb(30, 30, 30)
                } else {
                    Color::Rgb(40, 40, 40)
                };
                paint(buf, at, " ", Style::default().bg(shade));
            }
        }

        for &segment in self.tail().segments() {
            if let Some(at) = screen_cell(self, segment, area) {
                paint(buf, at, " ", Style::default().bg(Color::Green));
            }
        }

        if let Some(at) = screen_cell(self, self.apple().position(), area) {
            paint(buf, at, APPLE_SYMBOL, Style::default().fg(Color::LightRed));
        }

        // Head last so it stays visible on top of everything else
        if let Some(at) = screen_cell(self, self.head().position(), area) {
            paint(
                buf,
                at,
                HEAD_SYMBOL,
                Style::default().fg(Color::Yellow).bg(Color::Green),
            );
        }
    }
}
