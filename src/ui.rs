use Color::*;
use ratatui::Frame;
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Alignment::Center;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::prelude::{Stylize, Widget};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::game::Game;
use crate::grid::{COLUMNS, Grid, ROWS};
use crate::input::Input;
use crate::piece::{Piece, ShapeSource};
use crate::shape::MAX_SPAN;

/// Terminal columns per grid cell.
const CELL_WIDTH: u16 = 2;

const BOARD_WIDTH: u16 = COLUMNS as u16 * CELL_WIDTH + 2;
const BOARD_HEIGHT: u16 = ROWS as u16 + 2;
const PANEL_WIDTH: u16 = MAX_SPAN as u16 * CELL_WIDTH + 6;

pub const MIN_WIDTH: u16 = BOARD_WIDTH + PANEL_WIDTH + 2;
pub const MIN_HEIGHT: u16 = BOARD_HEIGHT + 2;

const ACCENT: Color = LightCyan;
const TITLE: Color = White;

/// Settled blocks plus the falling piece. Blocks above the top row are not drawn.
struct GridWidget<'a> {
    grid: &'a Grid,
    piece: &'a Piece,
    block: &'a str,
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for (row, cells) in self.grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(color) = cell {
                    draw_block(buf, area, row, col, *color, self.block);
                }
            }
        }

        let color = self.piece.color();
        for p in self.piece.cells() {
            if let Some((row, col)) = p.to_index(ROWS, COLUMNS) {
                draw_block(buf, area, row, col, color, self.block);
            }
        }
    }
}

/// The next piece, drawn in its spawn orientation.
struct PreviewWidget<'a> {
    piece: &'a Piece,
    block: &'a str,
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let color = self.piece.color();
        for (row, col) in self.piece.shape.cells() {
            draw_block(buf, area, row, col, color, self.block);
        }
    }
}

fn draw_block(buf: &mut Buffer, area: Rect, row: usize, col: usize, color: Color, block: &str) {
    let x = area.x + col as u16 * CELL_WIDTH;
    let y = area.y + row as u16;
    if x + CELL_WIDTH > area.right() || y >= area.bottom() {
        return;
    }
    let mut glyph = block.chars();
    for i in 0..CELL_WIDTH {
        let mut cell = Cell::default();
        cell.set_char(glyph.next().unwrap_or(' '));
        cell.fg = color;
        cell.bg = Black;
        buf[(x + i, y)] = cell;
    }
}

struct GameOverWidget;

impl Widget for GameOverWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(Black));
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf[(x, y)].set_char(' ');
            }
        }
        let text = "GAME OVER";
        let x = area.x + area.width.saturating_sub(text.len() as u16) / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, text, Style::new().fg(White).bg(Black).bold());
    }
}

struct InputWidget {
    input: Input,
}

impl Widget for InputWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // ^
        //< >
        // v
        let up = (area.left() + 1, area.top());
        let left = (area.left(), area.top() + 1);
        let right = (area.left() + 2, area.top() + 1);
        let down = (area.left() + 1, area.top() + 2);

        let get_cell = |s: &'static str, button: Input| -> Cell {
            let (fg, bg) = if self.input.contains(button) {
                (Yellow, Red)
            } else {
                (Reset, Reset)
            };
            let mut cell = Cell::new(s);
            cell.set_fg(fg).set_bg(bg);
            cell
        };

        if area.width < 3 || area.height < 3 {
            return;
        }
        buf[up] = get_cell("^", Input::Up);
        buf[left] = get_cell("<", Input::Left);
        buf[right] = get_cell(">", Input::Right);
        buf[down] = get_cell("v", Input::Down);
    }
}

/// Draws one frame of the game. After game over the board shows the final screen.
pub fn draw<S: ShapeSource>(frame: &mut Frame, game: &Game<S>, input: Input, block: &str) {
    let area = frame.area();
    let w = area.width;
    let h = area.height;
    if w < MIN_WIDTH || h < MIN_HEIGHT {
        draw_too_small(frame, area, w, h);
        return;
    }
    let area = center(
        area,
        Constraint::Length(MIN_WIDTH),
        Constraint::Length(MIN_HEIGHT),
    );

    let panel = Block::new()
        .borders(Borders::all())
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(ACCENT))
        .title_style(Style::from(TITLE))
        .title_alignment(Center);
    frame.render_widget(panel.clone().title_top("BLOCKFALL"), area);
    let inner = panel.inner(area);

    let [board, side] = Layout::horizontal([
        Constraint::Length(BOARD_WIDTH),
        Constraint::Length(PANEL_WIDTH),
    ])
    .areas(inner);

    {
        // board
        let widget = panel.clone().title_top("game");
        let board_inner = widget.inner(board);
        frame.render_widget(widget, board);
        if game.is_over() {
            frame.render_widget(GameOverWidget, board_inner);
        } else {
            frame.render_widget(
                GridWidget {
                    grid: game.grid(),
                    piece: game.current(),
                    block,
                },
                board_inner,
            );
        }
    }

    let [next, lines, input_area, _] = Layout::vertical([
        Constraint::Length(MAX_SPAN as u16 + 2),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(side);

    {
        // next
        let widget = panel.clone().title_top("next");
        let next_inner = widget.inner(next);
        frame.render_widget(widget, next);
        frame.render_widget(
            PreviewWidget {
                piece: game.next(),
                block,
            },
            next_inner,
        );
    }
    {
        // lines
        let widget = panel.clone().title_top("score");
        let lines_inner = widget.inner(lines);
        frame.render_widget(widget, lines);
        frame.render_widget(
            Paragraph::new(game.score_label()).style(Style::from((ACCENT, Reset))),
            lines_inner,
        );
    }
    {
        // input
        let widget = panel.title_top("keys");
        let input_inner = widget.inner(input_area);
        frame.render_widget(widget, input_area);
        frame.render_widget(InputWidget { input }, input_inner);
    }
}

fn draw_too_small(frame: &mut Frame, area: Rect, w: u16, h: u16) {
    let too_small_block = Block::new()
        .borders(Borders::all())
        .border_type(BorderType::Rounded)
        .border_style(Style::new())
        .title_top("Too small!")
        .title_style(Style::from(Red))
        .title_alignment(Center);

    let inner = center(
        too_small_block.inner(area),
        Constraint::Min(0),
        Constraint::Max(2),
    );
    frame.render_widget(too_small_block, area);

    let too_small_text = Paragraph::new(format!(
        "need: {MIN_WIDTH}x{MIN_HEIGHT}, have: {w}x{h}"
    ))
    .centered()
    .wrap(Wrap { trim: false })
    .fg(Red);
    frame.render_widget(too_small_text, inner);
}

fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}
