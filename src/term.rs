//! A `Surface` backed by a grid of terminal cells.
//!
//! Each cell stands for a `CELL_WIDTH x CELL_HEIGHT` block of pixels. The top
//! terminal row is kept for the score line and is not part of the surface.

use std::io::{self, Write};

use crossterm::style::{self, Color};
use crossterm::{cursor, queue};

use crate::surface::{Rect, Rgb, Surface};

pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

/// Terminal rows above the surface
const STATUS_ROWS: u16 = 1;

const BACKGROUND: Rgb = Rgb(20, 20, 30);
const STATUS_FG: Rgb = Rgb(230, 230, 230);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: STATUS_FG,
    bg: BACKGROUND,
};

pub struct TerminalSurface {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    /// Size the surface to a terminal of `term_cols x term_rows` cells.
    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        let cols = term_cols as usize;
        let rows = term_rows.saturating_sub(STATUS_ROWS) as usize;
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
        }
    }

    pub fn resize(&mut self, term_cols: u16, term_rows: u16) {
        *self = Self::new(term_cols, term_rows);
    }

    /// Pixel position at the centre of a terminal cell, or None for the
    /// status row.
    pub fn cell_center(column: u16, row: u16) -> Option<(f32, f32)> {
        let row = row.checked_sub(STATUS_ROWS)?;
        Some((
            (column as f32 + 0.5) * CELL_WIDTH,
            (row as f32 + 0.5) * CELL_HEIGHT,
        ))
    }

    /// Cells whose centres fall in `[start, start + len)` along one axis.
    fn span(start: f32, len: f32, cell: f32, count: usize) -> std::ops::Range<usize> {
        let first = ((start / cell) - 0.5).ceil().max(0.0);
        let end = (((start + len) / cell) - 0.5).ceil().max(0.0);
        let first = (first as usize).min(count);
        let end = (end as usize).min(count);
        first..end.max(first)
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    /// Write the status line and every cell to `out`.
    pub fn render(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        queue!(
            out,
            cursor::MoveTo(0, 0),
            style::SetForegroundColor(to_color(STATUS_FG)),
            style::SetBackgroundColor(to_color(BACKGROUND))
        )?;
        let line: String = status.chars().take(self.cols).collect();
        let pad = self.cols.saturating_sub(line.chars().count());
        queue!(out, style::Print(line), style::Print(" ".repeat(pad)))?;

        let mut prev: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row as u16 + STATUS_ROWS))?;
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if prev != Some((cell.fg, cell.bg)) {
                    queue!(
                        out,
                        style::SetForegroundColor(to_color(cell.fg)),
                        style::SetBackgroundColor(to_color(cell.bg))
                    )?;
                    prev = Some((cell.fg, cell.bg));
                }
                queue!(out, style::Print(cell.ch))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> f32 {
        self.cols as f32 * CELL_WIDTH
    }

    fn height(&self) -> f32 {
        self.rows as f32 * CELL_HEIGHT
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let cols = Self::span(rect.x, rect.width, CELL_WIDTH, self.cols);
        let rows = Self::span(rect.y, rect.height, CELL_HEIGHT, self.rows);
        for row in rows {
            for col in cols.clone() {
                let cell = self.cell_mut(col, row);
                cell.ch = ' ';
                cell.bg = color;
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        let cols = Self::span(rect.x, rect.width, CELL_WIDTH, self.cols);
        let rows = Self::span(rect.y, rect.height, CELL_HEIGHT, self.rows);
        if cols.is_empty() || rows.is_empty() {
            return;
        }
        let (left, right) = (cols.start, cols.end - 1);
        let (top, bottom) = (rows.start, rows.end - 1);
        for row in rows {
            for col in cols.clone() {
                let ch = match (col == left, col == right, row == top, row == bottom) {
                    (true, _, true, _) => '┌',
                    (_, true, true, _) => '┐',
                    (true, _, _, true) => '└',
                    (_, true, _, true) => '┘',
                    (true, _, _, _) | (_, true, _, _) => '│',
                    (_, _, true, _) | (_, _, _, true) => '─',
                    _ => continue,
                };
                let cell = self.cell_mut(col, row);
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        // The baseline sits at the bottom of the cell the text occupies.
        let row = ((y - 1.0) / CELL_HEIGHT).floor();
        let col = (x / CELL_WIDTH).floor();
        if row < 0.0 || row as usize >= self.rows || col < 0.0 {
            return;
        }
        let (row, col) = (row as usize, col as usize);
        for (i, ch) in text.chars().enumerate() {
            if col + i >= self.cols {
                break;
            }
            let cell = self.cell_mut(col + i, row);
            cell.ch = ch;
            cell.fg = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface;

    #[test]
    fn test_size_excludes_status_row() {
        let s = TerminalSurface::new(80, 26);
        assert_eq!(s.width(), 640.0);
        assert_eq!(s.height(), 400.0);
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(TerminalSurface::cell_center(3, 0), None);
        assert_eq!(TerminalSurface::cell_center(0, 1), Some((4.0, 8.0)));
        assert_eq!(TerminalSurface::cell_center(2, 3), Some((20.0, 40.0)));
    }

    #[test]
    fn test_fill_paints_cells_with_centres_inside() {
        let mut s = TerminalSurface::new(10, 6);
        s.fill_rect(Rect::new(8.0, 16.0, 16.0, 32.0), surface::SKY_BLUE);
        let painted: Vec<(usize, usize)> = (0..s.rows)
            .flat_map(|r| (0..s.cols).map(move |c| (c, r)))
            .filter(|&(c, r)| s.cells[r * s.cols + c].bg == surface::SKY_BLUE)
            .collect();
        assert_eq!(painted, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_fill_clips_offscreen() {
        let mut s = TerminalSurface::new(10, 6);
        s.fill_rect(Rect::new(-50.0, -300.0, 500.0, 20.0), surface::SKY_BLUE);
        assert!(s.cells.iter().all(|c| *c == BLANK));
        s.fill_rect(Rect::new(0.0, 1000.0, 80.0, 20.0), surface::SKY_BLUE);
        assert!(s.cells.iter().all(|c| *c == BLANK));
    }

    #[test]
    fn test_stroke_and_text() {
        let mut s = TerminalSurface::new(10, 6);
        s.stroke_rect(Rect::new(0.0, 0.0, 24.0, 48.0), surface::BLACK);
        assert_eq!(s.cells[0].ch, '┌');
        assert_eq!(s.cells[2].ch, '┐');
        assert_eq!(s.cells[10].ch, '│');
        assert_eq!(s.cells[11].ch, ' ');
        assert_eq!(s.cells[21].ch, '─');

        s.fill_text("Hi", 8.0, 16.0, surface::WHITE);
        assert_eq!(s.cells[1].ch, 'H');
        assert_eq!(s.cells[2].ch, 'i');
    }

    #[test]
    fn test_render_writes_status() {
        let s = TerminalSurface::new(20, 3);
        let mut out = Vec::new();
        s.render(&mut out, "Score: 0 / 14").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Score: 0 / 14"));
    }
}
