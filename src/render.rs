use anyhow::Result;

use crate::{Cell, TermInt};
use crate::state::Frame;
use crate::term::{Style, Surface};

const BODY_CHAR: char = 'o';
const FOOD_CHAR: char = '*';
const HORIZONTAL_BORDER: char = '=';
const VERTICAL_BORDER: char = '|';

const HELP_LINE: &str = "WASD or arrow keys to move, Q to quit";

/// The status line shows `100 - interval`, independent of the configured base.
const DIFFICULTY_REFERENCE_MS: i64 = 100;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    pub fn draw<S: Surface>(&self, frame: &Frame<'_>, surface: &mut S) -> Result<()> {
        surface.clear()?;

        self.draw_borders(frame, surface)?;

        for &cell in frame.snake.iter() {
            self.draw_cell(cell, BODY_CHAR, Style::Body, surface)?;
        }
        if let Some(&head) = frame.snake.front() {
            self.draw_cell(head, BODY_CHAR, Style::Head, surface)?;
        }
        self.draw_cell(frame.food, FOOD_CHAR, Style::Food, surface)?;

        let below = (frame.height + 2) as TermInt;
        surface.put_str(0, below, &status_line(frame), Style::Plain)?;
        surface.put_str(0, below + 1, HELP_LINE, Style::Plain)?;

        if frame.game_over {
            self.draw_game_over(frame, surface)?;
        }

        surface.flush()
    }

    fn draw_borders<S: Surface>(&self, frame: &Frame<'_>, surface: &mut S) -> Result<()> {
        let right = (frame.width + 1) as TermInt;
        let bottom = (frame.height + 1) as TermInt;

        for x in 0..=right {
            surface.put(x, 0, HORIZONTAL_BORDER, Style::Border)?;
            surface.put(x, bottom, HORIZONTAL_BORDER, Style::Border)?;
        }
        for y in 0..=bottom {
            surface.put(0, y, VERTICAL_BORDER, Style::Border)?;
            surface.put(right, y, VERTICAL_BORDER, Style::Border)?;
        }
        Ok(())
    }

    fn draw_cell<S: Surface>(&self, (x, y): Cell, ch: char, style: Style, surface: &mut S) -> Result<()> {
        surface.put((x + 1) as TermInt, (y + 1) as TermInt, ch, style)
    }

    // Placed in screen coordinates, without the border offset
    fn draw_game_over<S: Surface>(&self, frame: &Frame<'_>, surface: &mut S) -> Result<()> {
        let row = (frame.height / 2) as TermInt;
        let center = frame.width / 2;
        let col = |shift: i32| (center - shift).max(0) as TermInt;

        surface.put_str(col(5), row, "game over!", Style::Banner)?;
        surface.put_str(col(8), row + 1, &format!("score: {}", frame.score), Style::Banner)?;
        surface.put_str(col(10), row + 2, "Press any key to exit...", Style::Banner)?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn status_line(frame: &Frame<'_>) -> String {
    let difficulty = DIFFICULTY_REFERENCE_MS - frame.speed_ms as i64;
    format!("Score: {} Speed: {}", frame.score, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    /// In-memory surface recording the last glyph and style per cell.
    struct Grid {
        cols: usize,
        cells: Vec<(char, Style)>,
        flushed: bool,
    }

    impl Grid {
        fn new(cols: usize, rows: usize) -> Self {
            Grid { cols, cells: vec![(' ', Style::Plain); cols * rows], flushed: false }
        }

        fn at(&self, col: usize, row: usize) -> (char, Style) {
            self.cells[row * self.cols + col]
        }

        fn row(&self, row: usize) -> String {
            let line: String = self.cells[row * self.cols..(row + 1) * self.cols].iter().map(|c| c.0).collect();
            line.trim_end().to_string()
        }
    }

    impl Surface for Grid {
        fn put(&mut self, col: TermInt, row: TermInt, ch: char, style: Style) -> Result<()> {
            self.cells[row as usize * self.cols + col as usize] = (ch, style);
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            self.cells.iter_mut().for_each(|c| *c = (' ', Style::Plain));
            self.flushed = false;
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    fn frame<'a>(snake: &'a VecDeque<Cell>, score: u32, speed_ms: u64, game_over: bool) -> Frame<'a> {
        Frame { width: 6, height: 4, snake, food: (0, 3), score, speed_ms, game_over }
    }

    #[test]
    fn test_small_board_layout() {
        let snake: VecDeque<Cell> = vec![(3, 1), (2, 1), (1, 1)].into();
        let mut grid = Grid::new(40, 8);

        Renderer::new().draw(&frame(&snake, 0, 100, false), &mut grid).unwrap();

        let rows: Vec<String> = (0..8).map(|r| grid.row(r)).collect();
        assert_eq!(rows, vec![
            "|======|",
            "|      |",
            "| ooo  |",
            "|      |",
            "|*     |",
            "|======|",
            "Score: 0 Speed: 0",
            "WASD or arrow keys to move, Q to quit",
        ]);
        assert!(grid.flushed);
    }

    #[test]
    fn test_glyph_styles() {
        let snake: VecDeque<Cell> = vec![(3, 1), (2, 1)].into();
        let mut grid = Grid::new(40, 8);

        Renderer::new().draw(&frame(&snake, 0, 100, false), &mut grid).unwrap();

        assert_eq!(grid.at(4, 2), ('o', Style::Head));
        assert_eq!(grid.at(3, 2), ('o', Style::Body));
        assert_eq!(grid.at(1, 4), ('*', Style::Food));
        assert_eq!(grid.at(0, 0), ('|', Style::Border));
        assert_eq!(grid.at(2, 0), ('=', Style::Border));
    }

    #[test]
    fn test_status_line_readout() {
        let snake: VecDeque<Cell> = vec![(3, 1)].into();
        assert_eq!(status_line(&frame(&snake, 0, 100, false)), "Score: 0 Speed: 0");
        assert_eq!(status_line(&frame(&snake, 7, 86, false)), "Score: 7 Speed: 14");
        assert_eq!(status_line(&frame(&snake, 30, 50, false)), "Score: 30 Speed: 50");
    }

    #[test]
    fn test_no_banner_while_playing() {
        let snake: VecDeque<Cell> = vec![(3, 1)].into();
        let mut grid = Grid::new(40, 8);

        Renderer::new().draw(&frame(&snake, 0, 100, false), &mut grid).unwrap();

        assert!((0..8).all(|r| !grid.row(r).contains("game over!")));
    }

    #[test]
    fn test_game_over_banner_on_full_board() {
        let snake: VecDeque<Cell> = vec![(21, 15), (20, 15), (19, 15)].into();
        let frame = Frame { width: 40, height: 30, snake: &snake, food: (5, 5), score: 12, speed_ms: 76, game_over: true };
        let mut grid = Grid::new(60, 34);

        Renderer::new().draw(&frame, &mut grid).unwrap();

        assert_eq!(&grid.row(15)[15..25], "game over!");
        assert_eq!(&grid.row(16)[12..21], "score: 12");
        assert_eq!(&grid.row(17)[10..34], "Press any key to exit...");
        assert_eq!(grid.at(15, 15), ('g', Style::Banner));
        assert_eq!(grid.row(32), "Score: 12 Speed: 24");
        assert_eq!(grid.row(33), HELP_LINE);
        assert_eq!(grid.row(0), "|".to_string() + &"=".repeat(40) + "|");
    }
}
