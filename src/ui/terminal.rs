use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Terminal,
};
use std::io;

use super::braille::BrailleCanvas;
use super::renderer::{Font, Point, Renderer, Rgb, TextSurface};
use crate::game::{Bounds, COURT_HEIGHT, COURT_WIDTH};

/// Text laid over the canvas at a terminal cell
struct PlacedText {
    col: u16,
    row: u16,
    surface: TextSurface,
}

/// Renders the logical court onto a Braille canvas sized to the terminal.
///
/// Shapes go into the canvas (2×4 dots per cell); text is drawn on top as
/// ordinary terminal characters. A frame is accumulated between `clear`
/// and `present`.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    canvas: BrailleCanvas,
    texts: Vec<PlacedText>,
    background: Rgb,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> io::Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            canvas: BrailleCanvas::new(size.width as usize, size.height as usize),
            texts: Vec::new(),
            background: Rgb(0, 0, 0),
        })
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn cols(&self) -> i64 {
        self.canvas.width().max(1) as i64
    }

    fn rows(&self) -> i64 {
        self.canvas.height().max(1) as i64
    }

    fn pixel_x(&self, x: i32) -> i64 {
        x as i64 * self.canvas.pixel_width() as i64 / COURT_WIDTH as i64
    }

    fn pixel_y(&self, y: i32) -> i64 {
        y as i64 * self.canvas.pixel_height() as i64 / COURT_HEIGHT as i64
    }

    /// Pixel rectangle covering `bounds`, never thinner than one dot
    fn pixel_rect(&self, bounds: Bounds) -> (i64, i64, i64, i64) {
        let x = self.pixel_x(bounds.left());
        let y = self.pixel_y(bounds.top());
        let width = (self.pixel_x(bounds.right()) - x).max(1);
        let height = (self.pixel_y(bounds.bottom()) - y).max(1);
        (x, y, width, height)
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn clear(&mut self, color: Rgb) {
        // Pick up terminal resizes at the start of every frame
        let (width, height) = match self.terminal.size() {
            Ok(size) => (size.width as usize, size.height as usize),
            Err(_) => (self.canvas.width(), self.canvas.height()),
        };
        self.canvas = BrailleCanvas::new(width, height);
        self.texts.clear();
        self.background = color;
    }

    fn draw_rect(&mut self, bounds: Bounds, color: Rgb) {
        let (x, y, w, h) = self.pixel_rect(bounds);
        self.canvas.fill_rect(x, y, w, h, color);
    }

    fn draw_ellipse(&mut self, bounds: Bounds, color: Rgb) {
        let (x, y, w, h) = self.pixel_rect(bounds);
        self.canvas.fill_ellipse(x, y, w, h, color);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, _antialiased: bool) {
        // Braille dots are on or off, so there is nothing to antialias
        let max_x = self.canvas.pixel_width() as i64 - 1;
        let max_y = self.canvas.pixel_height() as i64 - 1;
        let start = (
            self.pixel_x(from.x).min(max_x),
            self.pixel_y(from.y).min(max_y),
        );
        let end = (self.pixel_x(to.x).min(max_x), self.pixel_y(to.y).min(max_y));
        self.canvas.draw_line(start, end, color);
    }

    fn draw_text(&mut self, text: &str, font: Font, color: Rgb) -> TextSurface {
        let chars = text.chars().count() as i64;
        let cols = self.cols();
        let rows = self.rows();
        let width = (chars * COURT_WIDTH as i64 + cols - 1) / cols;
        let height = (COURT_HEIGHT as i64 + rows - 1) / rows;

        TextSurface {
            text: text.to_string(),
            font,
            color,
            width: width as i32,
            height: height as i32,
        }
    }

    fn blit(&mut self, surface: &TextSurface, top_left: Point) {
        let col = (top_left.x.max(0) as i64 * self.cols() / COURT_WIDTH as i64)
            .min(self.cols() - 1);
        let row = (top_left.y.max(0) as i64 * self.rows() / COURT_HEIGHT as i64)
            .min(self.rows() - 1);

        self.texts.push(PlacedText {
            col: col as u16,
            row: row as u16,
            surface: surface.clone(),
        });
    }

    fn present(&mut self) -> io::Result<()> {
        let canvas = &self.canvas;
        let texts = &self.texts;
        let background = to_color(self.background);

        self.terminal.draw(|frame| {
            let area = frame.area();

            let bg = Block::default().style(Style::default().bg(background));
            frame.render_widget(bg, area);

            let rows = canvas.height().min(area.height as usize);
            for y in 0..rows {
                let line = canvas_row(canvas, y, background);
                let row_area = Rect {
                    x: area.x,
                    y: area.y + y as u16,
                    width: area.width,
                    height: 1,
                };
                frame.render_widget(Paragraph::new(line), row_area);
            }

            for placed in texts {
                if placed.col >= area.width || placed.row >= area.height {
                    continue;
                }
                let len = placed.surface.text.chars().count() as u16;
                let text_area = Rect {
                    x: area.x + placed.col,
                    y: area.y + placed.row,
                    width: len.min(area.width - placed.col),
                    height: 1,
                };
                let mut style = Style::default()
                    .fg(to_color(placed.surface.color))
                    .bg(background);
                if placed.surface.font == Font::Large {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let paragraph = Paragraph::new(placed.surface.text.as_str()).style(style);
                frame.render_widget(paragraph, text_area);
            }
        })?;

        Ok(())
    }
}

/// One canvas row as spans, merging runs of the same color
fn canvas_row(canvas: &BrailleCanvas, y: usize, background: Color) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_color: Option<Rgb> = None;

    for x in 0..canvas.width() {
        let color = canvas.cell_color(x, y);
        if color != run_color && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_color, background));
        }
        run_color = color;
        run.push(canvas.to_char(x, y));
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_color, background));
    }

    Line::from(spans)
}

fn styled_run(text: String, color: Option<Rgb>, background: Color) -> Span<'static> {
    let style = Style::default().bg(background);
    let style = match color {
        Some(c) => style.fg(to_color(c)),
        None => style,
    };
    Span::styled(text, style)
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}
