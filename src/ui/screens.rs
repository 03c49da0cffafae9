// Screen layouts for the menu, the court and the game over summary

use super::renderer::{Font, Point, Renderer, Rgb};
use crate::config::DisplayConfig;
use crate::game::{GameEngine, MatchLength, Screen, COURT_HEIGHT, COURT_WIDTH};

const TITLE: &str = "PING PONG";
const OPTION_SPACING: i32 = 40;

/// Colors used for every screen
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub center_line: Rgb,
}

impl From<&DisplayConfig> for Palette {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            background: display.background.into(),
            foreground: display.foreground.into(),
            center_line: display.center_line.into(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::from(&DisplayConfig::default())
    }
}

/// Draw the engine's current screen. Does not present the frame.
pub fn draw(engine: &GameEngine, renderer: &mut impl Renderer, palette: &Palette) {
    renderer.clear(palette.background);

    match engine.screen() {
        Screen::Menu => draw_menu(engine, renderer, palette),
        Screen::Playing => draw_playing(engine, renderer, palette),
        Screen::GameOver => draw_game_over(engine, renderer, palette),
    }
}

fn draw_menu(engine: &GameEngine, renderer: &mut impl Renderer, palette: &Palette) {
    let fg = palette.foreground;

    centered_text(renderer, TITLE, Font::Large, fg, Point::new(COURT_WIDTH / 2, COURT_HEIGHT / 4));
    centered_text(
        renderer,
        "Select a mode:",
        Font::Small,
        fg,
        Point::new(COURT_WIDTH / 2, COURT_HEIGHT / 2 - OPTION_SPACING),
    );

    let mut lines = mode_options();
    lines.push(format!(
        "Press Enter - Play {}",
        engine.match_length().display_text()
    ));
    lines.push("Press 'Q' - Quit".to_string());
    option_list(renderer, &lines, fg, COURT_HEIGHT / 2);

    centered_text(
        renderer,
        "W/S or Up/Down to move",
        Font::Small,
        fg,
        Point::new(COURT_WIDTH / 2, COURT_HEIGHT - OPTION_SPACING),
    );
}

fn draw_playing(engine: &GameEngine, renderer: &mut impl Renderer, palette: &Palette) {
    let fg = palette.foreground;

    renderer.draw_line(
        Point::new(COURT_WIDTH / 2, 0),
        Point::new(COURT_WIDTH / 2, COURT_HEIGHT),
        palette.center_line,
        true,
    );
    renderer.draw_rect(engine.player_paddle().bounds, fg);
    renderer.draw_rect(engine.ai_paddle().bounds, fg);
    renderer.draw_ellipse(engine.ball().bounds, fg);

    let player = renderer.draw_text(&engine.player_score().to_string(), Font::Large, fg);
    renderer.blit(&player, Point::new(COURT_WIDTH / 4, 20));

    // Right score is right-aligned on the three-quarter mark
    let ai = renderer.draw_text(&engine.ai_score().to_string(), Font::Large, fg);
    renderer.blit(&ai, Point::new(COURT_WIDTH * 3 / 4 - ai.width, 20));
}

fn draw_game_over(engine: &GameEngine, renderer: &mut impl Renderer, palette: &Palette) {
    let fg = palette.foreground;

    centered_text(
        renderer,
        engine.winner_text(),
        Font::Large,
        fg,
        Point::new(COURT_WIDTH / 2, COURT_HEIGHT / 3),
    );
    centered_text(
        renderer,
        &engine.score_summary(),
        Font::Small,
        fg,
        Point::new(COURT_WIDTH / 2, COURT_HEIGHT / 3 + 50),
    );
    centered_text(
        renderer,
        "Play Again? Select a mode:",
        Font::Small,
        fg,
        Point::new(COURT_WIDTH / 2, COURT_HEIGHT / 2),
    );

    let mut lines = mode_options();
    lines.push("Press 'M' - Main Menu".to_string());
    lines.push("Press 'Q' - Quit".to_string());
    option_list(renderer, &lines, fg, COURT_HEIGHT / 2 + 50);
}

fn mode_options() -> Vec<String> {
    MatchLength::all()
        .into_iter()
        .map(|mode| format!("Press '{}' - {}", mode.key(), mode.display_text()))
        .collect()
}

fn option_list(renderer: &mut impl Renderer, lines: &[String], color: Rgb, top: i32) {
    for (i, text) in lines.iter().enumerate() {
        let y = top + i as i32 * OPTION_SPACING;
        centered_text(renderer, text, Font::Small, color, Point::new(COURT_WIDTH / 2, y));
    }
}

fn centered_text(renderer: &mut impl Renderer, text: &str, font: Font, color: Rgb, center: Point) {
    let surface = renderer.draw_text(text, font, color);
    renderer.blit(&surface, surface.centered_at(center));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundBank;
    use crate::game::input::{Command, Movement};
    use crate::game::Bounds;
    use crate::ui::renderer::TextSurface;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;

    /// Records every draw call for inspection
    #[derive(Default)]
    struct RecordingRenderer {
        clears: usize,
        rects: Vec<Bounds>,
        ellipses: Vec<Bounds>,
        lines: Vec<(Point, Point)>,
        texts: Vec<(String, Point)>,
    }

    impl RecordingRenderer {
        fn has_text(&self, needle: &str) -> bool {
            self.texts.iter().any(|(text, _)| text == needle)
        }

        fn text_position(&self, needle: &str) -> Option<Point> {
            self.texts
                .iter()
                .find(|(text, _)| text == needle)
                .map(|(_, at)| *at)
        }
    }

    impl Renderer for RecordingRenderer {
        fn clear(&mut self, _color: Rgb) {
            self.clears += 1;
        }

        fn draw_rect(&mut self, bounds: Bounds, _color: Rgb) {
            self.rects.push(bounds);
        }

        fn draw_ellipse(&mut self, bounds: Bounds, _color: Rgb) {
            self.ellipses.push(bounds);
        }

        fn draw_line(&mut self, from: Point, to: Point, _color: Rgb, _antialiased: bool) {
            self.lines.push((from, to));
        }

        fn draw_text(&mut self, text: &str, font: Font, color: Rgb) -> TextSurface {
            TextSurface {
                text: text.to_string(),
                font,
                color,
                width: text.len() as i32 * 10,
                height: 20,
            }
        }

        fn blit(&mut self, surface: &TextSurface, top_left: Point) {
            self.texts.push((surface.text.clone(), top_left));
        }

        fn present(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn engine() -> GameEngine {
        GameEngine::new(
            MatchLength::default(),
            SoundBank::silent(),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn test_menu_lists_modes_and_quit() {
        let engine = engine();
        let mut r = RecordingRenderer::default();
        draw(&engine, &mut r, &Palette::default());

        assert_eq!(r.clears, 1);
        assert!(r.has_text(TITLE));
        assert!(r.has_text("Press '3' - Best of 3"));
        assert!(r.has_text("Press '7' - Best of 7"));
        assert!(r.has_text("Press Enter - Play Best of 5"));
        assert!(r.has_text("Press 'Q' - Quit"));
        assert!(r.rects.is_empty());
    }

    #[test]
    fn test_playing_draws_court() {
        let mut engine = engine();
        engine.handle_command(Command::Confirm);
        let mut r = RecordingRenderer::default();
        draw(&engine, &mut r, &Palette::default());

        assert_eq!(r.lines, vec![(Point::new(400, 0), Point::new(400, 600))]);
        assert_eq!(r.rects.len(), 2);
        assert_eq!(r.ellipses, vec![engine.ball().bounds]);
        assert_eq!(r.text_position("0"), Some(Point::new(200, 20)));
        // AI score right-aligned at 600
        assert_eq!(r.texts[1].1, Point::new(590, 20));
    }

    #[test]
    fn test_game_over_shows_winner_and_summary() {
        let mut engine = engine();
        engine.handle_command(Command::SelectMode(MatchLength::BestOf3));
        engine.set_scores(3, 1);
        engine.update(Movement::default());
        assert_eq!(engine.screen(), Screen::GameOver);

        let mut r = RecordingRenderer::default();
        draw(&engine, &mut r, &Palette::default());

        assert!(r.has_text("Player Wins!"));
        assert!(r.has_text("Player 3 - AI 1"));
        assert!(r.has_text("Press 'M' - Main Menu"));
        assert!(r.has_text("Press '5' - Best of 5"));
        assert!(r.rects.is_empty());
    }

    #[test]
    fn test_palette_from_display_config() {
        let display = DisplayConfig {
            foreground: [1, 2, 3],
            ..DisplayConfig::default()
        };
        let palette = Palette::from(&display);
        assert_eq!(palette.foreground, Rgb(1, 2, 3));
        assert_eq!(palette.background, Rgb(0, 0, 0));
    }
}
