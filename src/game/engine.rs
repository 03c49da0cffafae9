use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ball::{Ball, CollisionEvent};
use super::geometry::COURT_HEIGHT;
use super::input::{Command, Movement};
use super::paddle::{Direction, Paddle};
use super::state::{MatchLength, Screen};
use crate::audio::SoundBank;

pub const PLAYER_WINS: &str = "Player Wins!";
pub const AI_WINS: &str = "AI Wins!";

/// Whether the main loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the ball, both paddles and all match state.
///
/// The engine knows nothing about terminals: it receives `Command`s and a
/// `Movement` snapshot, fires sound cues, and exposes read-only state for
/// the screens to draw.
pub struct GameEngine {
    screen: Screen,
    ball: Ball,
    player_paddle: Paddle,
    ai_paddle: Paddle,
    player_score: u32,
    ai_score: u32,
    match_length: MatchLength,
    winner_text: String,
    sounds: SoundBank,
    rng: StdRng,
}

impl GameEngine {
    /// Start on the menu with entities in their kickoff positions.
    pub fn new(default_length: MatchLength, sounds: SoundBank, mut rng: StdRng) -> Self {
        let ball = Ball::new(StdRng::seed_from_u64(rng.gen()));

        Self {
            screen: Screen::Menu,
            ball,
            player_paddle: Paddle::player(),
            ai_paddle: Paddle::ai(),
            player_score: 0,
            ai_score: 0,
            match_length: default_length,
            winner_text: String::new(),
            sounds,
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player_paddle(&self) -> &Paddle {
        &self.player_paddle
    }

    pub fn ai_paddle(&self) -> &Paddle {
        &self.ai_paddle
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn ai_score(&self) -> u32 {
        self.ai_score
    }

    pub fn match_length(&self) -> MatchLength {
        self.match_length
    }

    pub fn winner_text(&self) -> &str {
        &self.winner_text
    }

    /// Apply one discrete command according to the current screen.
    pub fn handle_command(&mut self, command: Command) -> Flow {
        match (self.screen, command) {
            (_, Command::Quit) => {
                tracing::info!(screen = ?self.screen, "quit requested");
                return Flow::Quit;
            }
            (Screen::Menu | Screen::GameOver, Command::SelectMode(length)) => {
                self.start_match(length);
            }
            (Screen::Menu, Command::Confirm) => {
                self.start_match(self.match_length);
            }
            (Screen::GameOver, Command::Menu) => {
                tracing::debug!("back to menu");
                self.screen = Screen::Menu;
            }
            _ => {}
        }

        Flow::Continue
    }

    /// Reset scores and entities and begin playing.
    pub fn start_match(&mut self, length: MatchLength) {
        tracing::info!(winning_score = length.winning_score(), "match started");

        self.match_length = length;
        self.player_paddle = Paddle::player();
        self.ai_paddle = Paddle::ai();
        self.ball = Ball::new(StdRng::seed_from_u64(self.rng.gen()));
        self.player_score = 0;
        self.ai_score = 0;
        self.winner_text.clear();
        self.screen = Screen::Playing;
    }

    /// Run one simulation tick. Does nothing outside of `Playing`.
    pub fn update(&mut self, movement: Movement) {
        if self.screen != Screen::Playing {
            return;
        }

        // Both keys may be held; the moves cancel out
        if movement.up {
            self.player_paddle.move_by(Direction::Up, COURT_HEIGHT);
        }
        if movement.down {
            self.player_paddle.move_by(Direction::Down, COURT_HEIGHT);
        }

        let event = self.ball.advance(&self.player_paddle, &self.ai_paddle);
        self.handle_collision(event);

        self.ai_paddle.ai_move(&self.ball.bounds, COURT_HEIGHT);

        self.check_winner();
    }

    fn handle_collision(&mut self, event: CollisionEvent) {
        match event {
            CollisionEvent::PaddleHit => {
                tracing::debug!("paddle hit");
                self.sounds.paddle_hit.play();
            }
            CollisionEvent::WallHit => {
                tracing::debug!("wall bounce");
                self.sounds.wall_bounce.play();
            }
            CollisionEvent::PlayerScore => {
                self.sounds.score.play();
                self.player_score += 1;
                tracing::info!(player = self.player_score, ai = self.ai_score, "player scored");
            }
            CollisionEvent::AiScore => {
                self.sounds.score.play();
                self.ai_score += 1;
                tracing::info!(player = self.player_score, ai = self.ai_score, "ai scored");
            }
            CollisionEvent::None => {}
        }
    }

    fn check_winner(&mut self) {
        let target = self.match_length.winning_score();

        if self.player_score >= target {
            self.finish(PLAYER_WINS);
        } else if self.ai_score >= target {
            self.finish(AI_WINS);
        }
    }

    fn finish(&mut self, winner: &str) {
        tracing::info!(
            player = self.player_score,
            ai = self.ai_score,
            "match over: {winner}"
        );
        self.winner_text = winner.to_string();
        self.screen = Screen::GameOver;
    }

    /// "Player 5 - AI 0"
    pub fn score_summary(&self) -> String {
        format!("Player {} - AI {}", self.player_score, self.ai_score)
    }
}

#[cfg(test)]
impl GameEngine {
    /// Overwrite the running score, for tests outside this module
    pub(crate) fn set_scores(&mut self, player: u32, ai: u32) {
        self.player_score = player;
        self.ai_score = ai;
    }
}
