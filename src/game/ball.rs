use rand::rngs::StdRng;
use rand::Rng;

use super::geometry::{Bounds, COURT_HEIGHT, COURT_WIDTH};
use super::paddle::Paddle;

pub const BALL_SIZE: i32 = 15;
pub const BALL_SPEED: i32 = 7;

/// Outcome of a single ball step. At most one is produced per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    PaddleHit,
    WallHit,
    /// Ball left through the right edge
    PlayerScore,
    /// Ball left through the left edge
    AiScore,
    None,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub bounds: Bounds,
    pub speed_x: i32,
    pub speed_y: i32,
    rng: StdRng,
}

impl Ball {
    /// Serve from the court center in a random diagonal direction.
    pub fn new(mut rng: StdRng) -> Self {
        let speed_x = BALL_SPEED * random_sign(&mut rng);
        let speed_y = BALL_SPEED * random_sign(&mut rng);

        Self {
            bounds: Bounds::new(
                COURT_WIDTH / 2 - BALL_SIZE / 2,
                COURT_HEIGHT / 2 - BALL_SIZE / 2,
                BALL_SIZE,
                BALL_SIZE,
            ),
            speed_x,
            speed_y,
            rng,
        }
    }

    /// Advance one tick and resolve collisions.
    ///
    /// Horizontal motion is resolved first. A paddle hit ends the step, so
    /// the ball neither moves vertically nor gets checked against the walls
    /// or goal lines on that tick.
    pub fn advance(&mut self, player: &Paddle, ai: &Paddle) -> CollisionEvent {
        self.bounds.x += self.speed_x;

        if self.bounds.intersects(&player.bounds) {
            self.speed_x = -self.speed_x;
            self.bounds.set_left(player.bounds.right());
            return CollisionEvent::PaddleHit;
        }
        if self.bounds.intersects(&ai.bounds) {
            self.speed_x = -self.speed_x;
            self.bounds.set_right(ai.bounds.left());
            return CollisionEvent::PaddleHit;
        }

        self.bounds.y += self.speed_y;

        // Reflect without pulling the ball back inside; at 7 units per tick
        // the overshoot is never visible.
        if self.bounds.top() <= 0 || self.bounds.bottom() >= COURT_HEIGHT {
            self.speed_y = -self.speed_y;
            return CollisionEvent::WallHit;
        }

        if self.bounds.left() <= 0 {
            self.reset();
            return CollisionEvent::AiScore;
        }
        if self.bounds.right() >= COURT_WIDTH {
            self.reset();
            return CollisionEvent::PlayerScore;
        }

        CollisionEvent::None
    }

    /// Re-center and resample each velocity sign independently.
    /// Two resets in a row may well keep the same direction.
    pub fn reset(&mut self) {
        self.bounds.center_on(COURT_WIDTH / 2, COURT_HEIGHT / 2);
        self.speed_y *= random_sign(&mut self.rng);
        self.speed_x *= random_sign(&mut self.rng);
    }
}

fn random_sign(rng: &mut StdRng) -> i32 {
    if rng.gen_bool(0.5) {
        1
    } else {
        -1
    }
}
