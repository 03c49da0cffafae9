use super::geometry::{Bounds, COURT_HEIGHT, COURT_WIDTH};

pub const PADDLE_WIDTH: i32 = 10;
pub const PADDLE_HEIGHT: i32 = 100;
pub const PADDLE_MARGIN: i32 = 20; // Gap between paddle and side edge
pub const PLAYER_PADDLE_SPEED: i32 = 7;
pub const AI_PADDLE_SPEED: i32 = 6;

/// Vertical direction of a paddle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub bounds: Bounds,
    pub speed: i32,
}

impl Paddle {
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        Self {
            bounds: Bounds::new(x, y, PADDLE_WIDTH, PADDLE_HEIGHT),
            speed,
        }
    }

    /// Left-hand paddle steered by the keyboard
    pub fn player() -> Self {
        Self::new(PADDLE_MARGIN, centered_top(), PLAYER_PADDLE_SPEED)
    }

    /// Right-hand paddle steered by `ai_move`
    pub fn ai() -> Self {
        Self::new(
            COURT_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
            centered_top(),
            AI_PADDLE_SPEED,
        )
    }

    /// Step one speed increment in `direction`, then clamp to the court.
    pub fn move_by(&mut self, direction: Direction, court_height: i32) {
        self.bounds.y += self.speed * direction.sign();
        self.clamp(court_height);
    }

    /// Chase the ball's vertical center by one speed increment.
    ///
    /// There is no easing. The second comparison sees the position after a
    /// downward step, so a step that would pass the ball is taken back and
    /// the paddle settles within one step of it.
    pub fn ai_move(&mut self, ball: &Bounds, court_height: i32) {
        let target = ball.center_y();

        if self.bounds.center_y() < target {
            self.bounds.y += self.speed;
        }
        if self.bounds.center_y() > target {
            self.bounds.y -= self.speed;
        }

        self.clamp(court_height);
    }

    fn clamp(&mut self, court_height: i32) {
        if self.bounds.top() < 0 {
            self.bounds.set_top(0);
        }
        if self.bounds.bottom() > court_height {
            self.bounds.set_bottom(court_height);
        }
    }
}

fn centered_top() -> i32 {
    COURT_HEIGHT / 2 - PADDLE_HEIGHT / 2
}
