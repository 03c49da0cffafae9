// Integer rectangles in logical court coordinates

/// Logical court size. Everything in the simulation runs in these units;
/// the renderer scales them to whatever the terminal offers.
pub const COURT_WIDTH: i32 = 800;
pub const COURT_HEIGHT: i32 = 600;

/// Axis-aligned box with its top-left corner at (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Place the box so that its center lands on (cx, cy).
    pub fn center_on(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.width / 2;
        self.y = cy - self.height / 2;
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Bounds::new(20, 250, 10, 100);
        assert_eq!(b.left(), 20);
        assert_eq!(b.right(), 30);
        assert_eq!(b.top(), 250);
        assert_eq!(b.bottom(), 350);
        assert_eq!(b.center_y(), 300);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let paddle = Bounds::new(20, 250, 10, 100);
        let ball = Bounds::new(30, 280, 15, 15);
        assert!(!paddle.intersects(&ball));

        let overlapping = Bounds::new(29, 280, 15, 15);
        assert!(paddle.intersects(&overlapping));
        assert!(overlapping.intersects(&paddle));
    }

    #[test]
    fn test_center_on_uses_integer_half_size() {
        let mut b = Bounds::new(0, 0, 15, 15);
        b.center_on(COURT_WIDTH / 2, COURT_HEIGHT / 2);
        assert_eq!((b.x, b.y), (393, 293));
    }
}
