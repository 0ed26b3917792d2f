//! Geometric primitives: points, sizes and rectangles.

use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

// --- Generic Point<T> ---

/// A 2D point with generic coordinates.
///
/// The compositor uses `Point<f64>` for the cursor position and `Point<i32>`
/// for layout coordinates and grab anchors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Point<T: Num + Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Num + Copy + Eq> Eq for Point<T> {}
impl<T: Num + Copy + std::hash::Hash> std::hash::Hash for Point<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl<T: Num + Copy> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl Point<f64> {
    /// Truncates both coordinates toward zero, the way layout coordinates are
    /// derived from the cursor position.
    pub fn to_i32(self) -> Point<i32> {
        Point::new(self.x as i32, self.y as i32)
    }
}

impl Point<i32> {
    pub fn to_f64(self) -> Point<f64> {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl<T: Num + Copy> Add for Point<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num + Copy> Sub for Point<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

// --- Generic Size<T> ---

/// A 2D size (width and height) with generic dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Size<T: Num + Copy> {
    pub width: T,
    pub height: T,
}

impl<T: Num + Copy + Eq> Eq for Size<T> {}
impl<T: Num + Copy + std::hash::Hash> std::hash::Hash for Size<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
    }
}

impl<T: Num + Copy + PartialOrd> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// Returns `true` if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= T::zero() || self.height <= T::zero()
    }
}

// --- Rect ---

/// An axis-aligned integer rectangle in layout coordinates.
///
/// Width and height are signed so that intermediate results (e.g. a resize
/// dragged past the origin) can be represented before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn from_parts(origin: Point<i32>, size: Size<i32>) -> Self {
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point<i32> {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size<i32> {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open containment test: the left/top edges are inside, the
    /// right/bottom edges are not.
    pub fn contains(&self, point: Point<f64>) -> bool {
        !self.is_empty()
            && point.x >= f64::from(self.x)
            && point.y >= f64::from(self.y)
            && point.x < f64::from(self.right())
            && point.y < f64::from(self.bottom())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rectangle containing both `self` and `other`. Empty rectangles
    /// do not contribute.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// A rectangle of `size` centered inside `self`, using integer division.
    pub fn center_of(&self, size: Size<i32>) -> Rect {
        Rect::new(
            self.x + (self.width - size.width) / 2,
            self.y + (self.height - size.height) / 2,
            size.width,
            size.height,
        )
    }

    /// Clamps `point` into the rectangle. The right/bottom bound is the last
    /// pixel row/column inside the exclusive edge.
    pub fn clamp(&self, point: Point<f64>) -> Point<f64> {
        if self.is_empty() {
            return point;
        }
        let max_x = f64::from(self.right() - 1);
        let max_y = f64::from(self.bottom() - 1);
        Point::new(
            point.x.clamp(f64::from(self.x), max_x),
            point.y.clamp(f64::from(self.y), max_y),
        )
    }
}
