use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle measured in world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal coordinate of the left edge.
    pub x: f32,
    /// Vertical coordinate of the top edge.
    pub y: f32,
    /// Extent along the horizontal axis.
    pub width: f32,
    /// Extent along the vertical axis.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extents.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle anchored at `origin` with the provided size.
    #[must_use]
    pub fn from_origin(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Creates a rectangle of `size` whose center sits at `center`.
    #[must_use]
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        Self::from_origin(center - size * 0.5, size)
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Extents of the rectangle.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Geometric center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the rectangle shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Reports whether the two rectangles share interior area.
    ///
    /// Rectangles that merely touch along an edge do not overlap, and
    /// degenerate rectangles never overlap anything.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }

        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Tile dimensions and extents of a loaded map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMetrics {
    /// Width of a single tile in pixels.
    pub tile_width: f32,
    /// Height of a single tile in pixels.
    pub tile_height: f32,
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
}

impl TileMetrics {
    /// Creates tile metrics from tile size and map extents.
    #[must_use]
    pub const fn new(tile_width: f32, tile_height: f32, columns: u32, rows: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            columns,
            rows,
        }
    }

    /// Size of a single tile in pixels.
    #[must_use]
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width, self.tile_height)
    }

    /// Width of the whole map in pixels.
    #[must_use]
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * self.tile_width
    }

    /// Height of the whole map in pixels.
    #[must_use]
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.tile_height
    }

    /// Converts a tile coordinate into the pixel position of its top-left corner.
    #[must_use]
    pub fn tile_origin(&self, column: u32, row: u32) -> Vec2 {
        Vec2::new(column as f32 * self.tile_width, row as f32 * self.tile_height)
    }

    /// Clamps a top-left position so a body of `size` stays inside the map.
    #[must_use]
    pub fn clamp_origin(&self, origin: Vec2, size: Vec2) -> Vec2 {
        let max_x = (self.pixel_width() - size.x).max(0.0);
        let max_y = (self.pixel_height() - size.y).max(0.0);
        Vec2::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
    }

    /// Reports whether a point lies within the map's pixel bounds, edges included.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.x <= self.pixel_width()
            && point.y >= 0.0
            && point.y <= self.pixel_height()
    }
}
