use crate::math::Point;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            xmin: first.x,
            xmax: first.x,
            ymin: first.y,
            ymax: first.y,
        };
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: Point) {
        self.xmin = self.xmin.min(p.x);
        self.xmax = self.xmax.max(p.x);
        self.ymin = self.ymin.min(p.y);
        self.ymax = self.ymax.max(p.y);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.xmin + self.xmax),
            0.5 * (self.ymin + self.ymax),
        )
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> Point {
        Point::new(self.xmin, self.ymin)
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Point {
        Point::new(self.xmax, self.ymax)
    }
}
