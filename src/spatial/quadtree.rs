//! Region quadtree over positioned points
//!
//! Rebuilt from scratch every tick by its users, so it only supports
//! insertion, range queries and a full clear.

use crate::io::configuration::{QUADTREE_CAPACITY, QUADTREE_MAX_DEPTH};
use crate::io::error::state_corruption;
use tracing::warn;

/// Anything with a 2D position can be indexed
pub trait Positioned {
    /// Position in canvas coordinates
    fn position(&self) -> (f64, f64);
}

impl Positioned for (f64, f64) {
    fn position(&self) -> (f64, f64) {
        *self
    }
}

/// Axis-aligned rectangle stored as center and half extents
///
/// Containment is inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Center x
    pub x: f64,
    /// Center y
    pub y: f64,
    /// Half of the width
    pub half_width: f64,
    /// Half of the height
    pub half_height: f64,
}

impl Rect {
    /// Rectangle from center and half extents
    pub const fn new(x: f64, y: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            x,
            y,
            half_width,
            half_height,
        }
    }

    /// Rectangle from its top-left corner and full size
    pub fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(
            left + width / 2.0,
            top + height / 2.0,
            width / 2.0,
            height / 2.0,
        )
    }

    /// Smallest x
    pub fn left(&self) -> f64 {
        self.x - self.half_width
    }

    /// Largest x
    pub fn right(&self) -> f64 {
        self.x + self.half_width
    }

    /// Smallest y
    pub fn top(&self) -> f64 {
        self.y - self.half_height
    }

    /// Largest y
    pub fn bottom(&self) -> f64 {
        self.y + self.half_height
    }

    /// Whether the point lies inside or on the edge
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// Whether the two rectangles overlap or touch
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.top() > self.bottom()
            || other.bottom() < self.top())
    }

    fn quadrants(&self) -> [Self; 4] {
        let hw = self.half_width / 2.0;
        let hh = self.half_height / 2.0;
        [
            Self::new(self.x - hw, self.y - hh, hw, hh),
            Self::new(self.x + hw, self.y - hh, hw, hh),
            Self::new(self.x - hw, self.y + hh, hw, hh),
            Self::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }
}

/// Point quadtree with fixed node capacity
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    boundary: Rect,
    capacity: usize,
    depth: usize,
    points: Vec<T>,
    children: Option<Box<[Self; 4]>>,
}

impl<T: Positioned> QuadTree<T> {
    /// Empty tree covering `boundary`, capacity of at least one
    pub fn new(boundary: Rect, capacity: usize) -> Self {
        Self::with_depth(boundary, capacity.max(1), 0)
    }

    /// Empty tree with the default node capacity
    pub fn with_default_capacity(boundary: Rect) -> Self {
        Self::new(boundary, QUADTREE_CAPACITY)
    }

    const fn with_depth(boundary: Rect, capacity: usize, depth: usize) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            points: Vec::new(),
            children: None,
        }
    }

    /// Region covered by the root
    pub const fn boundary(&self) -> Rect {
        self.boundary
    }

    /// Whether this node has been split
    pub const fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Inserts a point, returning `false` if it lies outside the boundary
    pub fn insert(&mut self, point: T) -> bool {
        let (x, y) = point.position();
        if !self.boundary.contains(x, y) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < self.capacity || self.depth >= QUADTREE_MAX_DEPTH {
                self.points.push(point);
                return true;
            }
            self.subdivide();
        }

        match self.insert_into_children(point) {
            Ok(()) => true,
            Err(point) => {
                // Rounding can leave a point on no child's edge
                warn!(
                    error = %state_corruption("quadtree", &format!("({x}, {y}) fits no quadrant")),
                    "keeping point at parent node"
                );
                self.points.push(point);
                true
            }
        }
    }

    fn insert_into_children(&mut self, point: T) -> Result<(), T> {
        let Some(children) = self.children.as_mut() else {
            return Err(point);
        };
        let (x, y) = point.position();
        match children
            .iter_mut()
            .find(|child| child.boundary.contains(x, y))
        {
            Some(child) => {
                child.insert(point);
                Ok(())
            }
            None => Err(point),
        }
    }

    fn subdivide(&mut self) {
        let [nw, ne, sw, se] = self.boundary.quadrants();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            Self::with_depth(nw, self.capacity, depth),
            Self::with_depth(ne, self.capacity, depth),
            Self::with_depth(sw, self.capacity, depth),
            Self::with_depth(se, self.capacity, depth),
        ]));

        for point in std::mem::take(&mut self.points) {
            if let Err(point) = self.insert_into_children(point) {
                self.points.push(point);
            }
        }
    }

    /// All points inside `range`, in traversal order
    pub fn query(&self, range: &Rect) -> Vec<&T> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    fn query_into<'a>(&'a self, range: &Rect, found: &mut Vec<&'a T>) {
        if !self.boundary.intersects(range) {
            return;
        }

        found.extend(self.points.iter().filter(|point| {
            let (x, y) = point.position();
            range.contains(x, y)
        }));

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(range, found);
            }
        }
    }

    /// Every indexed point
    pub fn all_points(&self) -> Vec<&T> {
        self.query(&self.boundary)
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_ref()
                .map_or(0, |children| children.iter().map(Self::len).sum())
    }

    /// Whether nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest level reached by any node, the root is level 0
    pub fn max_depth(&self) -> usize {
        self.children.as_ref().map_or(self.depth, |children| {
            children
                .iter()
                .map(Self::max_depth)
                .max()
                .unwrap_or(self.depth)
        })
    }

    /// Discards all points and children
    pub fn clear(&mut self) {
        self.points.clear();
        self.children = None;
    }
}
