use super::{Point, Vector};
use crate::{Intersects, Orientation};
use Orientation::*;

///////////////////////////////////////////////////////////////////////////////
// LineSegment

/// Directed segment from `src` to `dst`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
  pub src: Point<f64, 2>,
  pub dst: Point<f64, 2>,
}

impl LineSegment {
  pub fn new(src: Point<f64, 2>, dst: Point<f64, 2>) -> LineSegment {
    LineSegment { src, dst }
  }

  pub fn direction(&self) -> Vector<f64, 2> {
    &self.dst - &self.src
  }

  pub fn midpoint(&self) -> Point<f64, 2> {
    &self.src + &(self.direction() * 0.5)
  }

  pub fn length(&self) -> f64 {
    self.direction().magnitude()
  }

  pub fn is_degenerate(&self) -> bool {
    self.src == self.dst
  }

  /// Position of the projection of `pt` onto the supporting line, where `0`
  /// is `src` and `1` is `dst`. Not clamped.
  pub fn parameter(&self, pt: &Point<f64, 2>) -> f64 {
    let dir = self.direction();
    let len2 = dir.squared_magnitude();
    if len2 == 0.0 {
      return 0.0;
    }
    (pt - &self.src).dot(&dir) / len2
  }

  /// Squared distance from `pt` to the closest point on the segment.
  pub fn squared_distance_to(&self, pt: &Point<f64, 2>) -> f64 {
    let t = self.parameter(pt).clamp(0.0, 1.0);
    let closest = &self.src + &(self.direction() * t);
    closest.squared_euclidean_distance(pt)
  }

  /// Colinear and within the bounding box of the segment.
  pub fn contains(&self, pt: &Point<f64, 2>) -> bool {
    Orientation::new(&self.src, &self.dst, pt).is_colinear() && self.in_bounds(pt)
  }

  fn in_bounds(&self, pt: &Point<f64, 2>) -> bool {
    let (x0, x1) = min_max(self.src.array[0], self.dst.array[0]);
    let (y0, y1) = min_max(self.src.array[1], self.dst.array[1]);
    (x0..=x1).contains(&pt.array[0]) && (y0..=y1).contains(&pt.array[1])
  }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
  if a <= b {
    (a, b)
  } else {
    (b, a)
  }
}

impl From<std::ops::Range<Point<f64, 2>>> for LineSegment {
  fn from(range: std::ops::Range<Point<f64, 2>>) -> LineSegment {
    LineSegment::new(range.start, range.end)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Intersection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ILineSegment {
  /// Interiors cross at a single point.
  Crossing(Point<f64, 2>),
  /// The segments meet at an endpoint of at least one of them.
  Touching,
  /// Colinear segments sharing more than a single point.
  Overlap,
}

impl<'a> Intersects<&'a LineSegment> for &'a LineSegment {
  type Result = ILineSegment;

  fn intersect(self, other: &'a LineSegment) -> Option<ILineSegment> {
    let a = self;
    let b = other;
    let o1 = Orientation::new(&a.src, &a.dst, &b.src);
    let o2 = Orientation::new(&a.src, &a.dst, &b.dst);
    let o3 = Orientation::new(&b.src, &b.dst, &a.src);
    let o4 = Orientation::new(&b.src, &b.dst, &a.dst);

    if o1 == CoLinear && o2 == CoLinear {
      return colinear_intersection(a, b);
    }
    if o1 == o2 || o3 == o4 {
      return None;
    }
    if o1 == CoLinear || o2 == CoLinear || o3 == CoLinear || o4 == CoLinear {
      return Some(ILineSegment::Touching);
    }
    let da = a.direction();
    let db = b.direction();
    let t = (&b.src - &a.src).cross(&db) / da.cross(&db);
    Some(ILineSegment::Crossing(&a.src + &(da * t)))
  }
}

fn colinear_intersection(a: &LineSegment, b: &LineSegment) -> Option<ILineSegment> {
  if a.is_degenerate() || b.is_degenerate() {
    return if a.contains(&b.src) || b.contains(&a.src) {
      Some(ILineSegment::Touching)
    } else {
      None
    };
  }
  let (lo, hi) = min_max(a.parameter(&b.src), a.parameter(&b.dst));
  let lo = lo.max(0.0);
  let hi = hi.min(1.0);
  if lo < hi {
    Some(ILineSegment::Overlap)
  } else if lo == hi {
    Some(ILineSegment::Touching)
  } else {
    None
  }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
