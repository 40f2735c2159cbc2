use crate::data::{Point, PointLocation, Vector};
use crate::{Error, Orientation};

mod iter;
pub use iter::*;

/// A polygon made of one or more closed rings.
///
/// Ring 0 is the outer boundary and every further ring is a hole. Rings are
/// implicitly closed: the last point connects back to the first. Input rings
/// that spell out the closing point explicitly (first point repeated at the
/// end) are accepted and the duplicate is dropped.
///
/// No simplicity invariant is enforced. Self-intersecting and zero-area rings
/// are valid values; [`locate`](Polygon::locate) uses the even-odd rule so
/// every ring has a well-defined interior.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
  pub(crate) rings: Vec<Vec<Point<f64, 2>>>,
}

impl Polygon {
  pub fn new_unchecked(points: Vec<Point<f64, 2>>) -> Polygon {
    Polygon {
      rings: vec![open_ring(points)],
    }
  }

  pub fn new(points: Vec<Point<f64, 2>>) -> Result<Polygon, Error> {
    let p = Self::new_unchecked(points);
    p.validate()?;
    Ok(p)
  }

  pub fn with_holes(
    boundary: Vec<Point<f64, 2>>,
    holes: Vec<Vec<Point<f64, 2>>>,
  ) -> Result<Polygon, Error> {
    let rings = std::iter::once(boundary)
      .chain(holes)
      .map(open_ring)
      .collect();
    let p = Polygon { rings };
    p.validate()?;
    Ok(p)
  }

  pub(crate) fn from_rings_unchecked(rings: Vec<Vec<Point<f64, 2>>>) -> Polygon {
    Polygon { rings }
  }

  /// Every ring has at least three points and every coordinate is finite.
  pub fn validate(&self) -> Result<(), Error> {
    if self.rings.is_empty() || self.rings.iter().any(|ring| ring.len() < 3) {
      return Err(Error::InsufficientVertices);
    }
    if !self.iter().all(|pt| pt.is_finite()) {
      return Err(Error::NonFiniteCoordinate);
    }
    Ok(())
  }

  pub fn boundary(&self) -> &[Point<f64, 2>] {
    &self.rings[0]
  }

  pub fn holes(&self) -> impl Iterator<Item = &[Point<f64, 2>]> {
    self.rings[1..].iter().map(Vec::as_slice)
  }

  pub fn rings(&self) -> &[Vec<Point<f64, 2>>] {
    &self.rings
  }

  pub fn iter(&self) -> impl Iterator<Item = &Point<f64, 2>> {
    self.rings.iter().flatten()
  }

  pub fn iter_edges(&self) -> EdgeIter<'_> {
    EdgeIter::new(&self.rings)
  }

  /// Sum of the signed areas of all rings. Counter-clockwise rings count
  /// positive.
  pub fn signed_area(&self) -> f64 {
    self.rings.iter().map(|ring| ring_signed_area(ring)).sum()
  }

  /// Area of the outer boundary minus the area of the holes.
  pub fn area(&self) -> f64 {
    let outer = ring_signed_area(self.boundary()).abs();
    let holes: f64 = self.holes().map(|ring| ring_signed_area(ring).abs()).sum();
    outer - holes
  }

  /// Even-odd point location across all rings. $O(n)$
  pub fn locate(&self, pt: &Point<f64, 2>) -> PointLocation {
    let mut inside = false;
    for edge in self.iter_edges() {
      if edge.contains(pt) {
        return PointLocation::OnBoundary;
      }
      if crosses_ray(&edge.src, &edge.dst, pt) {
        inside = !inside;
      }
    }
    if inside {
      PointLocation::Inside
    } else {
      PointLocation::Outside
    }
  }

  /// # Panics
  ///
  /// Panics if the outer boundary has no points.
  pub fn bounding_box(&self) -> (Point<f64, 2>, Point<f64, 2>) {
    let mut min = self.rings[0][0];
    let mut max = min;
    for pt in self.iter() {
      for i in 0..2 {
        min.array[i] = min.array[i].min(pt.array[i]);
        max.array[i] = max.array[i].max(pt.array[i]);
      }
    }
    (min, max)
  }

  #[must_use]
  pub fn translate(&self, offset: &Vector<f64, 2>) -> Polygon {
    self.clone().map_points(|pt| pt + offset)
  }

  pub fn map_points<F>(self, f: F) -> Polygon
  where
    F: Fn(Point<f64, 2>) -> Point<f64, 2>,
  {
    let rings = self
      .rings
      .into_iter()
      .map(|ring| ring.into_iter().map(&f).collect())
      .collect();
    Polygon { rings }
  }
}

// Drop an explicit closing point.
fn open_ring(mut ring: Vec<Point<f64, 2>>) -> Vec<Point<f64, 2>> {
  if ring.len() > 1 && ring.first() == ring.last() {
    ring.pop();
  }
  ring
}

pub(crate) fn ring_signed_area(ring: &[Point<f64, 2>]) -> f64 {
  let n = ring.len();
  let twice: f64 = (0..n)
    .map(|i| {
      let p = &ring[i];
      let q = &ring[(i + 1) % n];
      p.array[0] * q.array[1] - q.array[0] * p.array[1]
    })
    .sum();
  twice / 2.0
}

// Does the edge cross the horizontal ray going right from `pt`?
fn crosses_ray(a: &Point<f64, 2>, b: &Point<f64, 2>, pt: &Point<f64, 2>) -> bool {
  let (ay, by, y) = (a.array[1], b.array[1], pt.array[1]);
  if (ay > y) == (by > y) {
    return false;
  }
  let orient = Orientation::new(a, b, pt);
  if by > ay {
    orient.is_ccw()
  } else {
    orient.is_cw()
  }
}

pub(crate) fn ring_contains(ring: &[Point<f64, 2>], pt: &Point<f64, 2>) -> bool {
  let n = ring.len();
  (0..n).fold(false, |inside, i| {
    inside ^ crosses_ray(&ring[i], &ring[(i + 1) % n], pt)
  })
}
