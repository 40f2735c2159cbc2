use crate::data::{LineSegment, Point};

/// Edges of every ring, ring by ring, including the closing edge of each.
pub struct EdgeIter<'a> {
  rings: std::slice::Iter<'a, Vec<Point<f64, 2>>>,
  ring: &'a [Point<f64, 2>],
  index: usize,
}

impl<'a> EdgeIter<'a> {
  pub(crate) fn new(rings: &'a [Vec<Point<f64, 2>>]) -> EdgeIter<'a> {
    EdgeIter {
      rings: rings.iter(),
      ring: &[],
      index: 0,
    }
  }
}

impl<'a> Iterator for EdgeIter<'a> {
  type Item = LineSegment;
  fn next(&mut self) -> Option<LineSegment> {
    while self.index >= self.ring.len() {
      self.ring = self.rings.next()?;
      self.index = 0;
    }
    let src = self.ring[self.index];
    let dst = self.ring[(self.index + 1) % self.ring.len()];
    self.index += 1;
    Some(LineSegment::new(src, dst))
  }
}

#[cfg(test)]
mod tests {
  use crate::data::*;

  #[test]
  fn closing_edges_included() {
    let p = Polygon::with_holes(
      vec![
        Point::new([0.0, 0.0]),
        Point::new([3.0, 0.0]),
        Point::new([0.0, 3.0]),
      ],
      vec![vec![
        Point::new([0.5, 0.5]),
        Point::new([0.5, 1.0]),
        Point::new([1.0, 0.5]),
      ]],
    )
    .unwrap();
    let edges: Vec<LineSegment> = p.iter_edges().collect();
    assert_eq!(edges.len(), 6);
    assert_eq!(
      edges[2],
      LineSegment::new(Point::new([0.0, 3.0]), Point::new([0.0, 0.0]))
    );
    assert_eq!(
      edges[5],
      LineSegment::new(Point::new([1.0, 0.5]), Point::new([0.5, 0.5]))
    );
  }
}
