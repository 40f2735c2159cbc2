// This module contains strategies for:
//  * points and offsets
//  * triangles, alone and in pairs
//  * layers
// A Strategy is a way to generate a shrinkable value.
use crate::data::{Layer, Point, Polygon, Vector};

use proptest::collection::*;
use proptest::prelude::*;

// Coordinates stay well inside the range where the snapping tolerance of the
// overlay is meaningful.
const COORD: f64 = 1000.0;

///////////////////////////////////////////////////////////////////////////////
// Points and offsets

pub fn any_point() -> impl Strategy<Value = Point<f64, 2>> {
  [-COORD..COORD, -COORD..COORD].prop_map(Point::new)
}

pub fn any_offset() -> impl Strategy<Value = Vector<f64, 2>> {
  [-COORD / 2.0..COORD / 2.0, -COORD / 2.0..COORD / 2.0].prop_map(Vector)
}

///////////////////////////////////////////////////////////////////////////////
// Triangles

// Slivers below unit area are discarded.
pub fn any_triangle() -> impl Strategy<Value = Polygon> {
  [any_point(), any_point(), any_point()].prop_filter_map("Ensure non-degenerate", |pts| {
    Polygon::new(pts.to_vec()).ok().filter(|p| p.area() > 1.0)
  })
}

// Signed distance between 1e-9 and 1e-3, spread over the orders of magnitude.
fn any_gap() -> impl Strategy<Value = f64> {
  (any::<bool>(), -9..-3i32, 1.0..10.0).prop_map(|(flip, exp, mantissa)| {
    let gap: f64 = mantissa * 10f64.powi(exp);
    if flip {
      -gap
    } else {
      gap
    }
  })
}

// A triangle and a second one built on one of its edges, each end of that
// edge pushed off along the edge normal by its own small gap.
pub fn any_near_shared_edge_pair() -> impl Strategy<Value = (Polygon, Polygon)> {
  (any_triangle(), 0..3usize, any_gap(), any_gap(), any_point()).prop_filter_map(
    "Ensure non-degenerate",
    |(a, edge, src_gap, dst_gap, apex)| {
      let pts = a.boundary();
      let (src, dst) = (pts[edge], pts[(edge + 1) % 3]);
      let normal = (&dst - &src).perp();
      let normal = normal * (1.0 / normal.magnitude());
      let b = Polygon::new(vec![
        &src + &(normal * src_gap),
        &dst + &(normal * dst_gap),
        apex,
      ])
      .ok()
      .filter(|b| b.area() > 1.0)?;
      Some((a, b))
    },
  )
}

pub fn any_triangle_pair() -> impl Strategy<Value = (Polygon, Polygon)> {
  prop_oneof![
    (any_triangle(), any_triangle()),
    any_near_shared_edge_pair(),
  ]
}

///////////////////////////////////////////////////////////////////////////////
// Layers

pub fn any_layer() -> impl Strategy<Value = Layer> {
  vec(any_triangle(), 1..4).prop_map(Layer::new)
}
