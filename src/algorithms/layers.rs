//! Pairwise intersections between polygon layers.
use std::slice;

use super::boolean_operations::intersection;
use crate::data::{Layer, Polygon, Vector};

/// New layer with every point shifted by `offset`.
pub fn translate_layer(layer: &Layer, offset: &Vector<f64, 2>) -> Layer {
  layer.translate(offset)
}

/// Overlap of `polygon` with the union of all polygons in `layer`.
///
/// The overlap may be empty or fall apart into several disjoint polygons.
pub fn intersect_pair(polygon: &Polygon, layer: &Layer) -> Vec<Polygon> {
  intersection(slice::from_ref(polygon), layer.polygons())
}

/// Every polygon of `a` intersected with the whole of `b`, concatenated in
/// the order of `a`.
pub fn intersect_layers(a: &Layer, b: &Layer) -> Vec<Polygon> {
  a.iter().flat_map(|polygon| intersect_pair(polygon, b)).collect()
}

/// Unordered index pairs `(i, j)` with `i < j < n`, `i` ascending then `j`
/// ascending.
///
/// ```rust
/// # use layerclip::algorithms::layer_pairs;
/// let pairs: Vec<_> = layer_pairs(3).collect();
/// assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
/// ```
pub fn layer_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
  (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// [`intersect_layers`] for every pair from [`layer_pairs`], concatenated.
///
/// Regions shared by three or more layers show up once per pair covering
/// them.
pub fn intersect_all_pairs(layers: &[Layer]) -> Vec<Polygon> {
  layer_pairs(layers.len())
    .flat_map(|(i, j)| intersect_layers(&layers[i], &layers[j]))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Point;
  use crate::testing::*;

  use proptest::prelude::*;

  fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::new(vec![
      Point::new([x0, y0]),
      Point::new([x1, y0]),
      Point::new([x1, y1]),
      Point::new([x0, y1]),
    ])
    .unwrap()
  }

  fn total_area(polys: &[Polygon]) -> f64 {
    polys.iter().map(Polygon::area).sum()
  }

  #[test]
  fn pair_counts() {
    assert_eq!(layer_pairs(0).count(), 0);
    assert_eq!(layer_pairs(1).count(), 0);
    assert_eq!(layer_pairs(2).collect::<Vec<_>>(), vec![(0, 1)]);
    assert_eq!(
      layer_pairs(4).collect::<Vec<_>>(),
      vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
    );
  }

  #[test]
  fn pair_against_union() {
    let layer = Layer::new(vec![rect(0., 0., 2., 2.), rect(1., 0., 3., 2.)]);
    let result = intersect_pair(&rect(0., 0., 3., 1.), &layer);
    assert_eq!(result.len(), 1);
    assert!((total_area(&result) - 3.0).abs() < 1e-12);
  }

  #[test]
  fn layers_keep_order_of_first() {
    let a = Layer::new(vec![rect(10., 0., 11., 1.), rect(0., 0., 1., 1.)]);
    let b = Layer::new(vec![rect(0.5, 0., 20., 0.5)]);
    let result = intersect_layers(&a, &b);
    assert_eq!(result.len(), 2);
    assert!(result[0].boundary().iter().all(|pt| pt.array[0] >= 10.0));
    assert!(result[1].boundary().iter().all(|pt| pt.array[0] <= 1.0));
  }

  #[test]
  fn layers_skip_empty() {
    let a = Layer::new(vec![rect(0., 0., 1., 1.), rect(5., 5., 6., 6.)]);
    let b = Layer::from(rect(0.5, 0.5, 2., 2.));
    let result = intersect_layers(&a, &b);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].area(), 0.25);
  }

  #[test]
  fn all_pairs_in_index_order() {
    // Layer 0 meets 1 on the left, 0 meets 2 on the right, 1 and 2 overlap
    // in the middle only.
    let layers = [
      Layer::from(rect(0., 0., 10., 1.)),
      Layer::from(rect(0., 0., 5., 2.)),
      Layer::from(rect(4., 0., 10., 3.)),
    ];
    let result = intersect_all_pairs(&layers);
    let areas: Vec<f64> = result.iter().map(Polygon::area).collect();
    assert_eq!(areas, vec![5.0, 6.0, 2.0]);
  }

  #[test]
  fn triple_overlap_is_not_deduplicated() {
    let square = Layer::from(rect(0., 0., 1., 1.));
    let layers = [square.clone(), square.clone(), square];
    let result = intersect_all_pairs(&layers);
    assert_eq!(result.len(), 3);
    assert_eq!(total_area(&result), 3.0);
  }

  proptest! {
    #[test]
    fn layers_symmetric_area(a in any_layer(), b in any_layer()) {
      let ab = total_area(&intersect_layers(&a, &b));
      let ba = total_area(&intersect_layers(&b, &a));
      let tolerance = 1e-6 * (1.0 + a.area().max(b.area()));
      prop_assert!((ab - ba).abs() <= tolerance, "{} != {}", ab, ba);
    }

    #[test]
    fn all_pairs_is_concatenation(a in any_layer(), b in any_layer(), c in any_layer()) {
      let layers = [a, b, c];
      let expected: Vec<Polygon> = [(0, 1), (0, 2), (1, 2)]
        .iter()
        .flat_map(|&(i, j)| intersect_layers(&layers[i], &layers[j]))
        .collect();
      prop_assert_eq!(intersect_all_pairs(&layers), expected);
    }

    #[test]
    fn translate_layer_matches_method(layer in any_layer(), v in any_offset()) {
      prop_assert_eq!(translate_layer(&layer, &v), layer.translate(&v));
    }
  }
}
