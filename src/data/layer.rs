use std::iter::FromIterator;

use super::{Polygon, Vector};

/// Polygons that move together under one translation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
  polygons: Vec<Polygon>,
}

impl Layer {
  pub fn new(polygons: Vec<Polygon>) -> Layer {
    Layer { polygons }
  }

  pub fn polygons(&self) -> &[Polygon] {
    &self.polygons
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
    self.polygons.iter()
  }

  pub fn len(&self) -> usize {
    self.polygons.len()
  }

  pub fn is_empty(&self) -> bool {
    self.polygons.is_empty()
  }

  /// Shift every point of every polygon by `offset`.
  #[must_use]
  pub fn translate(&self, offset: &Vector<f64, 2>) -> Layer {
    self.iter().map(|poly| poly.translate(offset)).collect()
  }

  /// Sum of the polygon areas. Overlapping polygons are counted twice.
  pub fn area(&self) -> f64 {
    self.iter().map(Polygon::area).sum()
  }
}

impl From<Polygon> for Layer {
  fn from(polygon: Polygon) -> Layer {
    Layer::new(vec![polygon])
  }
}

impl FromIterator<Polygon> for Layer {
  fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Layer {
    Layer::new(iter.into_iter().collect())
  }
}

impl<'a> IntoIterator for &'a Layer {
  type Item = &'a Polygon;
  type IntoIter = std::slice::Iter<'a, Polygon>;
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl IntoIterator for Layer {
  type Item = Polygon;
  type IntoIter = std::vec::IntoIter<Polygon>;
  fn into_iter(self) -> Self::IntoIter {
    self.polygons.into_iter()
  }
}
