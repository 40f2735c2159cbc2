use std::ops::Mul;

use crate::data::{Point, Polygon, Vector};

/// Uniform scale followed by a translation.
///
/// Maps scene coordinates to surface pixels. Composition with `*` applies the
/// right-hand transform first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
  scale: f64,
  offset: Vector<f64, 2>,
}

impl Default for Transform {
  fn default() -> Self {
    Transform::identity()
  }
}

impl Transform {
  pub const fn identity() -> Transform {
    Transform {
      scale: 1.0,
      offset: Vector([0.0, 0.0]),
    }
  }

  pub const fn translate(offset: Vector<f64, 2>) -> Transform {
    Transform { scale: 1.0, offset }
  }

  pub const fn uniform_scale(scale: f64) -> Transform {
    Transform {
      scale,
      offset: Vector([0.0, 0.0]),
    }
  }

  /// Largest transform that shows the square `[0, extent]²` inside a
  /// `width` × `height` surface, centered along the longer axis.
  ///
  /// ```rust
  /// # use layerclip::Transform;
  /// # use layerclip::data::Point;
  /// let t = Transform::fit(800.0, 400.0, 400.0);
  /// assert_eq!(&t * &Point::new([0.0, 0.0]), Point::new([200.0, 0.0]));
  /// assert_eq!(&t * &Point::new([400.0, 400.0]), Point::new([600.0, 400.0]));
  /// ```
  pub fn fit(width: f64, height: f64, extent: f64) -> Transform {
    let side = width.min(height);
    if !(side > 0.0 && extent > 0.0) {
      return Transform::identity();
    }
    let scale = side / extent;
    let offset = Vector([(width - side) / 2.0, (height - side) / 2.0]);
    Transform::translate(offset) * Transform::uniform_scale(scale)
  }

  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn offset(&self) -> Vector<f64, 2> {
    self.offset
  }
}

impl Mul for Transform {
  type Output = Transform;
  fn mul(self, other: Transform) -> Transform {
    &self * &other
  }
}

impl Mul<&Transform> for &Transform {
  type Output = Transform;
  fn mul(self, other: &Transform) -> Transform {
    Transform {
      scale: self.scale * other.scale,
      offset: &(&other.offset * self.scale) + &self.offset,
    }
  }
}

impl Mul<&Point<f64, 2>> for &Transform {
  type Output = Point<f64, 2>;
  fn mul(self, other: &Point<f64, 2>) -> Point<f64, 2> {
    Point::new([
      other.array[0] * self.scale + self.offset.0[0],
      other.array[1] * self.scale + self.offset.0[1],
    ])
  }
}

impl Mul<Polygon> for &Transform {
  type Output = Polygon;
  fn mul(self, other: Polygon) -> Polygon {
    other.map_points(|pt| self * &pt)
  }
}
