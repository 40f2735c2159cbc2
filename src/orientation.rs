use geometry_predicates::predicates::orient2d;

use crate::data::Point;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}
use Orientation::*;

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// The sign is computed with adaptive-precision arithmetic and is exact for
  /// every finite input, even when the three points are almost colinear.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use layerclip::data::Point;
  /// # use layerclip::Orientation;
  /// let p1 = Point::new([0.0, 0.0]);
  /// let p2 = Point::new([0.0, 1.0]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Point::new([0.0, 2.0])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([-1.0, 2.0])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([1.0, 2.0])).is_cw());
  /// ```
  pub fn new(p1: &Point<f64, 2>, p2: &Point<f64, 2>, p3: &Point<f64, 2>) -> Orientation {
    let orient = orient2d(p1.array, p2.array, p3.array);
    if orient > 0.0 {
      CounterClockWise
    } else if orient < 0.0 {
      ClockWise
    } else {
      CoLinear
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, ClockWise)
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      CounterClockWise => ClockWise,
      ClockWise => CounterClockWise,
      CoLinear => CoLinear,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  use proptest::prelude::*;

  proptest! {
    #[test]
    fn orientation_reverse(pt1 in any_point(), pt2 in any_point(), pt3 in any_point()) {
      let abc = Orientation::new(&pt1, &pt2, &pt3);
      let cba = Orientation::new(&pt3, &pt2, &pt1);
      prop_assert_eq!(abc, cba.reverse())
    }

    #[test]
    fn orientation_repeated_point(pt1 in any_point(), pt2 in any_point()) {
      prop_assert!(Orientation::new(&pt1, &pt2, &pt2).is_colinear());
      prop_assert!(Orientation::new(&pt1, &pt1, &pt2).is_colinear());
    }
  }

  #[test]
  fn test_turns() {
    assert_eq!(
      Orientation::new(
        &Point::new([0.0, 0.0]),
        &Point::new([1.0, 1.0]),
        &Point::new([2.0, 2.0])
      ),
      CoLinear
    );
    assert_eq!(
      Orientation::new(
        &Point::new([0.0, 0.0]),
        &Point::new([0.0, 1.0]),
        &Point::new([2.0, 2.0])
      ),
      ClockWise
    );
    assert_eq!(
      Orientation::new(
        &Point::new([0.0, 0.0]),
        &Point::new([0.0, 1.0]),
        &Point::new([-2.0, 2.0])
      ),
      CounterClockWise
    );
  }

  #[test]
  fn near_colinear_is_exact() {
    let p = Point::new([0.5, 0.5]);
    let q = Point::new([12.0, 12.0]);
    let r = Point::new([24.0, 24.0 + 1e-14]);
    assert_eq!(Orientation::new(&p, &q, &r), CounterClockWise);
  }
}
