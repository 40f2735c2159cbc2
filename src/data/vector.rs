use array_init::array_init;
use num_traits::Zero;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::ops::Add;
use std::ops::Index;
use std::ops::Mul;
use std::ops::Neg;

use crate::data::Point;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Vector<T, const N: usize = 2>(pub [T; N]);

impl<T, const N: usize> Distribution<Vector<T, N>> for Standard
where
  Standard: Distribution<T>,
{
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector<T, N> {
    Vector(array_init(|_| rng.gen()))
  }
}

impl<T, const N: usize> Vector<T, N> {
  pub fn zero() -> Self
  where
    T: Zero,
  {
    Vector(array_init(|_| Zero::zero()))
  }
}

impl<const N: usize> Vector<f64, N> {
  pub fn squared_magnitude(&self) -> f64 {
    self.0.iter().map(|c| c * c).sum()
  }

  pub fn magnitude(&self) -> f64 {
    self.squared_magnitude().sqrt()
  }
}

impl Vector<f64, 2> {
  /// Counter-clockwise perpendicular.
  pub fn perp(&self) -> Vector<f64, 2> {
    Vector([-self.0[1], self.0[0]])
  }

  pub fn cross(&self, other: &Vector<f64, 2>) -> f64 {
    self.0[0] * other.0[1] - self.0[1] * other.0[0]
  }

  pub fn dot(&self, other: &Vector<f64, 2>) -> f64 {
    self.0[0] * other.0[0] + self.0[1] * other.0[1]
  }

  /// Angle in radians from the positive x-axis, in `(-pi, pi]`.
  pub fn angle(&self) -> f64 {
    self.0[1].atan2(self.0[0])
  }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
  type Output = T;
  fn index(&self, index: usize) -> &T {
    self.0.index(index)
  }
}

impl<T, const N: usize> From<Point<T, N>> for Vector<T, N> {
  fn from(point: Point<T, N>) -> Vector<T, N> {
    Vector(point.array)
  }
}

impl<'a, T, const N: usize> From<&'a Point<T, N>> for &'a Vector<T, N> {
  fn from(point: &Point<T, N>) -> &Vector<T, N> {
    // Both types are repr(transparent) wrappers around [T; N].
    unsafe { &*(point as *const Point<T, N> as *const Vector<T, N>) }
  }
}

// &vector + &vector = vector
impl<'a, 'b, T, const N: usize> Add<&'a Vector<T, N>> for &'b Vector<T, N>
where
  for<'c> &'c T: Add<&'c T, Output = T>,
{
  type Output = Vector<T, N>;

  fn add(self: &'b Vector<T, N>, other: &'a Vector<T, N>) -> Self::Output {
    Vector(array_init(|i| self.0.index(i) + other.0.index(i)))
  }
}

impl<T, const N: usize> Add<Vector<T, N>> for Vector<T, N>
where
  for<'c> &'c T: Add<&'c T, Output = T>,
{
  type Output = Vector<T, N>;

  fn add(self: Vector<T, N>, other: Vector<T, N>) -> Self::Output {
    &self + &other
  }
}

// vector * scalar = vector
impl<T, const N: usize> Mul<T> for Vector<T, N>
where
  T: Mul<T, Output = T> + Clone,
{
  type Output = Vector<T, N>;

  fn mul(self: Vector<T, N>, other: T) -> Self::Output {
    Vector(array_init(|i| self.0[i].clone() * other.clone()))
  }
}

// &vector * scalar = vector
impl<'a, T, const N: usize> Mul<T> for &'a Vector<T, N>
where
  T: Mul<T, Output = T> + Clone,
{
  type Output = Vector<T, N>;

  fn mul(self: &'a Vector<T, N>, other: T) -> Self::Output {
    Vector(array_init(|i| self.0[i].clone() * other.clone()))
  }
}

impl<T, const N: usize> Neg for Vector<T, N>
where
  T: Neg<Output = T> + Clone,
{
  type Output = Vector<T, N>;

  fn neg(self) -> Self::Output {
    Vector(array_init(|i| -self.0[i].clone()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;

  use test_strategy::proptest;

  #[proptest]
  fn perp_is_orthogonal(#[strategy(any_offset())] v: Vector<f64, 2>) {
    assert_eq!(v.dot(&v.perp()), 0.0);
  }

  #[proptest]
  fn scale_by_one(#[strategy(any_offset())] v: Vector<f64, 2>) {
    assert_eq!(v * 1.0, v);
  }

  #[test]
  fn cross_sign() {
    let x = Vector([1.0, 0.0]);
    let y = Vector([0.0, 1.0]);
    assert_eq!(x.cross(&y), 1.0);
    assert_eq!(y.cross(&x), -1.0);
  }

  #[test]
  fn scaled_sum() {
    let v = Vector([2.0, -4.0]) * 0.5 + Vector([1.0, 1.0]);
    assert_eq!(v, Vector([2.0, -1.0]));
  }
}
