mod layer;
mod line_segment;
pub(crate) mod point;
pub mod polygon;
mod vector;

pub use layer::Layer;
pub use line_segment::*;
pub use point::Point;
pub use polygon::Polygon;
pub use vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PointLocation {
  Inside,
  OnBoundary,
  Outside,
}
