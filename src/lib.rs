#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Layered polygon intersection and compositing.
//!
//! A [`Scene`](render::Scene) holds a fixed list of polygon
//! [layers](data::Layer). Every frame each layer is shifted by a damped
//! translation, all pairwise layer intersections are computed with the
//! overlay engine in [`algorithms::boolean_operations`], and the result is
//! painted onto a [`Surface`](render::Surface): base layers first, then the
//! intersection overlay.
//!
//! ```rust
//! # use layerclip::data::Vector;
//! # use layerclip::render::{Recorder, Scene};
//! let scene = Scene::new();
//! let mut surface = Recorder::new(400.0, 400.0);
//! let frame = scene.draw(&mut surface, &Vector([0.0, 0.0]));
//! assert_eq!(frame.overlay.len(), 3);
//! ```

pub mod algorithms;
pub mod controller;
pub mod data;
mod intersection;
mod orientation;
pub mod render;
mod transformation;

pub use intersection::Intersects;
pub use orientation::Orientation;
pub use transformation::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  InsufficientVertices,
  NonFiniteCoordinate,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InsufficientVertices => write!(f, "Insufficient vertices"),
      Error::NonFiniteCoordinate => write!(f, "Non-finite coordinate"),
    }
  }
}

impl std::error::Error for Error {}

#[cfg(test)]
pub mod testing;
