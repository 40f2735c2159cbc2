//! Redraw scheduling state shared between input events and the frame
//! callback.
use crate::data::Vector;

/// Latest translation plus whether a frame has already been requested.
///
/// Event handlers report input through [`pointer_moved`](Self::pointer_moved)
/// and [`resized`](Self::resized), and request an animation frame only when
/// those return `true`. The frame callback calls
/// [`take_frame`](Self::take_frame). Any number of events between two frames
/// collapse into a single draw with the most recent translation.
///
/// ```rust
/// # use layerclip::controller::Controller;
/// # use layerclip::data::Vector;
/// let mut controller = Controller::new();
/// assert!(controller.pointer_moved(10.0, 10.0, 100.0, 100.0));
/// assert!(!controller.pointer_moved(60.0, 20.0, 100.0, 100.0));
/// assert_eq!(controller.take_frame(), Some(Vector([-10.0, 30.0])));
/// assert_eq!(controller.take_frame(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
  translation: Vector<f64, 2>,
  pending: bool,
}

impl Default for Controller {
  fn default() -> Self {
    Controller::new()
  }
}

impl Controller {
  pub fn new() -> Controller {
    Controller {
      translation: Vector::zero(),
      pending: false,
    }
  }

  pub fn translation(&self) -> Vector<f64, 2> {
    self.translation
  }

  pub fn is_pending(&self) -> bool {
    self.pending
  }

  /// Pointer at `(x, y)` in a `width` × `height` viewport. The translation
  /// becomes the offset from the pointer to the viewport center.
  ///
  /// Returns `true` if the caller must request an animation frame.
  pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
    self.translation = Vector([-(x - width / 2.0), -(y - height / 2.0)]);
    self.request()
  }

  /// Returns `true` if the caller must request an animation frame.
  pub fn resized(&mut self) -> bool {
    self.request()
  }

  /// Translation to draw with, or `None` if no frame was requested.
  pub fn take_frame(&mut self) -> Option<Vector<f64, 2>> {
    if std::mem::replace(&mut self.pending, false) {
      Some(self.translation)
    } else {
      None
    }
  }

  fn request(&mut self) -> bool {
    !std::mem::replace(&mut self.pending, true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use proptest::collection::vec;
  use proptest::prelude::*;

  #[test]
  fn starts_idle() {
    let mut controller = Controller::new();
    assert_eq!(controller, Controller::default());
    assert_eq!(controller.translation(), Vector([0.0, 0.0]));
    assert!(!controller.is_pending());
    assert_eq!(controller.take_frame(), None);
  }

  #[test]
  fn pointer_at_center() {
    let mut controller = Controller::new();
    controller.pointer_moved(400.0, 300.0, 800.0, 600.0);
    assert_eq!(controller.take_frame(), Some(Vector([0.0, 0.0])));
  }

  #[test]
  fn resize_keeps_translation() {
    let mut controller = Controller::new();
    assert!(controller.pointer_moved(0.0, 0.0, 800.0, 600.0));
    assert_eq!(controller.take_frame(), Some(Vector([400.0, 300.0])));
    assert!(controller.resized());
    assert!(!controller.resized());
    assert_eq!(controller.take_frame(), Some(Vector([400.0, 300.0])));
  }

  #[test]
  fn resize_then_move_share_a_frame() {
    let mut controller = Controller::new();
    assert!(controller.resized());
    assert!(!controller.pointer_moved(0.0, 100.0, 100.0, 100.0));
    assert_eq!(controller.take_frame(), Some(Vector([50.0, -50.0])));
    assert_eq!(controller.take_frame(), None);
  }

  proptest! {
    #[test]
    fn bursts_coalesce(moves in vec((0.0..2000.0, 0.0..2000.0), 1..50)) {
      let mut controller = Controller::new();
      let requests = moves
        .iter()
        .filter(|&&(x, y)| controller.pointer_moved(x, y, 1000.0, 800.0))
        .count();
      prop_assert_eq!(requests, 1);
      let (x, y) = moves[moves.len() - 1];
      prop_assert_eq!(controller.take_frame(), Some(Vector([-(x - 500.0), -(y - 400.0)])));
      prop_assert_eq!(controller.take_frame(), None);
    }
  }
}
