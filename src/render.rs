//! Frame rendering: translate the base layers, intersect them pairwise and
//! paint everything onto a [`Surface`].
use crate::algorithms::{intersect_all_pairs, translate_layer};
use crate::data::{Layer, Point, Polygon, Vector};
use crate::Transform;

/// Per-layer translation factor. The layer at 1-based position `k` moves by
/// `translation * (k * LAYER_DAMPING)`.
pub const LAYER_DAMPING: f64 = 0.2;

/// Side length of the square scene the base layers are drawn in.
pub const SCENE_EXTENT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
  pub fill: &'static str,
  pub stroke: &'static str,
}

pub const BASE_STYLE: Style = Style {
  fill: "#ffffff",
  stroke: "#000000",
};

pub const OVERLAY_STYLE: Style = Style {
  fill: "#C1512A",
  stroke: "#C1512A",
};

/// The subset of a 2D canvas context needed to paint a frame.
pub trait Surface {
  fn width(&self) -> f64;
  fn height(&self) -> f64;
  fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
  fn set_fill_style(&mut self, style: &str);
  fn set_stroke_style(&mut self, style: &str);
  fn begin_path(&mut self);
  fn move_to(&mut self, x: f64, y: f64);
  fn line_to(&mut self, x: f64, y: f64);
  fn close_path(&mut self);
  fn fill(&mut self);
  fn stroke(&mut self);

  fn set_style(&mut self, style: &Style) {
    self.set_fill_style(style.fill);
    self.set_stroke_style(style.stroke);
  }

  fn clear(&mut self) {
    let (width, height) = (self.width(), self.height());
    self.clear_rect(0.0, 0.0, width, height);
  }

  /// Fill and stroke every ring of `polygon`, mapped through `transform`.
  fn paint_polygon(&mut self, polygon: &Polygon, transform: &Transform) {
    for ring in polygon.rings() {
      let mut iter = ring.iter().map(|pt| transform * pt);
      if let Some(origin) = iter.next() {
        self.begin_path();
        let [x, y] = origin.array;
        self.move_to(x, y);
        for pt in iter {
          let [x, y] = pt.array;
          self.line_to(x, y);
        }
        self.close_path();
        self.fill();
        self.stroke();
      }
    }
  }
}

/// The three overlapping triangles, one per layer.
pub fn base_layers() -> Vec<Layer> {
  let triangle =
    |pts: [[f64; 2]; 4]| Polygon::new_unchecked(pts.iter().map(|&pt| Point::new(pt)).collect());
  vec![
    Layer::from(triangle([
      [101.732, 231.500],
      [143.500, 124.376],
      [185.268, 231.500],
      [101.732, 231.500],
    ])),
    Layer::from(triangle([
      [112.728, 270.500],
      [175.500, 107.392],
      [238.272, 270.500],
      [112.728, 270.500],
    ])),
    Layer::from(triangle([
      [130.728, 309.500],
      [214.500, 91.394],
      [298.272, 309.500],
      [130.728, 309.500],
    ])),
  ]
}

/// Fixed layers plus the scene-to-surface transform.
#[derive(Debug, Clone)]
pub struct Scene {
  layers: Vec<Layer>,
  viewport: Transform,
}

impl Default for Scene {
  fn default() -> Self {
    Scene::new()
  }
}

impl Scene {
  /// Scene with the [`base_layers`] and an identity viewport.
  pub fn new() -> Scene {
    Scene::with_layers(base_layers())
  }

  pub fn with_layers(layers: Vec<Layer>) -> Scene {
    Scene {
      layers,
      viewport: Transform::identity(),
    }
  }

  pub fn layers(&self) -> &[Layer] {
    &self.layers
  }

  pub fn viewport(&self) -> &Transform {
    &self.viewport
  }

  pub fn set_viewport(&mut self, viewport: Transform) {
    self.viewport = viewport;
  }

  /// Fit the viewport to a `width` × `height` surface, see [`Transform::fit`].
  pub fn fit_viewport(&mut self, width: f64, height: f64) {
    self.viewport = Transform::fit(width, height, SCENE_EXTENT);
  }

  /// Every layer shifted by its damped share of `translation`.
  pub fn translated_layers(&self, translation: &Vector<f64, 2>) -> Vec<Layer> {
    self
      .layers
      .iter()
      .zip(1u32..)
      .map(|(layer, k)| translate_layer(layer, &(translation * (f64::from(k) * LAYER_DAMPING))))
      .collect()
  }

  /// Geometry for one frame without painting it.
  pub fn frame(&self, translation: &Vector<f64, 2>) -> Frame {
    let layers = self.translated_layers(translation);
    let overlay = intersect_all_pairs(&layers);
    Frame { layers, overlay }
  }

  /// Compute and paint one frame. Returns the painted geometry.
  pub fn draw<S>(&self, surface: &mut S, translation: &Vector<f64, 2>) -> Frame
  where
    S: Surface + ?Sized,
  {
    let frame = self.frame(translation);
    frame.paint(surface, &self.viewport);
    frame
  }
}

/// Translated layers and their pairwise intersections, in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
  pub layers: Vec<Layer>,
  pub overlay: Vec<Polygon>,
}

impl Frame {
  /// Clear the surface, paint each layer in [`BASE_STYLE`] and then the
  /// overlay in [`OVERLAY_STYLE`].
  pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Transform) {
    surface.clear();
    for layer in &self.layers {
      surface.set_style(&BASE_STYLE);
      for polygon in layer {
        surface.paint_polygon(polygon, viewport);
      }
    }
    surface.set_style(&OVERLAY_STYLE);
    for polygon in &self.overlay {
      surface.paint_polygon(polygon, viewport);
    }
  }
}

///////////////////////////////////////////////////////////////////////////////
// Recording surface

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCall {
  ClearRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
  },
  FillStyle(String),
  StrokeStyle(String),
  BeginPath,
  MoveTo(f64, f64),
  LineTo(f64, f64),
  ClosePath,
  Fill,
  Stroke,
}

/// Surface that records paint calls instead of drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorder {
  width: f64,
  height: f64,
  calls: Vec<PaintCall>,
}

impl Recorder {
  pub fn new(width: f64, height: f64) -> Recorder {
    Recorder {
      width,
      height,
      calls: Vec::new(),
    }
  }

  pub fn calls(&self) -> &[PaintCall] {
    &self.calls
  }

  /// Hand out the recorded calls and start over.
  pub fn take_calls(&mut self) -> Vec<PaintCall> {
    std::mem::take(&mut self.calls)
  }
}

impl Surface for Recorder {
  fn width(&self) -> f64 {
    self.width
  }
  fn height(&self) -> f64 {
    self.height
  }
  fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
    self.calls.push(PaintCall::ClearRect {
      x,
      y,
      width,
      height,
    })
  }
  fn set_fill_style(&mut self, style: &str) {
    self.calls.push(PaintCall::FillStyle(style.to_owned()))
  }
  fn set_stroke_style(&mut self, style: &str) {
    self.calls.push(PaintCall::StrokeStyle(style.to_owned()))
  }
  fn begin_path(&mut self) {
    self.calls.push(PaintCall::BeginPath)
  }
  fn move_to(&mut self, x: f64, y: f64) {
    self.calls.push(PaintCall::MoveTo(x, y))
  }
  fn line_to(&mut self, x: f64, y: f64) {
    self.calls.push(PaintCall::LineTo(x, y))
  }
  fn close_path(&mut self) {
    self.calls.push(PaintCall::ClosePath)
  }
  fn fill(&mut self) {
    self.calls.push(PaintCall::Fill)
  }
  fn stroke(&mut self) {
    self.calls.push(PaintCall::Stroke)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::*;
  use PaintCall::*;

  use proptest::prelude::*;

  fn style_switches(calls: &[PaintCall]) -> Vec<&str> {
    calls
      .iter()
      .filter_map(|call| match call {
        FillStyle(style) => Some(style.as_str()),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn base_layers_are_single_triangles() {
    let layers = base_layers();
    assert_eq!(layers.len(), 3);
    for layer in &layers {
      assert_eq!(layer.len(), 1);
      assert_eq!(layer.polygons()[0].boundary().len(), 3);
      assert!(layer.area() > 0.0);
    }
  }

  #[test]
  fn zero_translation_overlaps() {
    let frame = Scene::new().frame(&Vector([0.0, 0.0]));
    assert_eq!(frame.layers, base_layers());
    assert_eq!(frame.overlay.len(), 3);
    assert!(frame.overlay.iter().all(|p| p.area() > 0.0));
  }

  #[test]
  fn layers_move_proportionally() {
    let scene = Scene::new();
    let layers = scene.translated_layers(&Vector([10.0, -5.0]));
    for (k, (moved, base)) in layers.iter().zip(scene.layers()).enumerate() {
      let d = &moved.polygons()[0].boundary()[0] - &base.polygons()[0].boundary()[0];
      let factor = (k + 1) as f64 * LAYER_DAMPING;
      assert!((d.0[0] - 10.0 * factor).abs() < 1e-9);
      assert!((d.0[1] + 5.0 * factor).abs() < 1e-9);
    }
  }

  #[test]
  fn call_structure() {
    let mut surface = Recorder::new(400.0, 300.0);
    let frame = Scene::new().draw(&mut surface, &Vector([0.0, 0.0]));
    let calls = surface.calls();
    assert_eq!(
      calls[0],
      ClearRect {
        x: 0.0,
        y: 0.0,
        width: 400.0,
        height: 300.0
      }
    );
    assert_eq!(
      calls.iter().filter(|c| matches!(c, ClearRect { .. })).count(),
      1
    );
    assert_eq!(
      style_switches(calls),
      vec!["#ffffff", "#ffffff", "#ffffff", "#C1512A"]
    );
    let rings: usize = frame
      .layers
      .iter()
      .flatten()
      .chain(&frame.overlay)
      .map(|p| p.rings().len())
      .sum();
    assert_eq!(calls.iter().filter(|c| **c == BeginPath).count(), rings);
    assert_eq!(calls.iter().filter(|c| **c == Fill).count(), rings);
    assert_eq!(calls.iter().filter(|c| **c == Stroke).count(), rings);
  }

  #[test]
  fn ring_path_order() {
    let mut surface = Recorder::new(10.0, 10.0);
    let triangle = Polygon::new(vec![
      Point::new([0.0, 0.0]),
      Point::new([1.0, 0.0]),
      Point::new([0.0, 1.0]),
    ])
    .unwrap();
    surface.paint_polygon(&triangle, &Transform::uniform_scale(2.0));
    assert_eq!(
      surface.take_calls(),
      vec![
        BeginPath,
        MoveTo(0.0, 0.0),
        LineTo(2.0, 0.0),
        LineTo(0.0, 2.0),
        ClosePath,
        Fill,
        Stroke
      ]
    );
    assert!(surface.calls().is_empty());
  }

  #[test]
  fn viewport_applies_at_paint_time() {
    let mut scene = Scene::new();
    scene.fit_viewport(800.0, 800.0);
    let mut surface = Recorder::new(800.0, 800.0);
    let frame = scene.draw(&mut surface, &Vector([0.0, 0.0]));
    assert_eq!(frame.layers, base_layers());
    let first_move = surface
      .calls()
      .iter()
      .find_map(|c| match c {
        MoveTo(x, y) => Some((*x, *y)),
        _ => None,
      })
      .unwrap();
    assert_eq!(first_move, (101.732 * 2.0, 231.5 * 2.0));
  }

  #[test]
  fn empty_scene() {
    let mut surface = Recorder::new(1.0, 1.0);
    let frame = Scene::with_layers(vec![]).draw(&mut surface, &Vector([3.0, 4.0]));
    assert!(frame.overlay.is_empty());
    assert_eq!(surface.calls().len(), 3);
  }

  proptest! {
    #[test]
    fn draw_is_deterministic(t in any_offset()) {
      let scene = Scene::new();
      let mut first = Recorder::new(400.0, 400.0);
      let mut second = Recorder::new(400.0, 400.0);
      let a = scene.draw(&mut first, &t);
      let b = scene.draw(&mut second, &t);
      prop_assert_eq!(a, b);
      prop_assert_eq!(first.calls(), second.calls());
    }

    #[test]
    fn overlay_areas_positive(t in any_offset()) {
      let frame = Scene::new().frame(&t);
      prop_assert_eq!(frame.layers.len(), 3);
      for polygon in &frame.overlay {
        prop_assert!(polygon.area() > 0.0);
      }
    }
  }
}
