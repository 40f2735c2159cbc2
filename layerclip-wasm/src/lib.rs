use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use layerclip::controller::Controller;
use layerclip::data::Vector;
use layerclip::render::{Scene, Surface};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

/// Square the canvas to the smaller window dimension on resize.
const RESIZE_ENABLED: bool = true;

pub struct CanvasSurface {
  canvas: HtmlCanvasElement,
  context: CanvasRenderingContext2d,
}

impl CanvasSurface {
  pub fn new(canvas: HtmlCanvasElement) -> CanvasSurface {
    let context = canvas
      .get_context("2d")
      .unwrap_throw()
      .unwrap_throw()
      .dyn_into::<CanvasRenderingContext2d>()
      .unwrap_throw();
    CanvasSurface { canvas, context }
  }

  pub fn set_size(&self, width: u32, height: u32) {
    self.canvas.set_width(width);
    self.canvas.set_height(height);
  }
}

impl Surface for CanvasSurface {
  fn width(&self) -> f64 {
    f64::from(self.canvas.width())
  }
  fn height(&self) -> f64 {
    f64::from(self.canvas.height())
  }
  fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
    self.context.clear_rect(x, y, width, height)
  }
  fn set_fill_style(&mut self, style: &str) {
    self.context.set_fill_style_str(style)
  }
  fn set_stroke_style(&mut self, style: &str) {
    self.context.set_stroke_style_str(style)
  }
  fn begin_path(&mut self) {
    self.context.begin_path()
  }
  fn move_to(&mut self, x: f64, y: f64) {
    self.context.move_to(x, y)
  }
  fn line_to(&mut self, x: f64, y: f64) {
    self.context.line_to(x, y)
  }
  fn close_path(&mut self) {
    self.context.close_path()
  }
  fn fill(&mut self) {
    self.context.fill()
  }
  fn stroke(&mut self) {
    self.context.stroke()
  }
}

struct App {
  scene: Scene,
  surface: CanvasSurface,
  controller: Controller,
  // Pending frame. Only replaced from event handlers, never from inside its
  // own callback.
  frame: Option<AnimationFrame>,
}

type Shared = Rc<RefCell<App>>;

impl App {
  fn draw(&mut self, translation: &Vector<f64, 2>) {
    self.scene.draw(&mut self.surface, translation);
  }
}

fn log(msg: &str) {
  web_sys::console::log_1(&msg.into())
}

fn inner_size(window: &Window) -> (f64, f64) {
  let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
  };
  (dim(window.inner_width()), dim(window.inner_height()))
}

fn schedule(app: &Shared) {
  let handle = {
    let app = app.clone();
    request_animation_frame(move |_timestamp| {
      let mut app = app.borrow_mut();
      if let Some(translation) = app.controller.take_frame() {
        app.draw(&translation);
      }
    })
  };
  app.borrow_mut().frame = Some(handle);
}

fn on_mousemove(window: &Window, app: &Shared) {
  let app = app.clone();
  let target = window.clone();
  let listener = EventListener::new(window, "mousemove", move |event| {
    let event = event.dyn_ref::<MouseEvent>().unwrap_throw();
    let (width, height) = inner_size(&target);
    let x = f64::from(event.client_x());
    let y = f64::from(event.client_y());
    let request = app.borrow_mut().controller.pointer_moved(x, y, width, height);
    if request {
      schedule(&app);
    }
  });
  listener.forget();
}

fn on_resize(window: &Window, app: &Shared) {
  let app = app.clone();
  let target = window.clone();
  let listener = EventListener::new(window, "resize", move |_event| {
    let request = {
      let mut app = app.borrow_mut();
      if RESIZE_ENABLED {
        let (width, height) = inner_size(&target);
        let side = width.min(height).max(0.0) as u32;
        app.surface.set_size(side, side);
        let (width, height) = (app.surface.width(), app.surface.height());
        app.scene.fit_viewport(width, height);
        log(&format!("canvas resized to {}x{}", side, side));
      }
      app.controller.resized()
    };
    if request {
      schedule(&app);
    }
  });
  listener.forget();
}

#[wasm_bindgen(start)]
pub fn run() {
  std::panic::set_hook(Box::new(console_error_panic_hook::hook));

  let window = web_sys::window().unwrap_throw();
  let canvas = window
    .document()
    .unwrap_throw()
    .query_selector("canvas")
    .unwrap_throw()
    .unwrap_throw()
    .dyn_into::<HtmlCanvasElement>()
    .unwrap_throw();

  let surface = CanvasSurface::new(canvas);
  let mut scene = Scene::new();
  scene.fit_viewport(surface.width(), surface.height());
  log(&format!(
    "layerclip: {} layers on a {}x{} canvas",
    scene.layers().len(),
    surface.width(),
    surface.height()
  ));

  let app: Shared = Rc::new(RefCell::new(App {
    scene,
    surface,
    controller: Controller::new(),
    frame: None,
  }));
  app.borrow_mut().draw(&Vector([0.0, 0.0]));

  on_mousemove(&window, &app);
  on_resize(&window, &app);
}
