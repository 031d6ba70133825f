use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent};

use super::events::Listener;
use super::render::{self, Renderer, View};
use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::lifecycle::LoopControl;
use crate::pointer::{PointerPosition, SurfaceRect};
use crate::scene::RippleScene;

/// Attribute on the container element holding a JSON [`ViewConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-ripple-config";

/// Handle to one running ripple view. Independent instances can share a page.
#[wasm_bindgen]
pub struct RippleText {
    view: Rc<RefCell<View>>,
    control: LoopControl,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl RippleText {
    /// Create a view from an optional JSON config and start rendering.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RippleText, JsValue> {
        let config = match config_json {
            Some(json) => ViewConfig::from_json(&json).map_err(ViewError::from)?,
            None => ViewConfig::default(),
        };
        Ok(Self::create(config)?)
    }

    /// Create a view inside the element `id`, reading its config from the
    /// element's `data-ripple-config` attribute when present.
    #[wasm_bindgen(js_name = fromContainer)]
    pub fn from_container(id: &str) -> Result<RippleText, JsValue> {
        let container = find_container(id)?;
        let mut config = match container.get_attribute(CONFIG_ATTRIBUTE) {
            Some(json) => ViewConfig::from_json(&json).map_err(ViewError::from)?,
            None => ViewConfig::default(),
        };
        config.container_id = id.to_string();
        Ok(Self::create(config)?)
    }

    /// Draw one frame immediately, outside the animation loop.
    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self) {
        if !self.control.is_running() {
            return;
        }
        self.view.borrow().render_frame();
    }

    /// Current displacement point as `[x, y, z]`.
    pub fn displacement(&self) -> Vec<f32> {
        self.view.borrow().scene.displacement().point().to_array().to_vec()
    }

    /// Whether the pointer has hit the surface at least once.
    #[wasm_bindgen(js_name = hasResolved)]
    pub fn has_resolved(&self) -> bool {
        self.view.borrow().scene.displacement().is_resolved()
    }

    /// Stop the frame loop, detach listeners, free GL resources and remove the canvas.
    pub fn dispose(&mut self) {
        if !self.control.is_running() {
            return;
        }
        self.control.stop();
        self.listeners.clear();
        let mut view = self.view.borrow_mut();
        view.renderer.take();
        log::info!(
            "ripple view in #{} disposed after {} frames",
            view.scene.config().container_id,
            self.control.frames()
        );
    }
}

impl RippleText {
    fn create(config: ViewConfig) -> Result<Self, ViewError> {
        let document = web_sys::window()
            .ok_or(ViewError::NoWindow)?
            .document()
            .ok_or(ViewError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| ViewError::Resource("canvas"))?;
        Self::build(config, canvas)
    }

    /// Wire `canvas` into the container. The canvas only joins the page once
    /// its renderer exists; any later failure tears the view down again.
    fn build(config: ViewConfig, canvas: HtmlCanvasElement) -> Result<Self, ViewError> {
        let container = find_container(&config.container_id)?;
        let scene = RippleScene::create(config, container.offset_width() as f32)?;
        let renderer = Renderer::new(canvas, &scene)?;
        container.append_child(renderer.canvas())?;

        let view = Rc::new(RefCell::new(View {
            scene,
            renderer: Some(renderer),
        }));
        let control = LoopControl::new();

        match attach(&container, &view, &control) {
            Ok(listeners) => {
                {
                    let view = view.borrow();
                    let (width, height) = view.scene.surface_size();
                    log::info!(
                        "ripple view started in #{} ({width}x{height})",
                        view.scene.config().container_id
                    );
                }
                Ok(Self {
                    view,
                    control,
                    listeners,
                })
            }
            Err(e) => {
                control.stop();
                view.borrow_mut().renderer.take();
                Err(e)
            }
        }
    }
}

/// Install the event listeners and start the frame loop.
fn attach(
    container: &HtmlElement,
    view: &Rc<RefCell<View>>,
    control: &LoopControl,
) -> Result<Vec<Listener>, ViewError> {
    let mut listeners = vec![pointer_listener(container, view.clone())?];
    if view.borrow().scene.config().sizing.is_responsive() {
        listeners.push(resize_listener(container, view.clone())?);
    }
    render::start(view.clone(), control.clone())?;
    Ok(listeners)
}

impl Drop for RippleText {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn find_container(id: &str) -> Result<HtmlElement, ViewError> {
    let document = web_sys::window()
        .ok_or(ViewError::NoWindow)?
        .document()
        .ok_or(ViewError::NoDocument)?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| ViewError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ViewError::MissingElement(id.to_string()))
}

fn pointer_listener(container: &HtmlElement, view: Rc<RefCell<View>>) -> Result<Listener, ViewError> {
    let element = container.clone();
    Listener::attach(container, "pointermove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let rect = element.get_bounding_client_rect();
        let pointer = PointerPosition::new(event.client_x() as f32, event.client_y() as f32);
        let surface = SurfaceRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        view.borrow_mut().scene.pointer_move(pointer, surface);
    })
}

fn resize_listener(container: &HtmlElement, view: Rc<RefCell<View>>) -> Result<Listener, ViewError> {
    let window = web_sys::window().ok_or(ViewError::NoWindow)?;
    let element = container.clone();
    Listener::attach(&window, "resize", move |_| {
        let mut view = view.borrow_mut();
        if let Some((width, height)) = view.scene.resize(element.offset_width() as f32) {
            if let Some(renderer) = &view.renderer {
                renderer.set_size(width, height);
            }
        }
    })
}
