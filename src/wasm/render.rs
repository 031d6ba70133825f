use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL};

use super::gl::{Mesh, Program};
use super::texture::ImageTexture;
use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::lifecycle::LoopControl;
use crate::scene::{FrameUniforms, Layer, RippleScene};
use crate::shaders;

/// GPU side of a view: two textured planes plus the optional marker.
/// Dropping it frees every GL object and removes the canvas from the page.
pub struct Renderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    text: Program,
    shadow: Program,
    marker: Option<Program>,
    text_mesh: Mesh,
    shadow_mesh: Mesh,
    text_texture: ImageTexture,
    shadow_texture: ImageTexture,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, scene: &RippleScene) -> Result<Self, ViewError> {
        let config = scene.config();
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &context_options(config)?)?
            .ok_or(ViewError::WebGlUnsupported)?
            .dyn_into()
            .map_err(|_| ViewError::WebGlUnsupported)?;

        // straight-alpha colour; the destination alpha accumulates coverage
        // so the unpremultiplied canvas composites correctly over the page
        gl.enable(GL::BLEND);
        gl.blend_func_separate(
            GL::SRC_ALPHA,
            GL::ONE_MINUS_SRC_ALPHA,
            GL::ONE,
            GL::ONE_MINUS_SRC_ALPHA,
        );
        // transparent planes: no depth writes, both faces visible
        gl.disable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);

        let params = scene.params();
        let text = Program::new(&gl, &shaders::text_vertex(&params), &shaders::text_fragment(&params))?;
        let shadow = Program::new(
            &gl,
            &shaders::shadow_vertex(&params),
            &shaders::shadow_fragment(&params),
        )?;
        let marker = if config.debug_marker {
            Some(Program::new(&gl, shaders::MARKER_VERTEX, shaders::MARKER_FRAGMENT)?)
        } else {
            None
        };

        let text_mesh = Mesh::upload(&gl, scene.plane())?;
        let shadow_mesh = Mesh::upload(&gl, scene.plane())?;
        let text_texture = ImageTexture::load(&gl, &config.text_texture)?;
        let shadow_texture = ImageTexture::load(&gl, &config.shadow_texture)?;

        let renderer = Self {
            canvas,
            gl,
            text,
            shadow,
            marker,
            text_mesh,
            shadow_mesh,
            text_texture,
            shadow_texture,
        };
        let (width, height) = scene.surface_size();
        renderer.set_size(width, height);
        Ok(renderer)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the drawing buffer in device pixels and the element in CSS pixels.
    pub fn set_size(&self, width: f32, height: f32) {
        let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0) as f32;
        self.canvas.set_width((width * ratio).round().max(1.0) as u32);
        self.canvas.set_height((height * ratio).round().max(1.0) as u32);
        let style = self.canvas.style();
        for (property, value) in [("width", width), ("height", height)] {
            if let Err(e) = style.set_property(property, &format!("{value}px")) {
                log::warn!("canvas style {property}: {e:?}");
            }
        }
    }

    /// One frame. Every program is bound from the same `frame` snapshot.
    pub fn draw(&self, frame: &FrameUniforms) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        // back to front: the shadow plane sits behind the text plane
        self.shadow.bind(gl, &frame.layer(Layer::Shadow));
        self.shadow_texture.bind(gl);
        self.shadow_mesh.draw(gl);

        self.text.bind(gl, &frame.layer(Layer::Text));
        self.text_texture.bind(gl);
        self.text_mesh.draw(gl);

        if let Some(marker) = &self.marker {
            marker.bind(gl, &frame.layer(Layer::Text));
            gl.draw_arrays(GL::POINTS, 0, 1);
        }
    }
}

impl Drop for Renderer {
    // programs, meshes and textures delete themselves when their fields drop
    fn drop(&mut self) {
        self.canvas.remove();
    }
}

fn context_options(config: &ViewConfig) -> Result<Object, ViewError> {
    let options = Object::new();
    Reflect::set(&options, &"antialias".into(), &JsValue::from_bool(config.antialias))?;
    Reflect::set(&options, &"alpha".into(), &JsValue::from_bool(config.alpha))?;
    Reflect::set(&options, &"premultipliedAlpha".into(), &JsValue::FALSE)?;
    Ok(options)
}

/// Scene and renderer, shared between the frame loop and event handlers.
/// `renderer` is `None` once the view has been disposed.
pub struct View {
    pub scene: RippleScene,
    pub renderer: Option<Renderer>,
}

impl View {
    pub fn render_frame(&self) {
        if let Some(renderer) = &self.renderer {
            renderer.draw(&self.scene.frame_uniforms());
        }
    }
}

/// Start the animation loop. It runs until `control` is stopped, then drops
/// its own callback.
pub fn start(view: Rc<RefCell<View>>, control: LoopControl) -> Result<(), ViewError> {
    let window = window().ok_or(ViewError::NoWindow)?;

    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !control.tick() {
            // breaks the Rc cycle; the closure is freed once this call returns
            f.borrow_mut().take();
            return;
        }
        view.borrow().render_frame();

        // schedule next
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("request_animation_frame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    let first = match g.borrow().as_ref() {
        Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref()),
        None => Ok(0),
    };
    if let Err(e) = first {
        // nothing will ever run the closure, so break the cycle here
        g.borrow_mut().take();
        return Err(e.into());
    }
    Ok(())
}
