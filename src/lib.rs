//! Text plane with a pointer-driven ripple, rendered with WebGL2.
//!
//! Everything outside `wasm` is plain Rust and runs (and is tested) on the
//! host; the `wasm` module binds it to the DOM and WebGL.

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod pointer;
pub mod raycast;
pub mod ripple;
pub mod scene;
pub mod shaders;

pub use config::ViewConfig;
pub use error::{ConfigError, ViewError};
pub use scene::RippleScene;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::error::ViewError;

    mod events;
    mod gl;
    mod render;
    mod texture;
    mod view;

    pub use view::RippleText;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("ripple-text {} loaded", env!("CARGO_PKG_VERSION"));
    }

    impl From<JsValue> for ViewError {
        fn from(value: JsValue) -> Self {
            let message = value
                .as_string()
                .or_else(|| {
                    value
                        .dyn_ref::<js_sys::Error>()
                        .map(|e| String::from(e.message()))
                })
                .unwrap_or_else(|| format!("{value:?}"));
            ViewError::Js(message)
        }
    }

    impl From<ViewError> for JsValue {
        fn from(err: ViewError) -> Self {
            js_sys::Error::new(&err.to_string()).into()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::RippleText;
