#![cfg(target_arch = "wasm32")]

use ripple_text::RippleText;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn make_container(id: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    div.set_id(id);
    div.style().set_property("width", "400px").unwrap();
    div.style().set_property("height", "200px").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn canvas_count(container: &web_sys::HtmlElement) -> u32 {
    container.get_elements_by_tag_name("canvas").length()
}

#[wasm_bindgen_test]
fn creates_canvas_and_disposes() {
    let container = make_container("ripple-lifecycle");
    let mut view =
        RippleText::new(Some(r#"{ "container_id": "ripple-lifecycle" }"#.to_string())).unwrap();
    assert_eq!(canvas_count(&container), 1);

    let rect = container.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0);

    view.render_frame();
    view.dispose();
    assert_eq!(canvas_count(&container), 0);
}

#[wasm_bindgen_test]
fn pointer_at_center_resolves_to_origin() {
    let container = make_container("ripple-pointer");
    container
        .set_attribute("data-ripple-config", r#"{ "debug_marker": true }"#)
        .unwrap();
    let view = RippleText::from_container("ripple-pointer").unwrap();
    assert!(!view.has_resolved());

    let rect = container.get_bounding_client_rect();
    let init = web_sys::MouseEventInit::new();
    init.set_client_x((rect.left() + rect.width() / 2.0) as i32);
    init.set_client_y((rect.top() + rect.height() / 2.0) as i32);
    let event = web_sys::MouseEvent::new_with_mouse_event_init_dict("pointermove", &init).unwrap();
    container.dispatch_event(&event).unwrap();

    assert!(view.has_resolved());
    let p = view.displacement();
    // integer client coordinates: allow a pixel of slack
    assert!(p.iter().all(|c| c.abs() < 0.25), "displacement {p:?}");
}

#[wasm_bindgen_test]
fn missing_container_is_an_error() {
    assert!(RippleText::new(Some(r#"{ "container_id": "nope" }"#.to_string())).is_err());
    assert!(RippleText::from_container("still-nope").is_err());
}

#[wasm_bindgen_test]
fn canvas_alpha_accumulates_coverage() {
    use web_sys::WebGl2RenderingContext as GL;

    let container = make_container("ripple-blend");
    let _view =
        RippleText::new(Some(r#"{ "container_id": "ripple-blend" }"#.to_string())).unwrap();
    let canvas = container
        .get_elements_by_tag_name("canvas")
        .item(0)
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    // the existing context comes back for the same type
    let gl = canvas
        .get_context("webgl2")
        .unwrap()
        .unwrap()
        .dyn_into::<GL>()
        .unwrap();

    let param = |name| gl.get_parameter(name).unwrap().as_f64().unwrap() as u32;
    assert_eq!(param(GL::BLEND_SRC_RGB), GL::SRC_ALPHA);
    assert_eq!(param(GL::BLEND_DST_RGB), GL::ONE_MINUS_SRC_ALPHA);
    assert_eq!(param(GL::BLEND_SRC_ALPHA), GL::ONE);
    assert_eq!(param(GL::BLEND_DST_ALPHA), GL::ONE_MINUS_SRC_ALPHA);
}
