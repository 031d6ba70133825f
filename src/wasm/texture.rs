use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::ViewError;

/// Texture backed by an image URL. A transparent 1x1 texel is bound until
/// the image arrives; a failed load leaves the placeholder in place.
/// Deleted on drop.
pub struct ImageTexture {
    gl: GL,
    texture: WebGlTexture,
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl ImageTexture {
    pub fn load(gl: &GL, url: &str) -> Result<Self, ViewError> {
        let texture = gl
            .create_texture()
            .ok_or(ViewError::Resource("texture"))?;
        let fail = |reason: String| {
            gl.delete_texture(Some(&texture));
            texture_error(url, reason)
        };
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            1,
            1,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(&[0, 0, 0, 0]),
        )
        .map_err(|e| fail(format!("{e:?}")))?;
        set_sampling(gl, false);

        let image = HtmlImageElement::new().map_err(|e| fail(format!("{e:?}")))?;

        let onload = {
            let gl = gl.clone();
            let texture = texture.clone();
            let image = image.clone();
            let url = Rc::<str>::from(url);
            Closure::wrap(Box::new(move || {
                gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
                gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
                let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                    GL::TEXTURE_2D,
                    0,
                    GL::RGBA as i32,
                    GL::RGBA,
                    GL::UNSIGNED_BYTE,
                    &image,
                );
                gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
                match uploaded {
                    Ok(()) => {
                        gl.generate_mipmap(GL::TEXTURE_2D);
                        set_sampling(&gl, true);
                        log::info!(
                            "texture {} loaded ({}x{})",
                            url,
                            image.natural_width(),
                            image.natural_height()
                        );
                    }
                    Err(e) => log::error!("texture {url}: upload failed: {e:?}"),
                }
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move || {
                log::error!("texture {url}: image failed to load");
            }) as Box<dyn FnMut()>)
        };

        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(url);

        Ok(Self {
            gl: gl.clone(),
            texture,
            image,
            _onload: onload,
            _onerror: onerror,
        })
    }

    pub fn bind(&self, gl: &GL) {
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
    }
}

impl Drop for ImageTexture {
    fn drop(&mut self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
        self.gl.delete_texture(Some(&self.texture));
    }
}

fn set_sampling(gl: &GL, mipmapped: bool) {
    let min_filter = if mipmapped {
        GL::LINEAR_MIPMAP_LINEAR
    } else {
        GL::LINEAR
    };
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, min_filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}

fn texture_error(url: &str, reason: String) -> ViewError {
    ViewError::Texture {
        path: url.to_string(),
        reason,
    }
}
