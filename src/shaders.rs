//! GLSL ES 3.00 sources. The ripple constants are baked in from
//! [`RippleParams`] so the GPU math matches [`crate::ripple`].

use crate::ripple::RippleParams;

/// Vertex attribute slots shared by every program.
pub const POSITION_LOCATION: u32 = 0;
pub const UV_LOCATION: u32 = 1;

pub const U_PROJECTION: &str = "u_projection";
pub const U_VIEW: &str = "u_view";
pub const U_MODEL: &str = "u_model";
pub const U_DISPLACEMENT: &str = "u_displacement";
pub const U_TEXTURE: &str = "u_texture";

const COMMON: &str = r#"
float ease_in_out_cubic(float x) {
    return x < 0.5 ? 4.0 * x * x * x : 1.0 - pow(-2.0 * x + 2.0, 3.0) / 2.0;
}

float map_range(float value, float min1, float max1, float min2, float max2) {
    return min2 + (value - min1) * (max2 - min2) / (max1 - min1);
}
"#;

/// Formats a float so GLSL parses it as a float literal.
fn glsl_float(value: f32) -> String {
    let text = format!("{value:?}");
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

fn header(params: &RippleParams) -> String {
    format!(
        "#version 300 es\nprecision highp float;\n\nconst float MIN_DISTANCE = {};\nconst float AMPLITUDE = {};\n",
        glsl_float(params.min_distance),
        glsl_float(params.amplitude),
    )
}

/// Text plane: raises vertices near the displacement point.
pub fn text_vertex(params: &RippleParams) -> String {
    format!(
        r#"{header}
layout (location = 0) in vec3 a_position;
layout (location = 1) in vec2 a_uv;

uniform mat4 u_projection;
uniform mat4 u_view;
uniform mat4 u_model;
uniform vec3 u_displacement;

out vec2 v_uv;
{COMMON}
void main() {{
    v_uv = a_uv;
    vec3 position = a_position;
    vec4 world = u_model * vec4(a_position, 1.0);

    float dist = length(u_displacement - world.xyz);
    if (dist < MIN_DISTANCE) {{
        float t = map_range(dist, 0.0, MIN_DISTANCE, 1.0, 0.0);
        position.z += ease_in_out_cubic(t) * AMPLITUDE;
    }}

    gl_Position = u_projection * u_view * u_model * vec4(position, 1.0);
}}
"#,
        header = header(params),
    )
}

pub fn text_fragment(params: &RippleParams) -> String {
    format!(
        r#"{header}
uniform sampler2D u_texture;

in vec2 v_uv;
out vec4 out_color;

void main() {{
    out_color = texture(u_texture, v_uv);
}}
"#,
        header = header(params),
    )
}

/// Shadow plane: undisplaced, passes the distance on to the fragment stage.
pub fn shadow_vertex(params: &RippleParams) -> String {
    format!(
        r#"{header}
layout (location = 0) in vec3 a_position;
layout (location = 1) in vec2 a_uv;

uniform mat4 u_projection;
uniform mat4 u_view;
uniform mat4 u_model;
uniform vec3 u_displacement;

out vec2 v_uv;
out float v_dist;

void main() {{
    v_uv = a_uv;
    vec4 world = u_model * vec4(a_position, 1.0);
    v_dist = length(u_displacement - world.xyz);
    gl_Position = u_projection * u_view * world;
}}
"#,
        header = header(params),
    )
}

pub fn shadow_fragment(params: &RippleParams) -> String {
    format!(
        r#"{header}
uniform sampler2D u_texture;

in vec2 v_uv;
in float v_dist;
out vec4 out_color;
{COMMON}
void main() {{
    vec4 color = texture(u_texture, v_uv);
    if (v_dist < MIN_DISTANCE) {{
        color.a = map_range(v_dist, MIN_DISTANCE, 0.0, color.a, 0.0);
    }}
    out_color = color;
}}
"#,
        header = header(params),
    )
}

/// Debug marker: a single red point at the displacement position.
pub const MARKER_VERTEX: &str = r#"#version 300 es
precision highp float;

uniform mat4 u_projection;
uniform mat4 u_view;
uniform vec3 u_displacement;

void main() {
    gl_PointSize = 8.0;
    gl_Position = u_projection * u_view * vec4(u_displacement, 1.0);
}
"#;

pub const MARKER_FRAGMENT: &str = r#"#version 300 es
precision highp float;

out vec4 out_color;

void main() {
    vec2 c = gl_PointCoord * 2.0 - 1.0;
    if (dot(c, c) > 1.0) {
        discard;
    }
    out_color = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;
