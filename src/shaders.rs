//! GLSL ES 3.00 sources for the image-plane material.
//!
//! Uniform contract: `uMatrix` (MVP), `time`, `hover` (UV of the last pointer
//! hit), `uImage` (the plane's page image), `oceanTexture` (shared decorative
//! texture). Attributes are bound by location: 0 = position, 1 = uv.

pub const POSITION_LOCATION: u32 = 0;
pub const UV_LOCATION: u32 = 1;

pub const VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 position;
layout(location = 1) in vec2 uv;

uniform mat4 uMatrix;
uniform float time;
uniform vec2 hover;

out vec2 vUv;
out float vWave;

void main() {
    vec3 pos = position;
    float dist = distance(uv, hover);
    // Ripple radiating from the hover point, strongest nearby.
    float wave = 10.0 * sin(dist * 10.0 + time) * exp(-dist * 2.5);
    pos.z += wave;
    vWave = wave / 10.0;
    vUv = uv;
    gl_Position = uMatrix * vec4(pos, 1.0);
}
"#;

pub const FRAGMENT: &str = r#"#version 300 es
precision highp float;

uniform sampler2D uImage;
uniform sampler2D oceanTexture;
uniform float time;

in vec2 vUv;
in float vWave;

out vec4 outColor;

void main() {
    // Displace the sample along the wave so the image itself appears to bend.
    vec2 warped = vUv + vec2(0.0, vWave * 0.02);
    vec4 image = texture(uImage, warped);
    vec4 ocean = texture(oceanTexture, vUv);
    float blend = clamp(abs(vWave) * 0.5, 0.0, 0.35);
    outColor = vec4(mix(image.rgb, ocean.rgb, blend), 1.0);
}
"#;
