//! WGSL kernel sources for the upscale compute pipelines.
//!
//! Each kernel is a per-destination-pixel program: it maps its coordinate to
//! a normalized source coordinate via the extent ratio, samples the input
//! through the bound sampler (the sampler performs the filtering), and
//! writes one RGBA texel. Edge handling is clamp-to-edge everywhere.

/// Nearest-neighbor kernel. Paired with a nearest/nearest sampler, so every
/// output texel is drawn (never blended) from a single source texel.
pub const NEAREST: &str = r#"
@group(0) @binding(0) var src: texture_2d<f32>;
@group(0) @binding(1) var dst: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(2) var samp: sampler;

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let dims = textureDimensions(dst);
    if id.x >= dims.x || id.y >= dims.y { return; }

    let uv = (vec2<f32>(id.xy) + 0.5) / vec2<f32>(dims);
    textureStore(dst, vec2<i32>(id.xy), textureSampleLevel(src, samp, uv, 0.0));
}
"#;

/// Bilinear kernel. The linear sampler performs the 2x2 blend.
pub const BILINEAR: &str = r#"
@group(0) @binding(0) var src: texture_2d<f32>;
@group(0) @binding(1) var dst: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(2) var samp: sampler;

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let dims = textureDimensions(dst);
    if id.x >= dims.x || id.y >= dims.y { return; }

    let uv = (vec2<f32>(id.xy) + 0.5) / vec2<f32>(dims);
    textureStore(dst, vec2<i32>(id.xy), textureSampleLevel(src, samp, uv, 0.0));
}
"#;

/// Bicubic kernel. The sampler state is plain linear; the cubic response
/// comes from the kernel's tap pattern: the 4x4 B-spline footprint is folded
/// into four linear taps whose offsets and weights reproduce the cubic
/// weighting per axis.
pub const BICUBIC: &str = r#"
@group(0) @binding(0) var src: texture_2d<f32>;
@group(0) @binding(1) var dst: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(2) var samp: sampler;

// Cubic B-spline basis weights for fractional offset f.
fn cubic(f: f32) -> vec4<f32> {
    let f2 = f * f;
    let f3 = f2 * f;
    let w0 = (1.0 - 3.0 * f + 3.0 * f2 - f3) / 6.0;
    let w1 = (4.0 - 6.0 * f2 + 3.0 * f3) / 6.0;
    let w2 = (1.0 + 3.0 * f + 3.0 * f2 - 3.0 * f3) / 6.0;
    let w3 = f3 / 6.0;
    return vec4<f32>(w0, w1, w2, w3);
}

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let dims = textureDimensions(dst);
    if id.x >= dims.x || id.y >= dims.y { return; }

    let src_dims = vec2<f32>(textureDimensions(src));
    let uv = (vec2<f32>(id.xy) + 0.5) / vec2<f32>(dims);
    let coord = uv * src_dims - 0.5;
    let base = floor(coord);
    let f = coord - base;

    let wx = cubic(f.x);
    let wy = cubic(f.y);

    // Collapse the four weights per axis into two linear taps.
    let gx = vec2<f32>(wx.x + wx.y, wx.z + wx.w);
    let gy = vec2<f32>(wy.x + wy.y, wy.z + wy.w);

    let x0 = (base.x - 1.0 + wx.y / gx.x + 0.5) / src_dims.x;
    let x1 = (base.x + 1.0 + wx.w / gx.y + 0.5) / src_dims.x;
    let y0 = (base.y - 1.0 + wy.y / gy.x + 0.5) / src_dims.y;
    let y1 = (base.y + 1.0 + wy.w / gy.y + 0.5) / src_dims.y;

    let c00 = textureSampleLevel(src, samp, vec2<f32>(x0, y0), 0.0);
    let c10 = textureSampleLevel(src, samp, vec2<f32>(x1, y0), 0.0);
    let c01 = textureSampleLevel(src, samp, vec2<f32>(x0, y1), 0.0);
    let c11 = textureSampleLevel(src, samp, vec2<f32>(x1, y1), 0.0);

    let color = (c00 * gx.x + c10 * gx.y) * gy.x + (c01 * gx.x + c11 * gx.y) * gy.y;
    textureStore(dst, vec2<i32>(id.xy), color);
}
"#;

/// Reference Lanczos-3 scaler. Fixed direct convolution over the source via
/// textureLoad with clamped taps and normalized weights; no sampler state.
pub const LANCZOS: &str = r#"
@group(0) @binding(0) var src: texture_2d<f32>;
@group(0) @binding(1) var dst: texture_storage_2d<rgba8unorm, write>;

const PI: f32 = 3.1415926535897932;
const LOBES: f32 = 3.0;

fn lanczos_weight(x: f32) -> f32 {
    let ax = abs(x);
    if ax < 1e-5 { return 1.0; }
    if ax >= LOBES { return 0.0; }
    let px = PI * ax;
    let pxa = px / LOBES;
    return (sin(px) / px) * (sin(pxa) / pxa);
}

@compute @workgroup_size(16, 16)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let dims = textureDimensions(dst);
    if id.x >= dims.x || id.y >= dims.y { return; }

    let src_dims = textureDimensions(src);
    let scale = vec2<f32>(src_dims) / vec2<f32>(dims);
    let center = (vec2<f32>(id.xy) + 0.5) * scale - 0.5;

    let base = vec2<i32>(floor(center));
    let max_coord = vec2<i32>(src_dims) - 1;

    var acc = vec4<f32>(0.0);
    var wsum = 0.0;

    for (var j = -2; j <= 3; j = j + 1) {
        let sy = base.y + j;
        let wy = lanczos_weight(f32(sy) - center.y);
        if wy == 0.0 { continue; }
        let cy = clamp(sy, 0, max_coord.y);
        for (var i = -2; i <= 3; i = i + 1) {
            let sx = base.x + i;
            let wx = lanczos_weight(f32(sx) - center.x);
            if wx == 0.0 { continue; }
            let cx = clamp(sx, 0, max_coord.x);
            let w = wx * wy;
            acc = acc + textureLoad(src, vec2<i32>(cx, cy), 0) * w;
            wsum = wsum + w;
        }
    }

    textureStore(dst, vec2<i32>(id.xy), acc / wsum);
}
"#;
