//! Photometric adjustments: brightness and saturation.
//!
//! Both operate per pixel in RGB space and clamp results to the valid byte
//! range, so frame dimensions never change.

/// BT.709 luminance coefficient for red
const LUMINANCE_R: f32 = 0.2126;
/// BT.709 luminance coefficient for green
const LUMINANCE_G: f32 = 0.7152;
/// BT.709 luminance coefficient for blue
const LUMINANCE_B: f32 = 0.0722;

/// Perceptual gray level of an RGB triple, on the 0-255 scale.
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    r * LUMINANCE_R + g * LUMINANCE_G + b * LUMINANCE_B
}

/// Scales every channel by `factor`, clamping to 0-255.
///
/// A factor of 1.0 leaves the frame untouched. Larger factors brighten and
/// drive bright channels into clipping at 255; smaller factors darken.
pub(crate) fn apply_brightness(pixels: &mut [u8], factor: f32) {
    if factor == 1.0 {
        return;
    }
    for channel in pixels.iter_mut() {
        *channel = (*channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
    }
}

/// Blends each channel toward the pixel's own luminance.
///
/// A factor of 0.0 produces grayscale, 1.0 leaves the pixel untouched, and
/// larger factors push channels apart for a more vivid result. The blend
/// keeps luminance stable, so the image changes color intensity without
/// visibly lightening or darkening.
pub(crate) fn apply_saturation(pixels: &mut [u8], factor: f32) {
    if factor == 1.0 {
        return;
    }
    for chunk in pixels.chunks_exact_mut(3) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;
        let gray = luminance(r, g, b);
        chunk[0] = (gray + (r - gray) * factor).round().clamp(0.0, 255.0) as u8;
        chunk[1] = (gray + (g - gray) * factor).round().clamp(0.0, 255.0) as u8;
        chunk[2] = (gray + (b - gray) * factor).round().clamp(0.0, 255.0) as u8;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
