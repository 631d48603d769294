use image::RgbaImage;

/// Contrast gain of the pre-adjustment (115%).
pub const CONTRAST_GAIN: f32 = 1.15;
/// Saturation gain of the pre-adjustment (110%).
pub const SATURATION_GAIN: f32 = 1.10;
/// Fixed point of the contrast stretch, the midpoint of the byte range.
pub const CONTRAST_PIVOT: f32 = 127.5;
/// Maximum per-channel push away from mid-gray.
pub const MIDTONE_PUSH: f32 = 24.0;

/// ITU-R BT.709 luma on 0..=255 channels.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)
}

/// Full contrast booster: the contrast/saturation pre-adjustment followed by
/// the push away from mid-gray. Alpha is left untouched.
pub fn boost_contrast(buffer: &mut RgbaImage) {
    pre_adjust(buffer);
    push_from_midtone(buffer);
}

/// Contrast 115% around mid-gray, then saturation 110%, each quantised back
/// to bytes the way a filtered draw would be.
pub fn pre_adjust(buffer: &mut RgbaImage) {
    for pixel in buffer.pixels_mut() {
        let [r, g, b, _] = &mut pixel.0;
        let contrasted = [contrast(*r), contrast(*g), contrast(*b)];
        let [sr, sg, sb] = saturate(contrasted, SATURATION_GAIN);
        *r = sr;
        *g = sg;
        *b = sb;
    }
}

/// Push each channel outward from mid-gray in proportion to how far the
/// pixel's luma already sits from 128.
pub fn push_from_midtone(buffer: &mut RgbaImage) {
    for pixel in buffer.pixels_mut() {
        let [r, g, b, _] = &mut pixel.0;
        let k = ((luma(*r, *g, *b) - 128.0) / 128.0).clamp(-1.0, 1.0);
        let shift = k * MIDTONE_PUSH;
        *r = to_channel(f32::from(*r) + shift);
        *g = to_channel(f32::from(*g) + shift);
        *b = to_channel(f32::from(*b) + shift);
    }
}

fn contrast(channel: u8) -> f32 {
    (f32::from(channel) - CONTRAST_PIVOT) * CONTRAST_GAIN + CONTRAST_PIVOT
}

// Saturation matrix with the Rec. 709 weights used for colour filters.
fn saturate([r, g, b]: [f32; 3], s: f32) -> [u8; 3] {
    let r = r.clamp(0.0, 255.0);
    let g = g.clamp(0.0, 255.0);
    let b = b.clamp(0.0, 255.0);

    let nr = (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b;
    let ng = (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b;
    let nb = (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b;

    [to_channel(nr), to_channel(ng), to_channel(nb)]
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}
