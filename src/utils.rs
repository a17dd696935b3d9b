//! Small UI helpers.

use slint::SharedPixelBuffer;

/// Checkerboard shown before a folder is opened or when an image fails to
/// load.
pub fn placeholder_image() -> slint::Image {
    let width = 96u32;
    let height = 96u32;
    let mut buffer = SharedPixelBuffer::new(width, height);
    let data = buffer.make_mut_bytes();
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 12 + y / 12) % 2 == 0 { 70 } else { 120 };
            let i = ((y * width + x) * 3) as usize;
            data[i] = v;
            data[i + 1] = v;
            data[i + 2] = v;
        }
    }
    slint::Image::from_rgb8(buffer)
}
