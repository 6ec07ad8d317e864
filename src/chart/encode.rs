use image::{imageops, Rgb, RgbImage};

use super::Result;

/// Padding kept around the content when trimming, in points (0.1 inch).
pub const PAD_POINTS: f64 = 7.2;

/// Canvas background; anything else counts as content.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const METERS_PER_INCH: f64 = 0.0254;

/// PNG `pHYs` resolution for `dpi`.
pub fn dots_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

/// Crop `canvas` to the bounding box of non-background pixels, keeping
/// `pad` pixels of margin where the canvas allows it.
///
/// A blank canvas is returned unchanged.
pub fn trim(canvas: &RgbImage, pad: u32) -> RgbImage {
    let Some((x0, y0, x1, y1)) = content_bounds(canvas) else {
        return canvas.clone();
    };
    let left = x0.saturating_sub(pad);
    let top = y0.saturating_sub(pad);
    let right = (x1 + pad).min(canvas.width() - 1);
    let bottom = (y1 + pad).min(canvas.height() - 1);

    imageops::crop_imm(canvas, left, top, right - left + 1, bottom - top + 1).to_image()
}

/// Inclusive `(min_x, min_y, max_x, max_y)` of the drawn content.
fn content_bounds(canvas: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    canvas
        .enumerate_pixels()
        .filter(|(_, _, px)| **px != BACKGROUND)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

/// Encode an RGB image as PNG with its physical resolution set to `dpi`.
pub fn encode_png(image: &RgbImage, dpi: u32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let ppm = dots_per_meter(dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, BACKGROUND)
    }

    #[test]
    fn three_hundred_dpi_in_pixels_per_meter() {
        assert_eq!(dots_per_meter(300), 11811);
        assert_eq!(dots_per_meter(72), 2835);
    }

    #[test]
    fn trim_keeps_content_and_padding() {
        let mut canvas = blank(100, 80);
        canvas.put_pixel(30, 20, Rgb([0, 0, 0]));
        canvas.put_pixel(60, 50, Rgb([10, 10, 10]));

        let trimmed = trim(&canvas, 5);

        assert_eq!(trimmed.dimensions(), (41, 41));
        assert_eq!(*trimmed.get_pixel(5, 5), Rgb([0, 0, 0]));
        assert_eq!(*trimmed.get_pixel(35, 35), Rgb([10, 10, 10]));
    }

    #[test]
    fn trim_padding_is_clamped_to_canvas() {
        let mut canvas = blank(10, 10);
        canvas.put_pixel(0, 9, Rgb([0, 0, 0]));

        let trimmed = trim(&canvas, 4);

        assert_eq!(trimmed.dimensions(), (5, 5));
    }

    #[test]
    fn blank_canvas_is_not_cropped() {
        assert_eq!(trim(&blank(7, 3), 2).dimensions(), (7, 3));
    }

    #[test]
    fn encoded_png_round_trips_pixels_and_resolution() {
        let mut canvas = blank(4, 2);
        canvas.put_pixel(1, 1, Rgb([200, 10, 30]));

        let bytes = encode_png(&canvas, 300).unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.unwrap();
        assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
        let mut buf = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut buf).unwrap();
        assert_eq!(buf, canvas.into_raw());
    }
}
