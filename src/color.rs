use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue of the first group, in degrees.
const FIRST_HUE: f32 = 212.0;

/// Generates `n` soft, light colours with evenly spaced hues.
///
/// The first two hues are a pastel blue and a pastel orange so that a
/// two-group chart has complementary fills.
pub fn pastel_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    let step = if n == 2 { 180.0 } else { 360.0 / n as f32 };
    (0..n)
        .map(|i| {
            let hue = (FIRST_HUE + i as f32 * step) % 360.0;
            let hsl = Hsl::new(hue, 0.8, 0.8);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

/// Gray used for points, outlines and annotation text.
pub const INK: Srgb<u8> = Srgb::new(77, 77, 77);

#[cfg(feature = "viewer")]
pub fn to_color32(c: Srgb<u8>) -> eframe::egui::Color32 {
    eframe::egui::Color32::from_rgb(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(pastel_palette(0).is_empty());
        assert_eq!(pastel_palette(2).len(), 2);
        assert_eq!(pastel_palette(5).len(), 5);
    }

    #[test]
    fn pastel_colours_are_light() {
        for c in pastel_palette(4) {
            let min = c.red.min(c.green).min(c.blue);
            assert!(min >= 120, "{c:?} is too dark");
        }
    }

    #[test]
    fn two_group_palette_is_blue_then_orange() {
        let palette = pastel_palette(2);

        assert!(palette[0].blue > palette[0].red);
        assert!(palette[1].red > palette[1].blue);
    }
}
