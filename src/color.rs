use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| from_hue((i as f32 / n as f32) * 360.0))
        .collect()
}

/// Single accent colour for one-series charts.
pub fn accent() -> Color32 {
    from_hue(210.0)
}

fn from_hue(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.65, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(10);
        assert_eq!(colours.len(), 10);
        for (i, a) in colours.iter().enumerate() {
            assert!(colours[i + 1..].iter().all(|b| a != b));
        }
    }
}
