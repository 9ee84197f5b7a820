//! Magnitude to bar height / color mapping for the display surface

use crate::SpectrumFrame;

/// Floor added before taking the logarithm, so silence maps to a height of
/// exactly zero within the 80 dB display window.
pub const DB_FLOOR_EPS: f32 = 1e-9;

/// Display dynamic range in dB; magnitudes spanning [-80, 0] dB map linearly
/// onto [0, 1] bar height.
pub const DYNAMIC_RANGE_DB: f32 = 80.0;

/// Map a bin magnitude onto a bar height in [0, max_height].
///
/// d = 10 * log10(m + eps), h = max(0, (d + 80) / 80) * max_height.
/// Monotone non-decreasing in `magnitude`; zero at or below the floor.
pub fn bar_height(magnitude: f32, max_height: f32) -> f32 {
    let db = 10.0 * (magnitude + DB_FLOOR_EPS).log10();
    ((db + DYNAMIC_RANGE_DB) / DYNAMIC_RANGE_DB).max(0.0) * max_height
}

/// Hue for a bin, linear across [0, 360) by index.
pub fn bin_hue(bin: usize, bin_count: usize) -> f32 {
    bin as f32 / bin_count as f32 * 360.0
}

/// Standard HSL to RGB conversion; h in [0, 360), s and l in [0, 100].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l / 100.0 - 1.0).abs()) * (s / 100.0);
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l / 100.0 - c / 2.0;

    let (r1, g1, b1) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r1 + m) * 255.0) as u8,
        ((g1 + m) * 255.0) as u8,
        ((b1 + m) * 255.0) as u8,
    )
}

/// One renderable bar: normalized height plus an RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bar {
    /// Height in [0, 1] relative to the maximum bar height (values above the
    /// dynamic-range ceiling are clamped by the widget, not here).
    pub height: f32,
    pub rgb: (u8, u8, u8),
}

/// Converts a spectrum frame into per-bin bars, reusing one output buffer.
pub struct VisualizationMapper {
    bars: Vec<Bar>,
}

impl VisualizationMapper {
    pub fn new(bin_count: usize) -> Self {
        let bars = (0..bin_count)
            .map(|bin| Bar {
                height: 0.0,
                rgb: hsl_to_rgb(bin_hue(bin, bin_count), 100.0, 50.0),
            })
            .collect();
        Self { bars }
    }

    /// Map each bin's magnitude onto a normalized bar height. Colors are
    /// fixed per bin and precomputed at construction.
    pub fn map(&mut self, frame: &SpectrumFrame) -> &[Bar] {
        debug_assert_eq!(frame.bins.len(), self.bars.len());
        for (bar, bin) in self.bars.iter_mut().zip(&frame.bins) {
            bar.height = bar_height(bin.norm(), 1.0);
        }
        &self.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex;

    #[test]
    fn test_height_monotone_in_magnitude() {
        let magnitudes = [0.0, 1e-8, 1e-4, 0.01, 0.5, 1.0, 10.0, 500.0];
        let heights: Vec<f32> = magnitudes
            .iter()
            .map(|&m| bar_height(m, 100.0))
            .collect();

        for pair in heights.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_height_clamps_to_zero_at_floor() {
        assert_eq!(bar_height(0.0, 100.0), 0.0);
        assert_eq!(bar_height(DB_FLOOR_EPS, 100.0), 0.0);
    }

    #[test]
    fn test_full_scale_magnitude_fills_the_window() {
        // m = 1.0 is 0 dB, the top of the 80 dB display window
        let h = bar_height(1.0, 1.0);
        assert!((h - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_hue_spans_the_circle() {
        assert_eq!(bin_hue(0, 2049), 0.0);
        assert!(bin_hue(2048, 2049) < 360.0);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), (0, 0, 255));
    }

    #[test]
    fn test_mapper_heights_follow_magnitudes() {
        let mut mapper = VisualizationMapper::new(3);
        let frame = SpectrumFrame {
            bins: vec![
                Complex::new(0.0, 0.0),
                Complex::new(0.01, 0.0),
                Complex::new(1.0, 0.0),
            ],
            sequence: 1,
        };

        let bars = mapper.map(&frame);

        assert_eq!(bars[0].height, 0.0);
        assert!(bars[1].height > 0.0 && bars[1].height < bars[2].height);
    }
}
