use crate::{config::LinkConfig, frame::Reading};

/// Three-number snapshot driving the next drawn frame.
///
/// "Last frame wins": every parsed reading replaces the previous snapshot
/// wholesale.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RenderState {
    /// Horizontal circle position in canvas pixels
    pub loc_h: f32,
    /// Vertical circle position in canvas pixels
    pub loc_v: f32,
    /// Grayscale fill, 0 is black. Out-of-domain input can push this outside
    /// [0, 255]; the drawing backend clamps at paint time
    pub shade: f32,
}

impl RenderState {
    pub(crate) fn from_reading(reading: &Reading, config: &LinkConfig) -> Self {
        RenderState {
            loc_h: map_range(
                reading.horizontal,
                config.input_min,
                config.input_max,
                0.0,
                config.canvas_width as f32,
            ),
            loc_v: map_range(
                reading.vertical,
                config.input_min,
                config.input_max,
                0.0,
                config.canvas_height as f32,
            ),
            shade: 255.0 - reading.level * 255.0,
        }
    }
}

/// Linear map of `v` from one range onto another, no clamping
pub fn map_range(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (v - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_is_linear() {
        assert_eq!(map_range(0.0, 0.0, 1023.0, 0.0, 400.0), 0.0);
        assert_eq!(map_range(1023.0, 0.0, 1023.0, 0.0, 400.0), 400.0);
        assert!((map_range(512.0, 0.0, 1023.0, 0.0, 400.0) - 200.1955).abs() < 1e-3);
        // Out-of-domain input extrapolates instead of clamping
        assert!(map_range(2046.0, 0.0, 1023.0, 0.0, 400.0) > 400.0);
    }

    #[test]
    fn reading_maps_onto_canvas() {
        let config = LinkConfig::default();
        let reading = Reading {
            horizontal: 512.0,
            vertical: 768.0,
            level: 1.0,
        };

        let state = RenderState::from_reading(&reading, &config);
        assert!((state.loc_h - 200.1955).abs() < 1e-3);
        assert!((state.loc_v - 225.2199).abs() < 1e-3);
        assert_eq!(state.shade, 0.0);
    }

    #[test]
    fn released_button_is_white() {
        let config = LinkConfig::default();
        let reading = Reading {
            horizontal: 0.0,
            vertical: 0.0,
            level: 0.0,
        };

        assert_eq!(RenderState::from_reading(&reading, &config).shade, 255.0);
    }
}
