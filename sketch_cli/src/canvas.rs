use clap::{ArgEnum, Args};
use plotters::prelude::*;
use sensorlink::RenderState;
use simple_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};

/// Diameter of the drawn circle in pixels
const CIRCLE_DIAMETER: i32 = 50;

#[derive(Args)]
pub struct CanvasConf {
    /// Path to a file where the sketch should be rendered
    #[clap(short, long, value_parser = unique_path_parser, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Image format for the rendered sketch
    #[clap(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Canvas width in pixels
    #[clap(long, value_parser, default_value_t = 400)]
    pub width: u32,

    /// Canvas height in pixels
    #[clap(long, value_parser, default_value_t = 300)]
    pub height: u32,

    /// Redraw rate of the sketch in frames per second
    #[clap(long, value_parser, default_value_t = 10)]
    pub fps: u32,
}

fn unique_path_parser(p: &str) -> Result<PathBuf> {
    let p = Path::new(p);
    if p.try_exists()? {
        Err(eyre!("Path {p:?} already exists"))
    } else {
        Ok(p.to_path_buf())
    }
}

#[derive(ArgEnum, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Animated GIF with one frame per redraw tick
    #[default]
    Gif,
    /// PNG snapshot, rewritten on every tick so the final state survives
    Png,
}

impl CanvasConf {
    /// Milliseconds between redraw ticks
    pub fn tick_millis(&self) -> u64 {
        u64::from(1000 / self.fps.max(1))
    }

    pub fn drawing_area(
        &self,
    ) -> Result<DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>> {
        let dims = (self.width, self.height);
        let root = match self.format {
            OutputFormat::Gif => {
                BitMapBackend::gif(self.output.as_path(), dims, 1000 / self.fps.max(1))?
                    .into_drawing_area()
            }
            OutputFormat::Png => BitMapBackend::new(self.output.as_path(), dims).into_drawing_area(),
        };
        Ok(root)
    }
}

fn fill_shade(shade: f32) -> RGBColor {
    let level = shade.clamp(0.0, 255.0) as u8;
    RGBColor(level, level, level)
}

/// Redraws one tick of the sketch: black background, then the circle at the
/// last mapped position. Before the first reading only the background shows.
pub fn draw_tick<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    state: Option<&RenderState>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&BLACK)?;
    if let Some(state) = state {
        root.draw(&Circle::new(
            (state.loc_h.round() as i32, state.loc_v.round() as i32),
            CIRCLE_DIAMETER / 2,
            fill_shade(state.shade).filled(),
        ))?;
    }
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_clamps_at_paint_time() {
        assert_eq!(fill_shade(0.0), RGBColor(0, 0, 0));
        assert_eq!(fill_shade(255.0), RGBColor(255, 255, 255));
        assert_eq!(fill_shade(-260610.0), RGBColor(0, 0, 0));
        assert_eq!(fill_shade(400.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn draws_circle_on_black_background() {
        let (width, height) = (400u32, 300u32);
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            let state = RenderState {
                loc_h: 200.0,
                loc_v: 150.0,
                shade: 255.0,
            };
            draw_tick(&root, Some(&state)).unwrap();
        }
        // Circle center is white, the far corner stays background black
        let center = ((150 * width + 200) * 3) as usize;
        assert_eq!(&buf[center..center + 3], &[255, 255, 255]);
        assert_eq!(&buf[0..3], &[0, 0, 0]);
    }

    #[test]
    fn background_only_before_first_reading() {
        let mut buf = vec![255u8; 400 * 300 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
            draw_tick(&root, None).unwrap();
        }
        assert!(buf.iter().all(|b| *b == 0));
    }
}
