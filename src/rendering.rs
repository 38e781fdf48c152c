use std::io::{self, Write};

/// Share of the canvas height taken by the progress bar at the bottom.
pub const PROGRESS_BAR_FRACTION: f32 = 1.0 / 18.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One spectrum bar, in canvas coordinates with the origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    /// Hue in degrees, sweeping from 0 at DC to 360 at Nyquist.
    pub hue: f32,
}

/// Height of the area above the progress bar.
pub fn spectrum_height(height: f32) -> f32 {
    height - height * PROGRESS_BAR_FRACTION
}

/// Lays out the bins below Nyquist as bars scaled against `max`.
///
/// Bars stand on the top edge of the progress bar. A `max` of zero draws
/// every bar flat.
pub fn bar_layout(magnitudes: &[f64], max: f64, width: f32, height: f32) -> Vec<Bar> {
    let count = magnitudes.len() / 2;
    if count == 0 {
        return Vec::new();
    }
    let bar_width = width / count as f32;
    let total_height = f64::from(spectrum_height(height));

    magnitudes[..count]
        .iter()
        .enumerate()
        .map(|(i, &mag)| {
            let h = if max > 0.0 {
                (mag / max) * total_height
            } else {
                0.0
            };
            Bar {
                rect: Rect {
                    x: bar_width * i as f32,
                    y: (total_height - h) as f32,
                    width: bar_width,
                    height: h as f32,
                },
                hue: i as f32 / count as f32 * 360.0,
            }
        })
        .collect()
}

/// The filled part of the progress bar along the bottom of the canvas.
pub fn progress_bar(progress: f64, width: f32, height: f32) -> Rect {
    let h = height * PROGRESS_BAR_FRACTION;
    Rect {
        x: 0.0,
        y: height - h,
        width: width * progress.clamp(0.0, 1.0) as f32,
        height: h,
    }
}

/// Draws bar layouts as block characters.
pub struct TerminalRenderer {
    columns: usize,
    rows: usize,
    clear_screen: bool,
}

impl TerminalRenderer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            clear_screen: false,
        }
    }

    /// Moves the cursor home before each frame so frames overwrite each other.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Fill levels (`0..=rows`) per column. Each column shows the tallest bar
    /// of its group.
    pub fn levels(&self, bars: &[Bar], spectrum_height: f32) -> Vec<usize> {
        if bars.is_empty() || spectrum_height <= 0.0 {
            return Vec::new();
        }
        let columns = self.columns.min(bars.len());
        let group = (bars.len() + columns - 1) / columns;

        bars.chunks(group)
            .map(|chunk| {
                let tallest = chunk.iter().map(|b| b.rect.height).fold(0.0f32, f32::max);
                let fill = (tallest / spectrum_height).clamp(0.0, 1.0);
                (fill * self.rows as f32).round() as usize
            })
            .collect()
    }

    pub fn render<W: Write>(
        &self,
        out: &mut W,
        bars: &[Bar],
        spectrum_height: f32,
        progress: f64,
    ) -> io::Result<()> {
        let levels = self.levels(bars, spectrum_height);
        if self.clear_screen {
            write!(out, "\x1b[H\x1b[2J")?;
        }

        let mut line = String::with_capacity(levels.len() * 3);
        for row in (1..=self.rows).rev() {
            line.clear();
            line.extend(levels.iter().map(|&l| if l >= row { '█' } else { ' ' }));
            writeln!(out, "{}", line.trim_end())?;
        }

        let width = levels.len().max(1);
        let filled = ((width as f64) * progress.clamp(0.0, 1.0)).round() as usize;
        writeln!(out, "{}{}", "=".repeat(filled), "-".repeat(width - filled))?;
        out.flush()
    }
}
