//! Spectrum bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};
use specviz_analysis::Bar;

/// Characters for vertical bar rendering (8 levels)
const BAR_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Fraction of the inner height the tallest bar may occupy.
const MAX_HEIGHT_FRACTION: f32 = 0.8;

/// Widget drawing one column per displayed frequency bin, bottom-up.
///
/// There are usually far more bins than terminal columns; each column shows
/// the bin at the proportional index, low frequencies on the left.
pub struct SpectrumWidget<'a> {
    bars: &'a [Bar],
}

impl<'a> SpectrumWidget<'a> {
    pub fn new(bars: &'a [Bar]) -> Self {
        Self { bars }
    }

    /// Bottom-up column of characters for a normalized height.
    fn render_bar(height: f32, rows: u16) -> Vec<char> {
        let total_levels = (height.clamp(0.0, 1.0) * 8.0 * rows as f32) as usize;
        let full_blocks = total_levels / 8;
        let partial = total_levels % 8;

        let mut bar = Vec::with_capacity(rows as usize);
        for row in 0..rows as usize {
            let ch = if row < full_blocks {
                '█'
            } else if row == full_blocks && partial > 0 {
                BAR_CHARS[partial]
            } else {
                ' '
            };
            bar.push(ch);
        }
        bar
    }
}

impl Widget for SpectrumWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::raw(" SPECTRUM "));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width < 2 || self.bars.is_empty() {
            return;
        }

        let columns = inner.width as usize;
        let rows = (inner.height as f32 * MAX_HEIGHT_FRACTION).max(1.0) as u16;

        for col in 0..columns {
            let bin = (col * self.bars.len()) / columns;
            let bar = self.bars[bin];
            let (r, g, b) = bar.rgb;
            let style = Style::default().fg(Color::Rgb(r, g, b));

            let column = Self::render_bar(bar.height, rows);
            let x = inner.x + col as u16;

            for (row, &ch) in column.iter().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let y = inner.y + inner.height - 1 - row as u16;
                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bar_empty_and_full() {
        let empty = SpectrumWidget::render_bar(0.0, 10);
        assert!(empty.iter().all(|&c| c == ' '));

        let full = SpectrumWidget::render_bar(1.0, 10);
        assert!(full.iter().all(|&c| c == '█'));
    }

    #[test]
    fn test_render_bar_partial_block_on_top() {
        // Half height over 4 rows: two full blocks, rest empty
        let bar = SpectrumWidget::render_bar(0.5, 4);
        assert_eq!(bar, vec!['█', '█', ' ', ' ']);

        // 5/8ths of one row renders a partial block character
        let bar = SpectrumWidget::render_bar(0.625, 1);
        assert_eq!(bar, vec![BAR_CHARS[5]]);
    }

    #[test]
    fn test_overdriven_height_is_clamped() {
        let bar = SpectrumWidget::render_bar(1.4, 4);
        assert!(bar.iter().all(|&c| c == '█'));
    }

    #[test]
    fn test_widget_draws_within_area() {
        let bars = vec![
            Bar {
                height: 1.0,
                rgb: (255, 0, 0),
            };
            32
        ];
        let widget = SpectrumWidget::new(&bars);
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);

        widget.render(area, &mut buf);

        // Bottom inner row carries bar glyphs, top inner row stays clear
        // (bars cap at 80% of the inner height)
        assert_eq!(buf[(1, 8)].symbol(), "█");
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
