use iced::widget::canvas::{self, Frame, Geometry, LineDash, Path, Stroke, Text};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme, mouse};

const BAR: Color = Color::from_rgb(0.5, 0.5, 0.5);
const AXIS: Color = Color::from_rgb(0.2, 0.2, 0.2);
const MARKER: Color = Color::from_rgb(0.86, 0.12, 0.12);

/// Intensity histogram with a dashed marker at the threshold.
#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub bins: [u32; 256],
    pub threshold: u8,
}

impl HistogramChart {
    pub fn new(bins: [u32; 256], threshold: u8) -> Self {
        Self { bins, threshold }
    }

    fn draw_bars(&self, frame: &mut Frame, size: Size) {
        let max_count = self.bins.iter().copied().max().unwrap_or(0).max(1) as f32;
        let bin_w = size.width / 256.0;

        for (bin, &count) in self.bins.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let bar_h = count as f32 / max_count * size.height;
            frame.fill_rectangle(
                Point::new(bin as f32 * bin_w, size.height - bar_h),
                Size::new(bin_w.max(1.0), bar_h),
                BAR,
            );
        }
    }

    fn draw_marker(&self, frame: &mut Frame, size: Size) {
        let x = self.threshold as f32 * size.width / 256.0;
        let dashed = Stroke {
            line_dash: LineDash {
                segments: &[6.0, 4.0],
                offset: 0,
            },
            ..Stroke::default().with_color(MARKER).with_width(2.0)
        };
        frame.stroke(
            &Path::line(Point::new(x, 0.0), Point::new(x, size.height)),
            dashed,
        );

        frame.fill_text(Text {
            content: format!("Threshold: {}", self.threshold),
            position: Point::new(size.width - 120.0, 8.0),
            color: MARKER,
            size: Pixels(14.0),
            ..Text::default()
        });
    }
}

impl<Message> canvas::Program<Message> for HistogramChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.size();
        let mut frame = Frame::new(renderer, size);

        self.draw_bars(&mut frame, size);
        frame.stroke(
            &Path::rectangle(Point::ORIGIN, size),
            Stroke::default().with_color(AXIS).with_width(1.0),
        );
        self.draw_marker(&mut frame, size);

        vec![frame.into_geometry()]
    }
}
