use iced::widget::image::{FilterMethod, Handle, Image};
use iced::widget::{canvas, column, container, row, text};
use iced::{ContentFit, Element, Length};

use super::Message;
use super::widgets::HistogramChart;
use crate::figure::panel_titles;
use crate::models::VoidAnalysis;

/// Read-only window showing the original, its histogram and the void mask.
#[derive(Debug, Clone)]
pub struct VoidViewer {
    original: Handle,
    mask: Handle,
    histogram: HistogramChart,
    titles: [String; 3],
    percentage: f64,
}

fn to_handle(img: &image::GrayImage) -> Handle {
    let rgba = image::DynamicImage::ImageLuma8(img.clone()).to_rgba8();
    Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}

fn panel<'a>(title: String, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    column![
        text(title).size(18),
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill),
    ]
    .spacing(10)
    .width(Length::FillPortion(1))
    .into()
}

impl VoidViewer {
    pub fn new(analysis: &VoidAnalysis) -> Self {
        Self {
            original: to_handle(&analysis.original),
            mask: to_handle(&analysis.cleaned_mask),
            histogram: HistogramChart::new(analysis.histogram, analysis.threshold),
            titles: panel_titles(analysis),
            percentage: analysis.report.percentage,
        }
    }

    pub fn title(&self) -> String {
        format!("Void Content: {:.2}%", self.percentage)
    }

    pub fn update(&mut self, message: Message) {
        match message {}
    }

    pub fn view(&self) -> Element<'_, Message> {
        let original = Image::new(self.original.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill);

        let histogram = canvas(self.histogram.clone())
            .width(Length::Fill)
            .height(Length::Fill);

        let mask = Image::new(self.mask.clone())
            .filter_method(FilterMethod::Nearest)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill);

        let [original_title, histogram_title, mask_title] = self.titles.clone();

        row![
            panel(original_title, original),
            panel(histogram_title, histogram),
            panel(mask_title, mask),
        ]
        .spacing(20)
        .padding(20)
        .into()
    }
}
