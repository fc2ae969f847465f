use crate::theme::{
    viewer::{CAPTION_STYLE, IMAGE_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Modal overlay shown while a picture cell is open.  The terminal cannot
/// display the image itself, so the overlay presents its caption and
/// resource locator; the hosting environment is responsible for the pixels.
/// Dismissing the overlay toggles the same cell closed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Viewer<'a> {
    pub(crate) caption: &'a str,
    pub(crate) image: &'a str,
    pub(crate) alt: Option<&'a str>,
}

impl Widget for Viewer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let caption = self.alt.unwrap_or(self.caption);
        let text = Text::from(vec![
            Line::styled(caption.to_owned(), CAPTION_STYLE),
            Line::raw(""),
            Line::styled(format!("[image: {}]", self.image), IMAGE_STYLE),
            Line::raw(""),
            Line::raw("Press any key to close."),
        ]);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Picture ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE);
        let [view_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [view_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(view_area);
        let outer_area = Rect {
            x: view_area.x.saturating_sub(1),
            y: view_area.y,
            width: view_area.width.saturating_add(2),
            height: view_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        para.render(view_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = *buf.area();
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_shows_alt_and_image_ref() {
        let viewer = Viewer {
            caption: "A nice picture",
            image: "images/IMG_1528.JPG",
            alt: Some("Our first lil meetup outside code"),
        };
        let area = Rect::new(0, 0, 60, 15);
        let mut buffer = Buffer::empty(area);
        viewer.render(area, &mut buffer);
        let rows = rows(&buffer);
        assert!(rows.iter().any(|r| r.contains(" Picture ")));
        assert!(rows
            .iter()
            .any(|r| r.contains("Our first lil meetup outside code")));
        assert!(rows
            .iter()
            .any(|r| r.contains("[image: images/IMG_1528.JPG]")));
        assert!(rows.iter().any(|r| r.contains("Press any key to close.")));
    }

    #[test]
    fn test_falls_back_to_caption_without_alt() {
        let viewer = Viewer {
            caption: "A nice picture",
            image: "images/IMG_1528.JPG",
            alt: None,
        };
        let area = Rect::new(0, 0, 60, 15);
        let mut buffer = Buffer::empty(area);
        viewer.render(area, &mut buffer);
        assert!(rows(&buffer).iter().any(|r| r.contains("A nice picture")));
    }
}
