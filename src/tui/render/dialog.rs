//! Shared dialog chrome: placement, transitions, border, title and close button.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Button, Dialog, FocusTarget};
use crate::tui::modal::{ModalAnimation, ModalConfig};
use crate::util::unicode;

/// What a dialog body gets to draw into
#[derive(Debug, Clone, Copy)]
pub struct DialogArea {
    pub inner: Rect,
    /// Mid-transition; bodies draw muted
    pub faded: bool,
}

/// Rectangle for a dialog at `visibility` (0.0 hidden .. 1.0 shown)
pub fn animated_rect(full: Rect, animation: ModalAnimation, visibility: f32, area: Rect) -> Rect {
    let v = visibility.clamp(0.0, 1.0);
    match animation {
        ModalAnimation::Fade => full,
        ModalAnimation::Slide => {
            // Enter from below
            let travel = area.bottom().saturating_sub(full.y) as f32;
            let offset = ((1.0 - v) * travel).round() as u16;
            let y = (full.y + offset).min(area.bottom().saturating_sub(1));
            Rect {
                y,
                height: full.height.min(area.bottom() - y),
                ..full
            }
        }
        ModalAnimation::Zoom => {
            let scale = 0.5 + 0.5 * v;
            let w = ((full.width as f32 * scale).round() as u16).clamp(full.width.min(4), full.width);
            let h = ((full.height as f32 * scale).round() as u16).clamp(full.height.min(3), full.height);
            Rect::new(
                full.x + (full.width - w) / 2,
                full.y + (full.height - h) / 2,
                w,
                h,
            )
        }
    }
}

/// Draw the dialog shell for `dialog` and register its hit regions.
/// Returns None when there is nothing to draw.
pub fn render_dialog_frame(
    frame: &mut Frame,
    app: &mut App,
    dialog: Dialog,
    area: Rect,
) -> Option<DialogArea> {
    let now = app.now;
    let (config, visibility, close_focused): (ModalConfig, f32, bool) = {
        let modal = app.dialog_mut(dialog);
        let close_focused = modal.focused() == Some(FocusTarget::Button(Button::Close));
        (modal.config().clone(), modal.visibility(now), close_focused)
    };
    if visibility <= 0.0 {
        return None;
    }

    let full = config.size.rect(area);
    let rect = animated_rect(full, config.animation, visibility, area);
    if rect.width < 2 || rect.height < 2 {
        return None;
    }
    let faded = visibility < 1.0;

    let bg = app.theme.background;
    let accent = if faded {
        app.theme.dim
    } else {
        app.theme.dialog_border(config.custom_class.as_deref())
    };

    frame.render_widget(Clear, rect);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent).bg(bg))
        .style(Style::default().bg(bg));
    if let Some(title) = &config.title {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    if config.show_close_button && rect.width > 8 {
        let close_area = Rect::new(rect.right() - 5, rect.y, 3, 1);
        let style = if close_focused {
            Style::default().fg(bg).bg(app.theme.highlight)
        } else {
            Style::default().fg(accent).bg(bg)
        };
        frame.render_widget(Paragraph::new(Span::styled("[x]", style)), close_area);
        app.hit_targets
            .push((close_area, FocusTarget::Button(Button::Close)));
    }

    app.dialog_area = Some(rect);
    Some(DialogArea { inner, faded })
}

/// Draw a centered row of buttons and register each as a click target
pub fn render_buttons(
    frame: &mut Frame,
    app: &mut App,
    row: Rect,
    buttons: &[(Button, &str)],
    focused: Option<FocusTarget>,
) {
    const GAP: u16 = 2;
    let labels: Vec<String> = buttons
        .iter()
        .map(|(_, label)| format!("[ {} ]", label))
        .collect();
    let total: u16 = labels
        .iter()
        .map(|l| unicode::display_width(l) as u16)
        .sum::<u16>()
        + GAP * labels.len().saturating_sub(1) as u16;

    let bg = app.theme.background;
    let mut x = row.x + row.width.saturating_sub(total) / 2;
    for ((button, _), label) in buttons.iter().zip(labels) {
        let w = (unicode::display_width(&label) as u16).min(row.right().saturating_sub(x));
        if w == 0 {
            break;
        }
        let style = if focused == Some(FocusTarget::Button(*button)) {
            Style::default()
                .fg(bg)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let rect = Rect::new(x, row.y, w, 1);
        frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        app.hit_targets.push((rect, FocusTarget::Button(*button)));
        x += w + GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_keeps_full_rect() {
        let area = Rect::new(0, 0, 80, 24);
        let full = Rect::new(10, 5, 60, 14);
        assert_eq!(animated_rect(full, ModalAnimation::Fade, 0.3, area), full);
    }

    #[test]
    fn slide_starts_low_and_lands_in_place() {
        let area = Rect::new(0, 0, 80, 24);
        let full = Rect::new(10, 5, 60, 14);
        let start = animated_rect(full, ModalAnimation::Slide, 0.0, area);
        assert_eq!(start.y, 23);
        assert_eq!(start.height, 1);
        let half = animated_rect(full, ModalAnimation::Slide, 0.5, area);
        assert!(half.y > full.y && half.y < start.y);
        assert_eq!(animated_rect(full, ModalAnimation::Slide, 1.0, area), full);
    }

    #[test]
    fn zoom_grows_from_center() {
        let area = Rect::new(0, 0, 80, 24);
        let full = Rect::new(18, 7, 44, 10);
        let small = animated_rect(full, ModalAnimation::Zoom, 0.0, area);
        assert_eq!(small, Rect::new(29, 9, 22, 5));
        assert_eq!(animated_rect(full, ModalAnimation::Zoom, 1.0, area), full);
    }
}
