//! The paper card component.
//!
//! A [`PaperCard`] borrows a [`Paper`] for one frame, draws it inside a
//! bordered block and answers mouse hits. The card has two activation
//! zones: the `[↗]` icon on its first row, which opens the paper's
//! external link, and everything else, which fires the optional click
//! callback. A hit on the icon never reaches the callback.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use papercard_core::{CardView, ExternalLink, Paper};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::tags::tag_lines;
use crate::theme::NordTheme;

pub const LINK_ICON: &str = "[↗]";
pub const LINK_ICON_WIDTH: u16 = 3;

/// What a hit on the card resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    None,
    /// The click callback ran.
    Activated,
    /// The external-link icon was hit; the caller opens the URL.
    OpenLink(ExternalLink),
}

pub struct PaperCard<'a> {
    paper: &'a Paper,
    is_main: bool,
    selected: bool,
    show_abstract: bool,
    on_click: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> PaperCard<'a> {
    pub fn new(paper: &'a Paper) -> Self {
        Self {
            paper,
            is_main: false,
            selected: false,
            show_abstract: true,
            on_click: None,
        }
    }

    /// Featured treatment. Content is unchanged.
    pub fn main(mut self, is_main: bool) -> Self {
        self.is_main = is_main;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn show_abstract(mut self, show: bool) -> Self {
        self.show_abstract = show;
        self
    }

    pub fn on_click(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some()
    }

    pub fn view(&self) -> CardView {
        CardView::new(self.paper, self.is_main)
    }

    pub fn link(&self) -> Option<ExternalLink> {
        ExternalLink::for_paper(self.paper)
    }

    /// Content rows for an inner width of `width` cells.
    pub fn lines(&self, width: usize, theme: &NordTheme) -> Vec<Line<'static>> {
        let view = self.view();
        let width = width.max(1);
        let mut lines = Vec::new();

        let title_width = if view.link.is_some() {
            width.saturating_sub(usize::from(LINK_ICON_WIDTH) + 1).max(1)
        } else {
            width
        };
        let pointer = if self.is_clickable() { "▸ " } else { "" };
        lines.push(styled_line(
            format!("{pointer}{}", view.title),
            Style::default()
                .fg(theme.fg_bright())
                .add_modifier(Modifier::BOLD),
            title_width,
        ));

        lines.push(styled_line(
            view.authors.clone(),
            Style::default().fg(theme.fg()),
            width,
        ));

        lines.push(styled_line(
            view.journal_line(),
            Style::default()
                .fg(theme.frost_mint())
                .add_modifier(Modifier::ITALIC),
            width,
        ));

        if self.show_abstract && !view.abstract_excerpt.is_empty() {
            lines.push(Line::default());
            for wrapped in wrap_text(&view.abstract_excerpt, width) {
                lines.push(styled_line(wrapped, Style::default().fg(theme.fg()), width));
            }
        }

        if !view.identifier_tags.is_empty() || !view.mesh_tags.is_empty() {
            lines.push(Line::default());
            lines.extend(tag_lines(&view.identifier_tags, width, theme));
            lines.extend(tag_lines(&view.mesh_tags, width, theme));
        }

        lines
    }

    fn block(&self, theme: &NordTheme) -> Block<'static> {
        let (border_type, border_color, bg) = if self.is_main {
            (BorderType::Thick, theme.main_border(), theme.main_bg())
        } else if self.selected {
            (BorderType::Rounded, theme.selected_border(), theme.bg())
        } else {
            (BorderType::Rounded, theme.border(), theme.bg())
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(bg));

        if self.is_main {
            block = block.title(Line::from(Span::styled(
                " ★ Featured ",
                Style::default()
                    .fg(theme.main_border())
                    .add_modifier(Modifier::BOLD),
            )));
        }

        if self.is_clickable() {
            block = block.title_bottom(
                Line::from(Span::styled(
                    " ⏎ select ",
                    Style::default().fg(theme.muted()),
                ))
                .right_aligned(),
            );
        }

        block
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &NordTheme) {
        let block = self.block(theme);
        let inner = block.inner(area);
        let lines = self.lines(usize::from(inner.width), theme);

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if let Some(icon_area) = self.link_area(area) {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    LINK_ICON,
                    Style::default()
                        .fg(theme.link_color())
                        .add_modifier(Modifier::BOLD),
                )),
                icon_area,
            );
        }
    }

    /// Hit box of the link icon for a card drawn in `area`.
    pub fn link_area(&self, area: Rect) -> Option<Rect> {
        if !self.paper.has_identifier() {
            return None;
        }

        let inner = Block::default().borders(Borders::ALL).inner(area);
        if inner.height == 0 || inner.width <= LINK_ICON_WIDTH {
            return None;
        }

        Some(Rect {
            x: inner.right() - LINK_ICON_WIDTH,
            y: inner.y,
            width: LINK_ICON_WIDTH,
            height: 1,
        })
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> CardAction {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return CardAction::None;
        }

        let position = Position::new(mouse.column, mouse.row);
        if !area.contains(position) {
            return CardAction::None;
        }

        if let Some(icon_area) = self.link_area(area) {
            if icon_area.contains(position) {
                return self.open_link();
            }
        }

        self.activate()
    }

    /// Run the click callback, if there is one.
    pub fn activate(&mut self) -> CardAction {
        match self.on_click.as_mut() {
            Some(callback) => {
                callback();
                CardAction::Activated
            }
            None => CardAction::None,
        }
    }

    pub fn open_link(&self) -> CardAction {
        match self.link() {
            Some(link) => CardAction::OpenLink(link),
            None => CardAction::None,
        }
    }
}

fn wrap_text(text: &str, line_width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let width = line_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() {
            let candidate_len = current.chars().count() + 1 + word.chars().count();
            if candidate_len <= width {
                current.push(' ');
                current.push_str(word);
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        // Words longer than a row are split across rows, never cut.
        let mut rest = word;
        while rest.chars().count() > width {
            let cut = rest
                .char_indices()
                .nth(width)
                .map_or(rest.len(), |(idx, _)| idx);
            lines.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        current.push_str(rest);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn styled_line(text: String, style: Style, max_width: usize) -> Line<'static> {
    Line::from(Span::styled(truncate_text(&text, max_width), style))
}

fn truncate_text(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if text.chars().count() <= max_width {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_width.saturating_sub(1)).collect();
    format!("{truncated}…")
}
