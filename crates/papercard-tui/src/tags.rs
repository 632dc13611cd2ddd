use papercard_core::{Tag, TagKind};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::NordTheme;

/// A tag drawn as a padded badge.
#[must_use]
pub fn tag_badge(tag: &Tag, theme: &NordTheme) -> Span<'static> {
    badge(tag, tag.label.clone(), theme)
}

/// Like [`tag_badge`], but the label is cut with `…` so the badge fits in
/// `max_width` cells.
#[must_use]
pub fn fitted_tag_badge(tag: &Tag, max_width: usize, theme: &NordTheme) -> Span<'static> {
    let room = max_width.saturating_sub(2);
    if tag.label.chars().count() <= room {
        return tag_badge(tag, theme);
    }

    let mut label: String = tag.label.chars().take(room.saturating_sub(1)).collect();
    label.push('…');
    badge(tag, label, theme)
}

fn badge(tag: &Tag, label: String, theme: &NordTheme) -> Span<'static> {
    let style = match tag.kind {
        TagKind::Pmid | TagKind::Doi => Style::default()
            .fg(theme.fg_bright())
            .bg(theme.identifier_tag_bg())
            .add_modifier(Modifier::BOLD),
        TagKind::Citations => Style::default()
            .fg(theme.bg())
            .bg(theme.citation_tag_bg())
            .add_modifier(Modifier::BOLD),
        TagKind::MeshTerm => Style::default().fg(theme.bg()).bg(theme.mesh_tag_bg()),
        TagKind::MoreMeshTerms => Style::default()
            .fg(theme.fg())
            .bg(theme.muted())
            .add_modifier(Modifier::ITALIC),
    };

    Span::styled(format!(" {label} "), style)
}

/// Lay badges out left to right, starting a new line when `width` runs out.
///
/// A badge wider than the whole line gets a line of its own, with its
/// label shortened to fit.
pub fn tag_lines(tags: &[Tag], width: usize, theme: &NordTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for tag in tags {
        let badge = fitted_tag_badge(tag, width, theme);
        let badge_width = badge.width();
        let gap = usize::from(!current.is_empty());

        if !current.is_empty() && used + gap + badge_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }

        if !current.is_empty() {
            current.push(Span::raw(" "));
            used += 1;
        }
        used += badge_width;
        current.push(badge);
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}
