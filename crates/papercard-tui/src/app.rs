use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use papercard_core::{AppConfig, ExternalLink, Paper, UiConfig, open_external};
use ratatui::layout::{Position, Rect};

use crate::card::{CardAction, PaperCard};
use crate::theme::NordTheme;

/// Opens a resolved external link. Swappable so tests never launch a browser.
pub type LinkOpener = Box<dyn FnMut(&ExternalLink) -> papercard_core::Result<()>>;

/// Host state for a scrolling list of paper cards.
pub struct App {
    pub papers: Vec<Paper>,
    pub selected_index: usize,
    pub main_index: Option<usize>,
    pub scroll_offset: usize,
    pub status_message: String,
    pub should_quit: bool,
    pub ui: UiConfig,
    pub theme: NordTheme,
    /// Where each card was drawn on the last frame.
    pub card_areas: Vec<(usize, Rect)>,
    clipboard: Option<arboard::Clipboard>,
    opener: LinkOpener,
}

impl App {
    pub fn new(papers: Vec<Paper>, config: &AppConfig) -> Self {
        Self {
            papers,
            selected_index: 0,
            main_index: None,
            scroll_offset: 0,
            status_message: String::new(),
            should_quit: false,
            ui: config.ui.clone(),
            theme: NordTheme::default(),
            card_areas: Vec::new(),
            clipboard: None,
            opener: Box::new(open_external),
        }
    }

    /// Feature one paper. Out-of-range indices are ignored.
    pub fn with_main(mut self, index: Option<usize>) -> Self {
        match index {
            Some(idx) if idx >= self.papers.len() => {
                tracing::warn!(index = idx, count = self.papers.len(), "main index out of range");
                self.main_index = None;
            }
            other => self.main_index = other,
        }
        self
    }

    pub fn with_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    pub fn selected_paper(&self) -> Option<&Paper> {
        self.papers.get(self.selected_index)
    }

    // ─── Navigation ────────────────────────────────────────

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.papers.len() {
            self.selected_index += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_to_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn move_to_last(&mut self) {
        self.selected_index = self.papers.len().saturating_sub(1);
    }

    /// Keep the selection inside a window of `visible` cards.
    pub fn ensure_visible(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index + 1 - visible;
        }
    }

    // ─── Card actions ──────────────────────────────────────

    /// Toggle the featured mark on the selected card.
    pub fn toggle_main(&mut self) {
        if self.papers.is_empty() {
            return;
        }
        if self.main_index == Some(self.selected_index) {
            self.main_index = None;
            self.status_message = "Cleared featured paper".to_string();
        } else {
            self.main_index = Some(self.selected_index);
            self.status_message = "Marked as featured".to_string();
        }
    }

    pub fn activate_selected(&mut self) {
        let idx = self.selected_index;
        let mut activated = None;
        let action = match self.papers.get(idx) {
            Some(paper) => PaperCard::new(paper)
                .on_click(|| activated = Some(idx))
                .activate(),
            None => return,
        };
        self.apply(idx, action, activated);
    }

    pub fn open_selected_link(&mut self) {
        let idx = self.selected_index;
        let action = match self.papers.get(idx) {
            Some(paper) => PaperCard::new(paper).open_link(),
            None => return,
        };
        if action == CardAction::None {
            self.status_message = "No DOI or PMID for this paper".to_string();
            return;
        }
        self.apply(idx, action, None);
    }

    pub fn copy_selected_link(&mut self) {
        let Some(link) = self.selected_paper().and_then(ExternalLink::for_paper) else {
            self.status_message = "No DOI or PMID for this paper".to_string();
            return;
        };

        if self.clipboard.is_none() {
            self.clipboard = arboard::Clipboard::new().ok();
        }

        let Some(clipboard) = self.clipboard.as_mut() else {
            self.status_message = "Clipboard is not available".to_string();
            return;
        };

        match clipboard.set_text(link.url.clone()) {
            Ok(()) => self.status_message = format!("Copied {}", link.url),
            Err(err) => self.status_message = format!("Failed to copy link: {err}"),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_down(),
            MouseEventKind::ScrollUp => self.move_up(),
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                let Some((idx, area)) = self
                    .card_areas
                    .iter()
                    .copied()
                    .find(|(_, area)| area.contains(position))
                else {
                    return;
                };

                let mut activated = None;
                let action = match self.papers.get(idx) {
                    Some(paper) => PaperCard::new(paper)
                        .on_click(|| activated = Some(idx))
                        .handle_mouse(mouse, area),
                    None => return,
                };
                self.apply(idx, action, activated);
            }
            _ => {}
        }
    }

    fn apply(&mut self, idx: usize, action: CardAction, activated: Option<usize>) {
        match action {
            CardAction::OpenLink(link) => {
                self.selected_index = idx;
                self.open_link(&link);
            }
            CardAction::Activated => {
                if let Some(idx) = activated {
                    self.on_card_activated(idx);
                }
            }
            CardAction::None => {}
        }
    }

    fn on_card_activated(&mut self, idx: usize) {
        self.selected_index = idx;
        let Some(paper) = self.papers.get(idx) else {
            return;
        };

        tracing::debug!(index = idx, title = %paper.title, "card activated");
        self.status_message = match paper.publish_date.year() {
            Some(year) => format!("Selected: {} ({year})", paper.title),
            None => format!("Selected: {}", paper.title),
        };
    }

    fn open_link(&mut self, link: &ExternalLink) {
        match (self.opener)(link) {
            Ok(()) => self.status_message = format!("Opened {}: {}", link.kind, link.url),
            Err(err) => self.status_message = err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;

    use super::*;

    fn paper(title: &str, doi: Option<&str>, pmid: Option<&str>) -> Paper {
        Paper {
            title: title.to_string(),
            authors: vec!["A".to_string()],
            journal: "J".to_string(),
            publish_date: "2020-05-05".into(),
            abstract_text: "Abstract.".to_string(),
            doi: doi.map(str::to_string),
            pmid: pmid.map(str::to_string),
            ..Default::default()
        }
    }

    fn app_with_recorder() -> (App, Rc<RefCell<Vec<String>>>) {
        let opened = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&opened);
        let papers = vec![
            paper("First", Some("10.1/first"), None),
            paper("Second", None, Some("777")),
            paper("Third", None, None),
        ];
        let app = App::new(papers, &AppConfig::default()).with_opener(Box::new(move |link: &ExternalLink| {
            sink.borrow_mut().push(link.url.clone());
            Ok(())
        }));
        (app, opened)
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let (mut app, _) = app_with_recorder();
        app.move_up();
        assert_eq!(app.selected_index, 0);
        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_index, 2);
        app.move_to_first();
        assert_eq!(app.selected_index, 0);
        app.move_to_last();
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn ensure_visible_scrolls_both_ways() {
        let (mut app, _) = app_with_recorder();
        app.selected_index = 2;
        app.ensure_visible(1);
        assert_eq!(app.scroll_offset, 2);
        app.selected_index = 0;
        app.ensure_visible(2);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn activate_sets_status() {
        let (mut app, opened) = app_with_recorder();
        app.selected_index = 1;
        app.activate_selected();
        assert_eq!(app.status_message, "Selected: Second (2020)");
        assert!(opened.borrow().is_empty());
    }

    #[test]
    fn open_link_uses_resolved_url() {
        let (mut app, opened) = app_with_recorder();
        app.open_selected_link();
        app.move_down();
        app.open_selected_link();
        app.move_down();
        app.open_selected_link();

        assert_eq!(
            *opened.borrow(),
            vec![
                "https://doi.org/10.1/first".to_string(),
                "https://pubmed.ncbi.nlm.nih.gov/777/".to_string(),
            ]
        );
        assert_eq!(app.status_message, "No DOI or PMID for this paper");
    }

    #[test]
    fn opener_failure_is_reported() {
        let (app, _) = app_with_recorder();
        let mut app = app.with_opener(Box::new(|link: &ExternalLink| {
            Err(papercard_core::PaperCardError::OpenLink {
                url: link.url.clone(),
                source: std::io::Error::other("no browser"),
            })
        }));
        app.open_selected_link();
        assert!(app.status_message.contains("Failed to open https://doi.org/10.1/first"));
    }

    #[test]
    fn mouse_link_click_opens_without_activating() {
        let (mut app, opened) = app_with_recorder();
        let area = Rect::new(0, 10, 40, 8);
        app.card_areas = vec![(0, Rect::new(0, 0, 40, 8)), (1, area)];

        // Link icon sits at the right end of the first inner row.
        app.handle_mouse(left_click(37, 11));
        assert_eq!(*opened.borrow(), vec!["https://pubmed.ncbi.nlm.nih.gov/777/".to_string()]);
        assert_eq!(app.selected_index, 1);
        assert!(!app.status_message.starts_with("Selected:"));

        app.handle_mouse(left_click(5, 3));
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.status_message, "Selected: First (2020)");
        assert_eq!(opened.borrow().len(), 1);
    }

    #[test]
    fn mouse_click_outside_cards_is_ignored() {
        let (mut app, opened) = app_with_recorder();
        app.card_areas = vec![(0, Rect::new(0, 0, 40, 8))];
        app.handle_mouse(left_click(50, 50));
        assert!(app.status_message.is_empty());
        assert!(opened.borrow().is_empty());
    }

    #[test]
    fn scroll_wheel_moves_selection() {
        let (mut app, _) = app_with_recorder();
        let scroll = |kind| MouseEvent {
            kind,
            ..left_click(0, 0)
        };
        app.handle_mouse(scroll(MouseEventKind::ScrollDown));
        assert_eq!(app.selected_index, 1);
        app.handle_mouse(scroll(MouseEventKind::ScrollUp));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn toggle_main_and_out_of_range_main() {
        let (app, _) = app_with_recorder();
        let mut app = app.with_main(Some(9));
        assert_eq!(app.main_index, None);

        app.toggle_main();
        assert_eq!(app.main_index, Some(0));
        app.toggle_main();
        assert_eq!(app.main_index, None);
    }
}
