use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::card::PaperCard;

const MIN_CARD_HEIGHT: u16 = 5;
const KEY_HINTS: &str = "j/k move  ⏎ select  o open link  y copy link  m feature  q quit";

/// Draw the card list and the status bar.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [list_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    render_cards(frame, app, list_area);
    render_status(frame, app, status_area);
}

fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    app.card_areas.clear();

    if app.papers.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No papers loaded",
                Style::default().fg(app.theme.muted()),
            )),
            area,
        );
        return;
    }

    let card_height = app.ui.card_height.max(MIN_CARD_HEIGHT);
    let visible = usize::from((area.height / card_height).max(1));
    app.ensure_visible(visible);

    let mut y = area.y;
    for idx in (app.scroll_offset..app.papers.len()).take(visible) {
        let height = card_height.min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let card_area = Rect::new(area.x, y, area.width, height);

        PaperCard::new(&app.papers[idx])
            .main(app.main_index == Some(idx))
            .selected(idx == app.selected_index)
            .show_abstract(app.ui.show_abstract)
            .on_click(|| {})
            .render(frame, card_area, &app.theme);

        app.card_areas.push((idx, card_area));
        y += height;
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let position = format!(
        " {}/{} ",
        (app.selected_index + 1).min(app.papers.len()),
        app.papers.len()
    );

    let message = if app.status_message.is_empty() {
        Span::styled(KEY_HINTS, Style::default().fg(app.theme.muted()))
    } else {
        Span::styled(
            app.status_message.clone(),
            Style::default().fg(app.theme.fg()),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(app.theme.bg())
                .bg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        message,
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.bg_secondary())),
        area,
    );
}

#[cfg(test)]
mod tests {
    use papercard_core::{AppConfig, Paper};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn papers(count: usize) -> Vec<Paper> {
        (0..count)
            .map(|i| Paper {
                title: format!("Paper {i}"),
                authors: vec!["Author".to_string()],
                journal: "Journal".to_string(),
                publish_date: "2010-01-01".into(),
                abstract_text: "Body".to_string(),
                pmid: Some(format!("{}", 1000 + i)),
                ..Default::default()
            })
            .collect()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn lays_out_cards_and_records_areas() {
        let mut app = App::new(papers(5), &AppConfig::default());
        app.ui.card_height = 8;
        let mut terminal = Terminal::new(TestBackend::new(50, 17)).unwrap();

        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert_eq!(
            app.card_areas,
            vec![(0, Rect::new(0, 0, 50, 8)), (1, Rect::new(0, 8, 50, 8))]
        );
        let text = screen(&terminal);
        assert!(text.contains("Paper 0"));
        assert!(text.contains("Paper 1"));
        assert!(!text.contains("Paper 2"));
        assert!(text.contains(" 1/5 "));
        assert!(text.contains("o open link"));
    }

    #[test]
    fn scrolls_to_selection() {
        let mut app = App::new(papers(5), &AppConfig::default());
        app.ui.card_height = 8;
        app.selected_index = 4;
        let mut terminal = Terminal::new(TestBackend::new(50, 17)).unwrap();

        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert_eq!(app.scroll_offset, 3);
        assert_eq!(app.card_areas.first().map(|(idx, _)| *idx), Some(3));
        assert!(screen(&terminal).contains("Paper 4"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let mut app = App::new(Vec::new(), &AppConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();

        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert!(app.card_areas.is_empty());
        assert!(screen(&terminal).contains("No papers loaded"));
        assert!(screen(&terminal).contains(" 0/0 "));
    }

    #[test]
    fn status_message_replaces_hints() {
        let mut app = App::new(papers(1), &AppConfig::default());
        app.status_message = "Selected: Paper 0 (2010)".to_string();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Selected: Paper 0 (2010)"));
        assert!(!text.contains("q quit"));
    }
}
