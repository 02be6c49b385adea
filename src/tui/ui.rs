//! UI rendering functions for the TUI.
//!
//! Draws the form (mode selector tabs, the active mode's input group, the
//! domain multi-select) above the per-domain result panels, with modal
//! overlays for the busy indicator, the error alert, and the tag tooltip.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

use super::app::{App, Focus, ResultEntry};
use crate::domains::DOMAINS;
use crate::form::{InputMode, MAX_TEXT_LEN};
use crate::response::format_score;

/// Main rendering function for the TUI.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                    // Mode selector
            Constraint::Length(3),                    // Input group
            Constraint::Length(DOMAINS.len() as u16 + 3), // Domain selector
            Constraint::Min(0),                       // Result panels
            Constraint::Length(1),                    // Shortcut bar
        ])
        .split(size);

    render_mode_selector(frame, app, main_chunks[0]);
    render_input_group(frame, app, main_chunks[1]);
    render_domain_selector(frame, app, main_chunks[2]);
    render_result_panels(frame, app, main_chunks[3]);
    render_shortcut_bar(frame, app, main_chunks[4]);

    // Overlays, back to front: tooltip, busy indicator, alert.
    if let Some(entry) = app.selected_entry()
        && app.focus() == Focus::Results
        && (entry.detail().is_some() || entry.detail_pending())
    {
        render_tooltip(frame, entry, main_chunks[3]);
    }
    if app.loading() {
        render_loading(frame, size);
    }
    if let Some(message) = app.alert() {
        render_alert(frame, message, size);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders the mode selector tabs.
///
/// Exactly the active mode's label carries emphasis; the other two render
/// plain. That mirrors the input-group exclusivity below, both being driven
/// by the same `FormState::mode`.
fn render_mode_selector(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::ModeSelect;

    let titles: Vec<Line> = InputMode::ALL
        .iter()
        .map(|mode| Line::from(mode.label()))
        .collect();
    let active = InputMode::ALL
        .iter()
        .position(|&m| m == app.form().mode())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(active)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Source")
                .border_style(border_style(is_focused)),
        );

    frame.render_widget(tabs, area);
}

/// Renders the input group for the active mode only.
fn render_input_group(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::Input;

    let (title, mut content) = match app.form().mode() {
        InputMode::Text => (text_input_title(app), app.form().text().to_string()),
        InputMode::File => ("File".to_string(), file_input_content(app)),
        InputMode::Url => ("URL".to_string(), app.form().url().to_string()),
    };
    if is_focused && app.form().mode() != InputMode::File {
        content.push('█');
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(is_focused));

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Builds the text input's title with the remaining-character counter.
///
/// Untouched input shows the plain maximum; once typing starts the counter
/// counts down and may go negative past the advisory cap.
fn text_input_title(app: &App) -> String {
    let remaining = app.form().remaining_chars();
    if remaining == MAX_TEXT_LEN {
        format!("Text ({MAX_TEXT_LEN} characters)")
    } else {
        format!("Text ({remaining}/{MAX_TEXT_LEN} characters)")
    }
}

/// Builds the file picker's content: the chosen file's name, or the path
/// being typed.
fn file_input_content(app: &App) -> String {
    if app.form().file().is_some() {
        app.form().file_label()
    } else if app.file_input().is_empty() {
        "Choose file (type a path, Enter to pick)".to_string()
    } else {
        format!("{}█", app.file_input())
    }
}

/// Renders the domain multi-select with the score-display toggle.
fn render_domain_selector(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::Domains;

    let mut items: Vec<ListItem> = DOMAINS
        .iter()
        .enumerate()
        .map(|(i, domain)| {
            let selected = app.form().selected_domains().contains(domain.name);
            let cursor = if is_focused && i == app.domain_cursor() {
                "> "
            } else {
                "  "
            };
            let mark = if selected { "[x]" } else { "[ ]" };
            let line = Line::from(vec![
                Span::raw(cursor),
                Span::raw(format!("{mark} ")),
                Span::styled(domain.title, Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  ({})", domain.name),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let scores = if app.form().score_display() { "on" } else { "off" };
    items.push(ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::styled("s", Style::default().fg(Color::Cyan)),
        Span::raw(format!(": score display {scores}")),
    ])));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Domains (empty = all)")
        .border_style(border_style(is_focused));

    frame.render_widget(List::new(items).block(block), area);
}

/// Renders the visible per-domain result panels side by side.
///
/// Hidden panels take no space; each visible panel shows its count badge in
/// the title and its entries (or the "no results" placeholder) as a list.
fn render_result_panels(frame: &mut Frame, app: &App, area: Rect) {
    // Panel indices are kept so the selection highlight matches by
    // position; the same label can appear in more than one domain.
    let visible: Vec<_> = app
        .panels()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.visible())
        .collect();
    if visible.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Results")
            .border_style(border_style(app.focus() == Focus::Results));
        frame.render_widget(
            Paragraph::new("Submit to see matched tags").block(block),
            area,
        );
        return;
    }

    let constraints: Vec<Constraint> = visible
        .iter()
        .map(|_| Constraint::Ratio(1, visible.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let selected = if app.focus() == Focus::Results {
        app.selected_position()
    } else {
        None
    };
    for ((panel_index, panel), chunk) in visible.iter().zip(chunks.iter()) {
        let items: Vec<ListItem> = if panel.entries().is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "no results",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )))]
        } else {
            panel
                .entries()
                .iter()
                .enumerate()
                .map(|(entry_index, entry)| {
                    ListItem::new(entry_line(
                        entry,
                        app.form().score_display(),
                        selected == Some((*panel_index, entry_index)),
                    ))
                })
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", panel.title(), panel.count()))
            .border_style(border_style(app.focus() == Focus::Results));

        frame.render_widget(List::new(items).block(block), *chunk);
    }
}

/// Builds the line for one result entry.
///
/// Interactive tags render underlined like links; the score badge is
/// appended only when score display is enabled, always with two decimals.
fn entry_line(entry: &ResultEntry, score_display: bool, selected: bool) -> Line<'static> {
    let mut label_style = if entry.is_interactive() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    if selected {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![Span::styled(entry.label().to_string(), label_style)];
    if score_display {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format_score(entry.score()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Renders the tooltip popup for the selected interactive tag.
fn render_tooltip(frame: &mut Frame, entry: &ResultEntry, area: Rect) {
    let content = match entry.detail() {
        Some(detail) => detail.to_string(),
        None => "fetching detail...".to_string(),
    };

    let popup = popup_rect(area, 60, 20);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(entry.label().to_string())
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

/// Renders the busy overlay while a tagging request is in flight.
fn render_loading(frame: &mut Frame, area: Rect) {
    let popup = popup_rect(area, 30, 15);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from("Tagging...")).block(block).centered(),
        popup,
    );
}

/// Renders the blocking error alert.
fn render_alert(frame: &mut Frame, message: &str, area: Rect) {
    let popup = popup_rect(area, 60, 25);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Error")
        .border_style(Style::default().fg(Color::Red));

    let mut text = Text::from(message.to_string());
    text.lines.push(Line::from(""));
    text.lines.push(Line::from(Span::styled(
        "press any key",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

/// Computes a centered popup rectangle as a percentage of `area`.
fn popup_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Renders the shortcut bar at the bottom of the screen.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Tab", key_style),
        Span::raw(": next panel"),
        Span::styled(" | ", sep_style),
        Span::styled("Enter", key_style),
        Span::raw(if app.focus() == Focus::Results {
            ": tag detail"
        } else {
            ": submit"
        }),
        Span::styled(" | ", sep_style),
        Span::styled("Ctrl+C", key_style),
        Span::raw(": quit"),
    ];

    match app.focus() {
        Focus::ModeSelect => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("h/l", key_style));
            spans.push(Span::raw(": switch source"));
        }
        Focus::Domains => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Space", key_style));
            spans.push(Span::raw(": toggle domain"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("s", key_style));
            spans.push(Span::raw(": scores"));
        }
        Focus::Results => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": navigate"));
        }
        Focus::Input => {}
    }

    if !app.submit_enabled() && app.focus() != Focus::Results {
        spans.push(Span::styled(" | ", sep_style));
        spans.push(Span::styled(
            "submit disabled",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{ResultSet, TaggingResponse};

    #[test]
    fn text_title_shows_plain_maximum_until_typing_starts() {
        let mut app = App::new();
        assert_eq!(text_input_title(&app), "Text (3000 characters)");

        app.push_input_char('a');
        assert_eq!(text_input_title(&app), "Text (2999/3000 characters)");
    }

    #[test]
    fn text_title_counter_goes_negative_past_the_cap() {
        let mut app = App::new();
        for _ in 0..3002 {
            app.push_input_char('x');
        }
        assert_eq!(text_input_title(&app), "Text (-2/3000 characters)");
    }

    #[test]
    fn file_content_shows_prompt_then_path_then_chosen_name() {
        let mut app = App::new();
        app.select_mode(InputMode::File);
        assert!(file_input_content(&app).starts_with("Choose file"));

        app.push_input_char('/');
        app.push_input_char('a');
        assert_eq!(file_input_content(&app), "/a█");

        app.push_input_char('b');
        app.commit_file_input();
        assert_eq!(file_input_content(&app), "ab");
    }

    #[test]
    fn entry_line_appends_score_badge_only_when_enabled() {
        let mut app = App::new();
        app.apply_response(&TaggingResponse::from_sets(vec![(
            "countries",
            ResultSet::from_pairs(&[("a", 1.0)]),
        )]));
        let entry = &app.panels()[1].entries()[0];

        let with_scores = entry_line(entry, true, false);
        let rendered: String = with_scores.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered, "a  1.00");

        let without_scores = entry_line(entry, false, false);
        let rendered: String = without_scores.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered, "a");
    }

    #[test]
    fn interactive_entries_render_underlined() {
        let mut app = App::new();
        app.apply_response(&TaggingResponse::from_sets(vec![
            (
                "speciesplus",
                ResultSet::from_pairs(&[("Panthera leo", 2.0)]),
            ),
            ("countries", ResultSet::from_pairs(&[("kenya", 1.0)])),
        ]));

        let species_line = entry_line(&app.panels()[0].entries()[0], false, false);
        assert!(
            species_line.spans[0]
                .style
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );

        let country_line = entry_line(&app.panels()[1].entries()[0], false, false);
        assert!(
            !country_line.spans[0]
                .style
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
    }

    #[test]
    fn duplicate_labels_across_domains_highlight_one_entry_only() {
        let mut app = App::new();
        app.apply_response(&TaggingResponse::from_sets(vec![
            ("speciesplus", ResultSet::from_pairs(&[("shared", 1.0)])),
            ("countries", ResultSet::from_pairs(&[("shared", 1.0)])),
        ]));
        app.next_focus(); // Domains
        app.next_focus(); // Results, auto-selects the first entry
        assert_eq!(app.selected_position(), Some((0, 0)));

        // Render each entry exactly as render_result_panels does.
        let selected = app.selected_position();
        let reversed: Vec<bool> = app
            .panels()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.visible())
            .flat_map(|(pi, p)| {
                p.entries().iter().enumerate().map(move |(ei, entry)| {
                    entry_line(entry, false, selected == Some((pi, ei)))
                        .spans[0]
                        .style
                        .add_modifier
                        .contains(Modifier::REVERSED)
                })
            })
            .collect();

        assert_eq!(reversed, vec![true, false]);
    }

    #[test]
    fn popup_rect_is_centered_within_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = popup_rect(area, 60, 20);
        assert!(popup.width <= 60);
        assert!(popup.x >= 20);
        assert!(popup.y >= 16);
    }
}
