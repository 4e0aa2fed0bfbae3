//! TUI views and rendering
//!
//! All rendering logic is contained here. Views draw from AppState and only
//! write back the result view's scroll bound.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, FormField, FormState, View};
use crate::background::{contrast_text_color, parse_hex_color};
use crate::trip::{TravelStyle, TravelerType, format_rupees};

mod colors {
    use ratatui::style::Color;

    /// Used when the backdrop color cannot be parsed
    pub const ACCENT_FALLBACK: Color = Color::Rgb(240, 152, 25);
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const NOTICE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const METRIC: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const DIM: Color = Color::DarkGray;
}

/// Hex color to a terminal color
fn hex_to_color(hex: &str) -> Option<Color> {
    parse_hex_color(hex).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Backdrop accent
fn accent(state: &AppState) -> Color {
    hex_to_color(&state.background.color).unwrap_or(colors::ACCENT_FALLBACK)
}

/// Readable text on top of the accent
fn on_accent(state: &AppState) -> Color {
    hex_to_color(contrast_text_color(&state.background.color)).unwrap_or(Color::White)
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!(?state.view, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match state.view {
        View::Form => render_form(state, frame, chunks[1]),
        View::Result => render_result(state, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    if state.loading.is_some() {
        render_loading_overlay(state, frame, frame.area());
    }
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let accent = accent(state);
    let lines = vec![
        Line::from(Span::styled(
            "🎒 PocketPath",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Smart 'Jugaad' Travel Planning",
            Style::default().fg(colors::DIM).add_modifier(Modifier::ITALIC),
        )),
    ];
    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(header, area);
}

/// Display value for a form row
fn field_value(form: &FormState, field: FormField, focused: bool) -> String {
    let cursor = if focused { "_" } else { "" };
    let arrows = |s: String| if focused { format!("◀ {} ▶", s) } else { s };
    match field {
        FormField::Origin => format!("{}{}", form.origin, cursor),
        FormField::Destination => {
            if form.destination.is_empty() && !focused {
                "Goa, Manali, Leh...".to_string()
            } else {
                format!("{}{}", form.destination, cursor)
            }
        }
        FormField::TravelerType => arrows(match form.traveler_type {
            TravelerType::Solo => "[Solo] Group".to_string(),
            TravelerType::Group => "Solo [Group]".to_string(),
        }),
        FormField::GroupSize => arrows(form.group_size.to_string()),
        FormField::DatesMode => format!("[{}]", if form.dates_mode { "x" } else { " " }),
        FormField::StartDate => format!("{}{}", form.start_date, cursor),
        FormField::EndDate => format!("{}{}", form.end_date, cursor),
        FormField::Duration => arrows(format!("{} days", form.duration)),
        FormField::Budget => {
            if form.custom_budget == 0 {
                arrows("AI decides".to_string())
            } else {
                arrows(format_rupees(form.custom_budget as f64))
            }
        }
        FormField::Style => arrows(style_cards(form.style)),
        FormField::Generate => String::new(),
    }
}

fn style_cards(selected: TravelStyle) -> String {
    TravelStyle::ALL
        .iter()
        .map(|s| {
            if *s == selected {
                format!("[{} {}]", s.icon(), s.label())
            } else {
                format!(" {} ", s.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(?state.focus, "render_form: called");
    let accent = accent(state);
    let on_accent = on_accent(state);
    let label_style = Style::default().fg(Color::Gray);

    let mut lines = vec![Line::from("")];
    for field in state.form.visible_fields() {
        let focused = field == state.focus;
        if field == FormField::Generate {
            let mut button = Style::default().fg(on_accent).bg(accent);
            if focused {
                button = button.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(" 🚀 Generate Itinerary ", button),
            ]));
            continue;
        }

        let value_style = if focused {
            Style::default().fg(on_accent).bg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<24}", field.label()), label_style),
            Span::styled(format!(" {} ", field_value(&state.form, field, focused)), value_style),
        ]));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Plan a Trip ")
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(form, area);
}

fn render_result(state: &mut AppState, frame: &mut Frame, area: Rect) {
    trace!("render_result: called");
    let accent = accent(state);
    let Some(result) = state.result.as_ref() else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Paisa Vasool Share (Per Person): ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                result.per_person.clone(),
                Style::default().fg(colors::METRIC).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    if result.truncated {
        lines.push(Line::from(Span::styled(
            "⚠ The plan was cut short at the token limit. Try fewer days.",
            Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.extend(tui_markdown::from_str(&result.markdown).lines);
    let title = format!(" 🗺️ Epic Plan for {} ", result.destination);

    // Calculate viewport and content dimensions for scrolling
    let viewport_height = area.height.saturating_sub(2) as usize;
    let viewport_width = area.width.saturating_sub(2) as usize;
    let content_height: usize = lines
        .iter()
        .map(|line| {
            let line_width = line.width();
            if viewport_width == 0 || line_width == 0 {
                1
            } else {
                line_width.div_ceil(viewport_width)
            }
        })
        .sum();

    let max_scroll = content_height.saturating_sub(viewport_height);
    state.result_max_scroll = max_scroll;
    let scroll = state.result_scroll.min(max_scroll);

    let plan = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(accent)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(plan, area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let keybind = Style::default().fg(accent(state));
    let content = if let Some(ref error) = state.error_message {
        Line::from(Span::styled(format!(" {}", error), Style::default().fg(colors::ERROR)))
    } else if let Some(ref notice) = state.notice {
        Line::from(Span::styled(format!(" {}", notice), Style::default().fg(colors::NOTICE)))
    } else {
        let keybinds: &[(&str, &str)] = match state.view {
            View::Form => &[
                ("[Tab/↑↓]", "Move"),
                ("[←→]", "Change"),
                ("[Enter]", "Generate"),
                ("[Esc]", "Quit"),
            ],
            View::Result => &[
                ("[↑↓/PgUp/PgDn]", "Scroll"),
                ("[d]", "Download PDF"),
                ("[r]", "Plan another trip"),
                ("[q]", "Quit"),
            ],
        };
        let mut spans = Vec::new();
        for (key, desc) in keybinds {
            spans.push(Span::styled(format!(" {}", key), keybind));
            spans.push(Span::raw(format!(" {} ", desc)));
        }
        Line::from(spans)
    };

    let backdrop = Line::from(Span::styled(
        format!(" 🖼  {}   {}", state.background.image_url, state.generator),
        Style::default().fg(colors::DIM),
    ));

    let footer = Paragraph::new(vec![content, backdrop]).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn render_loading_overlay(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(loading) = state.loading.as_ref() else {
        return;
    };
    let popup_area = centered_rect(60, 25, area);
    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Crafting Jugaad plan for {}...", loading.destination),
            Style::default().fg(accent(state)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            loading.tagline.as_str(),
            Style::default().fg(colors::DIM).add_modifier(Modifier::ITALIC),
        )),
    ];

    let popup = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ⏳ Hold tight ")
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(popup, popup_area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::Background;
    use crate::tui::state::ResultData;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state(color: &str) -> AppState {
        AppState::new(FormState::default(), Background::new("https://img.example/x.jpg", color))
    }

    fn screen(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(state, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_accent_from_backdrop() {
        assert_eq!(accent(&state("#112233")), Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(accent(&state("not-a-color")), colors::ACCENT_FALLBACK);
        assert_eq!(on_accent(&state("#FFFFFF")), Color::Rgb(0x0f, 0x17, 0x2a));
        assert_eq!(on_accent(&state("#000000")), Color::Rgb(0xff, 0xff, 0xff));
    }

    #[test]
    fn test_field_values() {
        let mut form = FormState::default();
        assert_eq!(field_value(&form, FormField::Budget, false), "AI decides");
        form.custom_budget = 15000;
        assert_eq!(field_value(&form, FormField::Budget, false), "₹15000");
        assert_eq!(field_value(&form, FormField::Duration, true), "◀ 4 days ▶");
    }

    #[test]
    fn test_form_screen() {
        let text = screen(&mut state("#F09819"));
        assert!(text.contains("PocketPath"));
        assert!(text.contains("Generate Itinerary"));
        assert!(text.contains("https://img.example/x.jpg"));
    }

    #[test]
    fn test_result_screen_sets_scroll_bound() {
        let mut s = state("#0c2640");
        let markdown = (1..=80).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n\n");
        s.show_result(ResultData {
            destination: "Goa".to_string(),
            markdown,
            per_person: "₹3000".to_string(),
            truncated: false,
        });

        let text = screen(&mut s);
        assert!(text.contains("Paisa Vasool Share (Per Person)"));
        assert!(text.contains("3000"));
        assert!(s.result_max_scroll > 0);
    }

    #[test]
    fn test_truncated_result_shows_warning() {
        let mut s = state("#0c2640");
        s.show_result(ResultData {
            destination: "Goa".to_string(),
            markdown: "## Day 1".to_string(),
            per_person: "₹3000".to_string(),
            truncated: true,
        });
        assert!(screen(&mut s).contains("cut short at the token limit"));

        s.result.as_mut().unwrap().truncated = false;
        assert!(!screen(&mut s).contains("cut short"));
    }

    #[test]
    fn test_loading_overlay() {
        let mut s = state("#F09819");
        s.start_loading("Leh");
        assert!(screen(&mut s).contains("Crafting Jugaad plan for Leh..."));
    }
}
