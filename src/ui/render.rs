use crate::ui::markup;
use crate::ui::orchestrator::{Focus, LayoutSnapshot, Mode, Orchestrator};
use crate::ui::output::{Content, OutputEntry};
use crate::ui::surface::InputSurface;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, orchestrator: &mut Orchestrator, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let tray_rows = if orchestrator.tray().is_hidden() {
        1
    } else {
        orchestrator
            .tray()
            .clamp_height(orchestrator.tray().height(), area.height)
    };

    // Header + Page + Tray + Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(tray_rows),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, orchestrator, theme, chunks[0]);
    render_page(frame, orchestrator, theme, chunks[1]);

    let mut layout = LayoutSnapshot {
        viewport: area,
        tray: chunks[2],
        ..LayoutSnapshot::default()
    };
    if orchestrator.tray().is_hidden() {
        render_collapsed_tray(frame, theme, chunks[2]);
    } else {
        render_tray(frame, orchestrator, theme, chunks[2], &mut layout);
    }
    render_footer(frame, orchestrator, theme, chunks[3]);

    orchestrator.set_layout(layout);
}

fn render_header(frame: &mut Frame, orchestrator: &Orchestrator, theme: &Theme, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " termfolio ",
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  ", orchestrator.page_label()),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(orchestrator.page().to_string(), Style::default().fg(theme.fg_dim)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_page(frame: &mut Frame, orchestrator: &Orchestrator, theme: &Theme, area: Rect) {
    let page_focused = orchestrator.mode() == Mode::Prompt && orchestrator.focus() == Focus::Page;
    let border_color = if page_focused {
        theme.accent
    } else {
        theme.fg_dim
    };

    let shortcuts: Vec<Span> = orchestrator
        .shortcuts()
        .iter()
        .flat_map(|(key, path)| {
            [
                Span::styled(
                    format!(" {key} "),
                    Style::default().fg(theme.bg).bg(theme.fg_dim),
                ),
                Span::styled(format!(" {path}   "), Style::default().fg(theme.fg)),
            ]
        })
        .collect();

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            orchestrator.page_label().to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Shortcuts (press Tab to leave the prompt):",
            Style::default().fg(theme.fg_dim),
        )),
        Line::from(shortcuts),
    ];

    let page = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(page, area);
}

fn render_collapsed_tray(frame: &mut Frame, theme: &Theme, area: Rect) {
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(" ▲ console ", Style::default().fg(theme.bg).bg(theme.fg_dim)),
        Span::styled(
            "  click or Ctrl+T to show",
            Style::default().fg(theme.fg_dim),
        ),
    ]));
    frame.render_widget(bar, area);
}

fn render_tray(
    frame: &mut Frame,
    orchestrator: &mut Orchestrator,
    theme: &Theme,
    area: Rect,
    layout: &mut LayoutSnapshot,
) {
    let surface_focused = orchestrator.focus() == Focus::Surface;
    let border_color = if orchestrator.tray().is_dragging() || surface_focused {
        theme.accent
    } else {
        theme.fg_dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" console ")
        .title_bottom(Line::from(" drag the top border to resize ").right_aligned())
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let surface_rows = match orchestrator.mode() {
        Mode::Prompt => 1,
        Mode::Menu => menu_rows(orchestrator),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(surface_rows)])
        .split(inner);

    layout.log = chunks[0];
    render_log(frame, orchestrator, theme, chunks[0]);

    match orchestrator.mode() {
        Mode::Prompt => {
            layout.prompt = chunks[1];
            render_prompt(frame, orchestrator, theme, chunks[1]);
        }
        Mode::Menu => {
            layout.menu_items = render_menu(frame, orchestrator, theme, chunks[1]);
        }
    }
}

fn entry_lines(entry: &OutputEntry, theme: &Theme) -> Vec<Line<'static>> {
    let style = Style::default().fg(theme.category_color(entry.category()));
    match entry.content() {
        Content::Markup(source) => markup::to_lines(source, style, theme.accent),
        Content::Text(text) => text
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), style)))
            .collect(),
    }
}

fn render_log(frame: &mut Frame, orchestrator: &mut Orchestrator, theme: &Theme, area: Rect) {
    let lines: Vec<Line> = orchestrator
        .output()
        .entries()
        .iter()
        .flat_map(|entry| entry_lines(entry, theme))
        .collect();

    // Layout is known now; resolve any scroll queued by appends.
    let output = orchestrator.output_mut();
    output.settle_scroll(lines.len(), usize::from(area.height));
    let offset = u16::try_from(output.scroll_offset()).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_prompt(frame: &mut Frame, orchestrator: &Orchestrator, theme: &Theme, area: Rect) {
    let prompt = orchestrator.prompt();
    let glyph = Span::styled(
        format!("{} ", prompt.glyph()),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    );
    let input = if prompt.value().is_empty() && !prompt.is_focused() {
        Span::styled(prompt.placeholder().to_string(), Style::default().fg(theme.fg_dim))
    } else {
        Span::styled(prompt.value().to_string(), Style::default().fg(theme.fg))
    };

    if prompt.is_focused() {
        let offset = glyph.width() + input.width();
        let x = area
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }

    frame.render_widget(Paragraph::new(Line::from(vec![glyph, input])), area);
}

fn menu_rows(orchestrator: &Orchestrator) -> u16 {
    let menu = orchestrator.menu();
    let heading = u16::from(menu.heading().is_some());
    let items = u16::try_from(menu.len().max(1)).unwrap_or(u16::MAX);
    heading.saturating_add(items)
}

/// Draw the menu and return the rectangle holding one row per item.
fn render_menu(frame: &mut Frame, orchestrator: &Orchestrator, theme: &Theme, area: Rect) -> Rect {
    let menu = orchestrator.menu();
    let mut items_area = area;

    if let Some(heading) = menu.heading() {
        let heading_area = Rect {
            height: area.height.min(1),
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                heading.to_string(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            )),
            heading_area,
        );
        items_area.y = items_area.y.saturating_add(heading_area.height);
        items_area.height = items_area.height.saturating_sub(heading_area.height);
    }

    if menu.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  (no pages)  Esc to go back",
                Style::default().fg(theme.fg_dim),
            )),
            items_area,
        );
        return Rect { height: 0, ..items_area };
    }

    let lines: Vec<Line> = menu
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == menu.selected() {
                Line::from(vec![
                    Span::styled(
                        format!("› {}", item.label),
                        Style::default()
                            .fg(theme.accent)
                            .bg(theme.selection_bg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", item.target),
                        Style::default().fg(theme.fg_dim).bg(theme.selection_bg),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("  {}", item.label),
                    Style::default().fg(theme.fg),
                ))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), items_area);
    let visible = u16::try_from(menu.len())
        .unwrap_or(u16::MAX)
        .min(items_area.height);
    Rect {
        height: visible,
        ..items_area
    }
}

fn render_footer(frame: &mut Frame, orchestrator: &Orchestrator, theme: &Theme, area: Rect) {
    let help_text = match (orchestrator.mode(), orchestrator.focus()) {
        (Mode::Menu, _) => "[↑↓/jk] Select  [Home/End] First/Last  [Enter] Open  [Esc] Cancel",
        (Mode::Prompt, Focus::Surface) => {
            "[Enter] Run  [↑↓] History  [Esc] Clear  [Tab] Page  [Ctrl+T] Console  [Ctrl+C] Quit"
        }
        (Mode::Prompt, Focus::Page) => {
            "[letter] Shortcut  [Tab/Enter] Prompt  [PgUp/PgDn] Scroll  [Ctrl+T] Console  [Ctrl+C] Quit"
        }
    };

    let footer = Paragraph::new(help_text).style(Style::default().fg(theme.fg_dim));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::ui::config::Config;
    use crate::ui::events::{EventSource, Subscription};
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    struct NullSource;

    impl EventSource for NullSource {
        fn read_event(&mut self, _timeout: Duration) -> anyhow::Result<Option<Event>> {
            Ok(None)
        }

        fn subscribe(&mut self) -> anyhow::Result<Subscription> {
            Ok(Subscription::noop())
        }
    }

    fn started() -> Orchestrator {
        let mut orchestrator =
            Orchestrator::new("/", &Config::default(), Box::new(MemorySessionStore::new()))
                .expect("valid config");
        orchestrator.initialize(&mut NullSource).expect("initialize");
        orchestrator
    }

    fn draw(orchestrator: &mut Orchestrator, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|f| render(f, orchestrator, Theme::default_theme()))
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_shows_welcome_and_prompt() {
        let mut orchestrator = started();
        let screen = draw(&mut orchestrator, 80, 30);
        assert!(screen.contains("termfolio interactive shell"));
        assert!(screen.contains("$ "));
        assert!(screen.contains("console"));
    }

    #[test]
    fn test_render_records_layout_and_settles_scroll() {
        let mut orchestrator = started();
        assert!(orchestrator.output().is_scroll_pending());
        draw(&mut orchestrator, 80, 30);
        assert!(!orchestrator.output().is_scroll_pending());

        let layout = orchestrator.layout();
        assert_eq!(layout.viewport, Rect::new(0, 0, 80, 30));
        assert_eq!(layout.tray.height, orchestrator.tray().height());
        assert_eq!(layout.prompt.height, 1);
        assert_eq!(layout.menu_items, Rect::default());
    }

    #[test]
    fn test_render_menu_mode_records_item_rows() {
        let mut orchestrator = started();
        for c in "menu".chars() {
            orchestrator.handle_event(&Event::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::empty(),
            )));
        }
        orchestrator.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::empty(),
        )));
        let screen = draw(&mut orchestrator, 80, 40);
        assert!(screen.contains("› Home"));
        assert_eq!(
            usize::from(orchestrator.layout().menu_items.height),
            orchestrator.menu().len()
        );
    }

    #[test]
    fn test_render_hidden_tray_collapses_to_bar() {
        let mut orchestrator = started();
        orchestrator.toggle_console();
        let screen = draw(&mut orchestrator, 80, 30);
        assert!(screen.contains("Ctrl+T to show"));
        assert_eq!(orchestrator.layout().tray.height, 1);
    }

    #[test]
    fn test_render_escapes_user_markup() {
        let mut orchestrator = started();
        orchestrator.run_command("<b>x</b>");
        let screen = draw(&mut orchestrator, 80, 30);
        assert!(screen.contains("Unknown command: <b>x</b>"));
    }
}
