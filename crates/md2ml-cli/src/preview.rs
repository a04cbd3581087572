use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use md2ml_engine::{RunStyle, SinkCommand, Underline};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::{Stdout, stdout};
use std::path::Path;

/// Plain-text rendering of a command log.
///
/// `anchors[i]` is the preview line on which command `i` shows up.
struct Preview {
    lines: Vec<Line<'static>>,
    anchors: Vec<usize>,
}

#[derive(Default)]
struct PreviewBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    open: bool,
    /// Code block content is already on screen; its runs are skipped.
    raw: bool,
}

impl PreviewBuilder {
    fn flush(&mut self) {
        if self.open {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
        self.open = false;
        self.raw = false;
    }

    fn start(&mut self, prefix: String, style: Style) {
        self.flush();
        self.open = true;
        if !prefix.is_empty() {
            self.current.push(Span::styled(prefix, style));
        }
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if self.raw {
            return;
        }
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.lines.push(Line::from(std::mem::take(&mut self.current)));
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
        self.open = true;
    }

    /// Line index the next pushed content will land on.
    fn position(&self) -> usize {
        self.lines.len()
    }

    fn add(&mut self, command: &SinkCommand) {
        match command {
            SinkCommand::Heading { level, .. } => {
                let marker = "#".repeat(usize::from(*level));
                self.start(
                    format!("{marker} "),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                );
            }
            SinkCommand::Paragraph => self.start(String::new(), Style::default()),
            SinkCommand::CodeBlock { text } => {
                self.flush();
                let style = Style::default().fg(Color::Cyan);
                self.lines
                    .extend(text.split('\n').map(|l| Line::from(Span::styled(l.to_string(), style))));
                self.raw = true;
            }
            SinkCommand::Table { .. } => self.flush(),
            SinkCommand::Row { cells, alignments } => {
                self.flush();
                let style = if alignments.is_none() {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                self.lines
                    .push(Line::from(Span::styled(format!("| {} |", cells.join(" | ")), style)));
            }
            SinkCommand::ListItem { level, ordered, .. } => {
                let bullet = if *ordered { "1." } else { "•" };
                self.start(
                    format!("{}{bullet} ", "   ".repeat(*level)),
                    Style::default().fg(Color::Green),
                );
            }
            SinkCommand::QuoteLine { .. } => {
                self.start("> ".to_string(), Style::default().fg(Color::DarkGray));
            }
            SinkCommand::Run { text, style } => self.push_text(text, run_style(style)),
            SinkCommand::Image { source } => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    format!("[image: {source}]"),
                    Style::default().fg(Color::Magenta),
                )));
            }
            SinkCommand::InlineImage { source } => self.push_text(
                &format!("[image: {source}]"),
                Style::default().fg(Color::Magenta),
            ),
            SinkCommand::Link { text, style, .. } => self.push_text(
                text,
                run_style(style)
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            SinkCommand::Tab { style } => self.push_text("    ", run_style(style)),
        }
    }

    fn build(commands: &[SinkCommand]) -> Preview {
        let mut builder = Self::default();
        let mut anchors = Vec::with_capacity(commands.len());
        for command in commands {
            if command.opens_block() || matches!(command, SinkCommand::Row { .. }) {
                builder.flush();
            }
            anchors.push(builder.position());
            builder.add(command);
        }
        builder.flush();
        Preview {
            lines: builder.lines,
            anchors,
        }
    }
}

fn run_style(style: &RunStyle) -> Style {
    let mut out = Style::default();
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline == Underline::Single {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    if style.strikeout {
        out = out.add_modifier(Modifier::CROSSED_OUT);
    }
    if style.code_style {
        out = out.fg(Color::Cyan);
    }
    out
}

struct App {
    title: String,
    commands: Vec<String>,
    list_state: ListState,
    preview: Preview,
}

impl App {
    fn new(title: String, commands: &[SinkCommand]) -> Self {
        let mut list_state = ListState::default();
        if !commands.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title,
            commands: commands.iter().map(ToString::to_string).collect(),
            list_state,
            preview: PreviewBuilder::build(commands),
        }
    }

    fn next_command(&mut self) {
        if self.commands.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.commands.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_command(&mut self) {
        if self.commands.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.commands.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn preview_offset(&self) -> u16 {
        self.list_state
            .selected()
            .and_then(|i| self.preview.anchors.get(i))
            .map_or(0, |&line| u16::try_from(line).unwrap_or(u16::MAX))
    }
}

/// Runs the interactive preview until the user quits.
pub fn run(input: &Path, commands: Vec<SinkCommand>) -> Result<()> {
    let mut app = App::new(input.display().to_string(), &commands);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_command(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_command(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let items: Vec<ListItem> = app
        .commands
        .iter()
        .map(|command| ListItem::new(Line::from(Span::raw(command.clone()))))
        .collect();
    let commands = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Commands ({})", app.commands.len())),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(commands, chunks[0], &mut app.list_state);

    let content = if app.preview.lines.is_empty() {
        vec![Line::from("Document produced no output")]
    } else {
        app.preview.lines.clone()
    };
    let preview = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(app.title.clone()))
        .scroll((app.preview_offset(), 0));
    f.render_widget(preview, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next"),
    ]));
    f.render_widget(help, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use md2ml_engine::Alignment;
    use pretty_assertions::assert_eq;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn preview_lines_and_anchors() {
        let plain = RunStyle::default();
        let commands = vec![
            SinkCommand::Heading {
                level: 2,
                text: "Intro".to_string(),
            },
            SinkCommand::Run {
                text: "Intro".to_string(),
                style: plain.clone(),
            },
            SinkCommand::Table { columns: 1 },
            SinkCommand::Row {
                cells: vec!["A".to_string()],
                alignments: None,
            },
            SinkCommand::Row {
                cells: vec!["1".to_string()],
                alignments: Some(vec![Alignment::Left]),
            },
            SinkCommand::ListItem {
                level: 1,
                ordered: false,
                text: "x".to_string(),
            },
            SinkCommand::Run {
                text: "x".to_string(),
                style: plain,
            },
        ];

        let preview = PreviewBuilder::build(&commands);
        let lines: Vec<String> = preview.lines.iter().map(text_of).collect();
        assert_eq!(lines, vec!["## Intro", "| A |", "| 1 |", "   • x"]);
        assert_eq!(preview.anchors, vec![0, 0, 1, 1, 2, 3, 3]);
    }

    #[test]
    fn code_block_runs_are_not_repeated() {
        let commands = vec![
            SinkCommand::CodeBlock {
                text: "    a\n    b".to_string(),
            },
            SinkCommand::Run {
                text: "    a\n    b".to_string(),
                style: RunStyle::default(),
            },
        ];
        let preview = PreviewBuilder::build(&commands);
        let lines: Vec<String> = preview.lines.iter().map(text_of).collect();
        assert_eq!(lines, vec!["    a", "    b"]);
    }

    #[test]
    fn selection_wraps_around() {
        let commands = vec![SinkCommand::Paragraph, SinkCommand::Paragraph];
        let mut app = App::new("doc".to_string(), &commands);
        app.previous_command();
        assert_eq!(app.list_state.selected(), Some(1));
        app.next_command();
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
