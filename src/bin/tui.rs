use std::{f32::consts::TAU, io};

use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use replaytty::{App, Config, Error, Event, Mark, MoveEntry, RenderInput, SQUARES};
use tracing::{debug, info};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Widget},
    Frame, Terminal,
};

fn main() -> Result<(), Error> {
    let config = Config::parse();
    config.init_logging(false)?;
    info!(order = %config.order, "starting full-screen game");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui = Ui::new(App::new(config.order));
    let result = run(&mut terminal, &mut ui);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("leaving full-screen game");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, ui: &mut Ui) -> Result<(), Error> {
    loop {
        terminal.draw(|f| ui.draw(f))?;

        if let TermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Flow::Quit = ui.on_key(key.code) {
                return Ok(());
            }
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Board,
    History,
}

struct Ui {
    app: App,
    cursor: usize,
    focus: Focus,
    selected: usize,
}

impl Ui {
    fn new(app: App) -> Ui {
        Ui {
            app,
            cursor: 4,
            focus: Focus::Board,
            selected: 0,
        }
    }

    fn on_key(&mut self, code: KeyCode) -> Flow {
        match (self.focus, code) {
            (_, KeyCode::Char('q') | KeyCode::Esc) => return Flow::Quit,
            (_, KeyCode::Char('r')) => self.send(Event::Reset),
            (_, KeyCode::Char('s')) => self.send(Event::ToggleSort),
            (_, KeyCode::Tab) => self.switch_focus(),
            (_, KeyCode::Char(c @ '1'..='9')) => {
                self.cursor = c as usize - '1' as usize;
                self.send(Event::Play(self.cursor));
            }
            (Focus::Board, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.send(Event::Play(self.cursor))
            }
            (Focus::Board, key) => self.cursor = move_cursor(self.cursor, key),
            (Focus::History, KeyCode::Up) => self.selected = self.selected.saturating_sub(1),
            (Focus::History, KeyCode::Down) => {
                self.selected = (self.selected + 1).min(self.app.history().len() - 1)
            }
            (Focus::History, KeyCode::Enter) => {
                if let Some(entry) = self.app.move_list().get(self.selected) {
                    self.send(Event::JumpTo(entry.step));
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Rejections are expected here (occupied squares, finished games) and
    /// are only logged.
    fn send(&mut self, event: Event) {
        if let Err(err) = self.app.handle(event) {
            debug!(%err, "ignored");
        }
        self.selected = self.selected.min(self.app.history().len() - 1);
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Board => {
                self.selected = self
                    .app
                    .move_list()
                    .iter()
                    .position(|entry| entry.is_current)
                    .unwrap_or(0);
                Focus::History
            }
            Focus::History => Focus::Board,
        };
    }

    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
            .split(f.size());

        let block = Block::default()
            .title("Board")
            .borders(Borders::ALL)
            .border_style(self.focus_style(Focus::Board));
        self.draw_board(f, block.inner(chunks[0]));
        f.render_widget(block, chunks[0]);

        self.draw_info(f, chunks[1]);
    }

    fn focus_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let thirds = [
            Constraint::Percentage(5),
            Constraint::Percentage(29),
            Constraint::Percentage(34),
            Constraint::Percentage(30),
            Constraint::Percentage(5),
        ];
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(0)
            .constraints(thirds.as_ref())
            .split(area);

        let render = self.app.render_input();
        for row in 0..3 {
            let hchunks = Layout::default()
                .direction(Direction::Horizontal)
                .margin(0)
                .horizontal_margin(3)
                .constraints(thirds.as_ref())
                .split(vchunks[row + 1]);

            for col in 0..3 {
                let index = row * 3 + col;
                let chunk = hchunks[col + 1];

                let mut borders = Borders::ALL;
                if row == 0 {
                    borders.remove(Borders::TOP);
                }
                if row == 2 {
                    borders.remove(Borders::BOTTOM);
                }
                if col == 0 {
                    borders.remove(Borders::LEFT);
                }
                if col == 2 {
                    borders.remove(Borders::RIGHT);
                }

                let mut block = Block::default().borders(borders);
                if self.focus == Focus::Board && index == self.cursor {
                    block = block
                        .borders(Borders::ALL)
                        .border_style(cursor_style(&render, index));
                }
                f.render_widget(
                    RenderMark {
                        mark: render.board.get(index),
                        style: mark_style(&render, index),
                    },
                    block.inner(chunk),
                );
                f.render_widget(block, chunk);
            }
        }
    }

    fn draw_info<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)].as_ref())
            .split(area);

        let info = vec![
            Spans::from(Span::styled(
                self.app.status().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(format!("Sort: {}", self.app.order())),
            Spans::from("s sort  r reset  tab history  q quit"),
        ];
        let info = Paragraph::new(info)
            .alignment(Alignment::Left)
            .block(Block::default().title("Game Info").borders(Borders::ALL));
        f.render_widget(info, chunks[0]);

        let items: Vec<ListItem> = self.app.move_list().into_iter().map(move_item).collect();
        let moves = List::new(items)
            .block(
                Block::default()
                    .title("History")
                    .borders(Borders::ALL)
                    .border_style(self.focus_style(Focus::History)),
            )
            .highlight_symbol("> ")
            .highlight_style(Style::default().fg(Color::Yellow));

        let mut state = ListState::default();
        if self.focus == Focus::History {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(moves, chunks[1], &mut state);
    }
}

fn move_item(entry: MoveEntry) -> ListItem<'static> {
    let style = if entry.is_current {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(Span::styled(entry.description, style))
}

fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / 3, cursor % 3);
    match key {
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col < 2 => cursor + 1,
        KeyCode::Up if row > 0 => cursor - 3,
        KeyCode::Down if cursor + 3 < SQUARES => cursor + 3,
        _ => cursor,
    }
}

fn mark_style(render: &RenderInput, index: usize) -> Style {
    if render.is_highlighted(index) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn cursor_style(render: &RenderInput, index: usize) -> Style {
    if render.is_playable(index) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

struct RenderMark {
    mark: Option<Mark>,
    style: Style,
}

impl Widget for RenderMark {
    fn render(self, area: Rect, buf: &mut tui::buffer::Buffer) {
        match self.mark {
            Some(Mark::X) => render_x(area, buf, self.style),
            Some(Mark::O) => render_o(area, buf, self.style),
            None => {}
        }
    }
}

/// Fallback for squares too small to draw a shape in.
fn render_letter(area: Rect, buf: &mut tui::buffer::Buffer, letter: &str, style: Style) {
    if area.width > 0 && area.height > 0 {
        buf.set_string(
            area.x + area.width / 2,
            area.y + area.height / 2,
            letter,
            style,
        );
    }
}

fn render_x(area: Rect, buf: &mut tui::buffer::Buffer, style: Style) {
    const LEFT: &str = "\\@\\";
    const RIGHT: &str = "/@/";

    if area.width < 6 || area.height < 2 {
        return render_letter(area, buf, "X", style);
    }

    // Strokes are 3 wide, so their left edge travels over `span` columns.
    let span = u32::from(area.width - 3);
    let last_row = u32::from(area.height - 1);
    for y in 0..area.height {
        let offset = (span * u32::from(y) / last_row) as u16;
        buf.set_string(area.x + offset, area.y + y, LEFT, style);
        buf.set_string(area.x + area.width - 3 - offset, area.y + y, RIGHT, style);
    }
}

fn render_o(area: Rect, buf: &mut tui::buffer::Buffer, style: Style) {
    if area.width < 3 || area.height < 3 {
        return render_letter(area, buf, "O", style);
    }

    let rx = f32::from(area.width - 1) / 2.0;
    let ry = f32::from(area.height - 1) / 2.0;
    let center_x = f32::from(area.x) + rx;
    let center_y = f32::from(area.y) + ry;

    let steps = 4 * (u32::from(area.width) + u32::from(area.height));
    for step in 0..steps {
        let angle = TAU * step as f32 / steps as f32;
        let (sin, cos) = angle.sin_cos();
        let x = (center_x + rx * cos).round() as u16;
        let y = (center_y + ry * sin).round() as u16;
        if x >= area.left() && x < area.right() && y >= area.top() && y < area.bottom() {
            buf.get_mut(x, y).set_char('@').set_style(style);
        }
    }
}
