//! Kanban board interface.
//!
//! Three columns, one per status. Cards can be picked up and dropped on
//! another column with the keyboard or the mouse, edited in a form dialog or
//! deleted. All changes go through the [`Session`], which writes the board
//! back to its store after each one.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::cmd::truncate;
use crate::db::SnapshotStore;
use crate::fields::{Status, TagColor};
use crate::session::{DragState, Session};
use crate::task::{Task, TaskId};
use crate::tui::colors::{status_color, tag_color, CARD_BG, DARK_RED, GOLD};
use crate::tui::enums::AppState;
use crate::tui::task_form::{FormAction, TaskForm, DESCRIPTION_FIELD, TAG_FIELD, TITLE_FIELD};

/// Rows taken by one card, borders included.
const CARD_HEIGHT: u16 = 5;

pub struct BoardApp<S: SnapshotStore> {
    session: Session<S>,
    state: AppState,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    /// Column the carried card would land in.
    hover_column: Option<usize>,
    add_form: TaskForm,
    edit_form: TaskForm,
    status_message: String,
    column_areas: [Rect; 3],
    card_areas: Vec<(Rect, TaskId)>,
    should_quit: bool,
}

impl<S: SnapshotStore> BoardApp<S> {
    pub fn new(session: Session<S>) -> Self {
        BoardApp {
            session,
            state: AppState::Board,
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            hover_column: None,
            add_form: TaskForm::new(),
            edit_form: TaskForm::new(),
            status_message: String::new(),
            column_areas: [Rect::default(); 3],
            card_areas: Vec::new(),
            should_quit: false,
        }
    }

    pub fn into_session(self) -> Session<S> {
        self.session
    }

    fn column_tasks(&self, column: usize) -> Vec<&Task> {
        Status::from_column(column)
            .map(|status| self.session.board().list_by_status(status))
            .unwrap_or_default()
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.column_tasks(self.selected_column)
            .get(self.selected_card)
            .map(|t| t.id.clone())
    }

    fn is_dragging(&self) -> bool {
        matches!(self.session.drag_state(), DragState::Dragging(_))
    }

    /// Keep the card index inside the selected column.
    fn clamp_selection(&mut self) {
        let len = self.column_tasks(self.selected_column).len();
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    /// Move the cursor onto a task wherever it now lives.
    fn select_task(&mut self, id: &TaskId) {
        if let Some(task) = self.session.board().get(id) {
            let column = task.status.column();
            if let Some(pos) = self.column_tasks(column).iter().position(|t| &t.id == id) {
                self.selected_column = column;
                self.selected_card = pos;
            }
        }
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Dispatch one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }
        match self.state {
            AppState::Board => self.handle_board_key(key),
            AppState::AddTask => self.handle_add_key(key.code),
            AppState::EditTask => self.handle_edit_key(key.code),
            AppState::Help => self.state = AppState::Board,
        }
        self.should_quit
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        // The carry hint stays up until the card is dropped.
        if self.is_dragging() {
            self.handle_drag_key(key.code);
            return;
        }
        self.clear_status_message();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            // Quick move without picking the card up
            KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => self.shift_selected(-1),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => self.shift_selected(1),

            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column < Status::ALL.len() - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.column_tasks(self.selected_column).len();
                if len > 0 && self.selected_card < len - 1 {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('a') => {
                self.add_form.current_field = TITLE_FIELD;
                self.state = AppState::AddTask;
            }
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char(' ') => self.pick_up_selected(),
            KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, code: KeyCode) {
        let hover = self.hover_column.unwrap_or(self.selected_column);
        match code {
            KeyCode::Left | KeyCode::Char('h') if hover > 0 => self.hover_over(hover - 1),
            KeyCode::Right | KeyCode::Char('l') if hover < Status::ALL.len() - 1 => self.hover_over(hover + 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.drop_on(hover),
            KeyCode::Esc | KeyCode::Char('q') => self.abandon_drag(),
            _ => {}
        }
    }

    fn pick_up_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.session.drag_start(&id) {
            self.hover_column = Some(self.selected_column);
            self.set_status_message("Carrying card: ←/→ choose a column, Space to drop, Esc to cancel");
        } else {
            self.set_status_message("Card is being edited");
        }
    }

    fn hover_over(&mut self, column: usize) {
        if let Some(status) = Status::from_column(column) {
            self.session.drag_over(status);
            self.hover_column = Some(column);
        }
    }

    fn drop_on(&mut self, column: usize) {
        let DragState::Dragging(id) = self.session.drag_state().clone() else {
            return;
        };
        self.hover_column = None;
        let Some(status) = Status::from_column(column) else {
            self.session.drag_cancel();
            return;
        };
        if self.session.drop_on(status) {
            self.select_task(&id);
            self.report_save(format!("Moved to {}", status.title()));
        }
    }

    fn abandon_drag(&mut self) {
        self.session.drag_cancel();
        self.hover_column = None;
        self.set_status_message("Drag cancelled");
    }

    fn shift_selected(&mut self, direction: isize) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let Some(target) = self.selected_column.checked_add_signed(direction).and_then(Status::from_column) else {
            return;
        };
        if self.session.move_task(&id, target) {
            self.select_task(&id);
            self.report_save(format!("Moved to {}", target.title()));
        }
    }

    fn open_edit(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.session.start_edit(&id) {
            if let Some(draft) = self.session.draft_mut() {
                self.edit_form = TaskForm::from_draft(draft);
            }
            self.state = AppState::EditTask;
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.session.remove(&id) {
            self.clamp_selection();
            self.report_save(format!("Deleted '{}'", task.title));
        }
    }

    fn handle_add_key(&mut self, code: KeyCode) {
        match self.add_form.handle_key(code) {
            FormAction::Submit => match self.session.add(&self.add_form.to_draft()) {
                Ok(id) => {
                    self.add_form.clear();
                    self.state = AppState::Board;
                    self.select_task(&id);
                    self.report_save("Task added");
                }
                Err(e) => {
                    debug!(error = %e, "add rejected");
                    self.set_status_message(format!("Not added: {e}"));
                }
            },
            // The draft is kept for the next time the form opens.
            FormAction::Cancel => {
                self.state = AppState::Board;
                self.clear_status_message();
            }
            FormAction::None => {}
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match self.edit_form.handle_key(code) {
            FormAction::Submit => {
                if let Some(draft) = self.session.draft_mut() {
                    *draft = self.edit_form.to_draft();
                }
                let id = self.session.editing_id().cloned();
                match self.session.save_edit() {
                    Ok(()) => {
                        self.state = AppState::Board;
                        if let Some(id) = id {
                            self.select_task(&id);
                        }
                        self.report_save("Task updated");
                    }
                    Err(e) => {
                        if self.session.editing_id().is_none() {
                            self.state = AppState::Board;
                            self.clamp_selection();
                        }
                        self.set_status_message(format!("Not saved: {e}"));
                    }
                }
            }
            FormAction::Cancel => {
                self.session.cancel_edit();
                self.state = AppState::Board;
            }
            FormAction::None => {}
        }
    }

    /// Show `msg`, or the write failure if the change did not reach disk.
    fn report_save(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        match self.session.save_error() {
            Some(e) => self.status_message = format!("{msg} (not saved: {e})"),
            None => self.status_message = msg,
        }
    }

    /// Mouse drag: press on a card picks it up, release over a column drops it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Board {
            return;
        }
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .card_areas
                    .iter()
                    .find(|(area, _)| contains(*area, x, y))
                    .map(|(_, id)| id.clone());
                if let Some(id) = hit {
                    self.select_task(&id);
                    self.pick_up_selected();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.is_dragging() => {
                if let Some(column) = self.column_at(x, y) {
                    self.hover_over(column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.is_dragging() => match self.column_at(x, y) {
                Some(column) => self.drop_on(column),
                None => self.abandon_drag(),
            },
            _ => {}
        }
    }

    fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        self.column_areas.iter().position(|area| contains(*area, x, y))
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        match self.state {
            AppState::AddTask => render_form(f, &self.add_form, "Add Task"),
            AppState::EditTask => render_form(f, &self.edit_form, "Edit Task"),
            AppState::Help => render_help(f),
            AppState::Board => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let [todo, doing, done] = self.session.board().counts();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("KANBAN BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} tasks · {todo} to do · {doing} in progress · {done} done", todo + doing + done),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(area);

        self.card_areas.clear();
        for (i, &column_area) in columns.iter().enumerate() {
            self.column_areas[i] = column_area;
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column: usize) {
        let Some(status) = Status::from_column(column) else {
            return;
        };
        let is_selected = column == self.selected_column;
        let is_drop_target = self.hover_column == Some(column);

        let border_style = if is_drop_target {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default().fg(status_color(status)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let tasks: Vec<Task> = self.column_tasks(column).into_iter().cloned().collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::styled(format!(" {} ", status.title()), Style::default().fg(status_color(status))),
                Span::styled(format!("[{}] ", tasks.len()), Style::default().fg(Color::Gray)),
            ]))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if tasks.is_empty() {
            return;
        }

        let visible_cards = usize::from((inner.height / CARD_HEIGHT).max(1));
        let mut offset = self.column_scroll_offsets[column].min(tasks.len() - 1);
        if is_selected {
            if self.selected_card < offset {
                offset = self.selected_card;
            } else if self.selected_card >= offset + visible_cards {
                offset = self.selected_card + 1 - visible_cards;
            }
        }
        self.column_scroll_offsets[column] = offset;

        let dragged = match self.session.drag_state() {
            DragState::Dragging(id) => Some(id.clone()),
            DragState::Idle => None,
        };
        let editing = self.session.editing_id().cloned();

        let mut y = inner.y;
        for (index, task) in tasks.iter().enumerate().skip(offset) {
            if y + CARD_HEIGHT > inner.y + inner.height {
                break;
            }
            let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            let card = CardLook {
                selected: is_selected && index == self.selected_card,
                dragged: dragged.as_ref() == Some(&task.id),
                editing: editing.as_ref() == Some(&task.id),
            };
            render_card(f, card_area, task, card);
            self.card_areas.push((card_area, task.id.clone()));
            y += CARD_HEIGHT;
        }

        let shown = usize::from((y - inner.y) / CARD_HEIGHT);
        let below = tasks.len().saturating_sub(offset + shown);
        if offset > 0 {
            let above = Paragraph::new(format!("▲ +{offset} above")).style(Style::default().fg(Color::Cyan));
            f.render_widget(above, Rect::new(inner.x, inner.y, inner.width, 1));
        }
        if below > 0 && inner.height > 0 {
            let more = Paragraph::new(format!("▼ +{below} below")).style(Style::default().fg(Color::Cyan));
            f.render_widget(more, Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1));
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if let Some(e) = self.session.save_error() {
            let text = if self.status_message.is_empty() {
                format!("Not saved: {e}")
            } else {
                self.status_message.clone()
            };
            (text, Style::default().bg(DARK_RED).fg(Color::White))
        } else if !self.status_message.is_empty() {
            (self.status_message.clone(), Style::default().bg(Color::Blue).fg(Color::White))
        } else {
            let hint = match self.state {
                AppState::Board => "a: Add | e: Edit | x: Delete | Space: Pick up | Shift+←/→: Move | ?: Help | q: Quit",
                AppState::AddTask | AppState::EditTask => "Tab: Next field | Enter: Save | Esc: Cancel",
                AppState::Help => "Press any key to return",
            };
            (hint.to_string(), Style::default().bg(Color::Blue).fg(Color::White))
        };
        f.render_widget(Paragraph::new(text).style(style), area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct CardLook {
    selected: bool,
    dragged: bool,
    editing: bool,
}

fn render_card(f: &mut Frame, area: Rect, task: &Task, look: CardLook) {
    let border = if look.dragged {
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
    } else if look.selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut title = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    if look.dragged {
        title = title.add_modifier(Modifier::ITALIC);
    }

    let width = usize::from(area.width.saturating_sub(2));
    let marker = if look.editing {
        " ✎"
    } else if look.dragged {
        " ⇄"
    } else {
        ""
    };
    let tag_fg = match task.tag_color {
        TagColor::Yellow => Color::Black,
        _ => Color::White,
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(truncate(&task.title, width.saturating_sub(marker.chars().count())), title),
            Span::styled(marker, Style::default().fg(GOLD)),
        ]),
        Line::from(Span::styled(truncate(&task.description, width), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!(" {} ", task.tag),
            Style::default().bg(tag_color(task.tag_color)).fg(tag_fg),
        )),
    ];

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border))
        .style(Style::default().bg(CARD_BG));
    f.render_widget(card, area);
}

fn render_form(f: &mut Frame, form: &TaskForm, title: &str) {
    let area = centered_rect(60, 14, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(GOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Description
            Constraint::Length(3), // Tag
            Constraint::Min(1),    // Instructions
        ])
        .split(inner);

    let fields = [
        (TITLE_FIELD, "Title *", &form.title),
        (DESCRIPTION_FIELD, "Description *", &form.description),
        (TAG_FIELD, "Tag (optional)", &form.tag),
    ];
    for (i, (order, label, input)) in fields.into_iter().enumerate() {
        let focused = form.current_field == order;
        let style = if focused { Style::default().fg(GOLD) } else { Style::default() };
        let widget = Paragraph::new(input.value.as_str())
            .block(Block::default().borders(Borders::ALL).title(label).border_style(style));
        f.render_widget(widget, rows[i]);
        if focused {
            let max_x = rows[i].x + rows[i].width.saturating_sub(2);
            let cursor = u16::try_from(input.cursor).unwrap_or(u16::MAX);
            let x = (rows[i].x + 1).saturating_add(cursor).min(max_x);
            f.set_cursor_position((x, rows[i].y + 1));
        }
    }

    let help = Paragraph::new("Tab/↓: Next field | Shift+Tab/↑: Previous | Enter: Save | Esc: Cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, rows[3]);
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(60, 18, f.area());
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("←/→ h/l      Select column"),
        Line::from("↑/↓ k/j      Select card"),
        Line::from("a            Add a task"),
        Line::from("e / Enter    Edit the selected card"),
        Line::from("x / Delete   Delete the selected card"),
        Line::from("Space        Pick up card, then ←/→ and Space to drop"),
        Line::from("Shift+←/→    Move card one column"),
        Line::from("Mouse        Drag a card onto a column"),
        Line::from("q / Esc      Quit"),
    ];
    let help = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(help, area);
}

/// A `width_pct`-wide, `height`-tall rectangle centred in `area`.
fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let width = u16::try_from(u32::from(area.width) * u32::from(width_pct) / 100).unwrap_or(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn app() -> BoardApp<MemoryStore> {
        BoardApp::new(Session::open(MemoryStore::default()))
    }

    fn press(app: &mut BoardApp<MemoryStore>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut BoardApp<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn draw(app: &mut BoardApp<MemoryStore>) {
        draw_sized(app, 120, 40);
    }

    /// Render and return the screen contents as one string.
    fn draw_sized(app: &mut BoardApp<MemoryStore>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn status_of(app: &BoardApp<MemoryStore>, id: &str) -> Status {
        app.session.board().get(&TaskId::new(id)).unwrap().status
    }

    fn mouse(kind: MouseEventKind, area: Rect) -> MouseEvent {
        MouseEvent {
            kind,
            column: area.x + area.width / 2,
            row: area.y + 1,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keyboard_drag_moves_selected_card() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.is_dragging());
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(status_of(&app, "1"), Status::Done);
        assert!(!app.is_dragging());
        assert_eq!(app.selected_task_id(), Some(TaskId::new("1")));
        assert_eq!(app.selected_column, 2);
    }

    #[test]
    fn escape_abandons_drag_without_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Right);
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(status_of(&app, "1"), Status::Todo);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn add_form_rejects_blank_and_keeps_draft() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Write tests");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::AddTask);
        assert_eq!(app.session.board().len(), 6);
        assert_eq!(app.add_form.title.value, "Write tests");

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "cover core logic");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Board);
        let board = app.session.board();
        assert_eq!(board.len(), 7);
        let added = board.tasks().last().unwrap();
        assert_eq!(added.tag, "General");
        assert_eq!(app.selected_task_id(), Some(added.id.clone()));
        assert_eq!(app.add_form.to_draft().title, "");
    }

    #[test]
    fn edit_dialog_blocks_dragging_that_card() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state, AppState::EditTask);
        assert_eq!(app.edit_form.title.value, "Design System Setup");
        assert!(!app.session.is_draggable(&TaskId::new("1")));

        press(&mut app, KeyCode::End);
        type_str(&mut app, " v2");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Board);
        let task = app.session.board().get(&TaskId::new("1")).unwrap();
        assert_eq!(task.title, "Design System Setup v2");
        assert!(app.session.is_draggable(&task.id));
    }

    #[test]
    fn edit_cancel_leaves_task_alone() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Board);
        assert_eq!(
            app.session.board().get(&TaskId::new("1")).unwrap().title,
            "Design System Setup"
        );
    }

    #[test]
    fn delete_removes_selected_and_clamps() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.session.board().get(&TaskId::new("2")).is_none());
        assert_eq!(app.selected_card, 0);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.session.board().list_by_status(Status::Todo).is_empty());
        assert_eq!(app.selected_task_id(), None);
    }

    #[test]
    fn shift_arrow_moves_one_column() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(status_of(&app, "1"), Status::Inprogress);
        assert_eq!(app.selected_column, 1);
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!app.handle_key(release));
    }

    #[test]
    fn mouse_drag_drops_on_column() {
        let mut app = app();
        draw(&mut app);

        let card = app
            .card_areas
            .iter()
            .find(|(_, id)| id.as_str() == "3")
            .map(|(area, _)| *area)
            .unwrap();
        let done_column = app.column_areas[2];

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), card));
        assert_eq!(app.session.drag_state(), &DragState::Dragging(TaskId::new("3")));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), done_column));
        assert_eq!(app.hover_column, Some(2));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), done_column));

        assert_eq!(status_of(&app, "3"), Status::Done);
        draw(&mut app);
    }

    #[test]
    fn dialogs_fit_very_wide_terminals() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(draw_sized(&mut app, 1200, 40).contains("Add Task"));
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        assert!(draw_sized(&mut app, 1200, 40).contains("Help"));
    }

    #[test]
    fn failed_write_shows_not_saved_in_status_bar() {
        let mut app = BoardApp::new(Session::open(MemoryStore {
            fail_writes: true,
            ..Default::default()
        }));
        press(&mut app, KeyCode::Char('x'));

        let screen = draw_sized(&mut app, 160, 40);
        assert!(screen.contains("Deleted 'Design System Setup' (not saved:"));
        assert!(screen.contains("quota exceeded"));
    }

    #[test]
    fn carry_hint_survives_arrow_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Right);
        assert!(app.status_message.starts_with("Carrying card"));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.status_message, "Moved to In Progress");
    }

    #[test]
    fn renders_all_columns_and_forms() {
        let mut app = app();
        draw(&mut app);
        assert_eq!(app.card_areas.len(), 6);

        press(&mut app, KeyCode::Char('a'));
        draw(&mut app);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        draw(&mut app);
        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.state, AppState::Board);
    }
}
