// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use stockpile_app::{
    InventoryBackend, InventoryEvent, InventoryView, Item, ItemField, Outcome, Request,
};
use tracing::{debug, warn};

const LOOKUP_WIDTH: u16 = 24;

/// Which input receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(ItemField),
    Lookup,
    Table,
}

impl Focus {
    const ORDER: [Self; 7] = [
        Self::Field(ItemField::Id),
        Self::Field(ItemField::Name),
        Self::Field(ItemField::Category),
        Self::Field(ItemField::Stock),
        Self::Field(ItemField::Price),
        Self::Lookup,
        Self::Table,
    ];

    fn rotate(self, delta: isize) -> Self {
        let current = Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0) as isize;
        let len = Self::ORDER.len() as isize;
        Self::ORDER[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub focus: Focus,
    pub selected_row: usize,
    /// A request is out on the worker; keys that would send another are
    /// ignored until its outcome is applied.
    pub in_flight: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Field(ItemField::Id),
            selected_row: 0,
            in_flight: false,
        }
    }
}

/// Runs backend requests one at a time on a background thread so the
/// render loop never waits on the network.
pub struct Worker {
    requests: Sender<Request>,
    outcomes: Receiver<Outcome>,
}

impl Worker {
    pub fn spawn<B>(mut backend: B) -> Result<Self>
    where
        B: InventoryBackend + Send + 'static,
    {
        let (requests, request_rx) = mpsc::channel::<Request>();
        let (outcome_tx, outcomes) = mpsc::channel();
        thread::Builder::new()
            .name("inventory-worker".to_owned())
            .spawn(move || {
                for request in request_rx {
                    debug!(?request, "running inventory request");
                    if outcome_tx.send(request.execute(&mut backend)).is_err() {
                        break;
                    }
                }
            })
            .context("spawn inventory worker")?;
        Ok(Self { requests, outcomes })
    }

    fn send(&self, request: Request) -> std::result::Result<(), Request> {
        self.requests.send(request).map_err(|error| error.0)
    }
}

pub fn run_app<B>(view: &mut InventoryView, backend: B) -> Result<()>
where
    B: InventoryBackend + Send + 'static,
{
    let worker = Worker::spawn(backend)?;

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term).context("create terminal")?;

    let mut ui = UiState::default();
    let events = send_request(view, &worker, &mut ui, Request::List);
    apply_events(view, &mut ui, &events);

    let mut result = Ok(());
    loop {
        process_outcomes(view, &mut ui, &worker);

        if let Err(error) = terminal.draw(|frame| render(frame, view, &ui)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event
            && let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(view, &worker, &mut ui, key)
        {
            break;
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Applies every outcome the worker has finished since the last frame.
pub fn process_outcomes(view: &mut InventoryView, ui: &mut UiState, worker: &Worker) {
    while let Ok(outcome) = worker.outcomes.try_recv() {
        apply_outcome(view, ui, outcome);
    }
}

fn apply_outcome(view: &mut InventoryView, ui: &mut UiState, outcome: Outcome) {
    ui.in_flight = false;
    let events = view.apply(outcome);
    apply_events(view, ui, &events);
}

fn send_request(
    view: &mut InventoryView,
    worker: &Worker,
    ui: &mut UiState,
    request: Request,
) -> Vec<InventoryEvent> {
    match worker.send(request) {
        Ok(()) => {
            ui.in_flight = true;
            Vec::new()
        }
        Err(request) => {
            warn!(?request, "inventory worker is gone");
            view.apply(request.fail(anyhow!("inventory worker stopped")))
        }
    }
}

/// Returns `true` when the app should exit.
pub fn handle_key_event(
    view: &mut InventoryView,
    worker: &Worker,
    ui: &mut UiState,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("quit requested");
        return true;
    }

    let events = match key.code {
        KeyCode::Tab => {
            ui.focus = ui.focus.rotate(1);
            Vec::new()
        }
        KeyCode::BackTab => {
            ui.focus = ui.focus.rotate(-1);
            Vec::new()
        }
        KeyCode::Esc if view.edit_mode() => view.cancel_edit(),
        KeyCode::Esc => view.clear_status(),
        _ => match ui.focus {
            Focus::Field(field) => handle_field_key(view, worker, ui, field, key),
            Focus::Lookup => handle_lookup_key(view, worker, ui, key),
            Focus::Table => handle_table_key(view, worker, ui, key),
        },
    };

    apply_events(view, ui, &events);
    false
}

fn handle_field_key(
    view: &mut InventoryView,
    worker: &Worker,
    ui: &mut UiState,
    field: ItemField,
    key: KeyEvent,
) -> Vec<InventoryEvent> {
    match key.code {
        KeyCode::Enter if ui.in_flight => Vec::new(),
        KeyCode::Enter => match view.prepare_submit() {
            Ok(request) => send_request(view, worker, ui, request),
            Err(events) => events,
        },
        KeyCode::Backspace => {
            let mut value = view.form().get(field).to_owned();
            value.pop();
            view.on_field_change(field, value)
        }
        KeyCode::Char(ch) => {
            let mut value = view.form().get(field).to_owned();
            value.push(ch);
            view.on_field_change(field, value)
        }
        _ => Vec::new(),
    }
}

fn handle_lookup_key(
    view: &mut InventoryView,
    worker: &Worker,
    ui: &mut UiState,
    key: KeyEvent,
) -> Vec<InventoryEvent> {
    match key.code {
        KeyCode::Enter if ui.in_flight => Vec::new(),
        KeyCode::Enter => match view.prepare_lookup() {
            Ok(request) => send_request(view, worker, ui, request),
            Err(events) => events,
        },
        KeyCode::Backspace => {
            let mut value = view.lookup_input().to_owned();
            value.pop();
            view.set_lookup_input(value)
        }
        KeyCode::Char(ch) => {
            let mut value = view.lookup_input().to_owned();
            value.push(ch);
            view.set_lookup_input(value)
        }
        _ => Vec::new(),
    }
}

fn handle_table_key(
    view: &mut InventoryView,
    worker: &Worker,
    ui: &mut UiState,
    key: KeyEvent,
) -> Vec<InventoryEvent> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if ui.selected_row + 1 < view.items().len() {
                ui.selected_row += 1;
            }
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            ui.selected_row = ui.selected_row.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Char('e') => match view.items().get(ui.selected_row).cloned() {
            Some(item) => {
                ui.focus = Focus::Field(ItemField::Name);
                view.begin_edit(&item)
            }
            None => Vec::new(),
        },
        KeyCode::Char('r' | 'd') if ui.in_flight => Vec::new(),
        KeyCode::Char('r') => send_request(view, worker, ui, Request::List),
        KeyCode::Char('d') => match view.items().get(ui.selected_row).map(|item| item.id) {
            Some(id) => send_request(view, worker, ui, Request::Delete(id)),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn apply_events(view: &InventoryView, ui: &mut UiState, events: &[InventoryEvent]) {
    for event in events {
        if let InventoryEvent::ListReplaced(count) = event {
            ui.selected_row = ui.selected_row.min(count.saturating_sub(1));
        }
    }
    if view.items().is_empty() {
        ui.selected_row = 0;
    }
}

pub fn render(frame: &mut ratatui::Frame<'_>, view: &InventoryView, ui: &UiState) {
    let banner_height = if view.status().is_some() { 3 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    if let Some(status) = view.status() {
        let color = if status.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        let banner = Paragraph::new(status.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, layout[0]);
    }

    render_form(frame, layout[1], view, ui);
    render_lookup(frame, layout[2], view, ui);
    render_table(frame, layout[3], view, ui);

    let hints = Paragraph::new(hint_text(view, ui)).style(Style::default().fg(Color::Yellow));
    frame.render_widget(hints, layout[4]);
}

fn render_form(frame: &mut ratatui::Frame<'_>, area: Rect, view: &InventoryView, ui: &UiState) {
    let block = Block::default()
        .title(view.mode().title())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, ItemField::ALL.len() as u32); 5])
        .split(inner);

    for (field, column) in ItemField::ALL.into_iter().zip(columns.iter()) {
        let focused = ui.focus == Focus::Field(field);
        let input = Paragraph::new(input_text(view.form().get(field), focused)).block(
            Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(focus_style(focused)),
        );
        frame.render_widget(input, *column);
    }
}

fn render_lookup(frame: &mut ratatui::Frame<'_>, area: Rect, view: &InventoryView, ui: &UiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LOOKUP_WIDTH), Constraint::Min(10)])
        .split(area);

    let focused = ui.focus == Focus::Lookup;
    let input = Paragraph::new(input_text(view.lookup_input(), focused)).block(
        Block::default()
            .title("Get Item By ID")
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    );
    frame.render_widget(input, columns[0]);

    let result = Paragraph::new(lookup_text(view.lookup()))
        .block(Block::default().title("Fetched Item").borders(Borders::ALL));
    frame.render_widget(result, columns[1]);
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, view: &InventoryView, ui: &UiState) {
    let focused = ui.focus == Focus::Table;
    let block = Block::default()
        .title("All Inventory Items")
        .borders(Borders::ALL)
        .border_style(focus_style(focused));

    if view.items().is_empty() {
        frame.render_widget(Paragraph::new("No items found.").block(block), area);
        return;
    }

    let header = Row::new(ItemField::ALL.map(|field| {
        Cell::from(field.as_str()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = view.items().iter().enumerate().map(|(index, item)| {
        let style = if focused && index == ui.selected_row {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if index == ui.selected_row {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(table_cells(item)).style(style)
    });

    let table = Table::new(rows, [Constraint::Min(8); 5])
        .header(header)
        .block(block);
    frame.render_widget(table, area);
}

fn table_cells(item: &Item) -> Vec<String> {
    ItemField::ALL
        .into_iter()
        .map(|field| field.display_value(item))
        .collect()
}

fn lookup_text(item: Option<&Item>) -> String {
    item.and_then(|item| serde_json::to_string_pretty(item).ok())
        .unwrap_or_default()
}

fn input_text(value: &str, focused: bool) -> String {
    if focused {
        format!("{value}_")
    } else {
        value.to_owned()
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn hint_text(view: &InventoryView, ui: &UiState) -> String {
    let context = match ui.focus {
        Focus::Field(_) if view.edit_mode() => "enter update | esc cancel",
        Focus::Field(_) => "enter add",
        Focus::Lookup => "enter fetch",
        Focus::Table => "j/k move | e edit | d delete | r refresh",
    };
    if ui.in_flight {
        format!("working... | {context} | tab/shift+tab focus | ctrl+q quit")
    } else {
        format!("{context} | tab/shift+tab focus | ctrl+q quit")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Focus, UiState, Worker, apply_outcome, handle_key_event, hint_text, lookup_text,
        process_outcomes, render,
    };
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;
    use std::sync::mpsc::{self, Receiver};
    use std::time::{Duration, Instant};
    use stockpile_app::{InventoryBackend, InventoryView, Item, ItemField, ItemId, MSG_ADD_FAILED};
    use stockpile_testkit::{Call, FakeInventory, SharedInventory, bolt, sample_items};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_q() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)
    }

    fn press(view: &mut InventoryView, worker: &Worker, ui: &mut UiState, code: KeyCode) -> bool {
        handle_key_event(view, worker, ui, key(code))
    }

    fn type_text(view: &mut InventoryView, worker: &Worker, ui: &mut UiState, text: &str) {
        for ch in text.chars() {
            press(view, worker, ui, KeyCode::Char(ch));
        }
    }

    /// Waits for the outstanding request, as the render loop would over
    /// several frames.
    fn settle(view: &mut InventoryView, ui: &mut UiState, worker: &Worker) {
        while ui.in_flight {
            let outcome = worker
                .outcomes
                .recv_timeout(Duration::from_secs(5))
                .expect("worker should answer");
            apply_outcome(view, ui, outcome);
        }
    }

    fn spawn(fake: FakeInventory) -> (SharedInventory, Worker) {
        let shared = SharedInventory::new(fake);
        let worker = Worker::spawn(shared.clone()).expect("worker should spawn");
        (shared, worker)
    }

    fn buffer_text(buffer: &Buffer) -> String {
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

    fn draw_buffer(view: &InventoryView, ui: &UiState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, view, ui))
            .expect("draw should succeed");
        terminal.backend().buffer().clone()
    }

    fn draw(view: &InventoryView, ui: &UiState) -> String {
        buffer_text(&draw_buffer(view, ui))
    }

    /// Holds every lookup until the test releases it.
    struct GatedLookup {
        inner: SharedInventory,
        gate: Receiver<()>,
    }

    impl InventoryBackend for GatedLookup {
        fn list_items(&mut self) -> Result<Vec<Item>> {
            self.inner.list_items()
        }

        fn get_item(&mut self, id: ItemId) -> Result<Item> {
            let _ = self.gate.recv();
            self.inner.get_item(id)
        }

        fn add_item(&mut self, item: &Item) -> Result<()> {
            self.inner.add_item(item)
        }

        fn update_item(&mut self, item: &Item) -> Result<()> {
            self.inner.update_item(item)
        }

        fn delete_item(&mut self, id: ItemId) -> Result<String> {
            self.inner.delete_item(id)
        }
    }

    #[test]
    fn focus_rotation_wraps_both_ways() {
        assert_eq!(Focus::Table.rotate(1), Focus::Field(ItemField::Id));
        assert_eq!(Focus::Field(ItemField::Id).rotate(-1), Focus::Table);
        assert_eq!(Focus::Field(ItemField::Price).rotate(1), Focus::Lookup);
    }

    #[test]
    fn typing_and_enter_adds_an_item() {
        let (shared, worker) = spawn(FakeInventory::new());
        let mut view = InventoryView::new();
        let mut ui = UiState::default();

        for value in ["7", "Clamp", "Tools", "3", "4.5"] {
            type_text(&mut view, &worker, &mut ui, value);
            press(&mut view, &worker, &mut ui, KeyCode::Tab);
        }
        assert_eq!(ui.focus, Focus::Lookup);

        ui.focus = Focus::Field(ItemField::Price);
        press(&mut view, &worker, &mut ui, KeyCode::Backspace);
        type_text(&mut view, &worker, &mut ui, "5");
        press(&mut view, &worker, &mut ui, KeyCode::Enter);
        assert!(ui.in_flight);
        settle(&mut view, &mut ui, &worker);

        assert_eq!(shared.lock().items().len(), 1);
        assert_eq!(shared.lock().items()[0].price, 4.5);
        assert!(view.form().is_empty());
        assert_eq!(view.items().len(), 1);
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some("Item added successfully.")
        );
    }

    #[test]
    fn invalid_form_is_rejected_without_a_request() {
        let (shared, worker) = spawn(FakeInventory::new());
        let mut view = InventoryView::new();
        let mut ui = UiState::default();

        type_text(&mut view, &worker, &mut ui, "7");
        press(&mut view, &worker, &mut ui, KeyCode::Enter);

        assert!(!ui.in_flight);
        assert!(shared.lock().calls().is_empty());
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some("Please fill out the name field.")
        );
    }

    #[test]
    fn table_keys_edit_and_delete_selected_row() {
        let (shared, worker) = spawn(FakeInventory::with_items(sample_items(3)));
        let mut view = InventoryView::new();
        let mut ui = UiState {
            focus: Focus::Table,
            ..UiState::default()
        };
        press(&mut view, &worker, &mut ui, KeyCode::Char('r'));
        settle(&mut view, &mut ui, &worker);

        press(&mut view, &worker, &mut ui, KeyCode::Char('j'));
        press(&mut view, &worker, &mut ui, KeyCode::Char('j'));
        press(&mut view, &worker, &mut ui, KeyCode::Char('j'));
        assert_eq!(ui.selected_row, 2);

        press(&mut view, &worker, &mut ui, KeyCode::Char('d'));
        settle(&mut view, &mut ui, &worker);
        assert_eq!(view.items().len(), 2);
        assert_eq!(ui.selected_row, 1);
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some("Item with ID 3 deleted")
        );
        assert_eq!(
            shared.lock().calls(),
            &[Call::List, Call::Delete(ItemId::new(3)), Call::List]
        );

        press(&mut view, &worker, &mut ui, KeyCode::Char('e'));
        assert!(view.edit_mode());
        assert_eq!(view.form().id, "2");
        assert_eq!(ui.focus, Focus::Field(ItemField::Name));

        press(&mut view, &worker, &mut ui, KeyCode::Esc);
        assert!(!view.edit_mode());
        assert!(view.form().is_empty());
    }

    #[test]
    fn lookup_enter_fetches_typed_id() {
        let (shared, worker) = spawn(FakeInventory::with_items(vec![bolt()]));
        let mut view = InventoryView::new();
        let mut ui = UiState {
            focus: Focus::Lookup,
            ..UiState::default()
        };

        type_text(&mut view, &worker, &mut ui, "1");
        press(&mut view, &worker, &mut ui, KeyCode::Enter);
        settle(&mut view, &mut ui, &worker);
        assert_eq!(shared.lock().calls(), &[Call::Get(ItemId::new(1))]);
        assert_eq!(view.lookup(), Some(&bolt()));
    }

    #[test]
    fn loop_stays_responsive_while_a_request_is_pending() {
        let shared = SharedInventory::new(FakeInventory::with_items(vec![bolt()]));
        let (release, gate) = mpsc::channel();
        let worker = Worker::spawn(GatedLookup {
            inner: shared.clone(),
            gate,
        })
        .expect("worker should spawn");
        let mut view = InventoryView::new();
        let mut ui = UiState {
            focus: Focus::Lookup,
            ..UiState::default()
        };
        type_text(&mut view, &worker, &mut ui, "1");

        let started = Instant::now();
        assert!(!press(&mut view, &worker, &mut ui, KeyCode::Enter));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(ui.in_flight);

        // A second Enter while the first lookup is out sends nothing.
        press(&mut view, &worker, &mut ui, KeyCode::Enter);
        process_outcomes(&mut view, &mut ui, &worker);
        assert!(ui.in_flight);
        assert!(draw(&view, &ui).contains("working..."));
        assert!(handle_key_event(&mut view, &worker, &mut ui, ctrl_q()));

        release.send(()).expect("worker should be waiting");
        settle(&mut view, &mut ui, &worker);
        assert_eq!(view.lookup(), Some(&bolt()));
        assert_eq!(shared.lock().calls(), &[Call::Get(ItemId::new(1))]);
        assert!(!draw(&view, &ui).contains("working..."));
    }

    #[test]
    fn ctrl_q_quits_without_touching_state() {
        let (_, worker) = spawn(FakeInventory::new());
        let mut view = InventoryView::new();
        let mut ui = UiState::default();
        assert!(handle_key_event(&mut view, &worker, &mut ui, ctrl_q()));
        assert!(view.form().is_empty());
    }

    #[test]
    fn render_shows_empty_table_placeholder_and_add_title() {
        let view = InventoryView::new();
        let screen = draw(&view, &UiState::default());
        assert!(screen.contains("Add Item"));
        assert!(screen.contains("No items found."));
        assert!(screen.contains("Get Item By ID"));
    }

    #[test]
    fn render_shows_rows_banner_and_edit_title() {
        let mut backend = FakeInventory::with_items(vec![bolt()]);
        let mut view = InventoryView::new();
        view.mount(&mut backend);
        view.fetch_by_id(&mut backend, ItemId::new(1));
        view.begin_edit(&bolt());

        let screen = draw(&view, &UiState::default());
        assert!(screen.contains("Edit Item"));
        assert!(screen.contains("Editing item with ID 1"));
        assert!(screen.contains("Hardware"));
        assert!(screen.contains("\"name\": \"Bolt\""));
    }

    #[test]
    fn banner_is_red_for_errors_and_green_otherwise() {
        let mut backend = FakeInventory::new();
        let mut view = InventoryView::new();
        backend.failures.add = true;
        for (field, value) in [
            (ItemField::Id, "1"),
            (ItemField::Name, "Bolt"),
            (ItemField::Category, "Hardware"),
            (ItemField::Stock, "100"),
            (ItemField::Price, "0.5"),
        ] {
            view.on_field_change(field, value);
        }
        view.submit(&mut backend);
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some(MSG_ADD_FAILED)
        );

        let buffer = draw_buffer(&view, &UiState::default());
        assert_eq!(buffer[(1, 1)].symbol(), "E");
        assert_eq!(buffer[(1, 1)].fg, Color::Red);

        backend.failures.add = false;
        view.submit(&mut backend);
        let buffer = draw_buffer(&view, &UiState::default());
        assert_eq!(buffer[(1, 1)].symbol(), "I");
        assert_eq!(buffer[(1, 1)].fg, Color::Green);
    }

    #[test]
    fn lookup_text_is_pretty_json_or_blank() {
        assert!(lookup_text(None).is_empty());
        let text = lookup_text(Some(&bolt()));
        assert!(text.starts_with("{\n"));
        assert!(text.contains("\"price\": 0.5"));
    }

    #[test]
    fn hints_follow_focus_and_mode() {
        let mut view = InventoryView::new();
        let ui = UiState::default();
        assert!(hint_text(&view, &ui).contains("enter add"));
        view.begin_edit(&bolt());
        assert!(hint_text(&view, &ui).contains("esc cancel"));
        let table = UiState {
            focus: Focus::Table,
            ..UiState::default()
        };
        assert!(hint_text(&view, &table).contains("d delete"));
        let busy = UiState {
            in_flight: true,
            ..table
        };
        assert!(hint_text(&view, &busy).starts_with("working..."));
    }
}
