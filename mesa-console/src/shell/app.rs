//! Shell state and key routing

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

use super::{Command, Completed, ViewEvent};
use crate::engine::{RestaurantField, TABLE_COUNT};
use crate::views::{ConfirmState, ListMode, ReservationsView, RestaurantsView};

/// Top-level navigation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Restaurants,
    Reservations,
}

impl Route {
    pub const ALL: [Self; 2] = [Self::Restaurants, Self::Reservations];

    pub fn title(self) -> &'static str {
        match self {
            Self::Restaurants => "Restaurants",
            Self::Reservations => "Reservations",
        }
    }
}

/// The mounted view; replaced wholesale on navigation
#[derive(Debug)]
pub enum ActiveView {
    Restaurants(RestaurantsView),
    Reservations(ReservationsView),
}

/// Focused control of the booking view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingFocus {
    #[default]
    Restaurant,
    Date,
    Tables,
    List,
}

impl BookingFocus {
    fn next(self) -> Self {
        match self {
            Self::Restaurant => Self::Date,
            Self::Date => Self::Tables,
            Self::Tables => Self::List,
            Self::List => Self::Restaurant,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Restaurant => Self::List,
            Self::Date => Self::Restaurant,
            Self::Tables => Self::Date,
            Self::List => Self::Tables,
        }
    }
}

/// What a text prompt writes to when committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    FilterLetter,
    FilterCity,
    ColumnFilter(RestaurantField),
    EditField(RestaurantField),
    DraftField(RestaurantField),
    BookingDate,
}

impl PromptTarget {
    pub fn title(self) -> String {
        match self {
            Self::FilterLetter => "Initial letter".to_string(),
            Self::FilterCity => "City".to_string(),
            Self::ColumnFilter(field) => format!("Filter by {}", field.label()),
            Self::EditField(field) => format!("Edit {}", field.label()),
            Self::DraftField(field) => format!("New restaurant: {}", field.label()),
            Self::BookingDate => "Date (YYYY-MM-DD)".to_string(),
        }
    }
}

/// Single-line text prompt
pub struct Prompt {
    pub target: PromptTarget,
    pub input: Input,
}

impl Prompt {
    fn new(target: PromptTarget, initial: &str) -> Self {
        Self {
            target,
            input: Input::new(initial.to_string()),
        }
    }
}

pub struct App {
    view: ActiveView,
    /// Bumped on every navigation; results carrying an older value are stale
    generation: u64,
    row: usize,
    column: usize,
    booking_focus: BookingFocus,
    restaurant_choice: Option<usize>,
    table_cursor: i64,
    prompt: Option<Prompt>,
    hint: Option<String>,
    should_quit: bool,
    pub logger_state: TuiWidgetState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            view: ActiveView::Restaurants(RestaurantsView::new()),
            generation: 0,
            row: 0,
            column: 0,
            booking_focus: BookingFocus::default(),
            restaurant_choice: None,
            table_cursor: 1,
            prompt: None,
            hint: None,
            should_quit: false,
            logger_state: TuiWidgetState::new(),
        }
    }

    // ========== Accessors ==========

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn route(&self) -> Route {
        match self.view {
            ActiveView::Restaurants(_) => Route::Restaurants,
            ActiveView::Reservations(_) => Route::Reservations,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> RestaurantField {
        RestaurantField::EDITABLE[self.column.min(RestaurantField::EDITABLE.len() - 1)]
    }

    pub fn booking_focus(&self) -> BookingFocus {
        self.booking_focus
    }

    pub fn restaurant_choice(&self) -> Option<usize> {
        self.restaurant_choice
    }

    pub fn table_cursor(&self) -> i64 {
        self.table_cursor
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn confirm(&self) -> ConfirmState {
        match &self.view {
            ActiveView::Restaurants(v) => v.confirm(),
            ActiveView::Reservations(v) => v.confirm(),
        }
    }

    // ========== Navigation ==========

    /// Mount a fresh view for `route`, discarding the current one
    pub fn navigate(&mut self, route: Route) -> Option<Command> {
        if route == self.route() {
            return None;
        }
        self.generation += 1;
        self.row = 0;
        self.column = 0;
        self.booking_focus = BookingFocus::default();
        self.restaurant_choice = None;
        self.table_cursor = 1;
        self.prompt = None;
        self.hint = None;
        tracing::debug!(route = route.title(), generation = self.generation, "mounting view");

        match route {
            Route::Restaurants => {
                self.view = ActiveView::Restaurants(RestaurantsView::new());
                None
            }
            Route::Reservations => {
                let mut view = ReservationsView::new();
                let cmd = view.mount();
                self.view = ActiveView::Reservations(view);
                Some(cmd.into())
            }
        }
    }

    // ========== Results ==========

    /// Fold a finished command into the mounted view
    pub fn handle_completed(&mut self, completed: Completed) -> Option<Command> {
        if completed.generation != self.generation {
            tracing::debug!(
                generation = completed.generation,
                current = self.generation,
                "dropping result for an unmounted view"
            );
            return None;
        }
        let next = match (&mut self.view, completed.event) {
            (ActiveView::Restaurants(view), ViewEvent::Restaurants(event)) => {
                view.handle(event).map(Into::into)
            }
            (ActiveView::Reservations(view), ViewEvent::Reservations(event)) => {
                view.handle(event).map(Into::into)
            }
            _ => None,
        };
        self.clamp_cursors();
        next
    }

    fn list_len(&self) -> usize {
        match &self.view {
            ActiveView::Restaurants(v) => v.visible_rows().len(),
            ActiveView::Reservations(v) => v.reservations().len(),
        }
    }

    fn clamp_cursors(&mut self) {
        let len = self.list_len();
        self.row = self.row.min(len.saturating_sub(1));
        if let ActiveView::Reservations(view) = &self.view {
            if view.form().restaurant_id.is_none() {
                self.restaurant_choice = None;
            }
        }
    }

    // ========== Keys ==========

    /// Route one key press; returns a command for the runtime to execute
    pub fn handle_key(&mut self, key: KeyEvent, today: NaiveDate) -> Option<Command> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }
        if self.prompt.is_some() {
            self.prompt_key(key, today);
            return None;
        }
        if self.confirm().is_open() {
            return self.confirm_key(key.code);
        }

        match key.code {
            KeyCode::F(1) => return self.navigate(Route::Restaurants),
            KeyCode::F(2) => return self.navigate(Route::Reservations),
            KeyCode::Char('q') => {
                self.should_quit = true;
                return None;
            }
            KeyCode::PageUp => {
                self.logger_state.transition(TuiWidgetEvent::PrevPageKey);
                return None;
            }
            KeyCode::PageDown => {
                self.logger_state.transition(TuiWidgetEvent::NextPageKey);
                return None;
            }
            _ => {}
        }

        self.hint = None;
        let cmd = match self.route() {
            Route::Restaurants => self.restaurant_key(key.code),
            Route::Reservations => self.booking_key(key.code),
        };
        self.clamp_cursors();
        cmd
    }

    fn prompt_key(&mut self, key: KeyEvent, today: NaiveDate) {
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.commit_prompt(prompt.target, prompt.input.value(), today);
                }
            }
            _ => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    fn commit_prompt(&mut self, target: PromptTarget, value: &str, today: NaiveDate) {
        match (&mut self.view, target) {
            (ActiveView::Restaurants(view), PromptTarget::FilterLetter) => {
                view.set_filter_letter(value)
            }
            (ActiveView::Restaurants(view), PromptTarget::FilterCity) => view.set_filter_city(value),
            (ActiveView::Restaurants(view), PromptTarget::ColumnFilter(field)) => {
                view.set_column_filter(field, value);
                self.row = 0;
            }
            (ActiveView::Restaurants(view), PromptTarget::EditField(field)) => {
                view.edit_field(field, value)
            }
            (ActiveView::Restaurants(view), PromptTarget::DraftField(field)) => {
                view.set_draft_field(field, value)
            }
            (ActiveView::Reservations(view), PromptTarget::BookingDate) => {
                if let Err(e) = view.set_date(value, today) {
                    self.hint = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    fn confirm_key(&mut self, code: KeyCode) -> Option<Command> {
        let confirm = matches!(code, KeyCode::Char('y') | KeyCode::Enter);
        let cancel = matches!(code, KeyCode::Char('n') | KeyCode::Esc);
        match &mut self.view {
            ActiveView::Restaurants(view) if confirm => view.confirm_delete().map(Into::into),
            ActiveView::Restaurants(view) if cancel => {
                view.cancel_delete();
                None
            }
            ActiveView::Reservations(view) if confirm => view.confirm_delete().map(Into::into),
            ActiveView::Reservations(view) if cancel => {
                view.cancel_delete();
                None
            }
            _ => None,
        }
    }

    fn restaurant_key(&mut self, code: KeyCode) -> Option<Command> {
        let field = self.column();
        let ActiveView::Restaurants(view) = &mut self.view else {
            return None;
        };
        let selected = view.visible_rows().get(self.row).map(|r| r.id);

        match code {
            KeyCode::Char('a') => {
                self.row = 0;
                return Some(view.list_all().into());
            }
            KeyCode::Char('f') => {
                view.show_filter();
                self.row = 0;
            }
            KeyCode::Char('l') if view.mode() == ListMode::Filter => {
                self.prompt = Some(Prompt::new(
                    PromptTarget::FilterLetter,
                    &view.filter_form().letter,
                ));
            }
            KeyCode::Char('t') if view.mode() == ListMode::Filter => {
                self.prompt = Some(Prompt::new(PromptTarget::FilterCity, &view.filter_form().city));
            }
            KeyCode::Char('s') => {
                self.row = 0;
                return view.search().map(Into::into);
            }
            KeyCode::Up => self.row = self.row.saturating_sub(1),
            KeyCode::Down => self.row += 1,
            KeyCode::Left => self.column = self.column.saturating_sub(1),
            KeyCode::Right => {
                self.column = (self.column + 1).min(RestaurantField::EDITABLE.len() - 1)
            }
            KeyCode::Char('/') => {
                if view.is_table_visible() && field.is_filterable() {
                    self.prompt = Some(Prompt::new(
                        PromptTarget::ColumnFilter(field),
                        view.column_filters().get(field),
                    ));
                } else {
                    self.hint = Some(format!("{} cannot be filtered", field.label()));
                }
            }
            KeyCode::Char('e') => match selected {
                Some(id) => {
                    view.begin_edit(id);
                }
                None => self.hint = Some("No row selected".to_string()),
            },
            KeyCode::Enter => {
                if let Some(buffer) = view.editing() {
                    self.prompt = Some(Prompt::new(
                        PromptTarget::EditField(field),
                        buffer.fields.get(field),
                    ));
                } else if view.creation_row_visible() {
                    self.prompt = Some(Prompt::new(
                        PromptTarget::DraftField(field),
                        view.draft().get(field),
                    ));
                }
            }
            KeyCode::Char('w') => return view.save_edit().map(Into::into),
            KeyCode::Esc => view.cancel_edit(),
            KeyCode::Char('d') => {
                if let Some(id) = selected {
                    view.request_delete(id);
                }
            }
            KeyCode::Char('c') => {
                let cmd = view.create();
                if cmd.is_none() && view.creation_row_visible() {
                    self.hint = Some("Name, description, address and city are required".to_string());
                }
                return cmd.map(Into::into);
            }
            KeyCode::Char('x') => view.dismiss_banner(),
            _ => {}
        }
        None
    }

    fn booking_key(&mut self, code: KeyCode) -> Option<Command> {
        let ActiveView::Reservations(view) = &mut self.view else {
            return None;
        };

        match code {
            KeyCode::Tab => self.booking_focus = self.booking_focus.next(),
            KeyCode::BackTab => self.booking_focus = self.booking_focus.prev(),
            KeyCode::Char('s') => {
                let cmd = view.submit();
                if cmd.is_none() && !view.is_submitting() {
                    self.hint = Some(if view.no_tables_available() {
                        "No tables available for this restaurant on this date".to_string()
                    } else {
                        "Choose a restaurant, a date and a free table".to_string()
                    });
                }
                return cmd.map(Into::into);
            }
            KeyCode::Char('x') => view.dismiss_banner(),
            KeyCode::Char('r') => return Some(view.reload().into()),
            _ => match self.booking_focus {
                BookingFocus::Restaurant => {
                    let len = view.restaurants().len();
                    let choice = match (code, self.restaurant_choice) {
                        _ if len == 0 => None,
                        (KeyCode::Right | KeyCode::Down, None) => Some(0),
                        (KeyCode::Right | KeyCode::Down, Some(i)) => Some((i + 1) % len),
                        (KeyCode::Left | KeyCode::Up, None | Some(0)) => Some(len - 1),
                        (KeyCode::Left | KeyCode::Up, Some(i)) => Some(i - 1),
                        (KeyCode::Backspace | KeyCode::Delete, _) => {
                            self.restaurant_choice = None;
                            view.select_restaurant(None);
                            return None;
                        }
                        _ => return None,
                    };
                    self.restaurant_choice = choice;
                    let id = choice.and_then(|i| view.restaurants().get(i)).map(|r| r.id);
                    view.select_restaurant(id);
                }
                BookingFocus::Date => {
                    if code == KeyCode::Enter {
                        let current = view.form().date.clone().unwrap_or_default();
                        self.prompt = Some(Prompt::new(PromptTarget::BookingDate, &current));
                    }
                }
                BookingFocus::Tables => match code {
                    KeyCode::Left => self.table_cursor = (self.table_cursor - 1).max(1),
                    KeyCode::Right => self.table_cursor = (self.table_cursor + 1).min(TABLE_COUNT),
                    KeyCode::Enter => {
                        if let Err(e) = view.select_table(self.table_cursor) {
                            self.hint = Some(e.to_string());
                        }
                    }
                    _ => {}
                },
                BookingFocus::List => match code {
                    KeyCode::Up => self.row = self.row.saturating_sub(1),
                    KeyCode::Down => self.row += 1,
                    KeyCode::Char('d') => {
                        if let Some(r) = view.reservations().get(self.row) {
                            view.request_delete(r.id);
                        }
                    }
                    _ => {}
                },
            },
        }
        None
    }
}
