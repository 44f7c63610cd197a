//! Rendering
//!
//! Pure function of [`App`] state; nothing here mutates a view.

use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use super::app::{ActiveView, App, BookingFocus, Route};
use crate::engine::{RestaurantField, TableState as SlotState};
use crate::views::{ListMode, ReservationsView, RestaurantsView};

const KEYS_RESTAURANTS: &str = "a all · f filter · l/t letter/city · s search · ←→ column · / column filter · e edit · Enter field · w save · Esc cancel · d delete · c create · x dismiss · F2 reservations · q quit";
const KEYS_RESERVATIONS: &str = "Tab focus · ←→ choose · Enter set · s book · d delete · r reload · x dismiss · F1 restaurants · q quit";

pub fn ui(f: &mut Frame, app: &App) {
    let banner = match app.view() {
        ActiveView::Restaurants(v) => v.banner(),
        ActiveView::Reservations(v) => v.banner(),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                   // Tabs
            Constraint::Length(if banner.is_some() { 3 } else { 0 }), // Banner
            Constraint::Min(1),                                      // View + Logs
            Constraint::Length(3),                                   // Prompt
            Constraint::Length(1),                                   // Footer
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[2]);

    render_tabs(f, app, chunks[0]);

    if let Some(message) = banner {
        let text = Paragraph::new(Line::from(vec![
            Span::styled(message, Style::default().fg(Color::White)),
            Span::styled("  [x] dismiss", Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
        f.render_widget(text, chunks[1]);
    }

    match app.view() {
        ActiveView::Restaurants(view) => render_restaurants(f, app, view, main_chunks[0]),
        ActiveView::Reservations(view) => render_reservations(f, app, view, main_chunks[0]),
    }

    render_logs(f, app, main_chunks[1]);
    render_prompt(f, app, chunks[3]);

    let footer = match (app.hint(), app.route()) {
        (Some(hint), _) => Paragraph::new(hint).style(Style::default().fg(Color::Yellow)),
        (None, Route::Restaurants) => {
            Paragraph::new(KEYS_RESTAURANTS).style(Style::default().fg(Color::DarkGray))
        }
        (None, Route::Reservations) => {
            Paragraph::new(KEYS_RESERVATIONS).style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(footer, chunks[4]);

    if let Some(id) = app.confirm().target() {
        render_confirm(f, app.route(), id);
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| Line::from(format!(" F{} {} ", i + 1, r.title())))
        .collect();
    let selected = Route::ALL.iter().position(|r| *r == app.route()).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Mesa "),
        );
    f.render_widget(tabs, area);
}

fn render_restaurants(f: &mut Frame, app: &App, view: &RestaurantsView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let controls = match view.mode() {
        ListMode::Idle => Line::from(Span::styled(
            "[a] show all restaurants   [f] filter by letter and city",
            Style::default().fg(Color::Gray),
        )),
        ListMode::All => Line::from(vec![
            Span::styled("All restaurants", Style::default().fg(Color::Green)),
            Span::raw(if view.is_loading() { "  Loading…" } else { "" }),
        ]),
        ListMode::Filter => {
            let form = view.filter_form();
            let search = if view.is_loading() { "Searching…" } else { "[s] Search" };
            Line::from(vec![
                Span::raw("Letter: "),
                Span::styled(format!("[{}]", form.letter), Style::default().fg(Color::Yellow)),
                Span::raw("  City: "),
                Span::styled(format!("[{}]", form.city), Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(
                    search,
                    if view.can_search() {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    },
                ),
            ])
        }
    };
    f.render_widget(
        Paragraph::new(controls).block(Block::default().borders(Borders::ALL).title(" Restaurants ")),
        chunks[0],
    );

    if !view.is_table_visible() {
        return;
    }

    let column = app.column();
    let header = Row::new(RestaurantField::EDITABLE.iter().map(|field| {
        let needle = view.column_filters().get(*field);
        let text = if needle.is_empty() {
            field.label().to_string()
        } else {
            format!("{} [{}]", field.label(), needle)
        };
        let style = if *field == column {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(text).style(style)
    }));

    let editing = view.editing();
    let mut rows: Vec<Row> = view
        .visible_rows()
        .into_iter()
        .map(|r| match editing.filter(|b| b.id == r.id) {
            Some(buffer) => Row::new(
                RestaurantField::EDITABLE
                    .iter()
                    .map(|field| Cell::from(buffer.fields.get(*field).to_string())),
            )
            .style(Style::default().fg(Color::Yellow)),
            None => Row::new(
                RestaurantField::EDITABLE
                    .iter()
                    .map(|field| Cell::from(field.get(r).unwrap_or_default().to_string())),
            ),
        })
        .collect();

    if view.creation_row_visible() {
        let draft = view.draft();
        rows.push(
            Row::new(RestaurantField::EDITABLE.iter().map(|field| {
                let value = draft.get(*field);
                Cell::from(if value.is_empty() {
                    format!("<{}>", field.label())
                } else {
                    value.to_string()
                })
            }))
            .style(Style::default().fg(if view.can_create() {
                Color::Green
            } else {
                Color::DarkGray
            })),
        );
    }

    let title = if view.creation_row_visible() {
        " No matches: Enter fills the new row, [c] creates it "
    } else {
        " Rows "
    };
    let table = Table::new(rows, [Constraint::Ratio(1, 5); 5])
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(title));
    let mut state = ratatui::widgets::TableState::default().with_selected(Some(app.row()));
    f.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_reservations(f: &mut Frame, app: &App, view: &ReservationsView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(area);

    let focus = app.booking_focus();
    let marker = |target: BookingFocus| {
        if focus == target {
            Span::styled("▶ ", Style::default().fg(Color::Cyan))
        } else {
            Span::raw("  ")
        }
    };

    let form = view.form();
    let restaurant = form
        .restaurant_id
        .and_then(|id| view.restaurants().iter().find(|r| r.id == id))
        .map(|r| r.label())
        .unwrap_or_else(|| "(choose)".to_string());

    let mut lines = vec![
        Line::from(vec![
            marker(BookingFocus::Restaurant),
            Span::raw("Restaurant: "),
            Span::styled(restaurant, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            marker(BookingFocus::Date),
            Span::raw("Date:       "),
            Span::styled(
                form.date.clone().unwrap_or_else(|| "(YYYY-MM-DD)".to_string()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    let mut tables = vec![marker(BookingFocus::Tables), Span::raw("Table:      ")];
    match view.table_picker() {
        Some(slots) => {
            for slot in slots {
                let mut style = match slot.state {
                    SlotState::Occupied => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
                    SlotState::Selected => Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                    SlotState::Free => Style::default().fg(Color::White),
                };
                if focus == BookingFocus::Tables && slot.number == app.table_cursor() {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                tables.push(Span::styled(format!("{:>3}", slot.number), style));
            }
        }
        None => tables.push(Span::styled(
            "choose a restaurant and a date",
            Style::default().fg(Color::DarkGray),
        )),
    }
    lines.push(Line::from(tables));

    if view.no_tables_available() {
        lines.push(Line::from(Span::styled(
            "  No tables available for this restaurant on this date.",
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("  [s] {}", view.submit_label()),
        if view.can_submit() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        },
    )));

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" New reservation ")),
        chunks[0],
    );

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focus == BookingFocus::List {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        })
        .title(" Reservations ");

    let cards = view.cards();
    if view.is_loading() || cards.is_empty() {
        let text = if view.is_loading() { "Loading…" } else { "No reservations yet" };
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(list_block),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let mut details = Vec::new();
            if let Some(city) = &card.city {
                details.push(format!("City: {}", city));
            }
            if let Some(address) = &card.address {
                details.push(format!("Address: {}", address));
            }
            details.push(format!("Date: {}", card.date));
            details.push(format!("Table: {}", card.table_number));
            ListItem::new(vec![
                Line::from(Span::styled(
                    card.restaurant_name.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("  {}", details.join(" · "))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if focus == BookingFocus::List {
        state.select(Some(app.row()));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(widget, area);
}

fn render_prompt(f: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = app.prompt() else {
        let idle = Paragraph::new("")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(" Input "));
        f.render_widget(idle, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} (Enter to set, Esc to cancel) ", prompt.target.title()));

    let width = area.width.max(3) - 3;
    let scroll = prompt.input.visual_scroll(width as usize);
    let input = Paragraph::new(prompt.input.value())
        .style(Style::default().fg(Color::Yellow))
        .scroll((0, scroll as u16))
        .block(block);
    f.render_widget(input, area);

    f.set_cursor_position((
        area.x + ((prompt.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
        area.y + 1,
    ));
}

fn render_confirm(f: &mut Frame, route: Route, id: i64) {
    let what = match route {
        Route::Restaurants => "restaurant",
        Route::Reservations => "reservation",
    };
    let area = centered(f.area(), 54, 7);
    let text = vec![
        Line::from(format!("Delete {} #{}?", what, id)),
        Line::from("This cannot be undone."),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Delete", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[n] Cancel", Style::default().fg(Color::Cyan)),
        ]),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm deletion "),
    );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
