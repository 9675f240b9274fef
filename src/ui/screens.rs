//! Screen renderers, one per application mode.
//!
//! - Services - catalog list with a detail panel
//! - Login - email and masked password form
//! - Booking - the three wizard steps with a progress indicator
//! - Dashboard - stat cards, earnings chart (creators), bookings table

use crate::app::{AppState, LoginField};
use crate::booking::{BookingStep, BookingWizard};
use crate::dashboard::DashboardSummary;
use crate::theme::{Colors, Styles, Theme, UiConstants, UiText};
use crate::types::{long_date, short_date, BookingStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Colors::SECONDARY))
        .border_style(Styles::border_active())
}

// ============================================================================
// Services Screen
// ============================================================================

/// Render the service browser.
pub fn render_services_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    if state.services.is_empty() {
        let empty = Paragraph::new("  No services available.")
            .style(Style::default().fg(Colors::WARNING))
            .block(titled_block("Services"));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .services
        .iter()
        .map(|service| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(service.title.clone(), Styles::text()),
                    Span::raw("  "),
                    Span::styled(service.display_price(), Styles::price()),
                ]),
                Line::from(Span::styled(
                    format!("  {} · {}", service.creator.name, service.duration),
                    Styles::text_muted(),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(titled_block("Services"))
        .highlight_style(Styles::selected())
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.service_selection));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(service) = state.selected_service() {
        let details = vec![
            Line::from(Span::styled(service.title.clone(), Styles::title())),
            Line::from(""),
            Line::from(Span::styled(service.description.clone(), Styles::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Creator:  ", Styles::text_muted()),
                Span::styled(service.creator.name.clone(), Styles::text()),
            ]),
            Line::from(vec![
                Span::styled("Duration: ", Styles::text_muted()),
                Span::styled(service.duration.clone(), Styles::text()),
            ]),
            Line::from(vec![
                Span::styled("Price:    ", Styles::text_muted()),
                Span::styled(service.display_price(), Styles::price()),
            ]),
            Line::from(""),
            Line::from(Span::styled("Press Enter to book", Styles::nav_hint())),
        ];
        let panel = Paragraph::new(details)
            .block(titled_block("Details"))
            .wrap(Wrap { trim: true });
        f.render_widget(panel, chunks[1]);
    }
}

// ============================================================================
// Login Screen
// ============================================================================

/// Render the sign-in form. The password is masked.
pub fn render_login_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let form_area = centered(area, 60, 12);
    let form = &state.login_form;

    let field = |label: &str, value: String, focused: bool| {
        let style = if focused {
            Style::default()
                .fg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Styles::unselected()
        };
        let cursor = if focused { "█" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), style),
            Span::styled(format!("{}{}", value, cursor), Styles::text()),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled("Welcome back", Styles::title())),
        Line::from(""),
        field("Email", form.email.clone(), form.focus == LoginField::Email),
        field(
            "Password",
            "•".repeat(form.password.chars().count()),
            form.focus == LoginField::Password,
        ),
        Line::from(""),
    ];
    if state.return_to.is_some() {
        lines.push(Line::from(Span::styled(
            "Sign in to continue your booking",
            Style::default().fg(Colors::INFO),
        )));
    }
    lines.push(Line::from(Span::styled(
        "New here? Create an account with `creatorbook signup`",
        Styles::text_muted(),
    )));

    let panel = Paragraph::new(lines)
        .block(titled_block("Sign In"))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, form_area);
}

// ============================================================================
// Booking Screens
// ============================================================================

/// Render the booking wizard for the open service.
pub fn render_booking_screen(
    f: &mut Frame,
    area: Rect,
    wizard: &BookingWizard,
    date_cursor: usize,
    time_cursor: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Service title
            Constraint::Length(2), // Progress
            Constraint::Min(8),    // Step content
            Constraint::Length(3), // Buttons
        ])
        .split(area);

    let service = wizard.service();
    let title = Paragraph::new(Line::from(vec![
        Span::styled(format!("Book: {}", service.title), Styles::title()),
        Span::styled(format!("  with {}", service.creator.name), Styles::text_secondary()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    render_progress(f, chunks[1], wizard.step());

    match wizard.step() {
        BookingStep::SelectDateTime => {
            render_select_date_time(f, chunks[2], wizard, date_cursor, time_cursor)
        }
        BookingStep::Payment => render_payment(f, chunks[2], wizard),
        BookingStep::Confirmation => render_confirmation(f, chunks[2], wizard),
    }

    render_booking_buttons(f, chunks[3], wizard);
}

fn render_progress(f: &mut Frame, area: Rect, current: BookingStep) {
    let mut spans = Vec::new();
    for (i, step) in BookingStep::all_steps().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ──  ", Styles::text_muted()));
        }
        let completed = step.order() < current.order()
            || (current.is_terminal() && *step == current);
        let active = *step == current && !current.is_terminal();
        let marker = if completed { "✓" } else { "•" };
        spans.push(Span::styled(
            format!("{} {}. {}", marker, step.step_number(), step.label()),
            Theme::step_style(completed, active),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn chip(text: String, selected: bool, highlighted: bool) -> Span<'static> {
    let style = if selected {
        Styles::selected()
    } else if highlighted {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Styles::unselected()
    };
    Span::styled(format!(" {} ", text), style)
}

fn render_select_date_time(
    f: &mut Frame,
    area: Rect,
    wizard: &BookingWizard,
    date_cursor: usize,
    time_cursor: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let mut date_spans = Vec::new();
    for (i, date) in wizard.available_dates().into_iter().enumerate() {
        let selected = wizard.selected_date() == Some(date);
        date_spans.push(chip(short_date(date), selected, i == date_cursor));
        date_spans.push(Span::raw(" "));
    }
    let dates = Paragraph::new(Line::from(date_spans))
        .block(titled_block("Select a Date"))
        .wrap(Wrap { trim: false });
    f.render_widget(dates, chunks[0]);

    let times_block = titled_block("Select a Time");
    let times = wizard.available_times();
    let content = if wizard.selected_date().is_none() {
        Paragraph::new(Span::styled("Choose a date to see open times", Styles::text_muted()))
    } else if times.is_empty() {
        Paragraph::new(Span::styled(
            "No open times on this date",
            Style::default().fg(Colors::WARNING),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, time) in times.iter().enumerate() {
            let selected = wizard.selected_time() == Some(time.as_str());
            spans.push(chip(time.clone(), selected, i == time_cursor));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans))
    };
    f.render_widget(content.block(times_block).wrap(Wrap { trim: false }), chunks[1]);
}

fn render_payment(f: &mut Frame, area: Rect, wizard: &BookingWizard) {
    let service = wizard.service();
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Styles::text_muted()),
            Span::styled(value, Styles::text()),
        ])
    };

    let checkbox = if wizard.is_age_verified() { "[x]" } else { "[ ]" };
    let mut lines = vec![
        Line::from(Span::styled("Booking Summary", Styles::title())),
        Line::from(""),
        row("Service", service.title.clone()),
        row(
            "Date",
            wizard.selected_date().map(long_date).unwrap_or_default(),
        ),
        row("Time", wizard.selected_time().unwrap_or_default().to_string()),
        row("Duration", service.duration.clone()),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Total"), Styles::text_muted()),
            Span::styled(service.display_price(), Styles::price()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", checkbox), Styles::key()),
            Span::styled(UiText::AGE_CHECKBOX, Styles::text()),
        ]),
    ];
    if wizard.is_submitting() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Processing payment...",
            Style::default().fg(Colors::INFO),
        )));
    }

    let panel = Paragraph::new(lines)
        .block(titled_block(BookingStep::Payment.title()))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_confirmation(f: &mut Frame, area: Rect, wizard: &BookingWizard) {
    let lines = match wizard.confirmation() {
        Some(confirmation) => vec![
            Line::from(Span::styled(
                BookingStep::Confirmation.title(),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(confirmation.summary(), Styles::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Paid:      ", Styles::text_muted()),
                Span::styled(format!("${}", confirmation.amount.normalize()), Styles::price()),
            ]),
            Line::from(vec![
                Span::styled("Reference: ", Styles::text_muted()),
                Span::styled(confirmation.payment_reference.clone(), Styles::text()),
            ]),
        ],
        None => vec![Line::from(Span::styled("Booking confirmed.", Styles::text()))],
    };
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(titled_block("Confirmation"))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_booking_buttons(f: &mut Frame, area: Rect, wizard: &BookingWizard) {
    let (label, enabled) = match wizard.step() {
        BookingStep::SelectDateTime => (UiText::BTN_CONTINUE, wizard.can_advance()),
        BookingStep::Payment if wizard.is_submitting() => (UiText::BTN_PROCESSING, false),
        BookingStep::Payment => (UiText::BTN_CONFIRM_PAYMENT, true),
        BookingStep::Confirmation => ("[ D: Go to Dashboard ]", true),
    };
    let button_style = |enabled: bool| {
        if enabled {
            Styles::button_active()
        } else {
            Styles::button_inactive()
        }
    };

    let mut spans = Vec::new();
    if wizard.step().can_go_back() {
        spans.push(Span::styled(UiText::BTN_BACK, button_style(wizard.can_go_back())));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(label, button_style(enabled)));

    let buttons = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(buttons, area);
}

// ============================================================================
// Dashboard Screen
// ============================================================================

/// Render the dashboard.
pub fn render_dashboard_screen(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let chart_height = if summary.is_creator { 12 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Welcome
            Constraint::Length(4),            // Stat cards
            Constraint::Length(chart_height), // Earnings
            Constraint::Min(6),               // Bookings
        ])
        .split(area);

    let welcome = Paragraph::new(Line::from(vec![
        Span::styled("Welcome back, ", Styles::text()),
        Span::styled(summary.welcome_name.clone(), Styles::title()),
    ]));
    f.render_widget(welcome, chunks[0]);

    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            summary
                .stats
                .iter()
                .map(|_| Constraint::Ratio(1, summary.stats.len().max(1) as u32)),
        )
        .split(chunks[1]);
    for (card, card_area) in summary.stats.iter().zip(card_areas.iter()) {
        let widget = Paragraph::new(Line::from(Span::styled(card.value.clone(), Styles::price())))
            .alignment(Alignment::Center)
            .block(titled_block(card.label));
        f.render_widget(widget, *card_area);
    }

    if summary.is_creator {
        let bars: Vec<Bar> = summary
            .earnings
            .iter()
            .map(|e| {
                Bar::default()
                    .label(Line::from(e.month.clone()))
                    .value(e.amount.to_u64().unwrap_or(0))
                    .style(Style::default().fg(Colors::CHART_BAR))
            })
            .collect();
        let chart = BarChart::default()
            .block(titled_block("Earnings Overview · Last 6 months"))
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(2)
            .max(summary.peak_earning().to_u64().unwrap_or(0).max(1));
        let chart_area = Rect {
            width: chunks[2].width.min(UiConstants::CHART_WIDTH * 2),
            ..chunks[2]
        };
        f.render_widget(chart, chart_area);
    }

    let mut header = vec!["Service"];
    if summary.is_creator {
        header.push("Client");
    }
    header.extend(["Date", "Time", "Status"]);

    let rows: Vec<Row> = summary
        .bookings
        .iter()
        .map(|b| {
            let mut cells = vec![b.service.clone()];
            if summary.is_creator {
                cells.push(b.client.clone());
            }
            cells.push(b.date.to_string());
            cells.push(b.time.clone());
            cells.push(b.status.to_string());
            let style = match b.status {
                BookingStatus::Upcoming => Style::default().fg(Colors::PRIMARY),
                BookingStatus::Completed => Styles::text_muted(),
            };
            Row::new(cells).style(style)
        })
        .collect();

    let widths: Vec<Constraint> = header.iter().map(|_| Constraint::Fill(1)).collect();
    let table = if rows.is_empty() {
        Table::new(vec![Row::new(vec!["No bookings found"])], [Constraint::Fill(1)])
    } else {
        Table::new(rows, widths).header(Row::new(header).style(Styles::key()))
    };
    let heading = summary.bookings_heading();
    f.render_widget(table.block(titled_block(&heading)), chunks[3]);
}

/// A `width` x `height` rectangle centered in `area`, clamped to it.
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
