mod app;

use std::io;
use std::time::Duration;

use app::{
    format_percentage, format_price, format_volume, sparkline_points, time_ago, trend_arrow,
    truncate, AppState, ConnectionStatus, InstrumentResponse, SortBy,
};
use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table, TableState},
    Frame, Terminal,
};

/// Poll interval for the trading floor snapshot.
const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(io::Error::other)?;

    let mut app = AppState::new(base_url);

    // Initial fetch before rendering
    app.refresh(&client).await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut table_state = TableState::default();
    table_state.select(Some(0));

    let result = run_loop(&mut terminal, &mut app, &client, &mut table_state).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
    table_state: &mut TableState,
) -> io::Result<()> {
    let mut last_tick = std::time::Instant::now();

    loop {
        terminal.draw(|f| render(f, app, table_state))?;

        let timeout = REFRESH_INTERVAL
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            app.refresh(client).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Char('s') | KeyCode::Tab => app.sort_by = app.sort_by.next(),
                        KeyCode::Char('p') => app.sort_by = SortBy::Price,
                        KeyCode::Char('c') => app.sort_by = SortBy::Change,
                        KeyCode::Char('v') => app.sort_by = SortBy::Volume,
                        KeyCode::Char('n') => app.sort_by = SortBy::Name,
                        KeyCode::Down | KeyCode::Char('j') => {
                            let max = app.snapshot.instruments.len().saturating_sub(1);
                            let next = table_state.selected().map_or(0, |i| (i + 1).min(max));
                            table_state.select(Some(next));
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            let prev = table_state
                                .selected()
                                .map_or(0, |i| i.saturating_sub(1));
                            table_state.select(Some(prev));
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= REFRESH_INTERVAL {
            app.refresh(client).await;
            last_tick = std::time::Instant::now();
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState, table_state: &mut TableState) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    // Sorted once per frame from the current snapshot
    let rows = app.sorted_instruments();

    render_header(f, app, chunks[0]);
    render_body(f, &rows, table_state, chunks[1]);
    render_footer(f, app, chunks[2]);
}

fn change_color(pct: f64) -> Color {
    if pct.abs() < 0.01 {
        Color::Gray
    } else if pct > 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● live".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("◌ connecting".to_string(), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✗ {}", truncate(e, 40)), Color::Red),
    };

    let avg = app.snapshot.avg_price_change;
    let title_spans = vec![
        Span::styled(
            " Live Trading Floor  ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("vol {}", format_volume(app.snapshot.total_volume)),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("{} active", app.snapshot.active_products),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  avg "),
        Span::styled(
            format!("{} {}", trend_arrow(avg), format_percentage(avg)),
            Style::default().fg(change_color(avg)),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(title_spans))
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(Color::DarkGray),
        ));

    f.render_widget(paragraph, area);
}

fn render_body(
    f: &mut Frame,
    rows: &[&InstrumentResponse],
    table_state: &mut TableState,
    area: Rect,
) {
    // Horizontal split: roster (65%) | detail (35%)
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_roster(f, rows, table_state, halves[0]);
    let selected = table_state.selected().and_then(|i| rows.get(i)).copied();
    render_detail(f, selected, halves[1]);
}

fn render_roster(
    f: &mut Frame,
    rows: &[&InstrumentResponse],
    state: &mut TableState,
    area: Rect,
) {
    let header_cells = ["Symbol", "Name", "Price", "24h", "Vol", "Traded"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let now = Utc::now();
    let table_rows: Vec<Row> = rows
        .iter()
        .map(|d| {
            let change = format!("{} {}", trend_arrow(d.price_change24h), format_percentage(d.price_change24h));
            Row::new(vec![
                Cell::from(d.symbol.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(truncate(&d.name, 30)),
                Cell::from(format_price(d.current_price)),
                Cell::from(change).style(Style::default().fg(change_color(d.price_change24h))),
                Cell::from(format_volume(u64::from(d.volume24h))),
                Cell::from(time_ago(d.last_traded, now)).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " MARKET ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, state);
}

fn render_detail(f: &mut Frame, selected: Option<&InstrumentResponse>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " DETAIL ",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));

    let Some(d) = selected else {
        f.render_widget(Paragraph::new("no instrument selected").block(block), area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(inner);

    let lines = vec![
        Line::from(Span::styled(
            d.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("last {}", format_price(d.current_price))),
        Line::from(format!("mkt cap {}", format_price(d.market_cap))),
        Line::from(Span::styled(
            format!("24h {}", format_percentage(d.price_change24h)),
            Style::default().fg(change_color(d.price_change24h)),
        )),
    ];
    f.render_widget(Paragraph::new(lines), parts[0]);

    let points = sparkline_points(&d.price_history);
    let sparkline = Sparkline::default()
        .data(&points)
        .style(Style::default().fg(change_color(d.price_change24h)));
    f.render_widget(sparkline, parts[1]);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refresh  "),
        Span::styled("[s/p/c/v/n] ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("sort: {}  ", app.sort_by.label())),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("select  "),
        Span::styled(
            format!(
                "auto-refresh: {}s (last {}s ago)",
                REFRESH_INTERVAL.as_secs(),
                app.last_refresh.elapsed().as_secs()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}
