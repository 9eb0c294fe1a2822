use agency_console::client_health::{HealthLevel, HealthReport};
use agency_console::engine::{AggregationEngine, AnalyticsCache, AnalyticsReport};
use agency_console::entities::{Transaction, TransactionType};
use agency_console::format::{format_brl, format_brl_compact, long_date, short_date};
use agency_console::ledger::{filter_ledger, ledger_totals, KindFilter, LedgerFilter};
use agency_console::metrics::HealthMetrics;
use agency_console::objectives;
use agency_console::period::{default_range, month_start, DateRange};
use agency_console::trend::is_chartable;
use agency_console::{Settings, Workspace};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Sparkline, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Cockpit,
    Ledger,
    Categories,
    Clients,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Cockpit => Page::Ledger,
            Page::Ledger => Page::Categories,
            Page::Categories => Page::Clients,
            Page::Clients => Page::Cockpit,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Cockpit => Page::Clients,
            Page::Ledger => Page::Cockpit,
            Page::Categories => Page::Ledger,
            Page::Clients => Page::Categories,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Cockpit => "Cockpit",
            Page::Ledger => "Lançamentos",
            Page::Categories => "Categorias",
            Page::Clients => "Clientes",
        }
    }
}

pub struct App {
    pub workspace: Workspace,
    pub engine: AggregationEngine,
    pub cache: AnalyticsCache,
    pub range: DateRange,
    pub today: NaiveDate,
    /// Moment client health is judged at
    pub as_of: NaiveDateTime,
    pub current_page: Page,
    pub ledger_filter: LedgerFilter,
    pub ledger_state: TableState,
    pub category_state: TableState,
    pub client_state: TableState,
    pub show_detail: bool,
    /// Typing into the ledger search box
    pub search_mode: bool,
}

impl App {
    pub fn new(workspace: Workspace, settings: Settings, as_of: NaiveDateTime) -> Self {
        let today = as_of.date();
        let range = default_range(workspace.finance.transactions(), today);

        let mut ledger_state = TableState::default();
        ledger_state.select(Some(0));
        let mut category_state = TableState::default();
        category_state.select(Some(0));
        let mut client_state = TableState::default();
        client_state.select(Some(0));

        Self {
            workspace,
            engine: AggregationEngine::new(settings),
            cache: AnalyticsCache::new(),
            range,
            today,
            as_of,
            current_page: Page::Cockpit,
            ledger_filter: LedgerFilter::default(),
            ledger_state,
            category_state,
            client_state,
            show_detail: false,
            search_mode: false,
        }
    }

    /// Financial report for the current range, memoized
    pub fn report(&mut self) -> AnalyticsReport {
        let finance = &self.workspace.finance;
        self.cache
            .get_or_compute(
                &self.engine,
                finance.transactions(),
                finance.categories(),
                finance.accounts(),
                self.range,
            )
            .clone()
    }

    pub fn ledger_rows(&self) -> Vec<&Transaction> {
        filter_ledger(self.workspace.finance.transactions(), &self.ledger_filter)
    }

    pub fn portfolio(&self) -> Vec<HealthReport> {
        self.engine.portfolio_health(
            self.workspace.clients.clients(),
            self.workspace.tasks.tasks(),
            self.as_of,
        )
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.show_detail = false;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.show_detail = false;
    }

    pub fn cycle_kind_filter(&mut self) {
        self.ledger_filter.kind = self.ledger_filter.kind.next();
        self.ledger_state.select(Some(0));
    }

    pub fn clear_filter(&mut self) {
        self.ledger_filter = LedgerFilter::default();
        self.ledger_state.select(Some(0));
    }

    pub fn push_search(&mut self, c: char) {
        self.ledger_filter.search.push(c);
        self.ledger_state.select(Some(0));
    }

    pub fn pop_search(&mut self) {
        self.ledger_filter.search.pop();
        self.ledger_state.select(Some(0));
    }

    /// Whole recorded span
    pub fn range_all(&mut self) {
        self.range = default_range(self.workspace.finance.transactions(), self.today);
    }

    /// Month containing the end of the current range
    pub fn range_month(&mut self) {
        self.range = DateRange::new(month_start(self.range.end), self.range.end);
    }

    /// Ledger follows the cockpit period when asked
    pub fn ledger_to_range(&mut self) {
        self.ledger_filter.start = Some(self.range.start);
        self.ledger_filter.end = Some(self.range.end);
        self.ledger_state.select(Some(0));
    }

    fn active_len(&mut self) -> usize {
        match self.current_page {
            Page::Cockpit => 0,
            Page::Ledger => self.ledger_rows().len(),
            Page::Categories => self.report().categories.len(),
            Page::Clients => self.workspace.clients.clients().len(),
        }
    }

    fn active_state(&mut self) -> Option<&mut TableState> {
        match self.current_page {
            Page::Cockpit => None,
            Page::Ledger => Some(&mut self.ledger_state),
            Page::Categories => Some(&mut self.category_state),
            Page::Clients => Some(&mut self.client_state),
        }
    }

    pub fn move_selection(&mut self, delta: i64) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        if let Some(state) = self.active_state() {
            let current = state.selected().unwrap_or(0) as i64;
            let next = (current + delta).rem_euclid(len as i64);
            state.select(Some(next as usize));
        }
    }

    pub fn page_down(&mut self) {
        let len = self.active_len();
        if let Some(state) = self.active_state() {
            let next = (state.selected().unwrap_or(0) + 20).min(len.saturating_sub(1));
            state.select(Some(next));
        }
    }

    pub fn page_up(&mut self) {
        if let Some(state) = self.active_state() {
            let next = state.selected().unwrap_or(0).saturating_sub(20);
            state.select(Some(next));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "UI loop failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.search_mode {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => app.search_mode = false,
                KeyCode::Backspace => app.pop_search(),
                KeyCode::Char(c) => app.push_search(c),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Enter => app.toggle_detail(),
            KeyCode::Tab => app.next_page(),
            KeyCode::BackTab => app.previous_page(),
            KeyCode::Char('1') => app.current_page = Page::Cockpit,
            KeyCode::Char('2') => app.current_page = Page::Ledger,
            KeyCode::Char('3') => app.current_page = Page::Categories,
            KeyCode::Char('4') => app.current_page = Page::Clients,
            KeyCode::Char('/') if app.current_page == Page::Ledger => app.search_mode = true,
            KeyCode::Char('f') if app.current_page == Page::Ledger => app.cycle_kind_filter(),
            KeyCode::Char('p') if app.current_page == Page::Ledger => app.ledger_to_range(),
            KeyCode::Char('c') => app.clear_filter(),
            KeyCode::Char('a') => app.range_all(),
            KeyCode::Char('m') => app.range_month(),
            KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
            KeyCode::PageDown => app.page_down(),
            KeyCode::PageUp => app.page_up(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.cache.invalidate(),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let report = app.report();

    render_header(f, chunks[0], app, &report);

    match app.current_page {
        Page::Cockpit => render_cockpit(f, chunks[1], &report),
        Page::Ledger => {
            if app.show_detail {
                let content_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(chunks[1]);
                render_ledger(f, content_chunks[0], app);
                render_transaction_detail(f, content_chunks[1], app);
            } else {
                render_ledger(f, chunks[1], app);
            }
        }
        Page::Categories => render_categories(f, chunks[1], app, &report),
        Page::Clients => render_clients(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, report: &AnalyticsReport) {
    let pages = [Page::Cockpit, Page::Ledger, Page::Categories, Page::Clients];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} → {} ({} dias)", short_date(report.range.start), short_date(report.range.end), report.day_count),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("↑ {}", format_brl_compact(report.summary.income)),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("↓ {}", format_brl_compact(report.summary.expense)),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

// ============================================================================
// COCKPIT
// ============================================================================

fn render_cockpit(f: &mut Frame, area: Rect, report: &AnalyticsReport) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(columns[0]);

    render_summary(f, left[0], report);
    render_trend(f, left[1], report);
    render_metrics(f, columns[1], &report.metrics);
}

fn render_summary(f: &mut Frame, area: Rect, report: &AnalyticsReport) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let net = report.summary.net();

    let content = vec![
        Line::from(vec![
            Span::styled("  Receitas pagas:  ", label),
            Span::styled(format_brl(report.summary.income), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  Despesas pagas:  ", label),
            Span::styled(format_brl(report.summary.expense), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("  Resultado:       ", label),
            Span::styled(
                format_brl(net),
                Style::default().fg(if net < 0.0 { Color::Red } else { Color::Green }),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Saldo em contas: ", label),
            Span::raw(format_brl(report.summary.balance)),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Resumo "),
    );
    f.render_widget(paragraph, area);
}

fn render_trend(f: &mut Frame, area: Rect, report: &AnalyticsReport) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Fluxo diário ");

    if !is_chartable(&report.trend) {
        let single = report.trend.first().map(|p| {
            format!(
                "  {}: receitas {} / despesas {}",
                p.label,
                format_brl(p.revenue),
                format_brl(p.expense)
            )
        });
        let paragraph = Paragraph::new(single.unwrap_or_default()).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let revenue: Vec<u64> = report.trend.iter().map(|p| p.revenue.max(0.0).round() as u64).collect();
    let expense: Vec<u64> = report.trend.iter().map(|p| p.expense.max(0.0).round() as u64).collect();

    let revenue_line = Sparkline::default()
        .block(Block::default().title("receitas"))
        .data(&revenue)
        .style(Style::default().fg(Color::Green));
    let expense_line = Sparkline::default()
        .block(Block::default().title("despesas"))
        .data(&expense)
        .style(Style::default().fg(Color::Red));

    f.render_widget(revenue_line, rows[0]);
    f.render_widget(expense_line, rows[1]);
}

fn render_metrics(f: &mut Frame, area: Rect, metrics: &HealthMetrics) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Saúde financeira ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let axes = metrics.axes();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(axes.iter().map(|_| Constraint::Length(1)).collect::<Vec<_>>())
        .split(inner);

    for ((name, value), row) in axes.iter().zip(rows.iter()) {
        let color = if *value >= 70.0 {
            Color::Green
        } else if *value >= 40.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(value / 100.0)
            .label(format!("{} {:.0}", name, value));
        f.render_widget(gauge, *row);
    }
}

// ============================================================================
// LEDGER
// ============================================================================

fn render_ledger(f: &mut Frame, area: Rect, app: &mut App) {
    let finance = &app.workspace.finance;
    let rows_data = filter_ledger(finance.transactions(), &app.ledger_filter);
    let totals = ledger_totals(rows_data.iter().copied());

    let header_cells = ["Data", "Descrição", "Categoria", "Valor", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = rows_data.iter().map(|tx| {
        let color = kind_color(tx.kind);
        Row::new(vec![
            Cell::from(short_date(tx.date)),
            Cell::from(truncate(&tx.description, 30)),
            Cell::from(truncate(finance.category_name(&tx.category_id), 18)),
            Cell::from(format_brl(tx.signed_amount())).style(Style::default().fg(color)),
            Cell::from(tx.status.as_str()),
        ])
        .height(1)
    });

    let title = format!(
        " Lançamentos [{}] · entradas {} · saídas {} · líquido {} ",
        kind_label(app.ledger_filter.kind),
        format_brl(totals.inflow),
        format_brl(totals.outflow),
        format_brl(totals.net)
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(32),
            Constraint::Length(20),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.ledger_state);
}

fn render_transaction_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Detalhes ");

    let rows = app.ledger_rows();
    let Some(tx) = app.ledger_state.selected().and_then(|i| rows.get(i).copied()) else {
        f.render_widget(Paragraph::new("Nenhum lançamento selecionado").block(block), area);
        return;
    };

    let finance = &app.workspace.finance;
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let account = finance.find_account(&tx.account_id).map(|a| a.name.as_str()).unwrap_or("-");
    let client = tx
        .client_id
        .as_deref()
        .and_then(|id| app.workspace.clients.find(id))
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Data: ", label), Span::raw(long_date(tx.date))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Valor: ", label),
            Span::styled(format_brl(tx.signed_amount()), Style::default().fg(kind_color(tx.kind))),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("  Tipo: ", label), Span::raw(tx.kind.as_str())]),
        Line::from(vec![Span::styled("  Status: ", label), Span::raw(tx.status.as_str())]),
        Line::from(""),
        Line::from(vec![Span::styled("  Categoria: ", label), Span::raw(finance.category_name(&tx.category_id))]),
        Line::from(vec![Span::styled("  Conta: ", label), Span::raw(account)]),
        Line::from(vec![Span::styled("  Cliente: ", label), Span::raw(client)]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                wrap_text(&tx.description, 35),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter para fechar",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

// ============================================================================
// CATEGORIES
// ============================================================================

fn render_categories(f: &mut Frame, area: Rect, app: &mut App, report: &AnalyticsReport) {
    let header_cells = ["Categoria", "Valor", "%", ""]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = report.categories.iter().map(|slice| {
        let bar = "█".repeat((slice.percentage as usize) / 4);
        Row::new(vec![
            Cell::from(slice.name.clone()),
            Cell::from(format_brl(slice.amount)),
            Cell::from(format!("{:>3}%", slice.percentage)),
            Cell::from(bar).style(Style::default().fg(Color::Magenta)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Despesas por categoria "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.category_state);
}

// ============================================================================
// CLIENTS
// ============================================================================

fn render_clients(f: &mut Frame, area: Rect, app: &mut App) {
    let portfolio = app.portfolio();
    let clients = app.workspace.clients.clients();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let header_cells = ["Cliente", "Status", "Score", "Nível"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = clients.iter().map(|client| {
        let health = portfolio.iter().find(|r| r.client_id == client.id);
        let (score, level, color) = match health {
            Some(r) => (r.score.to_string(), r.level.label_pt(), level_color(r.level)),
            None => ("-".to_string(), "-", Color::White),
        };
        Row::new(vec![
            Cell::from(truncate(&client.name, 22)),
            Cell::from(client.status.as_str()),
            Cell::from(score).style(Style::default().fg(color)),
            Cell::from(level).style(Style::default().fg(color)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Saúde dos clientes "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    let selected = app.client_state.selected().and_then(|i| clients.get(i)).cloned();
    f.render_stateful_widget(table, columns[0], &mut app.client_state);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Diagnóstico ");

    let Some(client) = selected else {
        f.render_widget(Paragraph::new("Nenhum cliente").block(block), columns[1]);
        return;
    };
    let Some(report) = portfolio.iter().find(|r| r.client_id == client.id) else {
        return;
    };

    let diagnosis = report.diagnosis();
    let okr = objectives::progress(&client.objectives);
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let color = level_color(report.level);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", client.name), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{} · {}", report.score, report.level.label_pt()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("  Reclamações: ", label), Span::raw(report.complaints.to_string())]),
        Line::from(vec![Span::styled("  Incidentes:  ", label), Span::raw(report.incidents.to_string())]),
        Line::from(vec![
            Span::styled("  Atrasadas:   ", label),
            Span::raw(format!("{} de {} tarefas", report.overdue, report.total_tasks)),
        ]),
        Line::from(vec![
            Span::styled("  Metas:       ", label),
            Span::raw(format!("{} de {} ({}%)", report.goals, report.total_goals, report.goal_progress)),
        ]),
        Line::from(vec![
            Span::styled("  Key results: ", label),
            Span::raw(format!(
                "{} de {} ({}%)",
                okr.completed_key_results, okr.total_key_results, okr.overall_progress
            )),
        ]),
        Line::from(vec![
            Span::styled("  Onboarding:  ", label),
            Span::raw(format!("{}%", client.onboarding_progress())),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(wrap_text(diagnosis.summary, 40), Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ➜ ", Style::default().fg(color)),
            Span::styled(wrap_text(diagnosis.action, 40), Style::default().add_modifier(Modifier::ITALIC)),
        ]),
    ];

    f.render_widget(Paragraph::new(content).block(block), columns[1]);
}

// ============================================================================
// STATUS BAR & HELPERS
// ============================================================================

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let mut status_spans = vec![];

    if app.search_mode || !app.ledger_filter.search.is_empty() {
        status_spans.push(Span::styled(
            format!(" Busca: {}{} ", app.ledger_filter.search, if app.search_mode { "▏" } else { "" }),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw("|"));
    }

    status_spans.extend([
        Span::styled(" Tab", key),
        Span::raw(" Página | "),
        Span::styled("a/m", key),
        Span::raw(" Período | "),
    ]);

    if app.current_page == Page::Ledger {
        status_spans.extend([
            Span::styled("/", key),
            Span::raw(" Buscar | "),
            Span::styled("f", key),
            Span::raw(" Tipo | "),
            Span::styled("p", key),
            Span::raw(" Usar período | "),
            Span::styled("c", key),
            Span::raw(" Limpar | "),
            Span::styled("Enter", key),
            Span::raw(" Detalhes | "),
        ]);
    }

    status_spans.extend([
        Span::styled("↑/↓", key),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Sair"),
    ]);

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn kind_color(kind: TransactionType) -> Color {
    match kind {
        TransactionType::Income => Color::Green,
        TransactionType::Expense => Color::Red,
    }
}

fn kind_label(kind: KindFilter) -> &'static str {
    match kind {
        KindFilter::All => "todos",
        KindFilter::Income => "receitas",
        KindFilter::Expense => "despesas",
    }
}

fn level_color(level: HealthLevel) -> Color {
    match level {
        HealthLevel::Healthy => Color::Green,
        HealthLevel::AtRisk => Color::Yellow,
        HealthLevel::Critical => Color::Red,
    }
}

/// Char-aware truncation; descriptions are full of accents
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.chars().count() + word.chars().count() + 1 <= width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            if !result.is_empty() {
                result.push_str("\n  ");
            }
            result.push_str(&current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push_str("\n  ");
        }
        result.push_str(&current_line);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn app() -> App {
        App::new(Workspace::with_defaults(), Settings::default(), at(2024, 10, 16, 9))
    }

    #[test]
    fn test_pages_cycle() {
        let mut page = Page::Cockpit;
        for _ in 0..4 {
            page = page.next();
        }
        assert_eq!(page, Page::Cockpit);
        assert_eq!(Page::Cockpit.previous(), Page::Clients);
    }

    #[test]
    fn test_report_is_cached_between_frames() {
        let mut app = app();
        let first = app.report();
        let second = app.report();
        assert_eq!(first, second);
        assert_eq!(app.cache.hits, 1);

        app.range_month();
        let month = app.report();
        assert_eq!(month.range.start, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(app.cache.misses, 2);
    }

    #[test]
    fn test_ledger_search_and_kind_filter() {
        let mut app = app();
        let all = app.ledger_rows().len();

        for c in "folha".chars() {
            app.push_search(c);
        }
        assert_eq!(app.ledger_rows().len(), 2);

        app.clear_filter();
        app.cycle_kind_filter();
        assert!(app.ledger_rows().iter().all(|t| t.kind == TransactionType::Income));
        assert!(app.ledger_rows().len() < all);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app();
        app.current_page = Page::Clients;
        app.move_selection(-1);
        assert_eq!(app.client_state.selected(), Some(2));
        app.move_selection(1);
        assert_eq!(app.client_state.selected(), Some(0));
    }

    #[test]
    fn test_task_due_today_is_overdue_once_the_day_started() {
        let app = App::new(Workspace::with_defaults(), Settings::default(), at(2024, 10, 11, 10));
        let mcd = app.portfolio().into_iter().find(|r| r.client_id == "cli-2").unwrap();
        assert_eq!(mcd.overdue, 1);
        assert_eq!(app.today, NaiveDate::from_ymd_opt(2024, 10, 11).unwrap());
    }

    #[test]
    fn test_colour_follows_configured_thresholds() {
        let mut settings = Settings::default();
        settings.health.healthy_threshold = 100;
        settings.health.at_risk_threshold = 99;
        let app = App::new(Workspace::with_defaults(), settings, at(2024, 10, 16, 9));

        for report in app.portfolio() {
            let expected = match report.score {
                100 => Color::Green,
                99 => Color::Yellow,
                _ => Color::Red,
            };
            assert_eq!(level_color(report.level), expected, "score {}", report.score);
        }
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Reunião mensal Nubank", 10), "Reunião...");
        assert_eq!(truncate("curto", 10), "curto");
    }
}
