//! Interactive dashboard: one panel per view state (Idle, Loading, Loaded,
//! Error), driven by a single event loop. The pipeline runs inline, so the
//! Loading panel stays up until interpretation finishes or fails.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};

use extrato_core::{AppView, Dashboard, StatementInterpreter, format_brl};

use crate::{pipeline, report};

pub fn run_dashboard(
    interpreter: &dyn StatementInterpreter,
    initial_file: Option<PathBuf>,
    export_dir: PathBuf,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = ui_loop(&mut terminal, interpreter, initial_file, &export_dir);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn ui_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    interpreter: &dyn StatementInterpreter,
    initial_file: Option<PathBuf>,
    export_dir: &Path,
) -> Result<()> {
    let mut view = AppView::Idle;
    let mut path_input = String::new();
    let mut toast: Option<String> = None;

    if let Some(path) = initial_file {
        upload(terminal, &mut view, &path, interpreter)?;
    }

    loop {
        terminal.draw(|f| draw(f, &view, &path_input, toast.as_deref()))?;

        if !event::poll(std::time::Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Transitions are applied after the borrow on the current variant ends.
        let mut reset = false;
        let mut quit = false;
        let mut upload_path: Option<PathBuf> = None;

        match &mut view {
            AppView::Idle => match key.code {
                KeyCode::Esc => quit = true,
                KeyCode::Enter => {
                    let p = path_input.trim();
                    if !p.is_empty() {
                        upload_path = Some(PathBuf::from(p));
                    }
                }
                KeyCode::Backspace => {
                    path_input.pop();
                }
                KeyCode::Char(c) if !ctrl => path_input.push(c),
                _ => {}
            },

            // The pipeline blocks the loop, so no key ever lands here.
            AppView::Loading => {}

            AppView::Error { .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => reset = true,
                KeyCode::Esc => quit = true,
                _ => {}
            },

            AppView::Loaded(dash) => match key.code {
                KeyCode::Esc => quit = true,
                KeyCode::Char('e') if ctrl => {
                    let filtered = dash.filtered();
                    let stats = dash.stats();
                    toast = match report::export_report(
                        &dash.data,
                        &filtered,
                        &dash.search_term,
                        &stats,
                        export_dir,
                    )? {
                        Some(path) => Some(format!("Relatório salvo em {}", path.display())),
                        None => Some("Nada para exportar.".to_string()),
                    };
                }
                KeyCode::Char('r') if ctrl => reset = true,
                KeyCode::Backspace => {
                    dash.search_term.pop();
                }
                KeyCode::Char(c) if !ctrl => dash.search_term.push(c),
                _ => {}
            },
        }

        if quit {
            break;
        }
        if reset {
            view.reset();
            path_input.clear();
            toast = None;
        }
        if let Some(path) = upload_path {
            toast = None;
            upload(terminal, &mut view, &path, interpreter)?;
        }
    }

    Ok(())
}

/// Loading is entered and painted before extraction begins; the call then
/// blocks until the interpreter answers. There is no cancellation.
fn upload(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    view: &mut AppView,
    path: &Path,
    interpreter: &dyn StatementInterpreter,
) -> Result<()> {
    view.begin_upload();
    terminal.draw(|f| draw(f, view, "", None))?;

    match pipeline::process_upload(path, interpreter) {
        Ok(data) => view.finish(data),
        Err(err) => {
            tracing::error!(error = %err, file = %path.display(), "falha ao processar upload");
            view.fail(pipeline::error_message(&err));
        }
    }
    Ok(())
}

fn draw(f: &mut ratatui::Frame, view: &AppView, path_input: &str, toast: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Bank",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Analyzer",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  AI POWERED", Style::default().fg(Color::Green)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    match view {
        AppView::Idle => draw_idle(f, chunks[1], path_input),
        AppView::Loading => draw_loading(f, chunks[1]),
        AppView::Error { message } => draw_error(f, chunks[1], message),
        AppView::Loaded(dash) => draw_loaded(f, chunks[1], dash),
    }

    let footer = match view {
        AppView::Loaded(_) => "digite para pesquisar · Ctrl+E exporta PDF · Ctrl+R novo arquivo · Esc sai",
        AppView::Error { .. } => "Enter tenta novamente · Esc sai",
        _ => "Enter analisa · Esc sai",
    };
    let line = match toast {
        Some(t) => Line::from(vec![
            Span::styled(t, Style::default().fg(Color::Green)),
            Span::styled(format!("  ({footer})"), Style::default().fg(Color::Gray)),
        ]),
        None => Line::from(Span::styled(footer, Style::default().fg(Color::Gray))),
    };
    f.render_widget(Paragraph::new(line), chunks[2]);
}

fn draw_idle(f: &mut ratatui::Frame, area: Rect, path_input: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let intro = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Analisar Extrato",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Informe o caminho do seu PDF ou Excel para identificar transferências automaticamente usando IA.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled("Formatos aceitos: PDF · XLS / XLSX", Style::default().fg(Color::Gray))),
    ]))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[0]);

    let input = Paragraph::new(path_input)
        .block(Block::default().borders(Borders::ALL).title("arquivo"));
    f.render_widget(input, chunks[1]);
}

fn draw_loading(f: &mut ratatui::Frame, area: Rect) {
    let msg = Paragraph::new(Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "A Inteligência Artificial está analisando seu extrato...",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Isso pode levar alguns segundos dependendo do tamanho do arquivo.",
            Style::default().fg(Color::Gray),
        )),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(msg, area);
}

fn draw_error(f: &mut ratatui::Frame, area: Rect, message: &str) {
    let panel = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Erro ao processar",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::raw(message)),
        Line::raw(""),
        Line::from(Span::styled("Tentar novamente: Enter", Style::default().fg(Color::Gray))),
    ]))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    f.render_widget(panel, area);
}

fn draw_loaded(f: &mut ratatui::Frame, area: Rect, dash: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let bank = if dash.data.bank_name.is_empty() {
        "Análise de Extrato"
    } else {
        &dash.data.bank_name
    };
    let period = if dash.data.period.is_empty() {
        "Período identificado pelo sistema"
    } else {
        &dash.data.period
    };
    let title = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(bank, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(period, Style::default().fg(Color::Gray))),
    ]));
    f.render_widget(title, chunks[0]);

    let stats = dash.stats();
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(27),
            Constraint::Percentage(40),
        ])
        .split(chunks[1]);

    let total = Paragraph::new(Span::styled(
        format!("R$ {}", format_brl(stats.total)),
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title("Total Pesquisado"));
    f.render_widget(total, tiles[0]);

    let count = Paragraph::new(format!("{} itens", stats.count))
        .block(Block::default().borders(Borders::ALL).title("Qtde. Transferências"));
    f.render_widget(count, tiles[1]);

    let search = Paragraph::new(dash.search_term.as_str())
        .block(Block::default().borders(Borders::ALL).title("Pesquisar por nome ou descrição"));
    f.render_widget(search, tiles[2]);

    let filtered = dash.filtered();
    if filtered.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "Nenhuma transação encontrada com os critérios de busca.",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[2]);
        return;
    }

    let rows = filtered.iter().map(|t| {
        let color = match t.kind {
            extrato_core::TransactionKind::Credit => Color::Green,
            extrato_core::TransactionKind::Debit => Color::Red,
        };
        Row::new(vec![
            Cell::from(t.date.clone()),
            Cell::from(t.description.clone()),
            Cell::from(t.kind.label()).style(Style::default().fg(color)),
            Cell::from(format!("{} R$ {}", t.kind.sign(), format_brl(t.amount)))
                .style(Style::default().fg(color)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(24),
            Constraint::Length(8),
            Constraint::Length(18),
        ],
    )
    .header(
        Row::new(vec!["Data", "Descrição / Favorecido", "Tipo", "Valor"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(table, chunks[2]);
}
