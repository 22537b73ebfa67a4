//! docdeck - actor-based terminal client for a documentation server
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use docdeck::app::expand::Phase;
use docdeck::app::projects::ProjectTab;
use docdeck::constants::{APP_NAME, APP_VERSION};
use docdeck::messages::render::{
    DocsView, FormView, LinksView, ListView, ModalView, ProjectPageView, ProjectsView, ScreenView,
};
use docdeck::messages::ui_events::{key_to_ui_event, InputMode};
use docdeck::models::{BodyDetail, BodyKind, FrontPage, UrlParameter};
use docdeck::ui::{
    centered_rect, form_lines, highlight_json, method_color, parameter_span, render_tabs,
    status_color,
};
use docdeck::{
    ApiClient, AppActor, AuthContext, NetworkActor, NetworkCommand, NetworkResponse, RenderState,
    Storage, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let storage = Storage::new();
    storage.ensure_dir()?;
    let config = storage.load_config()?;

    // Initialize logging to file; stdout belongs to the terminal UI
    let file_appender =
        tracing_appender::rolling::never(storage.config_dir(), storage.log_file_name());
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    tracing::info!(version = APP_VERSION, base_url = %config.base_url, "Starting {}", APP_NAME);

    let auth = AuthContext::persistent(storage.clone());
    let signed_in = auth.is_signed_in();
    let client = ApiClient::new(
        config.base_url.clone(),
        auth,
        Duration::from_secs(config.timeout_secs),
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(signed_in, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.input_mode()) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    match &state.screen {
        ScreenView::Login {
            sign_up,
            form,
            notice,
        } => draw_login(f, *sign_up, form, notice.as_deref(), main_chunks[1]),
        ScreenView::Projects(projects) => draw_projects(f, projects, main_chunks[1]),
        ScreenView::Project(page) => draw_project(f, page, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    match &state.modal {
        Some(ModalView::Form(form)) => draw_form_popup(f, form, area),
        Some(ModalView::Confirm(prompt)) => draw_confirm_popup(f, prompt, area),
        Some(ModalView::Links(links)) => draw_links_popup(f, links, area),
        Some(ModalView::Help) => draw_help_popup(f, area),
        None => {}
    }

    if let Some(alert) = &state.alert {
        draw_alert_popup(f, alert, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let crumb = match &state.screen {
        ScreenView::Login { .. } => "sign in".to_string(),
        ScreenView::Projects(_) => "projects".to_string(),
        ScreenView::Project(page) => match &page.project {
            Some(project) => format!("projects / {}", project.name),
            None => format!("projects / #{}", page.project_id),
        },
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}", crumb), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_login(f: &mut Frame, sign_up: bool, form: &FormView, notice: Option<&str>, area: Rect) {
    let popup_area = centered_rect(50, 80, area);

    let mut lines = Vec::new();
    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::default());
    }
    lines.extend(form_lines(form));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        if sign_up {
            "Enter: create account | Tab: next field | F2: back to sign in"
        } else {
            "Enter: sign in | Tab: next field | F2: create an account"
        },
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", form.title));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

fn draw_projects(f: &mut Frame, view: &ProjectsView, area: Rect) {
    let title = if view.loading {
        " Projects [...] ".to_string()
    } else {
        format!(" Projects ({}) ", view.items.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    if view.items.is_empty() {
        let text = match &view.error {
            Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
            None if view.loading => Line::from("Loading..."),
            None => Line::from(Span::styled(
                "No projects yet. Press 'n' to create one.",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|project| {
            let owner = project
                .created_by
                .as_ref()
                .map(|user| format!("  @{}", user.username))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(project.name.clone(), Style::default().bold()),
                Span::styled(
                    format!("  {}", project.base_api_url),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(owner, Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(view.selected));
    f.render_stateful_widget(list, area, &mut list_state);

    if let Some(error) = &view.error {
        draw_inline_error(f, error, area);
    }
}

fn draw_project(f: &mut Frame, page: &ProjectPageView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let titles: Vec<&str> = ProjectTab::ALL.iter().map(|tab| tab.title()).collect();
    f.render_widget(render_tabs(&titles, page.tab.index()), chunks[0]);

    match page.tab {
        ProjectTab::Docs => draw_docs(f, &page.docs, chunks[1]),
        ProjectTab::Parameters => draw_params(f, &page.params, chunks[1]),
        ProjectTab::Pages => draw_pages(f, &page.pages, chunks[1]),
        ProjectTab::Settings => draw_settings(f, page, chunks[1]),
    }
}

/// Flatten the document rows into lines; returns the line of the cursor
fn docs_lines(docs: &DocsView) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let dim = Style::default().fg(Color::DarkGray);

    for row in &docs.rows {
        if row.selected && !docs.focus_bodies {
            cursor_line = lines.len();
        }
        let row_style = if row.selected && !docs.focus_bodies {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(
            Line::from(vec![
                Span::raw(if row.expanded { "v " } else { "> " }),
                Span::styled(
                    format!("{:7}", row.summary.http_method.as_str()),
                    Style::default().fg(method_color(row.summary.http_method)).bold(),
                ),
                Span::raw(row.summary.url.clone()),
                Span::styled(format!("  {}", row.summary.description), dim),
            ])
            .style(row_style),
        );

        if !row.expanded {
            continue;
        }
        if row.refreshing {
            lines.push(Line::from(Span::styled("    refreshing...", dim)));
        }
        if let Some(error) = &row.error {
            lines.push(Line::from(Span::styled(
                format!("    {}", error),
                Style::default().fg(Color::Red),
            )));
        }
        let Some(doc) = &row.detail else {
            lines.push(Line::from(Span::styled("    Loading...", dim)));
            continue;
        };

        for text in doc.description.lines() {
            lines.push(Line::from(format!("    {}", text)));
        }
        let params = if doc.url_parameters.is_empty() {
            "none".to_string()
        } else {
            doc.url_parameters
                .iter()
                .map(|p| p.parameter.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(Line::from(vec![
            Span::styled("    Parameters: ", Style::default().fg(Color::Cyan)),
            Span::raw(params),
        ]));
        if row.bodies.is_empty() {
            lines.push(Line::from(Span::styled(
                "    No bodies. r: add request body, s: add response body",
                dim,
            )));
        }

        for body in &row.bodies {
            if body.selected {
                cursor_line = lines.len();
            }
            let open = body.phase.is_some_and(|p| p != Phase::Collapsed);
            let tag = match (body.kind, body.summary.http_status) {
                (BodyKind::Request, _) => Span::styled("REQ", Style::default().fg(Color::Blue)),
                (BodyKind::Response, Some(code)) => {
                    Span::styled(code.to_string(), Style::default().fg(status_color(code)).bold())
                }
                (BodyKind::Response, None) => Span::raw("RES"),
            };
            let body_style = if body.selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            lines.push(
                Line::from(vec![
                    Span::raw(if open { "    v " } else { "    > " }),
                    tag,
                    Span::raw(format!(" #{} {}", body.summary.id, body.summary.description)),
                ])
                .style(body_style),
            );

            if !open {
                continue;
            }
            if let Some(error) = &body.error {
                lines.push(Line::from(Span::styled(
                    format!("        {}", error),
                    Style::default().fg(Color::Red),
                )));
            }
            match &body.detail {
                Some(detail) => lines.extend(body_detail_lines(detail)),
                None => lines.push(Line::from(Span::styled("        Loading...", dim))),
            }
        }
    }

    (lines, cursor_line)
}

fn body_detail_lines(detail: &BodyDetail) -> Vec<Line<'static>> {
    let pretty = serde_json::to_string_pretty(detail.example()).unwrap_or_default();
    highlight_json(&pretty)
        .into_iter()
        .map(|mut line| {
            line.spans.insert(0, Span::raw("        "));
            line
        })
        .collect()
}

fn draw_docs(f: &mut Frame, docs: &DocsView, area: Rect) {
    let title = if docs.loading {
        " API documents [...] ".to_string()
    } else {
        format!(" API documents ({}) ", docs.rows.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_bottom(
            Line::from(" Enter:expand  l/h:bodies  n:new  e:edit  d:delete  p:params ")
                .right_aligned(),
        );

    let (mut lines, cursor_line) = docs_lines(docs);
    if lines.is_empty() && !docs.loading {
        lines.push(Line::from(Span::styled(
            "No API documents yet. Press 'n' to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the cursor line inside the viewport
    let height = area.height.saturating_sub(2) as usize;
    let scroll = (cursor_line + 1).saturating_sub(height) as u16;

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(paragraph, area);

    if let Some(error) = &docs.error {
        draw_inline_error(f, error, area);
    }
}

fn draw_params(f: &mut Frame, params: &ListView<UrlParameter>, area: Rect) {
    let items: Vec<ListItem> = params
        .items
        .iter()
        .map(|p| {
            ListItem::new(Line::from(vec![
                parameter_span(&p.parameter),
                Span::raw(format!("  {}", p.description)),
            ]))
        })
        .collect();
    draw_list(f, " URL parameters ", " n:new  e:edit  d:delete ", items, params, area);
}

fn draw_pages(f: &mut Frame, pages: &ListView<FrontPage>, area: Rect) {
    let items: Vec<ListItem> = pages
        .items
        .iter()
        .map(|page| {
            let (mark, color) = if page.implemented {
                ("[x]", Color::Green)
            } else {
                ("[ ]", Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(color)),
                Span::raw(format!(" {}", page.url)),
                Span::styled(
                    format!("  {}", page.description),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    draw_list(f, " Pages ", " read-only ", items, pages, area);
}

fn draw_list<T>(
    f: &mut Frame,
    title: &str,
    hints: &str,
    items: Vec<ListItem>,
    view: &ListView<T>,
    area: Rect,
) {
    let title = if view.loading {
        format!("{}[...] ", title)
    } else {
        format!("{}({}) ", title, view.items.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_bottom(Line::from(hints.to_string()).right_aligned());

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !view.items.is_empty() {
        list_state.select(Some(view.selected));
    }
    f.render_stateful_widget(list, area, &mut list_state);

    if let Some(error) = &view.error {
        draw_inline_error(f, error, area);
    }
}

fn draw_settings(f: &mut Frame, page: &ProjectPageView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Settings ")
        .title_bottom(Line::from(" e:edit  d:delete project ").right_aligned());

    let Some(project) = &page.project else {
        let text = match &page.project_error {
            Some(error) => error.clone(),
            None => "Loading...".to_string(),
        };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).bold();
    let mut lines = Vec::new();
    let mut field = |name: &'static str, value: &str| {
        lines.push(Line::from(Span::styled(name, label)));
        if value.is_empty() {
            lines.push(Line::from(Span::styled("  -", Style::default().fg(Color::DarkGray))));
        } else {
            lines.extend(value.lines().map(|l| Line::from(format!("  {}", l))));
        }
    };
    field("Name", &project.name);
    field("Description", &project.description);
    field("Instruction", &project.instruction);
    field("Base web URL", &project.base_web_url);
    field("Base API URL", &project.base_api_url);
    field(
        "Created by",
        project
            .created_by
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or_default(),
    );
    field("Handover", project.handover_text.as_deref().unwrap_or_default());
    field("To-do request", project.to_do_request.as_deref().unwrap_or_default());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_inline_error(f: &mut Frame, error: &str, area: Rect) {
    if area.height < 3 {
        return;
    }
    let line_area = Rect::new(area.x + 1, area.y + area.height - 2, area.width.saturating_sub(2), 1);
    let text = Paragraph::new(Span::styled(
        format!("Load failed: {}", error),
        Style::default().fg(Color::Red),
    ));
    f.render_widget(Clear, line_area);
    f.render_widget(text, line_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let loaded_at = match &state.screen {
        ScreenView::Projects(view) => view.loaded_at,
        ScreenView::Project(page) => page.loaded_at,
        ScreenView::Login { .. } => None,
    };

    let hints = match state.input_mode() {
        InputMode::Form { .. } => " Tab:next field | Ctrl+S:save | Esc:cancel ",
        InputMode::Checklist => " Space:toggle | Enter:save | Esc:cancel ",
        InputMode::Confirm => " y:confirm | n:cancel ",
        InputMode::Alert => " Enter:dismiss ",
        InputMode::Help => " any key:close ",
        InputMode::Normal => " Tab:tab | R:reload | L:sign out | ?:help | q:quit ",
    };

    let mut spans = Vec::new();
    if state.in_flight > 0 {
        spans.push(Span::styled(
            format!(" [{} loading] ", state.in_flight),
            Style::default().fg(Color::Cyan),
        ));
    }
    if !state.status.is_empty() {
        spans.push(Span::styled(
            format!(" {} ", state.status),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(at) = loaded_at {
        spans.push(Span::styled(
            format!(" updated {} ", at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_form_popup(f: &mut Frame, form: &FormView, area: Rect) {
    let popup_area = centered_rect(70, 80, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} ", form.title))
        .title_bottom(Line::from(" Ctrl+S:save  Esc:cancel ").right_aligned())
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(form_lines(form))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, prompt: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Confirm ")
        .style(Style::default().bg(Color::Black));

    let text = vec![
        Line::from(prompt.to_string()),
        Line::default(),
        Line::from(Span::styled("y: yes   n: no", Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn draw_links_popup(f: &mut Frame, links: &LinksView, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let title = if links.submitting {
        format!(" Parameters of document #{} (saving...) ", links.doc_id)
    } else {
        format!(" Parameters of document #{} ", links.doc_id)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title)
        .title_bottom(Line::from(" Space:toggle  Enter:save  Esc:cancel ").right_aligned())
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, popup_area);

    if links.rows.is_empty() {
        let text = if links.loading {
            "Loading parameters..."
        } else {
            "This project has no URL parameters yet."
        };
        f.render_widget(Paragraph::new(text).block(block), popup_area);
        return;
    }

    let items: Vec<ListItem> = links
        .rows
        .iter()
        .map(|row| {
            let (mark, color) = match (row.linked, row.checked) {
                (false, false) => ("[ ]", Color::Gray),
                (false, true) => ("[+]", Color::Green),
                (true, false) => ("[x]", Color::Cyan),
                (true, true) => ("[-]", Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(color).bold()),
                Span::raw(" "),
                parameter_span(&row.parameter),
                Span::styled(
                    format!("  {}", row.description),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(links.cursor));
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

fn draw_alert_popup(f: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ")
        .title_bottom(Line::from(" Enter:dismiss ").right_aligned())
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = r#"
 DOCDECK - Keyboard Shortcuts

 NAVIGATION
   Up/Down or k/j     Move selection
   Enter / Space      Open project, expand document or body
   l / h              Move into / out of a document's bodies
   Tab / Shift+Tab    Switch project tab
   Esc                Back

 EDITING
   n                  New project, document or parameter
   e                  Edit selection (expanded document or body)
   d                  Delete selection
   p                  Edit the document's URL parameters
   r / s              Add request / response body
   Ctrl+S             Save the open form

 GENERAL
   R / F5             Reload
   L                  Sign out
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
