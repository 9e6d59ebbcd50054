mod app;
mod config;
mod event;
mod harness;
mod lab;
mod logging;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::App;
use config::Config;
use event::{AppEvent, EventHandler};
use harness::OutputFormat;
use lab::calc::NumberPolicy;
use lab::nav::Focus;
use ui::components::alert::AlertPopup;
use ui::components::controls::Controls;
use ui::components::input_panel::InputPanel;
use ui::components::results_table::ResultsTable;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "condlab",
    version,
    about = "Heat conduction lab calculator: heat input, thermal resistance, conductivity and flux"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Prefill the number of test cases (1-10)")]
    cases: Option<String>,

    #[arg(long, value_name = "PATH", help = "Config file to use instead of the default")]
    config: Option<PathBuf>,

    #[arg(long, help = "Treat unparseable readings as NaN instead of rejecting them")]
    lenient: bool,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Run headless on a JSON/TOML file of named values and print the results"
    )]
    input: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, help = "Output format for --input")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if cli.lenient {
        config.strict_numbers = false;
    }
    logging::init(&config.log_level, &PathBuf::from(&config.log_file));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting condlab");

    let policy = config.number_policy();

    if let Some(path) = &cli.input {
        let output = harness::run_file(path, policy, cli.format)?;
        io::stdout().write_all(output.as_bytes())?;
        return Ok(());
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(
            theme = %config.theme,
            available = ?Theme::available_themes(),
            "unknown theme, using default"
        );
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let mut app = App::new(&config, theme, policy);
    if let Some(cases) = &cli.cases {
        app.count_input = ui::line_input::LineInput::new(cases);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = ?err, "terminal session failed");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => {
                if app.alert.is_none() {
                    app.paste(&text);
                }
            }
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            tracing::info!("quit");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // An open alert swallows the key that dismisses it.
    if app.alert.is_some() {
        app.dismiss_alert();
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.handle_enter(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::PageDown => app.focus_case_step(true),
        KeyCode::PageUp => app.focus_case_step(false),
        _ => {
            app.edit(key);
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = [
        "[Enter] Confirm / next field",
        "[Tab/↓] Next",
        "[S-Tab/↑] Previous",
        "[PgDn/PgUp] Next/prev case",
        "[Esc] Quit",
    ];
    let hint_lines = pack_hint_lines(&hints, area.width as usize);

    let results_table = app
        .results
        .as_deref()
        .map(|results| ResultsTable::new(results, app.theme));
    let results_height = results_table
        .as_ref()
        .map(|table| table.required_height(area.width));
    let layout = AppLayout::new(area, results_height, hint_lines.len() as u16);

    let policy = match app.policy {
        NumberPolicy::Strict => "strict numbers",
        NumberPolicy::Lenient => "lenient numbers",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " condlab ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" Heat conduction through a composite slab | {policy}"),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let controls = Controls::new(
        &app.count_input,
        app.focus,
        app.field_count() > 0,
        app.theme,
    );
    frame.render_widget(controls, layout.controls);

    match &app.form {
        Some(form) => {
            let focused = match app.focus {
                Focus::Field(i) => Some(i),
                _ => None,
            };
            let panel = InputPanel::new(form, &app.editors, focused, app.theme)
                .compact(layout.tier.compact_labels());
            frame.render_widget(panel, layout.inputs);
        }
        None => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "  Enter the number of test cases and press Enter to create the input fields.",
                Style::default().fg(colors.muted()),
            )));
            frame.render_widget(hint, layout.inputs);
        }
    }

    if let (Some(table), Some(results_area)) = (results_table, layout.results) {
        frame.render_widget(table, results_area);
    }

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);

    if let Some(alert) = &app.alert {
        frame.render_widget(AlertPopup::new(alert, app.theme), area);
    }
}
