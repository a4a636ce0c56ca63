use std::io;
use std::str::FromStr;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use strum::VariantNames;
use tokio::sync::mpsc;
#[cfg(feature = "dev")]
use tui_textarea::Input;
#[cfg(feature = "dev")]
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::SlashCommand;
use crate::domain::models::SubmitOutcome;
use crate::domain::models::TextArea;
use crate::domain::models::Variant;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::BubbleList;
use crate::domain::services::Scroll;

/// Applies a chat command. Returns true when the session should end.
fn handle_slash_command(app_state: &mut AppState, command: &SlashCommand) -> bool {
    if command.is_quit() {
        return true;
    }

    if command.is_clear() {
        app_state.clear();
        return false;
    }

    if command.is_variant() {
        let name = command.args.first().map(|e| return e.as_str()).unwrap_or("");
        match Variant::from_str(name) {
            Ok(variant) => {
                app_state.set_variant(variant);
            }
            Err(_) => {
                app_state.surface_error(&format!(
                    "🚨 Unknown variant '{name}'. Choose one of: {}",
                    Variant::VARIANTS.join(", ")
                ));
            }
        }
    }

    return false;
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::new(app_state.variant());
    let mut loading = Loading::default();
    let mut bubble_list = BubbleList::default();
    let mut scroll = Scroll::default();

    #[cfg(feature = "dev")]
    {
        let test_str = "A small reading nook next to a window, with warm light.";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            bubble_list.set_turns(
                app_state.conversation.all(),
                layout[0].width.saturating_sub(1) as usize,
            );
            scroll.set_state(bubble_list.len(), layout[0].height.saturating_sub(1));

            bubble_list.render(
                frame,
                layout[0],
                app_state.variant().title(),
                scroll.position,
            );
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scroll.scrollbar_state,
            );

            if let Some(message) = app_state.state().error() {
                frame.render_widget(
                    Paragraph::new(message.to_string()).style(
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD),
                    ),
                    layout[1],
                );
            }

            if app_state.is_sending() {
                loading.render(frame, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::CompletionSettled(res) => {
                app_state.settle(res);
                scroll.last();
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.is_sending() {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if let Some(command) = SlashCommand::parse(&input_str) {
                    if handle_slash_command(app_state, &command) {
                        break;
                    }
                    textarea = TextArea::new(app_state.variant());
                    continue;
                }

                if let SubmitOutcome::Accepted(prompt) = app_state.begin_submit(&input_str) {
                    textarea = TextArea::new(app_state.variant());
                    scroll.last();
                    tx.send(Action::CompletionRequest(prompt))?;
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.is_sending() {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.is_sending() {
                    for (idx, line) in text.replace('\r', "").split('\n').enumerate() {
                        if idx > 0 {
                            textarea.insert_newline();
                        }
                        textarea.insert_str(line);
                    }
                }
            }
            Event::UIScrollDown() => {
                scroll.down();
            }
            Event::UIScrollUp() => {
                scroll.up();
            }
            Event::UIScrollPageDown() => {
                scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                scroll.up_page();
            }
            Event::UITick() => {
                if app_state.is_sending() {
                    loading.tick();
                }
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    mut app_state: AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
