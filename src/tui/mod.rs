//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the widget,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Waiting** (reply pending): draws every ~80ms so the placeholder pulses.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resizes, or
//!   results arriving from background tasks.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::sync::mpsc::unbounded_channel;

use crate::core::action::{Action, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Widget;
use crate::runtime::{self, Flow, TEARDOWN_TIMEOUT};
use crate::service::ChatService;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, Launcher, MessageListState, TitleBar};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub title_bar: TitleBar,
    pub launcher: Launcher,
    /// Terminals wider than this submit on plain Enter
    pub wide_min_columns: u16,
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new(title: &str, wide_min_columns: u16) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            title_bar: TitleBar::new(title.to_string(), String::new(), false),
            launcher: Launcher::new(title.to_string()),
            wide_min_columns,
            pulse_value: 0.0,
        }
    }

    /// Refresh width-dependent props before routing events.
    pub fn set_viewport_width(&mut self, columns: u16) {
        self.input_box.wide = columns > self.wide_min_columns;
    }
}

/// Translate one terminal event into at most one core action.
///
/// Presentation-only effects (editing, scrolling) are applied to `tui`
/// directly. The widget is only read: every state change goes through
/// `update()` with the returned action.
pub fn route_event(event: &TuiEvent, widget: &Widget, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Quit => return Some(Action::Quit),
        TuiEvent::TogglePanel => return Some(Action::TogglePanel),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if !widget.is_open {
        return match event {
            TuiEvent::MouseClick(col, row) if tui.launcher.toggler_contains(*col, *row) => {
                Some(Action::TogglePanel)
            }
            TuiEvent::Submit => Some(Action::TogglePanel),
            _ => None,
        };
    }

    match event {
        TuiEvent::Escape => Some(Action::ClosePanel),
        TuiEvent::MouseClick(col, row) => {
            if tui.title_bar.close_button_contains(*col, *row) {
                Some(Action::ClosePanel)
            } else if tui.input_box.send_button_contains(*col, *row) {
                tui.input_box
                    .handle_event(&TuiEvent::ForceSubmit)
                    .and_then(|e| accept_submit(e, widget, tui))
            } else {
                None
            }
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            None
        }
        _ => tui
            .input_box
            .handle_event(event)
            .and_then(|e| accept_submit(e, widget, tui)),
    }
}

/// Hand the input text to the core. The box is only emptied when the
/// widget can take a new message; otherwise the text stays put and the
/// reducer reports that a reply is still pending.
fn accept_submit(event: InputEvent, widget: &Widget, tui: &mut TuiState) -> Option<Action> {
    match event {
        InputEvent::SubmitRequested => {
            let text = tui.input_box.buffer.clone();
            if !widget.is_awaiting_reply() {
                tui.input_box.clear();
                tui.message_list.stick_to_bottom = true;
            }
            Some(Action::Submit(text))
        }
        InputEvent::ContentChanged => None,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

pub async fn run(config: ResolvedConfig, service: Arc<dyn ChatService>) -> std::io::Result<()> {
    let mut widget = Widget::from_config(&config);
    let mut tui = TuiState::new(&config.title, config.wide_min_columns);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    // Results from background tasks come back as actions
    let (tx, mut rx) = unbounded_channel::<Action>();

    let mut exit_session: Option<Option<String>> = None;
    if config.open_on_start
        && let Flow::Exit { session_id } =
            runtime::execute(update(&mut widget, Action::TogglePanel), &service, &tx)
    {
        exit_session = Some(session_id);
    }

    let start_time = Instant::now();
    let mut needs_redraw = true;

    while exit_session.is_none() {
        let animating = widget.is_open && widget.is_awaiting_reply();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &widget, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        tui.set_viewport_width(terminal.size()?.width);

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&event, &widget, &mut tui) else {
                continue;
            };
            debug!("Dispatching {:?}", action);
            if let Flow::Exit { session_id } =
                runtime::execute(update(&mut widget, action), &service, &tx)
            {
                exit_session = Some(session_id);
                break;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Flow::Exit { session_id } =
                runtime::execute(update(&mut widget, action), &service, &tx)
            {
                exit_session = Some(session_id);
            }
        }
    }

    drop(terminal_mode_guard);
    ratatui::restore();

    runtime::teardown(service.as_ref(), exit_session.flatten(), TEARDOWN_TIMEOUT).await;
    info!("Chat widget exited");
    Ok(())
}
