//! # TUI Components
//!
//! All UI components for the terminal widget.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: panel header with status and close button
//! - `Message`: one chat bubble
//! - `Launcher`: the hidden-panel screen with the toggler button
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `InputBox`: auto-growing text input with a send button
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Components receive external data as props (struct fields or
//! constructor arguments), never by reaching into `Widget` directly.
//! Components that can be clicked remember their hit areas from the last
//! render so the event loop can route mouse clicks.

pub mod input_box;
pub mod launcher;
pub mod message;
pub mod message_list;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use launcher::Launcher;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
