use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Widget;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::MessageList;

/// Rows the message list keeps even when the input has grown.
const MIN_LIST_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, widget: &Widget, tui: &mut TuiState) {
    let area = frame.area();

    if !widget.is_open {
        tui.launcher.render(frame, area);
        return;
    }

    // Input grows into whatever the header and a minimal list leave free
    let max_input = area.height.saturating_sub(1 + MIN_LIST_HEIGHT);
    let input_height = tui.input_box.calculate_height(area.width, max_input);

    use Constraint::{Length, Min};
    let [title_area, list_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(area);

    tui.title_bar.status_message.clone_from(&widget.status_message);
    tui.title_bar.connected = widget.session_id.is_some();
    tui.title_bar.render(frame, title_area);

    MessageList::new(
        &mut tui.message_list,
        &widget.greeting,
        &widget.entries,
        tui.pulse_value,
    )
    .render(frame, list_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Origin;
    use crate::test_support::test_widget;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_hidden_panel_draws_launcher() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let widget = test_widget();
        let mut tui = TuiState::new("Chatbot", 100);

        terminal.draw(|f| draw_ui(f, &widget, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Ctrl+T"));
        assert!(!text.contains("Hi there!"));
    }

    #[test]
    fn test_open_panel_draws_conversation() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut widget = test_widget();
        widget.is_open = true;
        widget.push_entry(Origin::Outgoing, "Hello");
        let mut tui = TuiState::new("Chatbot", 100);

        terminal.draw(|f| draw_ui(f, &widget, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Chatbot"));
        assert!(text.contains("Hi there!"));
        assert!(text.contains("Hello"));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_input_growth_leaves_room_for_list() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut widget = test_widget();
        widget.is_open = true;
        let mut tui = TuiState::new("Chatbot", 100);
        tui.input_box.buffer = "1\n2\n3\n4\n5\n6\n7\n8\n9".to_string();

        // Must not panic and the header must survive
        terminal.draw(|f| draw_ui(f, &widget, &mut tui)).unwrap();
        assert!(screen_text(&terminal).contains("Chatbot"));
    }
}
