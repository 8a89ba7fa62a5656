//! UI module tests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use super::{
    app::App,
    handlers::{InputHandler, PanelHandler},
    types::{LogBuffer, Tab},
};
use crate::{
    problem::Operator,
    stats::{
        Window,
        test_support::{game, scores},
    },
};

/// Helper function to create a test app with a small history and no store.
fn create_test_app() -> App {
    let mut history = scores(&[12, 0, 30]);
    history.push(game(
        25,
        &[("7 × 8", 2.5), ("56 ÷ 7", 1.5), ("19 + 7", 1.0), ("42 − 17", 3.0)],
    ));

    App::new(history, Window::Last(10), LogBuffer::new(), None)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Render the app into an in-memory buffer and return its text.
fn render(app: &App) -> String {
    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod app_tests {
    use super::*;

    #[test]
    fn test_app_initialization() {
        let app = create_test_app();

        assert_eq!(app.tab, Tab::Overview);
        assert_eq!(app.window, Window::Last(10));
        assert_eq!(app.history.len(), 4);
        assert!(app.store.is_none());
    }

    #[test]
    fn test_windowed_takes_most_recent_games() {
        let mut app = create_test_app();
        app.window = Window::Last(1);

        let games = app.windowed();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].score, 25);
    }

    #[test]
    fn test_log_buffer() {
        let logs = LogBuffer::new();

        logs.push("Test message 1".to_string());
        logs.push("Test message 2".to_string());

        let lines = logs.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Test message 1");
        assert_eq!(lines[1], "Test message 2");
    }

    #[test]
    fn test_log_buffer_max_capacity() {
        let logs = LogBuffer::new();

        for i in 0..350 {
            logs.push(format!("Message {}", i));
        }

        let lines = logs.lines();
        assert_eq!(lines.len(), super::super::types::MAX_LOG_LINES);
        assert_eq!(lines.last().map(String::as_str), Some("Message 349"));
    }
}

#[cfg(test)]
mod tab_tests {
    use super::*;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Overview.next(), Tab::Operation(Operator::Add));
        assert_eq!(Tab::Operation(Operator::Div).next(), Tab::Overview);
        assert_eq!(Tab::Overview.previous(), Tab::Operation(Operator::Div));
    }
}

#[cfg(test)]
mod input_handler_tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();

        assert!(InputHandler::new(&mut app).handle_key(key(KeyCode::Char('q'))));
        assert!(InputHandler::new(&mut app).handle_key(key(KeyCode::Esc)));
        assert!(
            InputHandler::new(&mut app)
                .handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = create_test_app();

        assert!(!InputHandler::new(&mut app).handle_key(key(KeyCode::Tab)));
        assert_eq!(app.tab, Tab::Operation(Operator::Add));

        InputHandler::new(&mut app).handle_key(key(KeyCode::BackTab));
        InputHandler::new(&mut app).handle_key(key(KeyCode::Left));
        assert_eq!(app.tab, Tab::Operation(Operator::Div));
    }

    #[test]
    fn test_number_keys_jump_to_tab() {
        let mut app = create_test_app();

        InputHandler::new(&mut app).handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.tab, Tab::Operation(Operator::Mul));

        InputHandler::new(&mut app).handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.tab, Tab::Overview);
    }

    #[test]
    fn test_window_keys_cycle_choices() {
        let mut app = create_test_app();

        InputHandler::new(&mut app).handle_key(key(KeyCode::Char('w')));
        assert_eq!(app.window, Window::Last(25));

        InputHandler::new(&mut app).handle_key(key(KeyCode::Char('W')));
        InputHandler::new(&mut app).handle_key(key(KeyCode::Char('[')));
        assert_eq!(app.window, Window::Last(1));
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut app = create_test_app();

        assert!(!InputHandler::new(&mut app).handle_key(key(KeyCode::Char('z'))));
        assert_eq!(app.tab, Tab::Overview);
    }
}

#[cfg(test)]
mod panel_handler_tests {
    use super::*;

    #[test]
    fn test_select_same_tab_does_not_log() {
        let mut app = create_test_app();

        PanelHandler::new(&mut app).select_tab(Tab::Overview);
        assert!(app.logs.lines().is_empty());

        PanelHandler::new(&mut app).select_tab(Tab::Operation(Operator::Sub));
        assert_eq!(app.logs.lines().len(), 1);
    }

    #[test]
    fn test_sweep_without_store_filters_memory() {
        let mut app = create_test_app();

        PanelHandler::new(&mut app).sweep_zero_scores();

        assert_eq!(app.history.len(), 3);
        assert!(app.history.iter().all(|g| g.score > 0));
        assert!(
            app.logs
                .lines()
                .iter()
                .any(|l| l == "Removed 1 zero-score game(s)")
        );
    }

    #[test]
    fn test_reload_without_store_keeps_history() {
        let mut app = create_test_app();

        PanelHandler::new(&mut app).reload_history();

        assert_eq!(app.history.len(), 4);
        assert!(
            app.logs
                .lines()
                .iter()
                .any(|l| l == "No history store attached")
        );
    }
}

#[cfg(test)]
mod rendering_tests {
    use super::*;

    #[test]
    fn test_overview_renders_summary() {
        let app = create_test_app();

        let text = render(&app);

        assert!(text.contains("Total Games: 4"));
        // (12 + 0 + 30 + 25) / 4 = 16.75
        assert!(text.contains("Average Score: 17"));
        assert!(text.contains("#1: Score 30"));
    }

    #[test]
    fn test_chart_axis_uses_series_labels() {
        let series = crate::stats::score_series(&scores(&[4, 9, 16, 25]));
        assert_eq!(
            super::super::rendering::axis_labels(&series),
            vec!["1".to_string(), "4".to_string()]
        );

        let single = crate::stats::score_series(&scores(&[7]));
        assert_eq!(
            super::super::rendering::axis_labels(&single),
            vec!["1".to_string()]
        );
    }

    #[test]
    fn test_overview_renders_empty_history() {
        let app = App::new(Vec::new(), Window::Lifetime, LogBuffer::new(), None);

        let text = render(&app);

        assert!(text.contains("Total Games: 0"));
        assert!(text.contains("No completed games yet."));
    }

    #[test]
    fn test_operator_tab_renders_breakdown() {
        let mut app = create_test_app();
        app.tab = Tab::Operation(Operator::Mul);

        let text = render(&app);

        assert!(text.contains("Multiplication"));
        assert!(text.contains("2.50s"));
    }

    #[test]
    fn test_operator_tab_without_records_says_no_data() {
        let mut app = App::new(scores(&[5]), Window::Last(10), LogBuffer::new(), None);
        app.tab = Tab::Operation(Operator::Add);

        let text = render(&app);

        assert!(text.contains("No data yet"));
    }
}
