/// Things that can happen to this app
mod action;
pub use action::Action;

/// The calendar for picking a birth date
mod date_picker;

/// Things the app wants done outside itself
mod effect;
pub use effect::{Effect, EffectContext};

/// The form itself, as drawn in the terminal
mod registration_form;
use registration_form::{RegistrationForm, Request};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use enroll_core::form::Status;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
#[derive(Debug, Default)]
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// The registration form
    form: RegistrationForm,

    /// Set once the user asks to leave
    exit: Option<ExitCode>,
}

impl App {
    /// Create a new instance of the app
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        self.form.render(body_area, frame);

        let status = match (self.form.form().status(), &self.status_line) {
            (Status::Submitting, _) => Paragraph::new("Submitting…"),
            (Status::Idle, Some(line)) => {
                Paragraph::new(line.as_str()).style(Style::new().fg(Color::Red))
            }
            (Status::Idle, None) => Paragraph::new(
                "tab/↓ next · shift-tab/↑ previous · enter select · ctrl-s submit · esc quit",
            )
            .style(Style::new().fg(Color::DarkGray)),
        };

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),

            Action::Submitted(result) => match self.form.finish(result) {
                Some(message) => {
                    self.status_line = None;

                    vec![Effect::NotifyRegistered(message)]
                }
                None => vec![],
            },

            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Handle a key press
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        let request = if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.exit = Some(ExitCode::SUCCESS);
                    return vec![];
                }
                KeyCode::Char('s') => self.form.submit(),
                _ => Request::Nothing,
            }
        } else if key.code == KeyCode::Esc && !self.form.is_picking() {
            self.exit = Some(ExitCode::SUCCESS);
            return vec![];
        } else {
            self.form.handle_event(key)
        };

        match request {
            Request::Nothing => vec![],
            Request::Submit(draft) => vec![Effect::Submit(draft)],
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exit
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use enroll_core::{ErrorMap, Field, SubmissionResult};

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Action {
        Action::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn escape_quits() {
        let mut app = App::new();

        app.handle(key(KeyCode::Esc));

        assert!(app.should_exit().is_some());
    }

    #[test]
    fn escape_in_picker_only_closes_it() {
        let mut app = App::new();
        for _ in 0..5 {
            app.handle(key(KeyCode::Tab));
        }
        app.handle(key(KeyCode::Enter));

        app.handle(key(KeyCode::Esc));

        assert!(app.should_exit().is_none());
    }

    #[test]
    fn ctrl_s_submits() {
        let mut app = App::new();
        app.handle(key(KeyCode::Char('a')));

        let effects = app.handle(ctrl('s'));

        match effects.as_slice() {
            [Effect::Submit(draft)] => assert_eq!(draft.get(Field::Username), "a"),
            other => panic!("expected one submit effect, got {other:?}"),
        }
    }

    #[test]
    fn double_submit_sends_twice() {
        let mut app = App::new();

        let first = app.handle(ctrl('s'));
        let second = app.handle(ctrl('s'));

        assert_eq!(first.len() + second.len(), 2);
    }

    #[test]
    fn registration_notifies() {
        let mut app = App::new();
        app.handle(ctrl('s'));

        let effects = app.handle(Action::Submitted(SubmissionResult::Registered(
            "OK".to_string(),
        )));

        assert!(
            matches!(effects.as_slice(), [Effect::NotifyRegistered(message)] if message == "OK"),
            "{effects:?}"
        );
    }

    #[test]
    fn rejection_and_failure_do_nothing_else() {
        let mut app = App::new();
        app.handle(ctrl('s'));
        app.handle(ctrl('s'));

        let errors: ErrorMap = [(Field::Email, vec!["Invalid email".to_string()])]
            .into_iter()
            .collect();

        assert!(app
            .handle(Action::Submitted(SubmissionResult::Rejected(errors)))
            .is_empty());
        assert!(app
            .handle(Action::Submitted(SubmissionResult::Failed(
                "connection refused".to_string()
            )))
            .is_empty());
        assert_eq!(app.status_line, None);
    }

    #[test]
    fn problems_show_in_status_line() {
        let mut app = App::new();

        app.handle(Action::Problem("terminal went away".to_string()));

        assert_eq!(app.status_line.as_deref(), Some("terminal went away"));
    }
}
