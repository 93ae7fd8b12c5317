use crossterm::event::KeyEvent;
use enroll_core::SubmissionResult;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// A submission came back from the server
    Submitted(SubmissionResult),

    /// Something bad happened; display it to the user
    Problem(String),
}
