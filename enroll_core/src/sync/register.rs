use crate::{locale, Draft, Field};
use serde::{Deserialize, Serialize};

/// The request to register for a course. Keys match `Field::key` exactly;
/// every field is always sent, empty or not.
#[derive(Serialize)]
pub struct Req<'a> {
    /// Given name
    pub first_name: &'a str,

    /// Patronymic
    pub middle_name: &'a str,

    /// Family name
    pub last_name: &'a str,

    /// `YYYY-MM-DD`, or empty if no date was picked
    pub birth_date: String,

    /// Contact phone number
    pub phone: &'a str,

    /// Contact email address
    pub email: &'a str,

    /// City of residence
    pub city: &'a str,

    /// Login name
    pub username: &'a str,

    /// Plaintext password to use for login.
    pub password: &'a str,
}

impl<'a> From<&'a Draft> for Req<'a> {
    fn from(draft: &'a Draft) -> Self {
        Self {
            first_name: draft.text(Field::FirstName),
            middle_name: draft.text(Field::MiddleName),
            last_name: draft.text(Field::LastName),
            birth_date: locale::wire(draft.birth_date()),
            phone: draft.text(Field::Phone),
            email: draft.text(Field::Email),
            city: draft.text(Field::City),
            username: draft.text(Field::Username),
            password: draft.text(Field::Password),
        }
    }
}

/// Result of registering.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resp {
    /// Confirmation to show the user. Empty if the server didn't send one.
    #[serde(default)]
    pub message: String,
}

/// Where the register endpoint lives.
pub const PATH: &str = "/api/register-course";
