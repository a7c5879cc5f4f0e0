//! Login gate in front of the staff pages. Identity itself comes from an external provider.

/// Where the gate sends signed out visitors.
pub const LOGIN_PATH: &str = "/";

/// Identity provider state as seen by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session<U> {
    Loading,
    SignedOut,
    SignedIn(U),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Access<'a, U> {
    /// Provider hasn't answered yet, show a loading indicator.
    Wait,
    Redirect(&'static str),
    Render(&'a U),
}

pub fn gate<U>(session: &Session<U>) -> Access<'_, U> {
    match session {
        Session::Loading => Access::Wait,
        Session::SignedOut => Access::Redirect(LOGIN_PATH),
        Session::SignedIn(user) => Access::Render(user),
    }
}
