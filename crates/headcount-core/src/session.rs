//! Application session: who is logged in and which screen is showing.
//!
//! `LoggedOut → LoggedIn(Register | History)`. Logout from anywhere goes
//! back to `LoggedOut`. The lookup engine holds no session state.

use tracing::info;

use crate::config::AuthConfig;
use crate::errors::SessionError;

/// Screens available once logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Register,
    History,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    LoggedOut,
    LoggedIn { user: String, view: View },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: State,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check credentials against the configured user table and land on
    /// the register screen. A failed attempt leaves the state untouched.
    pub fn login(&mut self, user: &str, password: &str, auth: &AuthConfig) -> Result<(), SessionError> {
        let user = user.trim();
        let password = password.trim();
        if !auth.verify(user, password) {
            info!(user, "login rejected");
            return Err(SessionError::InvalidCredentials);
        }
        info!(user, "login");
        self.state = State::LoggedIn {
            user: user.to_string(),
            view: View::Register,
        };
        Ok(())
    }

    pub fn logout(&mut self) {
        if let State::LoggedIn { user, .. } = &self.state {
            info!(user = %user, "logout");
        }
        self.state = State::LoggedOut;
    }

    pub fn show_history(&mut self) -> Result<(), SessionError> {
        self.switch_to(View::History)
    }

    pub fn show_register(&mut self) -> Result<(), SessionError> {
        self.switch_to(View::Register)
    }

    fn switch_to(&mut self, target: View) -> Result<(), SessionError> {
        match &mut self.state {
            State::LoggedIn { view, .. } => {
                *view = target;
                Ok(())
            }
            State::LoggedOut => Err(SessionError::NotLoggedIn),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, State::LoggedIn { .. })
    }

    pub fn current_user(&self) -> Option<&str> {
        match &self.state {
            State::LoggedIn { user, .. } => Some(user),
            State::LoggedOut => None,
        }
    }

    /// Current screen; `None` when logged out (the login screen).
    pub fn view(&self) -> Option<View> {
        match &self.state {
            State::LoggedIn { view, .. } => Some(*view),
            State::LoggedOut => None,
        }
    }

    /// The logged-in user, or `NotLoggedIn`.
    pub fn require_user(&self) -> Result<&str, SessionError> {
        self.current_user().ok_or(SessionError::NotLoggedIn)
    }
}
