pub mod ui;

use crate::api::StaffSession;
use crate::vim::InputBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// The staff login modal. Session handling is entirely the API's business
/// (cookies or otherwise); the client only keeps who signed in and where the
/// server pointed them.
pub struct LoginGate {
    pub username: InputBuffer,
    pub password: InputBuffer,
    pub focus: LoginField,
    pub session: Option<StaffSession>,
}

impl LoginGate {
    pub fn new() -> Self {
        Self {
            username: InputBuffer::new(),
            password: InputBuffer::masked(),
            focus: LoginField::Username,
            session: None,
        }
    }

    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn current_input_mut(&mut self) -> &mut InputBuffer {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Credentials for a submit, or the inline warning when they are not
    /// ready. The server decides whether the password itself is any good.
    pub fn credentials(&self) -> Result<(String, String), String> {
        if self.username.is_empty() {
            return Err("Username is required".to_string());
        }
        Ok((
            self.username.content().to_string(),
            self.password.content().to_string(),
        ))
    }

    pub fn complete(&mut self, session: StaffSession) {
        self.password.clear();
        self.session = Some(session);
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.password.clear();
        self.focus = LoginField::Username;
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::new()
    }
}
