use crate::admin::AdminPanel;
use crate::api::{ApiClient, ApiError, BookingRequest};
use crate::auth::{LoginField, LoginGate};
use crate::booking::{BookingWizard, WizardStep, FIELD_COUNT};
use crate::config::AppConfig;
use crate::tracker::StatusTracker;
use crate::ui::{StatusBarState, Theme};
use crate::vim::{parse_command, Command, InputBuffer, ModeAction, VimMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

/// Which main panel is on screen. The login modal overlays any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Booking,
    Tracker,
    Dashboard,
}

pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// Work the event loop must do with the API client. Everything else mutates
/// the model synchronously inside `handle_key`.
#[derive(Debug, PartialEq)]
pub enum AppAction {
    SubmitBooking(BookingRequest),
    Lookup(String),
    Login { username: String, password: String },
    LoadBookings,
    UpdateStatus { booking_id: i64, status: String },
}

/// Top-level application model. The drawing code projects this; nothing is
/// ever read back out of the rendered frame.
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,

    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,

    pub screen: Screen,
    pub wizard: BookingWizard,
    pub tracker: StatusTracker,
    pub dashboard: AdminPanel,
    pub login: LoginGate,

    pub show_login: bool,
    pub show_help: bool,
    pub message: Option<Message>,

    /// True while a request is being awaited. Input is dropped for the
    /// duration, so a second trigger can never race the first.
    pub in_flight: bool,
    pub should_exit: bool,

    pub status_bar: StatusBarState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let wizard = BookingWizard::new(config.services.available.clone());
        let tracker = StatusTracker::new(config.tracking.stages.clone());

        info!(
            "Initialized with {} services and {} lifecycle stages",
            config.services.available.len(),
            config.tracking.stages.len()
        );

        Self {
            config,
            theme: Theme::default(),
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            screen: Screen::Booking,
            wizard,
            tracker,
            dashboard: AdminPanel::new(),
            login: LoginGate::new(),
            show_login: false,
            show_help: false,
            message: None,
            in_flight: false,
            should_exit: false,
            status_bar: StatusBarState::service_selection(),
        }
    }

    pub fn set_error(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: false,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        // A pending request owns the loop; drop everything until it resolves.
        if self.in_flight {
            return None;
        }

        // Any key dismisses a leftover message
        if self.message.is_some() {
            self.message = None;
        }

        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::Char('q') {
                self.show_help = false;
            }
            self.update_status_bar();
            return None;
        }

        let action = if self.show_login {
            self.handle_login_key(key)
        } else {
            match self.vim_mode {
                VimMode::Normal => self.handle_normal_mode(key),
                VimMode::Insert => self.handle_insert_mode(key),
                VimMode::Command => self.handle_command_mode(key),
            }
        };

        self.update_status_bar();
        action
    }

    // ── Login modal ────────────────────────────────────────────────────

    fn handle_login_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if self.vim_mode == VimMode::Insert {
            match key.code {
                KeyCode::Esc => {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                }
                KeyCode::Enter => {
                    if self.login.focus == LoginField::Username && !self.login.username.is_empty()
                    {
                        self.login.focus = LoginField::Password;
                    } else {
                        self.vim_mode = VimMode::Normal;
                        return self.submit_login_form();
                    }
                }
                KeyCode::Tab | KeyCode::BackTab => self.login.next_field(),
                KeyCode::Backspace => {
                    self.login.current_input_mut().delete_back();
                }
                KeyCode::Delete => {
                    self.login.current_input_mut().delete_forward();
                }
                KeyCode::Left => self.login.current_input_mut().move_left(),
                KeyCode::Right => self.login.current_input_mut().move_right(),
                KeyCode::Home => self.login.current_input_mut().move_start(),
                KeyCode::End => self.login.current_input_mut().move_end(),
                KeyCode::Char(c) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        if c == 'u' {
                            self.login.current_input_mut().clear();
                        }
                    } else {
                        self.login.current_input_mut().insert(c);
                    }
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.show_login = false;
            }
            KeyCode::Char('i') | KeyCode::Char('a') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
            }
            KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Down | KeyCode::Up
            | KeyCode::Tab | KeyCode::BackTab => self.login.next_field(),
            KeyCode::Enter => return self.submit_login_form(),
            _ => {}
        }
        None
    }

    fn submit_login_form(&mut self) -> Option<AppAction> {
        match self.login.credentials() {
            Ok((username, password)) => Some(AppAction::Login { username, password }),
            Err(msg) => {
                self.set_error(msg);
                None
            }
        }
    }

    // ── Normal mode ────────────────────────────────────────────────────

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterCommand);
                self.command_buffer.clear();
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
            }

            KeyCode::Char('i') | KeyCode::Char('a') => {
                if self.current_input_mut().is_some() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::EnterInsert);
                }
            }

            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.navigate_down(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.navigate_up(),

            KeyCode::Char('h') | KeyCode::Left => {
                if let Some(input) = self.current_input_mut() {
                    input.move_left();
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if let Some(input) = self.current_input_mut() {
                    input.move_right();
                }
            }
            KeyCode::Char('0') => {
                if let Some(input) = self.current_input_mut() {
                    input.move_start();
                }
            }
            KeyCode::Char('$') => {
                if let Some(input) = self.current_input_mut() {
                    input.move_end();
                }
            }
            KeyCode::Char('x') => {
                if let Some(input) = self.current_input_mut() {
                    input.delete_forward();
                }
            }

            KeyCode::Char(' ') => {
                if self.screen == Screen::Booking
                    && self.wizard.step == WizardStep::ServiceSelection
                {
                    self.wizard.select_highlighted();
                }
            }

            KeyCode::Char('r') => {
                if self.screen == Screen::Dashboard && self.login.signed_in() {
                    return Some(AppAction::LoadBookings);
                }
            }

            KeyCode::Esc => {
                if self.screen == Screen::Dashboard && self.dashboard.show_status_picker {
                    self.dashboard.close_picker();
                } else if self.screen == Screen::Booking {
                    self.wizard.retreat();
                }
            }

            KeyCode::Enter => return self.handle_enter(),

            _ => {}
        }
        None
    }

    fn handle_enter(&mut self) -> Option<AppAction> {
        match self.screen {
            Screen::Booking => match self.wizard.step {
                WizardStep::ServiceSelection | WizardStep::CustomerForm => {
                    if let Err(warning) = self.wizard.advance() {
                        self.set_error(warning);
                    }
                    None
                }
                WizardStep::Confirmation => self
                    .wizard
                    .request()
                    .map(AppAction::SubmitBooking),
            },
            Screen::Tracker => self.start_lookup(),
            Screen::Dashboard => {
                if !self.login.signed_in() {
                    self.show_login = true;
                    self.vim_mode = VimMode::Insert;
                    return None;
                }
                if self.dashboard.show_status_picker {
                    let stages = &self.config.tracking.stages;
                    let status = stages.get(self.dashboard.picker_cursor).cloned()?;
                    let booking_id = self.dashboard.selected_booking()?.id;
                    self.dashboard.close_picker();
                    Some(AppAction::UpdateStatus { booking_id, status })
                } else {
                    self.dashboard.open_picker(&self.config.tracking.stages);
                    None
                }
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.screen {
            Screen::Booking => match self.wizard.step {
                WizardStep::ServiceSelection => self.wizard.cursor_down(),
                WizardStep::CustomerForm => self.wizard.focus_next_field(),
                WizardStep::Confirmation => {}
            },
            Screen::Tracker => {}
            Screen::Dashboard => {
                if self.dashboard.show_status_picker {
                    self.dashboard
                        .picker_down(self.config.tracking.stages.len());
                } else {
                    self.dashboard.select_down();
                }
            }
        }
    }

    fn navigate_up(&mut self) {
        match self.screen {
            Screen::Booking => match self.wizard.step {
                WizardStep::ServiceSelection => self.wizard.cursor_up(),
                WizardStep::CustomerForm => self.wizard.focus_prev_field(),
                WizardStep::Confirmation => {}
            },
            Screen::Tracker => {}
            Screen::Dashboard => {
                if self.dashboard.show_status_picker {
                    self.dashboard.picker_up();
                } else {
                    self.dashboard.select_up();
                }
            }
        }
    }

    // ── Insert mode ────────────────────────────────────────────────────

    fn handle_insert_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
            }
            KeyCode::Enter => {
                match self.screen {
                    Screen::Booking => {
                        // Enter moves through the form; on the last field it
                        // tries to advance to the confirmation panel.
                        if self.wizard.focused_field + 1 < FIELD_COUNT {
                            self.wizard.focus_next_field();
                        } else {
                            self.vim_mode = VimMode::Normal;
                            if let Err(warning) = self.wizard.advance() {
                                self.set_error(warning);
                            }
                        }
                    }
                    Screen::Tracker => {
                        self.vim_mode = VimMode::Normal;
                        return self.start_lookup();
                    }
                    Screen::Dashboard => {
                        self.vim_mode = VimMode::Normal;
                    }
                }
            }
            KeyCode::Tab => {
                if self.screen == Screen::Booking {
                    self.wizard.focus_next_field();
                }
            }
            KeyCode::BackTab => {
                if self.screen == Screen::Booking {
                    self.wizard.focus_prev_field();
                }
            }
            KeyCode::Backspace => {
                self.wizard.note_edit();
                if let Some(input) = self.current_input_mut() {
                    input.delete_back();
                }
            }
            KeyCode::Delete => {
                self.wizard.note_edit();
                if let Some(input) = self.current_input_mut() {
                    input.delete_forward();
                }
            }
            KeyCode::Left => {
                if let Some(input) = self.current_input_mut() {
                    input.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(input) = self.current_input_mut() {
                    input.move_right();
                }
            }
            KeyCode::Home => {
                if let Some(input) = self.current_input_mut() {
                    input.move_start();
                }
            }
            KeyCode::End => {
                if let Some(input) = self.current_input_mut() {
                    input.move_end();
                }
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'u' => {
                            if let Some(input) = self.current_input_mut() {
                                input.clear();
                            }
                        }
                        'a' => {
                            if let Some(input) = self.current_input_mut() {
                                input.move_start();
                            }
                        }
                        'e' => {
                            if let Some(input) = self.current_input_mut() {
                                input.move_end();
                            }
                        }
                        _ => {}
                    }
                } else {
                    self.wizard.note_edit();
                    if let Some(input) = self.current_input_mut() {
                        input.insert(c);
                    }
                }
            }
            _ => {}
        }
        None
    }

    // ── Command mode ───────────────────────────────────────────────────

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<AppAction> {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_buffer.content().to_string();
                self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                self.command_buffer.clear();
                return self.execute_command(&cmd);
            }
            KeyCode::Backspace => {
                if self.command_buffer.is_empty() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                } else {
                    self.command_buffer.delete_back();
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.insert(c);
            }
            _ => {}
        }
        None
    }

    fn execute_command(&mut self, cmd: &str) -> Option<AppAction> {
        match parse_command(cmd) {
            Ok(Command::Book) => {
                self.screen = Screen::Booking;
            }
            Ok(Command::Track(key)) => {
                self.screen = Screen::Tracker;
                if let Some(key) = key {
                    self.tracker.prefill(&key);
                    return self.start_lookup();
                }
            }
            Ok(Command::Login) => {
                if self.login.signed_in() {
                    self.screen = Screen::Dashboard;
                } else {
                    self.show_login = true;
                    self.vim_mode = VimMode::Insert;
                }
            }
            Ok(Command::Logout) => {
                self.login.logout();
                self.dashboard = AdminPanel::new();
                if self.screen == Screen::Dashboard {
                    self.screen = Screen::Booking;
                }
                self.set_info("Signed out".to_string());
            }
            Ok(Command::Next) => {
                if self.screen == Screen::Booking {
                    return self.handle_enter();
                }
            }
            Ok(Command::Back) => {
                if self.screen == Screen::Booking {
                    self.wizard.retreat();
                }
            }
            Ok(Command::Lookup) => {
                self.screen = Screen::Tracker;
                return self.start_lookup();
            }
            Ok(Command::Refresh) => {
                if self.login.signed_in() {
                    self.screen = Screen::Dashboard;
                    return Some(AppAction::LoadBookings);
                }
                self.set_error("Sign in first (:login)".to_string());
            }
            Ok(Command::Help) => {
                self.show_help = true;
            }
            Ok(Command::Quit) => {
                self.should_exit = true;
            }
            Err(e) => {
                self.set_error(e.to_string());
            }
        }
        None
    }

    // ── Shared helpers ─────────────────────────────────────────────────

    /// Trim and validate the tracker key. The empty-key case renders inline
    /// and issues no request.
    fn start_lookup(&mut self) -> Option<AppAction> {
        self.tracker.begin_lookup().map(AppAction::Lookup)
    }

    fn current_input_mut(&mut self) -> Option<&mut InputBuffer> {
        if self.show_login {
            return Some(self.login.current_input_mut());
        }
        match self.screen {
            Screen::Booking if self.wizard.step == WizardStep::CustomerForm => {
                Some(self.wizard.form.field_mut(self.wizard.focused_field))
            }
            Screen::Tracker => Some(&mut self.tracker.key),
            _ => None,
        }
    }

    fn update_status_bar(&mut self) {
        self.status_bar = if self.in_flight {
            StatusBarState::busy()
        } else if self.show_login {
            StatusBarState::login(self.vim_mode)
        } else {
            match self.screen {
                Screen::Booking => match self.wizard.step {
                    WizardStep::ServiceSelection => StatusBarState::service_selection(),
                    WizardStep::CustomerForm => StatusBarState::customer_form(self.vim_mode),
                    WizardStep::Confirmation => StatusBarState::confirmation(),
                },
                Screen::Tracker => StatusBarState::tracker(self.vim_mode),
                Screen::Dashboard => {
                    StatusBarState::dashboard(self.dashboard.show_status_picker)
                }
            }
        };
    }

    // ── API-backed transitions, driven by the event loop ───────────────

    /// Flag the in-flight guard and show the interim text. The caller must
    /// draw one frame before awaiting so the indicator is actually visible.
    pub fn begin_request(&mut self, text: &str) {
        self.in_flight = true;
        self.set_info(text.to_string());
        self.status_bar = StatusBarState::busy();
    }

    /// Returns the submitted phone number on success so the loop can hand off
    /// to the tracker after the configured delay.
    pub async fn submit_booking(
        &mut self,
        client: &ApiClient,
        request: &BookingRequest,
    ) -> Option<String> {
        let result = client.book(request).await;
        self.in_flight = false;

        match result {
            Ok(confirmation) => {
                info!(
                    booking_id = ?confirmation.booking_id,
                    "booking accepted"
                );
                self.set_info(confirmation.message);
                Some(request.phone.clone())
            }
            Err(ApiError::Conflict(msg)) => {
                // Stay on the confirmation panel; the user picks another slot.
                let text = if msg.is_empty() {
                    "That slot is already booked".to_string()
                } else {
                    msg
                };
                self.set_error(text);
                None
            }
            Err(e) => {
                warn!("booking failed: {e}");
                self.set_error(format!(
                    "Error: {}",
                    e.server_message().unwrap_or("booking failed")
                ));
                None
            }
        }
    }

    /// Post-booking handoff: show the tracker with the key pre-filled.
    pub fn open_tracker_with(&mut self, phone: &str) {
        self.message = None;
        self.screen = Screen::Tracker;
        self.tracker.prefill(phone);
    }

    pub async fn run_lookup(&mut self, client: &ApiClient, key: &str) {
        let result = client.track(key).await;
        self.in_flight = false;
        self.tracker.finish_lookup(key, result);
    }

    /// True on success; the loop then waits the login delay and opens the
    /// dashboard.
    pub async fn submit_login(
        &mut self,
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> bool {
        let result = client.login(username, password).await;
        self.in_flight = false;

        match result {
            Ok(session) => {
                info!(redirect = %session.redirect, "staff login accepted");
                self.set_info(format!("Welcome, {}", session.fullname));
                self.login.complete(session);
                true
            }
            Err(e) => {
                warn!("login failed: {e}");
                self.set_error(e.server_message().unwrap_or("Login failed").to_string());
                self.login.password.clear();
                false
            }
        }
    }

    pub fn open_dashboard(&mut self) {
        self.message = None;
        self.show_login = false;
        self.screen = Screen::Dashboard;
    }

    pub async fn load_bookings(&mut self, client: &ApiClient) {
        let result = client.bookings().await;
        self.in_flight = false;

        match result {
            Ok(bookings) => {
                info!("loaded {} bookings", bookings.len());
                self.dashboard.set_bookings(bookings);
            }
            Err(e) => {
                warn!("loading bookings failed: {e}");
                self.set_error(format!(
                    "Could not load bookings: {}",
                    e.server_message().unwrap_or("request failed")
                ));
            }
        }
    }

    /// True on success; the loop reloads the booking list afterwards.
    pub async fn apply_status_update(
        &mut self,
        client: &ApiClient,
        booking_id: i64,
        status: &str,
    ) -> bool {
        let result = client.update_status(booking_id, status).await;
        self.in_flight = false;

        match result {
            Ok(message) => {
                self.set_info(message);
                true
            }
            Err(e) => {
                warn!("status update failed: {e}");
                self.set_error(format!(
                    "Update failed: {}",
                    e.server_message().unwrap_or("request failed")
                ));
                false
            }
        }
    }
}
