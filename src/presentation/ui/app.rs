//! Main application orchestrator.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::{mpsc, watch};
use tokio::time::interval;
use tracing::{debug, info};

use crate::VERSION;
use crate::application::services::SessionObserver;
use crate::application::use_cases::{LoginUseCase, LogoutUseCase};
use crate::domain::errors::AuthError;
use crate::domain::ports::{DevicePrompt, SessionClient};
use crate::domain::{Notification, NotificationLevel, SessionState};
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{NotificationPopup, SessionView};

const NOTICE_TICK_RATE: Duration = Duration::from_millis(250);

const ERROR_TITLE: &str = "Error";
const UNAVAILABLE_MESSAGE: &str = "Authentication service is not initialized.";
const SIGN_IN_FAILED_MESSAGE: &str = "An error occurred while signing in.";
const SIGN_OUT_FAILED_MESSAGE: &str = "An error occurred while signing out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    SignIn,
    SignOut,
}

impl SessionAction {
    const fn failure_message(self) -> &'static str {
        match self {
            Self::SignIn => SIGN_IN_FAILED_MESSAGE,
            Self::SignOut => SIGN_OUT_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug)]
struct ActionOutcome {
    action: SessionAction,
    result: Result<(), AuthError>,
}

pub struct App {
    title: String,
    notice_duration: Duration,
    observer: SessionObserver,
    state_rx: watch::Receiver<SessionState>,
    login_use_case: LoginUseCase,
    logout_use_case: LogoutUseCase,
    notice: Option<Notification>,
    action_tx: mpsc::UnboundedSender<ActionOutcome>,
    action_rx: mpsc::UnboundedReceiver<ActionOutcome>,
    prompt_rx: mpsc::UnboundedReceiver<DevicePrompt>,
    action_in_flight: bool,
    running: bool,
}

impl App {
    /// Starts observing the session behind `client`.
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn new(
        client: SessionClient,
        ui: &UiConfig,
        prompt_rx: mpsc::UnboundedReceiver<DevicePrompt>,
    ) -> Self {
        let observer = SessionObserver::start(&client);
        let state_rx = observer.watch();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            title: ui.title.clone(),
            notice_duration: Duration::from_secs(ui.notice_duration),
            observer,
            state_rx,
            login_use_case: LoginUseCase::new(client.clone()),
            logout_use_case: LogoutUseCase::new(client),
            notice: None,
            action_tx,
            action_rx,
            prompt_rx,
            action_in_flight: false,
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing or reading terminal events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let result = self.run_event_loop(terminal).await;

        self.observer.shutdown().await;
        info!("Application exiting normally");
        result
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut notice_interval = interval(NOTICE_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(Ok(event)) = terminal_events.next() => {
                    if let Event::Key(key) = event
                        && self.handle_key(key) == EventResult::Exit
                    {
                        self.running = false;
                    }
                }

                Ok(()) = self.state_rx.changed() => {
                    self.handle_state_change();
                }

                Some(outcome) = self.action_rx.recv() => {
                    self.handle_outcome(outcome);
                }

                Some(prompt) = self.prompt_rx.recv() => {
                    self.handle_prompt(prompt);
                }

                _ = notice_interval.tick() => {
                    if !self.expire_notice() {
                        continue;
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.state_rx.borrow().clone();

        frame.render_widget(SessionView::new(&state, &self.title, VERSION), area);

        if let Some(notice) = &mut self.notice {
            notice.mark_displayed();
            frame.render_widget(NotificationPopup::new(notice), area);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if !EventHandler::is_press(&key) {
            return EventResult::Continue;
        }

        if self.notice.as_ref().is_some_and(|n| n.blocking) {
            self.notice = None;
            return EventResult::Consumed;
        }

        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        let action = match &*self.state_rx.borrow() {
            SessionState::Unauthenticated if EventHandler::is_login_event(&key) => {
                SessionAction::SignIn
            }
            SessionState::Authenticated(_) if EventHandler::is_logout_event(&key) => {
                SessionAction::SignOut
            }
            _ => return EventResult::Continue,
        };

        self.dispatch(action);
        EventResult::Consumed
    }

    fn dispatch(&mut self, action: SessionAction) {
        if self.action_in_flight {
            debug!(?action, "Session action already in flight, ignoring key");
            return;
        }
        self.action_in_flight = true;

        let tx = self.action_tx.clone();
        let login = self.login_use_case.clone();
        let logout = self.logout_use_case.clone();
        tokio::spawn(async move {
            let result = match action {
                SessionAction::SignIn => login.execute().await,
                SessionAction::SignOut => logout.execute().await,
            };
            let _ = tx.send(ActionOutcome { action, result });
        });
    }

    fn handle_outcome(&mut self, outcome: ActionOutcome) {
        self.action_in_flight = false;

        if let Err(e) = outcome.result {
            let message = if e.is_unavailable() {
                UNAVAILABLE_MESSAGE
            } else {
                outcome.action.failure_message()
            };
            self.notice = Some(Notification::alert(ERROR_TITLE, message));
        }
    }

    fn handle_state_change(&mut self) {
        let authenticated = {
            let state = self.state_rx.borrow_and_update();
            debug!(state = state.name(), "Session state changed");
            matches!(*state, SessionState::Authenticated(_))
        };

        if authenticated && self.notice.as_ref().is_some_and(|n| !n.blocking) {
            self.notice = None;
        }
    }

    fn handle_prompt(&mut self, prompt: DevicePrompt) {
        if self.notice.as_ref().is_some_and(|n| n.blocking) {
            return;
        }

        let message = format!(
            "Open {}\nand enter the code {}",
            prompt.verification_url, prompt.user_code
        );
        let duration = Duration::from_secs(prompt.expires_in).max(self.notice_duration);
        self.notice = Some(
            Notification::new(NotificationLevel::Info, "Sign in with Google", message)
                .with_duration(duration),
        );
    }

    /// Returns true if a notice was removed.
    fn expire_notice(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(Notification::is_expired) {
            self.notice = None;
            true
        } else {
            false
        }
    }
}
