use crate::config::Config;
use crate::domain::{Appearance, TaskId, UiMode};
use crate::focus::StartOutcome;
use crate::notifications::{Answer, DesktopNotifier};
use crate::persistence::{save_appearance, KeyValueStore};
use crate::session::Session;
use crate::ticker::Ticker;
use std::time::Instant;

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    /// Row being edited; None when adding
    pub editing_index: Option<usize>,
}

/// Storage handle the running app writes through
pub type Storage = Box<dyn KeyValueStore>;

/// Main application state
pub struct AppState {
    pub session: Session<Storage>,
    pub config: Config,
    pub appearance: Appearance,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Task the user is being asked to move the timer to
    pub pending_switch: Option<TaskId>,
    /// Last phase-completion message, shown until dismissed
    pub alert: Option<String>,
    pub ticker: Ticker,
    notifier: DesktopNotifier,
}

impl AppState {
    pub fn new(session: Session<Storage>, config: Config, appearance: Appearance) -> Self {
        let notifier = DesktopNotifier {
            enabled: config.notifications,
        };

        Self {
            session,
            config,
            appearance,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            pending_switch: None,
            alert: None,
            ticker: Ticker::new(),
            notifier,
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.session.tasks().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.tasks().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            text: String::new(),
            editing_index: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form pre-filled with the selected task's text
    pub fn start_edit_task(&mut self) {
        if let Some(task) = self.session.tasks().get(self.selected_index) {
            self.input_form = Some(InputFormState {
                text: task.text.clone(),
                editing_index: Some(self.selected_index),
            });
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    /// Submit input form: add a task, or save the edited text
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            let result = match form.editing_index {
                Some(index) => self.session.edit(index, &form.text),
                None => self.session.add(&form.text).map(|_| {
                    self.selected_index = self.session.tasks().len().saturating_sub(1);
                }),
            };
            if let Err(e) = result {
                tracing::debug!(error = %e, "form submission ignored");
            }
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_completed_selected(&mut self) {
        if let Err(e) = self.session.toggle_completed(self.selected_index) {
            tracing::debug!(error = %e, "toggle ignored");
        }
    }

    /// Delete the selected task; the timer stops if it was attached to it
    pub fn delete_selected(&mut self) {
        match self.session.delete(self.selected_index) {
            Ok(task) => tracing::debug!(task = %task.id, "task deleted"),
            Err(e) => tracing::debug!(error = %e, "delete ignored"),
        }
        self.clamp_selection();
        self.sync_ticker(Instant::now(), false);
    }

    /// Start the timer on the selected task, asking first if it would switch tasks
    pub fn start_selected(&mut self) {
        self.start_selected_at(Instant::now());
    }

    /// `start_selected` with the first tick counted from `now`
    pub fn start_selected_at(&mut self, now: Instant) {
        let Some(task) = self.session.tasks().get(self.selected_index) else {
            return;
        };
        let id = task.id;

        if self.config.confirm_switch && self.session.needs_confirmation(self.selected_index) {
            self.pending_switch = Some(id);
            self.ui_mode = UiMode::ConfirmSwitch;
            return;
        }

        self.start_at(self.selected_index, now);
    }

    /// Answer to the switch prompt
    pub fn resolve_switch(&mut self, confirmed: bool) {
        let pending = self.pending_switch.take();
        self.ui_mode = UiMode::Normal;

        if !confirmed {
            return;
        }
        if let Some(index) = pending.and_then(|id| self.session.store().index_of(id)) {
            self.start_at(index, Instant::now());
        }
    }

    fn start_at(&mut self, index: usize, now: Instant) {
        match self.session.start(index, &mut Answer(true)) {
            Ok(StartOutcome::Switched { from }) => {
                tracing::debug!(%from, "timer moved from another task")
            }
            Ok(outcome) => tracing::debug!(?outcome, "start requested"),
            Err(e) => tracing::debug!(error = %e, "start ignored"),
        }
        self.sync_ticker(now, true);
    }

    /// Pause/resume button
    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
        tracing::debug!(
            status = ?self.session.status(),
            remaining = self.session.focus().remaining_secs(),
            "pause toggled"
        );
        self.sync_ticker(Instant::now(), true);
    }

    /// Stop button
    pub fn stop_timer(&mut self) {
        self.session.reset();
        self.sync_ticker(Instant::now(), false);
    }

    /// Keep exactly one tick source alive while the timer runs, none otherwise
    fn sync_ticker(&mut self, now: Instant, restart: bool) {
        if self.session.status().is_running() {
            if restart || !self.ticker.is_armed() {
                self.ticker.arm(now);
            }
        } else {
            self.ticker.disarm();
        }
    }

    pub fn toggle_appearance(&mut self) {
        self.appearance = self.appearance.toggled();
        if let Err(e) = save_appearance(self.session.storage_mut(), self.appearance) {
            tracing::warn!(error = %e, "could not save appearance");
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Feed elapsed seconds into the timer, then save any counts they produced
    pub fn tick(&mut self, now: Instant) {
        let ticks = self.ticker.drain(now);
        for _ in 0..ticks {
            if let Some(completion) = self.session.advance(&self.notifier) {
                self.alert = Some(completion.message().to_string());
            }
        }

        if ticks > 0 && self.session.store().has_unsaved_changes() {
            self.session.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{BREAK_SECS, WORK_SECS};
    use crate::domain::{Phase, TimerStatus};
    use crate::persistence::{decode_tasks, load_appearance, MemoryStore};
    use crate::store::{TaskStore, TASKS_KEY};
    use std::time::Duration;

    fn create_test_app() -> AppState {
        create_app_with(Config {
            notifications: false,
            ..Config::default()
        })
    }

    fn create_app_with(config: Config) -> AppState {
        let storage: Storage = Box::new(MemoryStore::new());
        let mut session = Session::new(TaskStore::new(storage));
        session.add("Task 1").unwrap();
        session.add("Task 2").unwrap();
        AppState::new(session, config, Appearance::Light)
    }

    /// Just past `secs` whole seconds from `base`
    fn after(base: Instant, secs: u64) -> Instant {
        base + Duration::from_millis(secs * 1000 + 500)
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.session.tasks().len(), 2);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.alert.is_none());
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        // Can't go past the end
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        // Can't go below 0
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_via_form() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "New".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();

        assert_eq!(app.session.tasks().len(), 3);
        assert_eq!(app.session.tasks()[2].text, "New");
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_blank_form_adds_nothing() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert_eq!(app.session.tasks().len(), 2);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_edit_prefills_and_saves() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.start_edit_task();

        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert_eq!(app.input_form.as_ref().unwrap().text, "Task 2");

        app.input_form_backspace();
        app.input_form_add_char('b');
        app.submit_input_form();

        assert_eq!(app.session.tasks()[1].text, "Task b");
        assert_eq!(app.session.tasks().len(), 2);
    }

    #[test]
    fn test_cancel_edit_keeps_text() {
        let mut app = create_test_app();
        app.start_edit_task();
        app.input_form_add_char('!');
        app.cancel_input_form();

        assert_eq!(app.session.tasks()[0].text, "Task 1");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_start_arms_ticker_and_counts_down() {
        let mut app = create_test_app();
        let base = Instant::now();

        app.start_selected_at(base);
        assert!(app.ticker.is_armed());
        assert_eq!(app.session.status(), TimerStatus::Running(Phase::Work));

        app.tick(after(base, 60));
        assert_eq!(app.session.focus().remaining_secs(), WORK_SECS - 60);
    }

    #[test]
    fn test_full_work_phase_shows_alert() {
        let mut app = create_test_app();
        let base = Instant::now();
        app.start_selected_at(base);

        app.tick(after(base, WORK_SECS as u64));

        assert_eq!(app.session.tasks()[0].pomodoros, 1);
        assert_eq!(app.session.status(), TimerStatus::Running(Phase::Break));
        assert_eq!(app.session.focus().remaining_secs(), BREAK_SECS);
        assert_eq!(
            app.alert.as_deref(),
            Some("Focus cycle complete! Time for a break.")
        );

        app.dismiss_alert();
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_tick_saves_cycle_count_after_draining() {
        let mut app = create_test_app();
        let base = Instant::now();
        app.start_selected_at(base);

        // Exactly on the boundary counts as elapsed
        app.tick(base + Duration::from_secs(WORK_SECS as u64));

        assert_eq!(app.session.tasks()[0].pomodoros, 1);
        assert!(!app.session.store().has_unsaved_changes());
        let raw = app.session.store().storage().get(TASKS_KEY).unwrap().unwrap();
        assert_eq!(decode_tasks(&raw).unwrap()[0].pomodoros, 1);
    }

    #[test]
    fn test_pause_disarms_and_resume_rearms() {
        let mut app = create_test_app();
        let base = Instant::now();
        app.start_selected_at(base);

        app.toggle_pause();
        assert!(!app.ticker.is_armed());
        app.tick(after(base, 100));
        assert_eq!(app.session.focus().remaining_secs(), WORK_SECS);

        app.toggle_pause();
        assert!(app.ticker.is_armed());
        assert!(app.session.status().is_running());
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut app = create_test_app();
        app.start_selected();
        app.stop_timer();

        assert_eq!(app.session.status(), TimerStatus::Idle);
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn test_switch_prompts_and_decline_keeps_binding() {
        let mut app = create_test_app();
        app.start_selected();
        let first = app.session.focus().bound();

        app.move_selection_down();
        app.start_selected();
        assert_eq!(app.ui_mode, UiMode::ConfirmSwitch);
        assert!(app.pending_switch.is_some());

        app.resolve_switch(false);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.session.focus().bound(), first);
        assert!(app.pending_switch.is_none());
    }

    #[test]
    fn test_switch_confirmed_moves_timer() {
        let mut app = create_test_app();
        app.start_selected();
        app.move_selection_down();
        app.start_selected();

        app.resolve_switch(true);
        assert_eq!(app.session.bound_index(), Some(1));
        assert!(app.ticker.is_armed());
    }

    #[test]
    fn test_switch_without_confirmation_when_disabled() {
        let mut app = create_app_with(Config {
            notifications: false,
            confirm_switch: false,
            ..Config::default()
        });
        app.start_selected();
        app.move_selection_down();
        app.start_selected();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.session.bound_index(), Some(1));
    }

    #[test]
    fn test_delete_bound_task_disarms_ticker() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.start_selected();

        app.delete_selected();

        assert_eq!(app.session.tasks().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.session.status(), TimerStatus::Idle);
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn test_toggle_completed_selected() {
        let mut app = create_test_app();
        app.toggle_completed_selected();
        assert!(app.session.tasks()[0].completed);
        app.toggle_completed_selected();
        assert!(!app.session.tasks()[0].completed);
    }

    #[test]
    fn test_toggle_appearance_is_saved() {
        let mut app = create_test_app();
        app.toggle_appearance();

        assert_eq!(app.appearance, Appearance::Dark);
        assert_eq!(load_appearance(app.session.store().storage()), Appearance::Dark);
    }
}
