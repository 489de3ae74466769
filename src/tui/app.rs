use std::path::{Path, PathBuf};
use tracing::warn;

use super::theme::Theme;
use crate::app::Config;
use crate::constants::SPINNER_FRAMES;
use crate::verifier::{MediaKind, SelectedFile};
use crate::widget::{Command, Event, InputState, Mode, WidgetState};

/// Application state
pub struct App {
    /// Widget state, only changed through `dispatch`
    pub widget: WidgetState,
    /// Typed file path in the image and audio modes
    pub path_buffer: String,
    /// Is the app running?
    pub running: bool,
    /// Scroll offset of the result area, from the top
    pub scroll_offset: u16,
    /// Status message
    pub status_message: Option<String>,
    /// Animation frame of the loading indicator
    pub spinner_tick: usize,
    /// Engine name for display
    pub verifier_name: String,
    pub theme: Theme,
    /// Largest file accepted by the file modes
    pub max_upload_bytes: u64,
}

impl App {
    /// Create a new app instance
    pub fn new(verifier_name: impl Into<String>, config: &Config) -> Self {
        Self {
            widget: WidgetState::new(config.ui.default_mode),
            path_buffer: String::new(),
            running: true,
            scroll_offset: 0,
            status_message: None,
            spinner_tick: 0,
            verifier_name: verifier_name.into(),
            theme: Theme::from_name(&config.ui.theme),
            max_upload_bytes: config.input.max_upload_bytes,
        }
    }

    pub fn mode(&self) -> Mode {
        self.widget.mode()
    }

    /// Feed an event through the widget reducer
    pub fn dispatch(&mut self, event: Event) -> Option<Command> {
        let settling = matches!(event, Event::Settled { .. });
        let was_loading = self.widget.is_loading();

        let (state, command) = std::mem::take(&mut self.widget).reduce(event);
        self.widget = state;

        if settling && was_loading && !self.widget.is_loading() {
            // New result: show it from the top
            self.scroll_offset = 0;
            self.clear_status();
        }
        command
    }

    /// Select a mode tab; selecting always starts from a clean slate
    pub fn set_mode(&mut self, mode: Mode) {
        self.path_buffer.clear();
        self.scroll_offset = 0;
        self.clear_status();
        self.dispatch(Event::SetMode(mode));
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode().cycle());
    }

    pub fn cycle_mode_reverse(&mut self) {
        self.set_mode(self.mode().cycle_reverse());
    }

    /// Type a character into the active input
    pub fn insert_char(&mut self, c: char) {
        match self.widget.input() {
            InputState::Text(text) => {
                let edited = format!("{}{}", text, c);
                self.dispatch(Event::EditText(edited));
            }
            InputState::Url(url) => {
                let edited = format!("{}{}", url, c);
                self.dispatch(Event::EditUrl(edited));
            }
            InputState::Image(_) | InputState::Audio(_) => self.path_buffer.push(c),
        }
    }

    /// Delete the last character of the active input
    pub fn delete_char(&mut self) {
        match self.widget.input() {
            InputState::Text(text) => {
                let mut edited = text.clone();
                edited.pop();
                self.dispatch(Event::EditText(edited));
            }
            InputState::Url(url) => {
                let mut edited = url.clone();
                edited.pop();
                self.dispatch(Event::EditUrl(edited));
            }
            InputState::Image(_) | InputState::Audio(_) => {
                self.path_buffer.pop();
            }
        }
    }

    /// Load the typed path as the file of the active file mode.
    ///
    /// Returns false when nothing was loaded; the reason is left in the
    /// status bar.
    pub fn load_selected_path(&mut self) -> bool {
        let kind = match self.mode() {
            Mode::Image => MediaKind::Image,
            Mode::Audio => MediaKind::Audio,
            Mode::Text | Mode::Url => return false,
        };

        let typed = self.path_buffer.trim();
        if typed.is_empty() {
            return false;
        }
        let path = expand_home(typed);

        match SelectedFile::load(&path, kind, self.max_upload_bytes) {
            Ok(file) => {
                self.set_status(format!("Selected {}", file.name));
                let event = match kind {
                    MediaKind::Image => Event::SelectImage(Some(file)),
                    MediaKind::Audio => Event::SelectAudio(Some(file)),
                };
                self.dispatch(event);
                true
            }
            Err(e) => {
                warn!("Could not select {}: {}", path.display(), e);
                self.set_status(e.to_string());
                false
            }
        }
    }

    /// Press "verify".
    ///
    /// In a file mode a typed path that differs from the current selection
    /// is loaded first. If it cannot be loaded the old selection is dropped,
    /// so the submit falls through to the validation prompt.
    pub fn submit(&mut self) -> Option<Command> {
        if self.mode().is_file()
            && !self.widget.is_loading()
            && self.path_is_pending()
            && !self.load_selected_path()
        {
            let cleared = match self.mode() {
                Mode::Image => Event::SelectImage(None),
                _ => Event::SelectAudio(None),
            };
            self.dispatch(cleared);
        }
        self.dispatch(Event::Submit)
    }

    fn path_is_pending(&self) -> bool {
        let typed = self.path_buffer.trim();
        if typed.is_empty() {
            return false;
        }
        match self.widget.input().selected_file() {
            Some(file) => file.path != expand_home(typed),
            None => true,
        }
    }

    /// Esc: drop the validation prompt and any status message
    pub fn dismiss(&mut self) {
        self.clear_status();
        self.dispatch(Event::DismissPrompt);
    }

    /// Advance the loading animation
    pub fn tick(&mut self) {
        if self.widget.is_loading() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()]
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Scroll the result area towards the top
    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll the result area towards the bottom
    pub fn scroll_down(&mut self, amount: u16, content_lines: u16) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(amount)
            .min(content_lines.saturating_sub(1));
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match std::env::var_os("HOME") {
            Some(home) => Path::new(&home).join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::Verdict;
    use crate::widget::{Outcome, RequestLifecycle};
    use tempfile::TempDir;

    fn app() -> App {
        App::new("demo", &Config::default())
    }

    #[test]
    fn test_typing_edits_active_buffer() {
        let mut app = app();
        for c in "hi!".chars() {
            app.insert_char(c);
        }
        app.delete_char();
        assert_eq!(app.widget.input().typed(), Some("hi"));
        assert!(app.path_buffer.is_empty());

        app.set_mode(Mode::Image);
        app.insert_char('x');
        assert_eq!(app.path_buffer, "x");
        assert_eq!(app.widget.input().typed(), None);
    }

    #[test]
    fn test_switching_modes_clears_path() {
        let mut app = app();
        app.set_mode(Mode::Audio);
        app.path_buffer = "/tmp/clip.wav".into();
        app.cycle_mode();
        assert_eq!(app.mode(), Mode::Text);
        assert!(app.path_buffer.is_empty());
        app.cycle_mode_reverse();
        assert_eq!(app.mode(), Mode::Audio);
    }

    #[test]
    fn test_submit_loads_typed_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let mut app = app();
        app.set_mode(Mode::Image);
        app.path_buffer = path.display().to_string();

        let command = app.submit();
        assert!(command.is_some());
        assert!(app.widget.is_loading());
        assert!(app.widget.input().preview().is_some());
    }

    #[test]
    fn test_missing_file_reports_status_and_prompts() {
        let mut app = app();
        app.set_mode(Mode::Audio);
        app.path_buffer = "/definitely/not/here.wav".into();

        assert!(app.submit().is_none());
        assert!(app.status_message.is_some());
        assert_eq!(app.widget.prompt(), Some("Please provide input for Audio!"));

        app.dismiss();
        assert_eq!(app.widget.prompt(), None);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_failed_reload_does_not_send_previous_file() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.png");
        std::fs::write(&old, [0x89, b'P', b'N', b'G']).unwrap();

        let mut app = app();
        app.set_mode(Mode::Image);
        app.path_buffer = old.display().to_string();
        assert!(app.load_selected_path());
        assert!(app.widget.input().selected_file().is_some());

        app.path_buffer = dir.path().join("new.png").display().to_string();
        assert!(app.submit().is_none());
        assert!(!app.widget.is_loading());
        assert!(app.widget.input().selected_file().is_none());
        assert!(app.status_message.as_deref().unwrap_or_default().contains("new.png"));
        assert_eq!(app.widget.prompt(), Some("Please provide input for Image!"));
    }

    #[test]
    fn test_new_result_scrolls_to_top() {
        let mut app = app();
        app.insert_char('a');
        let Some(Command::Verify(request)) = app.submit() else {
            panic!("expected a request");
        };
        app.scroll_offset = 9;
        app.tick();
        assert_eq!(app.spinner_tick, 1);

        app.dispatch(Event::Settled {
            generation: request.generation,
            outcome: Outcome::Verdict(Verdict::default()),
        });
        assert_eq!(app.scroll_offset, 0);
        assert!(matches!(app.widget.lifecycle(), RequestLifecycle::Settled(_)));
    }

    #[test]
    fn test_scroll_bounds() {
        let mut app = app();
        app.scroll_down(3, 5);
        app.scroll_down(3, 5);
        assert_eq!(app.scroll_offset, 4);
        app.scroll_up(10);
        assert_eq!(app.scroll_offset, 0);
    }
}
