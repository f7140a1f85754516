use popcorn_core::{detail_view_title, ViewHooks, DEFAULT_VIEW_TITLE};
use std::io::{self, IsTerminal, Write};

/// Mirrors the open detail view in the terminal window title
pub struct TerminalTitle {
    enabled: bool,
}

impl TerminalTitle {
    pub fn new() -> Self {
        Self {
            enabled: io::stdout().is_terminal(),
        }
    }

    fn set(&self, title: &str) {
        if !self.enabled {
            return;
        }
        let mut stdout = io::stdout();
        // OSC 0: set icon name and window title
        let _ = write!(stdout, "\x1b]0;{}\x07", title);
        let _ = stdout.flush();
    }
}

impl ViewHooks for TerminalTitle {
    fn on_enter_detail(&mut self, title: &str) {
        self.set(&detail_view_title(title));
    }

    fn on_leave_detail(&mut self) {
        self.set(DEFAULT_VIEW_TITLE);
    }
}
