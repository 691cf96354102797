//! Desktop glue: config location, an in-memory router and dialog notices.
//!
//! The navigator and notifier are for hosts that embed the page outside a
//! browser; `demos/native_profile.rs` wires them up.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::page::{Navigator, Notice, NoticeKind, Notifier};

/// Directory holding the editor's config file.
///
/// `<config_dir>/profile-editor`, or `~/.config/profile-editor` when the
/// platform reports no config directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(|dir| dir.join("profile-editor"))
}

/// Route history kept in memory, for hosts without a browser location.
#[derive(Debug)]
pub struct HistoryNavigator {
    stack: RefCell<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            stack: RefCell::new(vec![start.into()]),
        }
    }

    /// Route currently shown.
    pub fn current(&self) -> Option<String> {
        self.stack.borrow().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate_to(&self, path: &str) {
        log::info!("Navigating to {}", path);
        self.stack.borrow_mut().push(path.to_string());
    }

    fn navigate_back(&self) {
        let mut stack = self.stack.borrow_mut();
        // Keep the entry route
        if stack.len() > 1 {
            stack.pop();
        }
        log::info!("Navigated back to {:?}", stack.last());
    }
}

/// Shows notices as native message boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&self, notice: Notice) {
        let level = match notice.kind {
            NoticeKind::Success => rfd::MessageLevel::Info,
            NoticeKind::Warning | NoticeKind::Failure => rfd::MessageLevel::Warning,
            NoticeKind::Error => rfd::MessageLevel::Error,
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(crate::constants::labels::PAGE_TITLE)
            .set_description(notice.message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_named_after_app() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with("profile-editor"));
        }
    }

    #[test]
    fn test_history_navigation() {
        let nav = HistoryNavigator::new("/profile/edit");
        nav.navigate_to("/");
        assert_eq!(nav.current().as_deref(), Some("/"));
        assert_eq!(nav.depth(), 2);

        nav.navigate_back();
        assert_eq!(nav.current().as_deref(), Some("/profile/edit"));

        nav.navigate_back();
        assert_eq!(nav.current().as_deref(), Some("/profile/edit"));
        assert_eq!(nav.depth(), 1);
    }
}
