//! Seams between the search modal and the page it runs in.
//!
//! The controller in [`crate::modal`] only talks to these traits. The
//! browser implementation lives in [`crate::web`]; tests drive the
//! controller through an in-memory page.

use std::{future::Future, pin::Pin, time::Duration};

use folio_core::{Result, SearchUiOptions};

/// A boxed, single-threaded future.
pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Handler invoked for every dispatched event of type `E`.
pub type Handler<E> = Box<dyn Fn(&E)>;

/// Where a page click landed, relative to the search dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// The target is a hyperlink.
    pub is_link: bool,

    /// The target is still attached to the page body.
    pub in_page: bool,

    /// The target is inside the dialog's content frame.
    pub in_frame: bool,
}

impl ClickTarget {
    /// Whether a click on this target should close an open dialog.
    ///
    /// Links always dismiss so that following a result never leaves the
    /// dialog open. Anything else dismisses when it is part of the page but
    /// outside the content frame; the backdrop counts as outside.
    pub fn dismisses(&self) -> bool {
        self.is_link || (self.in_page && !self.in_frame)
    }
}

/// A pointer click as seen by a listener.
pub trait ClickInput {
    fn target(&self) -> ClickTarget;

    /// Stop the event from reaching listeners further up the tree.
    fn stop_propagation(&self);
}

/// A key press as seen by a listener.
pub trait KeyInput {
    /// The key value, e.g. `"/"` or `"Escape"`.
    fn key(&self) -> String;

    /// Suppress the browser's default action for the key.
    fn prevent_default(&self);
}

/// The dialog markup plus the page-level event sources it listens to.
///
/// Every `listen_*` method returns a registration guard; dropping the guard
/// removes the listener.
pub trait ModalSurface: 'static {
    type Click: ClickInput;
    type Key: KeyInput;
    type Listener;

    /// Show the dialog as a modal, trapping focus.
    fn show_modal(&self) -> Result<()>;

    fn close_dialog(&self);

    fn is_open(&self) -> bool;

    /// Focus the first text input inside the dialog, if any.
    fn focus_search_input(&self);

    /// Make the open control interactive. It starts out disabled.
    fn enable_open_trigger(&self);

    fn listen_open_trigger(&self, handler: Handler<Self::Click>) -> Result<Self::Listener>;

    fn listen_close_trigger(&self, handler: Handler<Self::Click>) -> Result<Self::Listener>;

    fn listen_page_clicks(&self, handler: Handler<Self::Click>) -> Result<Self::Listener>;

    fn listen_page_keys(&self, handler: Handler<Self::Key>) -> Result<Self::Listener>;
}

/// Scheduling and loading facilities for the deferred search UI.
pub trait SearchUiHost: Clone + 'static {
    /// Pending idle task. Dropping it before it runs cancels the task.
    type Idle;

    /// Run `task` once the page is idle, or after `fallback` when the page
    /// has no idle signal.
    fn request_idle(&self, task: Box<dyn FnOnce()>, fallback: Duration) -> Result<Self::Idle>;

    fn spawn_local(&self, task: LocalFuture<()>);

    /// Fetch the search UI library and construct it with `options`.
    fn load_search_ui(&self, options: SearchUiOptions) -> LocalFuture<Result<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_anywhere_dismisses() {
        let inside = ClickTarget {
            is_link: true,
            in_page: true,
            in_frame: true,
        };
        assert!(inside.dismisses());

        let detached = ClickTarget {
            is_link: true,
            in_page: false,
            in_frame: false,
        };
        assert!(detached.dismisses());
    }

    #[test]
    fn test_outside_frame_dismisses() {
        let backdrop = ClickTarget {
            is_link: false,
            in_page: true,
            in_frame: false,
        };
        assert!(backdrop.dismisses());
    }

    #[test]
    fn test_inside_frame_keeps_open() {
        let input = ClickTarget {
            is_link: false,
            in_page: true,
            in_frame: true,
        };
        assert!(!input.dismisses());
    }

    #[test]
    fn test_detached_target_keeps_open() {
        // e.g. a result node the search UI removed while handling the click
        assert!(!ClickTarget::default().dismisses());
    }
}
