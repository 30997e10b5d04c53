//! Handles a load is allowed to touch. They are passed to the loader explicitly
//! so tests can substitute recording fakes for the real page.

use crate::directory::types::Status;

/// The status message element.
pub trait StatusLine: Send + Sync {
    fn set_status(&self, status: Status);
}

/// The container the cards are rendered into.
pub trait CardGrid: Send + Sync {
    /// Remove all previous output.
    fn clear(&self);

    /// Append a batch of card markup after whatever is already there.
    fn append(&self, html: String);

    /// Replace all content with a static notice.
    fn replace(&self, html: &str);
}

/// The button that starts a load.
pub trait TriggerControl: Send + Sync {
    fn set_disabled(&self, disabled: bool);
}

/// The three handles of one page, borrowed for the duration of a load.
#[derive(Clone, Copy)]
pub struct Surface<'a> {
    pub status: &'a dyn StatusLine,
    pub grid: &'a dyn CardGrid,
    pub trigger: &'a dyn TriggerControl,
}

impl<'a> Surface<'a> {
    #[must_use]
    pub fn new(
        status: &'a dyn StatusLine,
        grid: &'a dyn CardGrid,
        trigger: &'a dyn TriggerControl,
    ) -> Self {
        Self {
            status,
            grid,
            trigger,
        }
    }
}
