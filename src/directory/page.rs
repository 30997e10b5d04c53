//! In-process model of the user directory page.
//!
//! [`DirectoryPage`] holds the three pieces of state a load mutates, and
//! [`SharedPage`] exposes them as the [`Surface`] handles behind a lock so the
//! web handlers can read the page while a load is writing to it.

use crate::directory::{
    render::escape_html,
    surface::{CardGrid, StatusLine, Surface, TriggerControl},
    types::{Phase, Status},
};
use std::{
    fmt::Write,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

pub const GRID_ID: &str = "user-grid";
pub const STATUS_ID: &str = "status-message";
pub const TRIGGER_ID: &str = "fetch-btn";

const STYLESHEET: &str = r"
body { font-family: system-ui, sans-serif; margin: 2rem; background: #f6f7fb; }
.status { min-height: 1.5rem; }
.status--loading { color: #555; }
.status--success { color: #1a7f37; }
.status--error { color: #cf222e; }
#user-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.user-card { display: flex; gap: 1rem; padding: 1rem; background: #fff; border-radius: .5rem;
  animation: card-in .4s ease both; animation-delay: var(--delay, 0ms); }
.card-avatar { width: 3rem; height: 3rem; border-radius: 50%; background: #4f46e5; color: #fff;
  display: flex; align-items: center; justify-content: center; font-weight: 600; }
.card-name { margin: 0 0 .5rem; font-size: 1.1rem; }
.card-detail { margin: .25rem 0; }
.card-icon { margin-right: .25rem; }
.error-detail { color: #cf222e; }
@keyframes card-in { from { opacity: 0; transform: translateY(.5rem); } to { opacity: 1; transform: none; } }
";

#[derive(Debug, Default)]
pub struct DirectoryPage {
    status: Option<Status>,
    grid: String,
    trigger_disabled: bool,
}

impl DirectoryPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.status
            .as_ref()
            .map_or(Phase::Idle, |status| Phase::from(status.kind))
    }

    #[must_use]
    pub fn grid(&self) -> &str {
        &self.grid
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.grid.matches(r#"class="user-card""#).count()
    }

    #[must_use]
    pub fn trigger_disabled(&self) -> bool {
        self.trigger_disabled
    }

    /// Render the whole page as an HTML document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let (status_class, message) = match &self.status {
            Some(status) => (
                format!("status status--{}", status.kind),
                escape_html(&status.message),
            ),
            None => ("status".to_string(), String::new()),
        };
        let refresh = if self.phase() == Phase::Loading {
            "\n    <meta http-equiv=\"refresh\" content=\"1\">"
        } else {
            ""
        };
        let disabled = if self.trigger_disabled { " disabled" } else { "" };

        let mut html = String::new();
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">{refresh}
    <title>User Directory</title>
    <style>{STYLESHEET}</style>
  </head>
  <body>
    <header>
      <h1>User Directory</h1>
      <form method="post" action="/refresh">
        <button id="{TRIGGER_ID}" type="submit"{disabled}>Fetch Users</button>
      </form>
      <p id="{STATUS_ID}" class="{status_class}" role="status">{message}</p>
    </header>
    <main id="{GRID_ID}">
{grid}    </main>
  </body>
</html>
"#,
            grid = self.grid,
        );
        html
    }
}

/// A [`DirectoryPage`] shared between the server handlers and the loader.
#[derive(Clone, Debug, Default)]
pub struct SharedPage(Arc<RwLock<DirectoryPage>>);

impl SharedPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the page. A poisoned lock still yields the last state.
    pub fn read(&self) -> RwLockReadGuard<'_, DirectoryPage> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryPage> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn surface(&self) -> Surface<'_> {
        Surface::new(self, self, self)
    }
}

impl StatusLine for SharedPage {
    fn set_status(&self, status: Status) {
        self.write().status = Some(status);
    }
}

impl CardGrid for SharedPage {
    fn clear(&self) {
        self.write().grid.clear();
    }

    fn append(&self, html: String) {
        self.write().grid.push_str(&html);
    }

    fn replace(&self, html: &str) {
        let mut page = self.write();
        page.grid.clear();
        page.grid.push_str(html);
    }
}

impl TriggerControl for SharedPage {
    fn set_disabled(&self, disabled: bool) {
        self.write().trigger_disabled = disabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{render::ERROR_NOTICE, types::StatusKind};

    #[test]
    fn new_page_is_idle() {
        let page = SharedPage::new();
        let page = page.read();
        assert_eq!(page.phase(), Phase::Idle);
        assert!(page.status().is_none());
        assert_eq!(page.card_count(), 0);
        assert!(!page.trigger_disabled());

        let html = page.to_html();
        assert!(html.contains(r#"<p id="status-message" class="status" role="status"></p>"#));
        assert!(html.contains(r#"<button id="fetch-btn" type="submit">"#));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn loading_page_disables_trigger_and_polls() {
        let page = SharedPage::new();
        page.set_status(Status::new(StatusKind::Loading, "Fetching users from API…"));
        page.set_disabled(true);

        let html = page.read().to_html();
        assert!(html.contains(r#"class="status status--loading""#));
        assert!(html.contains(r#"<button id="fetch-btn" type="submit" disabled>"#));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="1">"#));
    }

    #[test]
    fn grid_append_and_replace() {
        let page = SharedPage::new();
        page.append(r#"<div class="user-card">a</div>"#.to_string());
        page.append(r#"<div class="user-card">b</div>"#.to_string());
        assert_eq!(page.read().card_count(), 2);

        page.replace(ERROR_NOTICE);
        assert_eq!(page.read().grid(), ERROR_NOTICE);
        assert_eq!(page.read().card_count(), 0);

        page.clear();
        assert!(page.read().grid().is_empty());
    }

    #[test]
    fn status_message_is_escaped() {
        let page = SharedPage::new();
        page.set_status(Status::new(StatusKind::Error, "✗ Error: <boom>"));
        let html = page.read().to_html();
        assert!(html.contains("✗ Error: &lt;boom&gt;"));
        assert_eq!(page.read().phase(), Phase::Error);
    }
}
