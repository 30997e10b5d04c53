pub mod render;
pub mod serve;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub enum Action {
    Serve(serve::Args),
    Render(render::Args),
}

/// Where users are fetched from, shared by every action.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub api_url: Url,
    pub timeout: Duration,
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute().await`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
