use crate::directory::{
    client::{fetch_users, UserSource},
    errors::FetchError,
    render::{render_cards, ERROR_NOTICE},
    surface::{Surface, TriggerControl},
    types::{Status, StatusKind},
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

pub const LOADING_MESSAGE: &str = "Fetching users from API…";

/// Terminal result of one [`Loader::load`] invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Users were rendered; carries how many.
    Loaded(usize),
    /// The load failed and the error notice was shown.
    Failed(FetchError),
    /// Another load was already in flight; nothing was touched.
    Skipped,
}

/// Runs the fetch-validate-render cycle against a page [`Surface`].
///
/// At most one load runs at a time per loader. A call made while another is in
/// flight returns [`LoadOutcome::Skipped`] without touching the surface.
#[derive(Debug)]
pub struct Loader<S> {
    source: S,
    in_flight: AtomicBool,
}

impl<S: UserSource> Loader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[instrument(skip_all, fields(source = %self.source.describe()))]
    pub async fn load(&self, surface: &Surface<'_>) -> LoadOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("load already in flight, skipping");
            return LoadOutcome::Skipped;
        }

        // Re-enables the trigger and releases the flag on every exit path,
        // including the future being dropped mid-request.
        let _guard = InFlight {
            flag: &self.in_flight,
            trigger: surface.trigger,
        };

        surface
            .status
            .set_status(Status::new(StatusKind::Loading, LOADING_MESSAGE));
        surface.trigger.set_disabled(true);
        surface.grid.clear();

        match fetch_users(&self.source).await {
            Ok(users) => {
                surface.grid.append(render_cards(&users));
                surface.status.set_status(Status::new(
                    StatusKind::Success,
                    format!("✓ Successfully loaded {} users.", users.len()),
                ));
                info!("loaded {} users", users.len());
                LoadOutcome::Loaded(users.len())
            }
            Err(err) => {
                warn!("failed to load users: {}", err);
                surface
                    .status
                    .set_status(Status::new(StatusKind::Error, format!("✗ Error: {err}")));
                surface.grid.replace(ERROR_NOTICE);
                LoadOutcome::Failed(err)
            }
        }
    }
}

struct InFlight<'a> {
    flag: &'a AtomicBool,
    trigger: &'a dyn TriggerControl,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.trigger.set_disabled(false);
        self.flag.store(false, Ordering::Release);
    }
}
