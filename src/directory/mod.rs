pub mod client;
pub mod errors;
pub mod loader;
pub mod page;
pub mod render;
pub mod surface;
pub mod types;

pub use self::client::{fetch_users, HttpUserSource, RawResponse, UserSource};
pub use self::errors::{ErrorKind, FetchError};
pub use self::loader::{LoadOutcome, Loader};
pub use self::page::{DirectoryPage, SharedPage};
pub use self::surface::{CardGrid, StatusLine, Surface, TriggerControl};
pub use self::types::{Address, CardView, Phase, Status, StatusKind, UserRecord};
