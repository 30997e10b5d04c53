use crate::{cli::actions::Upstream, directory::HttpUserSource, web};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub upstream: Upstream,
}

/// Execute the serve action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let source = HttpUserSource::new(args.upstream.api_url, args.upstream.timeout)?;

    web::new(args.port, web::AppState::new(source)).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("api_url", args.upstream.api_url.to_string()),
        ("timeout", format!("{}s", args.upstream.timeout.as_secs())),
    ];
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\nStartup configuration:", banner());
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn banner() -> String {
    BANNER.replace(
        "{VERSION}",
        &format!(
            " - {} - {}",
            env!("CARGO_PKG_VERSION"),
            short_commit(crate::GIT_COMMIT_HASH)
        ),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    trimmed.chars().take(7).collect()
}

const BANNER: &str = r"
  +------+ +------+
  |  LG  | |  EH  |
  +------+ +------+  U S E R D E C K {VERSION}
  +------+ +------+
  |  CB  | |  PL  |
  +------+ +------+";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_commit_truncates() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit(" abc "), "abc");
    }

    #[test]
    fn banner_carries_version() {
        assert!(banner().contains(env!("CARGO_PKG_VERSION")));
        assert!(!banner().contains("{VERSION}"));
    }
}
