use crate::cli::actions::{render, serve, Action, Upstream};
use anyhow::{anyhow, Context, Result};
use std::{path::PathBuf, time::Duration};
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_url = matches
        .get_one::<String>("api-url")
        .context("missing required argument: --api-url")?;
    let timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(10);

    let upstream = Upstream {
        api_url: Url::parse(api_url).context("invalid USERDECK_API_URL")?,
        timeout: Duration::from_secs(timeout),
    };

    match matches.subcommand() {
        Some(("serve", sub_m)) => Ok(Action::Serve(serve::Args {
            port: sub_m.get_one::<u16>("port").copied().unwrap_or(8080),
            upstream,
        })),
        Some(("render", sub_m)) => Ok(Action::Render(render::Args {
            output: sub_m.get_one::<String>("output").map(PathBuf::from),
            upstream,
        })),
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
