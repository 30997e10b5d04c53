use crate::{
    cli::actions::Upstream,
    directory::{HttpUserSource, LoadOutcome, Loader, SharedPage, UserSource},
};
use anyhow::{anyhow, Context, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub output: Option<PathBuf>,
    pub upstream: Upstream,
}

/// Execute the render action.
///
/// The page is written even when the load fails, so the output always shows the
/// error notice; the failure is then returned to make the exit status non-zero.
/// # Errors
/// Returns an error if the load fails or the page cannot be written.
pub async fn execute(args: Args) -> Result<()> {
    let source = HttpUserSource::new(args.upstream.api_url, args.upstream.timeout)?;

    let (html, outcome) = render_page(&Loader::new(source)).await;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write page to {}", path.display()))?;
            info!("page written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write page to stdout")?;
            stdout.flush()?;
        }
    }

    match outcome {
        LoadOutcome::Loaded(_) => Ok(()),
        LoadOutcome::Failed(err) => Err(anyhow!(err)),
        LoadOutcome::Skipped => Err(anyhow!("load was skipped")),
    }
}

/// Run one load against a fresh page and return the resulting document.
pub async fn render_page<S: UserSource>(loader: &Loader<S>) -> (String, LoadOutcome) {
    let page = SharedPage::new();
    let outcome = loader.load(&page.surface()).await;
    let html = page.read().to_html();
    (html, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{render::ERROR_NOTICE, FetchError, RawResponse};

    struct FixedSource(u16, &'static str);

    impl UserSource for FixedSource {
        async fn get(&self) -> Result<RawResponse, FetchError> {
            Ok(RawResponse {
                status: self.0,
                reason: String::new(),
                body: self.1.as_bytes().to_vec(),
            })
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test]
    async fn render_page_with_users() {
        let loader = Loader::new(FixedSource(
            200,
            r#"[{"name":"Leanne Graham","email":"Sincere@april.biz"}]"#,
        ));

        let (html, outcome) = render_page(&loader).await;
        assert_eq!(outcome, LoadOutcome::Loaded(1));
        assert!(html.contains("✓ Successfully loaded 1 users."));
        assert!(html.contains(r#"class="status status--success""#));
        assert!(html.contains("Leanne Graham"));
        assert!(html.contains(r#"<button id="fetch-btn" type="submit">"#));
    }

    #[tokio::test]
    async fn render_page_with_failure_keeps_notice() {
        let loader = Loader::new(FixedSource(500, ""));

        let (html, outcome) = render_page(&loader).await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(html.contains(ERROR_NOTICE));
        assert!(html.contains("HTTP Error: 500"));
    }
}
