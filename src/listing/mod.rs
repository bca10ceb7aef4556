use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use url::Url;

use crate::error::ScrapeError;
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;

pub mod extractor;
pub mod fetch;
pub mod normalize;
pub mod record;
pub mod types;
pub mod write;

use self::extractor::Strategy;
use self::fetch::{FileFetcher, Fetcher, HttpFetcher, Source};
use self::write::WriteOutcome;

pub const DEFAULT_URL: &str = "https://arxiv.org/list/cs.AI/recent";
pub const DEFAULT_OUTPUT: &str = "/app/data/arxiv_papers.csv";

#[derive(Args, Debug, Clone)]
pub struct ScrapeCmd {
    /// Listing page to fetch; also the base for relative abstract links
    #[arg(long, env = "ARXIV_URL", default_value = DEFAULT_URL)]
    pub url: Url,
    /// Destination CSV (truncated on write)
    #[arg(long, env = "ARXIV_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Fetch timeout in seconds
    #[arg(long = "timeout", env = "ARXIV_TIMEOUT_SECS", default_value_t = fetch::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
    #[arg(long, value_enum, default_value_t = Strategy::Structured)]
    pub strategy: Strategy,
    /// Read a saved page from disk instead of fetching --url
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Also keep the raw page content at this path
    #[arg(long)]
    pub save_raw: Option<PathBuf>,
}

impl ScrapeCmd {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    fn target(&self) -> String {
        match &self.input {
            Some(p) => p.display().to_string(),
            None => self.url.to_string(),
        }
    }

    fn source(&self) -> Result<Source, reqwest::Error> {
        match self.input {
            Some(_) => Ok(Source::File(FileFetcher)),
            None => Ok(Source::Http(HttpFetcher::new(self.timeout())?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Written { rows: usize },
    NoData,
}

pub async fn run(args: ScrapeCmd) -> anyhow::Result<RunOutcome> {
    let source = args.source()?;
    let t0 = Instant::now();
    let outcome = scrape(&source, &args).await;

    if telemetry::config::json_mode() {
        let result = types::ScrapeResult::new(&args, &outcome);
        let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()), run_id: None };
        telemetry::scrape().result(&result, Some(meta))?;
    }
    Ok(outcome?)
}

/// Fetch → extract → normalize → write for one listing page.
pub async fn scrape<F: Fetcher>(fetcher: &F, args: &ScrapeCmd) -> Result<RunOutcome, ScrapeError> {
    let log = telemetry::scrape();
    let target = args.target();
    let _g = log.root_span_kv([
        ("target", target.clone()),
        ("output", args.output.display().to_string()),
        ("strategy", args.strategy.name().to_string()),
        ("timeout_secs", args.timeout_secs.to_string()),
    ]).entered();

    let content = {
        let _s = log.span_kv(&ScrapePhase::Fetch, [("target", target.clone())]).entered();
        match fetcher.fetch(&target).await {
            Ok(c) => c,
            Err(e) => {
                let status = e.status_code().map(|c| c.to_string()).unwrap_or_else(|| "none".into());
                log.error_kv(
                    &format!("❌ Failed to fetch page: {e}"),
                    [("target", target.clone()), ("status", status), ("timeout", e.is_timeout().to_string())],
                );
                return Err(e.into());
            }
        }
    };
    log.info_kv(&format!("🌐 Fetched {} ({} bytes)", target, content.len()), [("bytes", content.len().to_string())]);

    if let Some(path) = &args.save_raw {
        let _s = log.span(&ScrapePhase::SaveRaw).entered();
        write::save_raw(&content, path)?;
        log.info(format!("💾 Raw page saved to {}", path.display()));
    }

    let extracted = {
        let _s = log.span_kv(&ScrapePhase::Extract, [("strategy", args.strategy.name().to_string())]).entered();
        extractor::extract(args.strategy, &content, &args.url)
    };
    let records = match extracted {
        Ok(r) => r,
        Err(e) => {
            log.warn_kv(&format!("⚠️  {e}"), [("strategy", args.strategy.name().to_string())]);
            log.no_data(&e.to_string());
            return Ok(RunOutcome::NoData);
        }
    };
    log.extracted(args.strategy.name(), records.len());

    let records: Vec<_> = {
        let _s = log.span(&ScrapePhase::Normalize).entered();
        records.into_iter().map(normalize::normalize).collect()
    };

    let _s = log.span(&ScrapePhase::Write).entered();
    match write::write_csv(&records, &args.output) {
        Ok(WriteOutcome::Written { rows }) => {
            log.written(&args.output.display().to_string(), rows);
            Ok(RunOutcome::Written { rows })
        }
        Ok(WriteOutcome::NoData) => {
            log.no_data("zero records extracted");
            Ok(RunOutcome::NoData)
        }
        Err(e) => {
            log.error(format!("❌ {e}"));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::path::Path;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TWO_ENTRIES: &str = r#"<html><body><dl id="articles">
<dt><a name="item1">[1]</a> <a href="/abs/2501.00001" title="Abstract" id="2501.00001">arXiv:2501.00001</a></dt>
<dd><div class="meta">
  <div class="list-title mathjax"><span class="descriptor">Title:</span> Learning to
     Plan</div>
  <div class="list-authors"><a href="/a/smith_a">Alice Smith</a>, <a href="/a/jones_b">Bob Jones</a></div>
  <div class="list-comments mathjax"><span class="descriptor">Comments:</span> 14 pages, 3 figures</div>
</div></dd>
<dt><a name="item2">[2]</a> <a href="/abs/2501.00002" title="Abstract" id="2501.00002">arXiv:2501.00002</a></dt>
<dd><div class="meta">
  <div class="list-title mathjax"><span class="descriptor">Title:</span> Graph Agents</div>
</div></dd>
</dl></body></html>"#;

    fn cmd(server: &MockServer, output: PathBuf) -> ScrapeCmd {
        ScrapeCmd {
            url: Url::parse(&format!("{}/list/cs.AI/recent", server.uri())).unwrap(),
            output,
            timeout_secs: 5,
            strategy: Strategy::Structured,
            input: None,
            save_raw: None,
        }
    }

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list/cs.AI/recent"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn read_rows(p: &Path) -> Vec<record::PaperRecord> {
        csv::Reader::from_path(p).unwrap().deserialize().collect::<Result<_, _>>().unwrap()
    }

    #[tokio::test]
    async fn two_pairs_produce_header_and_two_rows() {
        let server = serve(200, TWO_ENTRIES).await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("papers.csv");
        let args = cmd(&server, out.clone());

        let outcome = scrape(&args.source().unwrap(), &args).await.unwrap();
        assert_eq!(outcome, RunOutcome::Written { rows: 2 });

        let raw = std::fs::read_to_string(&out).unwrap();
        assert_eq!(raw.lines().count(), 3);
        assert!(raw.starts_with("title,authors,link,pages\n"));

        let rows = read_rows(&out);
        let base = server.uri();
        assert_eq!(rows[0], record::PaperRecord::new(
            "Learning to Plan", "Alice Smith, Bob Jones", format!("{base}/abs/2501.00001"), "14 pages",
        ));
        assert_eq!(rows[1], record::PaperRecord::new(
            "Graph Agents", "Unknown", format!("{base}/abs/2501.00002"), "Unknown Pages",
        ));
    }

    #[tokio::test]
    async fn not_found_is_fetch_error_and_nothing_is_written() {
        let server = serve(404, "gone").await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("papers.csv");
        let args = cmd(&server, out.clone());

        let err = scrape(&args.source().unwrap(), &args).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch(FetchError::Status { status_code: 404, .. })));
        assert_eq!(err.exit_code(), 2);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn fetch_failure_keeps_previous_output() {
        let server = serve(503, "").await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("papers.csv");
        std::fs::write(&out, "title,authors,link,pages\nold,row,x,y\n").unwrap();
        let args = cmd(&server, out.clone());

        assert!(scrape(&args.source().unwrap(), &args).await.is_err());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "title,authors,link,pages\nold,row,x,y\n");
    }

    #[tokio::test]
    async fn empty_listing_is_no_data() {
        let server = serve(200, "<html><body><dl id=\"articles\"></dl></body></html>").await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("papers.csv");
        let args = cmd(&server, out.clone());

        let outcome = scrape(&args.source().unwrap(), &args).await.unwrap();
        assert_eq!(outcome, RunOutcome::NoData);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn unparseable_page_degrades_to_no_data() {
        let server = serve(200, "<html><body><h1>Maintenance</h1></body></html>").await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("papers.csv");
        let args = cmd(&server, out.clone());

        assert_eq!(scrape(&args.source().unwrap(), &args).await.unwrap(), RunOutcome::NoData);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn unwritable_destination_is_write_error() {
        let server = serve(200, TWO_ENTRIES).await;
        let dir = tempfile::tempdir().unwrap();
        let args = cmd(&server, dir.path().join("missing/papers.csv"));

        let err = scrape(&args.source().unwrap(), &args).await.unwrap_err();
        assert_eq!(err.stage(), "write");
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn saved_markdown_with_patterned_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("listing.md");
        std::fs::write(&input, "\
[1] [arXiv:2501.00003](/abs/2501.00003) [[pdf](/pdf/2501.00003)]
Title: Sparse Reward Shaping
Authors: [Dana Lee](/a/lee_d)
Comments: 8 pages
").unwrap();
        let out = dir.path().join("papers.csv");
        let args = ScrapeCmd {
            url: Url::parse(DEFAULT_URL).unwrap(),
            output: out.clone(),
            timeout_secs: 30,
            strategy: Strategy::Patterned,
            input: Some(input),
            save_raw: None,
        };

        let outcome = scrape(&args.source().unwrap(), &args).await.unwrap();
        assert_eq!(outcome, RunOutcome::Written { rows: 1 });
        assert_eq!(read_rows(&out), vec![record::PaperRecord::new(
            "Sparse Reward Shaping", "Dana Lee", "https://arxiv.org/abs/2501.00003", "8 pages",
        )]);
    }

    #[tokio::test]
    async fn raw_page_is_saved_when_requested() {
        let server = serve(200, TWO_ENTRIES).await;
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("result-page.html");
        let mut args = cmd(&server, dir.path().join("papers.csv"));
        args.save_raw = Some(raw.clone());

        scrape(&args.source().unwrap(), &args).await.unwrap();
        assert_eq!(std::fs::read_to_string(&raw).unwrap(), TWO_ENTRIES);
    }
}
