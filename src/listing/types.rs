use serde::Serialize;

use crate::error::ScrapeError;

use super::{RunOutcome, ScrapeCmd};

// Result envelope types
#[derive(Serialize, Debug)]
pub struct ScrapeResult {
    pub target: String,
    pub output: String,
    pub strategy: &'static str,
    pub outcome: &'static str,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    pub fn new(args: &ScrapeCmd, outcome: &Result<RunOutcome, ScrapeError>) -> Self {
        let mut res = ScrapeResult {
            target: args.target(),
            output: args.output.display().to_string(),
            strategy: args.strategy.name(),
            outcome: "no_data",
            records: 0,
            stage: None,
            status_code: None,
            error: None,
        };
        match outcome {
            Ok(RunOutcome::Written { rows }) => { res.outcome = "written"; res.records = *rows; }
            Ok(RunOutcome::NoData) => {}
            Err(e) => {
                res.outcome = "failed";
                res.stage = Some(e.stage());
                res.status_code = match e { ScrapeError::Fetch(f) => f.status_code(), _ => None };
                res.error = Some(e.to_string());
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::listing::extractor::Strategy;
    use url::Url;

    fn args() -> ScrapeCmd {
        ScrapeCmd {
            url: Url::parse("https://arxiv.org/list/cs.AI/recent").unwrap(),
            output: "papers.csv".into(),
            timeout_secs: 30,
            strategy: Strategy::Structured,
            input: None,
            save_raw: None,
        }
    }

    #[test]
    fn written_outcome() {
        let res = ScrapeResult::new(&args(), &Ok(RunOutcome::Written { rows: 7 }));
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["outcome"], "written");
        assert_eq!(v["records"], 7);
        assert_eq!(v["target"], "https://arxiv.org/list/cs.AI/recent");
        assert!(v.get("error").is_none());
    }

    #[test]
    fn fetch_failure_carries_status() {
        let err = ScrapeError::Fetch(FetchError::Status { url: "u".into(), status_code: 404 });
        let res = ScrapeResult::new(&args(), &Err(err));
        assert_eq!(res.outcome, "failed");
        assert_eq!(res.stage, Some("fetch"));
        assert_eq!(res.status_code, Some(404));
    }
}
