use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Scrape;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, SaveRaw, Extract, Normalize, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::SaveRaw => "save_raw",
        Phase::Extract => "extract",
        Phase::Normalize => "normalize",
        Phase::Write => "write",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::SaveRaw => info_span!("save_raw"),
        Phase::Extract => info_span!("extract"),
        Phase::Normalize => info_span!("normalize"),
        Phase::Write => info_span!("write"),
    }}
}

impl OpMarker for Scrape {
    const NAME: &'static str = "scrape";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("scrape") }
}
