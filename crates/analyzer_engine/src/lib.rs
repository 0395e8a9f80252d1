//! Analyzer engine: backend HTTP client and the request orchestrator.
mod client;
mod orchestrator;
mod types;

pub use client::{AnalysisBackend, ApiVariant, ClientSettings, ReqwestBackend};
pub use orchestrator::{ChannelTransitionSink, Orchestrator, TransitionSink};
pub use types::{AnalyzeError, ClientBuildError, FailureKind};
