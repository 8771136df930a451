//! Application layer - classification, reply resolution and sessions.
//!
//! This layer coordinates domain logic with the ports. Nothing here knows
//! about HTTP or a concrete model vendor.

pub mod classifier;
pub mod response_pipeline;
pub mod session;

pub use classifier::{Classification, ClassificationMethod, Classifier, ClassifierConfig};
pub use response_pipeline::{PipelineConfig, ResponsePipeline, Tier};
pub use session::{
    InboundQuery, OrchestratorConfig, SessionError, SessionOrchestrator, SessionState,
    SupportEvent, SupportSession, APOLOGY,
};
