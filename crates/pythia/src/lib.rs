//! Chart interpretation.
//!
//! A chart is compressed into a short prompt, sent once to a Gemini-style
//! `generateContent` endpoint, and the generated text is recovered into an
//! [`Interpretation`] even when it arrives fenced, prose-wrapped or cut off.

pub mod client;
pub mod compress;
pub mod error;
pub mod gemini;
pub mod recovery;
pub mod report;

pub use client::{InterpretationClient, InterpretationResult};
pub use compress::compress;
pub use error::{InterpretationError, InterpretationFailure};
pub use gemini::{Credentials, GeminiConfig, GenerativeBackend, HttpBackend};
pub use recovery::{recover, recover_text, Interpretation, Recovered, RecoveryKind};
pub use report::ReportType;
