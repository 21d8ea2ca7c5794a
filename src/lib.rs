//! Turns raw DOM and style observations of user interactions into compact
//! "trigger → visual effect" animation profiles.
//!
//! Pipeline: [`selector`] labels elements, [`snapshot`] captures them,
//! [`diff`] keeps only significant changes, [`profile`] names the effects.
//! [`mutation`] classifies raw mutation bursts on the side, and [`session`]
//! owns the per-capture state tying it together.

pub mod cli;
pub mod diff;
pub mod dom;
pub mod error;
pub mod mutation;
pub mod profile;
pub mod selector;
pub mod session;
pub mod snapshot;
pub mod trace;

pub use dom::dom_model::{ElementRef, NodeId, NodeRef, PageDocument};
pub use error::ProfilerError;
pub use mutation::compressor::compress;
pub use profile::synthesizer::synthesize;
pub use selector::resolver::SelectorResolver;
pub use session::capture_session::CaptureSession;
