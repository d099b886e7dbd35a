//! Risk detection and the mandatory escalation protocol.
//!
//! Detection is a stateless per-message regex scan; escalation turns a
//! flagged message into a typed Risk pack (severity level, ordered required
//! steps, retrieved guidance) that steers the reply for that turn.

pub mod detector;
pub mod escalation;

pub use detector::detect_risk;
pub use escalation::{EscalationResolver, RiskPack, StepId};
