//! haven: attachment-profile counseling agent.
//!
//! A short survey classifies the user into one of sixteen relational
//! profiles; a persona rule table maps the profile onto one counseling
//! persona; each dialogue turn is grounded in retrieved playbook context,
//! with a regex risk scan gating a mandatory escalation protocol.

pub mod agent;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod persona;
pub mod retrieval;
pub mod safety;
pub mod survey;
pub mod util;

pub use error::Error;
