//! Clear Check (clearcheck)
//!
//! Terminal client for screening people and organizations against an
//! exclusion index served through stored search templates.
//!
//! Pure Core / Impure Shell: `model`, `query`, `charts` and `state` are
//! pure and tested without a terminal or network; `client`, `export`,
//! `logging`, `templates` and `view` perform the I/O.

pub mod charts;
pub mod client;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod state;
pub mod templates;
pub mod view;
