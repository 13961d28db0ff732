//! Cicerone — conversational agent runtime with tool-augmented turns.
//!
//! Wires a chat surface to an OpenAI-compatible model endpoint, lets
//! agents call HTTP-backed lookup tools or hand a turn off to sub-agents,
//! and relays replies either complete or as a token stream.
//!
//! # Quick Start
//!
//! ```no_run
//! use cicerone::prelude::*;
//!
//! # async fn example() -> cicerone::error::Result<()> {
//! let config = CiceroneConfig::from_env();
//! let provider = create_provider(&config)?;
//! let mut surface = cicerone::bots::smart_store_surface(provider.as_ref());
//! println!("{}", surface.on_chat_start());
//! let reply = surface.on_message("I have a headache").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod bots;
pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod runner;
pub mod surface;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
