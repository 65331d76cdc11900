//! Core Types for MCNP INP Decks
//!
//! This crate provides the typed model for MCNP input decks. It includes:
//!
//! - **Primitive values**: jumps, particle designators, nuclide identifiers,
//!   distribution references ([`types`] module)
//! - **Cells**: cell cards and their option vocabulary ([`cell`] module)
//! - **Surfaces**: the full surface mnemonic catalog ([`surface`] module)
//! - **Data cards**: materials, tallies, sources, physics, variance
//!   reduction, and run-control cards ([`data`] module)
//!
//! Every record is validated at construction and immutable afterwards; the
//! [`Display`](std::fmt::Display) impl of each record is its canonical INP
//! serialization.

pub mod cell;
pub mod data;
pub mod error;
pub mod surface;
pub mod types;

pub use cell::Cell;
pub use data::DataCard;
pub use error::{SemanticError, ValueError};
pub use surface::Surface;
