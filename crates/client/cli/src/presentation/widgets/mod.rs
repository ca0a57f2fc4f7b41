//! Widget modules for UI rendering.
//!
//! Each widget is a function that reads deck state and renders to a terminal
//! frame without mutating anything.

pub mod card;
pub mod deck;
pub mod footer;
pub mod header;
