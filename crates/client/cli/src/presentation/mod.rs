//! Terminal presentation components used by the deck client.
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod widgets;
