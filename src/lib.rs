//! Gesture-casting battle core.
//!
//! Hand landmarks from an external detector become strokes on a shared
//! canvas, strokes are recognised as runes, and runes cast skills in a
//! timer-driven duel against an NPC. [`session::BattleSession`] ties it all
//! into a per-frame loop; everything else is usable on its own.

pub mod actor;
pub mod combat;
pub mod config;
pub mod error;
pub mod fx;
pub mod geometry;
pub mod gesture;
pub mod perception;
pub mod portrait;
pub mod session;

pub use config::BattleConfig;
pub use error::BattleError;
pub use session::{BattleAction, BattleBuilder, BattleSession};
