//! The flight game itself, independent of windowing and GPU.
//!
//! [`session::GameSession`] owns every piece of per-session state and advances
//! it one frame at a time; hosts feed it an [`crate::input::InputSource`] and
//! react to the [`event::GameEvent`]s it returns.

pub mod config;
pub mod event;
pub mod session;

pub use config::FlightConfig;
pub use event::GameEvent;
pub use session::{Airplane, FollowCamera, GameSession, Phase, RING_COUNT, Ring};
