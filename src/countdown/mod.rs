//! Phased event countdown.
//!
//! Registration closes, then the event starts, then problem statements are
//! revealed and the event is live. Each phase counts down to its own
//! boundary; the live phase is terminal and stops the ticker.

pub mod breakdown;
pub mod phase;
pub mod render;
pub mod ring;
pub mod schedule;
pub mod ticker;

pub use breakdown::Breakdown;
pub use render::{ButtonState, PhaseCountdown, RenderPort, RenderState};
pub use ring::{RingScale, RingUnit};
pub use schedule::Schedule;
pub use ticker::{TickOutcome, Ticker};
