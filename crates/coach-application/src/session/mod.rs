//! Session orchestration.

mod controller;
mod delay;

pub use controller::{PendingReply, ReplyOutcome, SessionController};
pub use delay::{FixedDelay, ReplyDelay, UniformDelay};
