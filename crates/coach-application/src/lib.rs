//! Application layer for the interview coach.
//!
//! Hosts the `SessionController`, which owns the live session, schedules
//! coach replies, and publishes snapshots to observers.

pub mod session;

pub use session::{
    FixedDelay, PendingReply, ReplyDelay, ReplyOutcome, SessionController, UniformDelay,
};
