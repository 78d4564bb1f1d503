//! Reply backends for the interview coach.
//!
//! Implementations of `coach_core::Responder`. Only the canned stub lives
//! here for now.

pub mod stub_responder;

pub use stub_responder::StubResponder;
