//! Read entities definitions.

pub mod area;
pub mod house;
mod payload;
pub mod search;

pub use self::payload::Payload;
