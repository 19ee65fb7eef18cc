//! # Duplex event channels.
//!
//! - [`Channel`] - contract the bridging middleware needs (send / add / remove listener)
//! - [`Frame`] - one event on the wire
//! - [`LocalChannel`] - in-process loopback implementation

mod duplex;
mod local;

pub use duplex::{Channel, Frame};
pub use local::LocalChannel;
