// Adapters layer: concrete implementations of the ports for external libraries.

pub mod html;
pub mod ics;
