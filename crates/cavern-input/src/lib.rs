//! Input abstraction: physical keys mapped to the discrete signals the session
//! consumes, with frame-coherent held / just-pressed / just-released tracking.

pub mod bindings;
pub mod signal;

pub use bindings::{Bindings, BindingsError};
pub use signal::{Horizontal, RawKeyEvent, Signal, SignalState};
