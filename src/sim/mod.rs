/// Game simulation: session state, tick pacing, input reconciliation, persistence.

pub mod clock;
pub mod event;
pub mod food;
pub mod menu;
pub mod reconciler;
pub mod sampler;
pub mod save;
pub mod session;
pub mod step;
