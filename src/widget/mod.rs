//! The weather widget: its state value and the flows that drive it

pub mod controller;
pub mod state;

pub use controller::SearchFlow;
pub use state::{Action, WidgetState, reduce};
