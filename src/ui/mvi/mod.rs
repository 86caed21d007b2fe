//! Model-View-Intent (MVI) primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Dialog state lives in a `UiState`, every change goes through a
//! `Reducer`, and rendering only ever reads the state. Resources that
//! cannot be compared or cloned (callbacks, channels) stay outside.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
