/// Marker trait for intent objects.
///
/// Intents are user actions (key presses, picker changes) or system
/// events (a save finishing) fed to a reducer.
pub trait Intent: Send + 'static {}
