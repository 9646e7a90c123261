//! Event types and observers.
//!
//! Submodules:
//! - [`levelcomplete`] – request a deferred return to another scene
//! - [`scene`] – apply pending scene transitions and run scene hooks
//! - [`switchdebug`] – toggle debug rendering and diagnostics on/off
//! - [`trigger`] – trigger volume enter/exit notifications
pub mod levelcomplete;
pub mod scene;
pub mod switchdebug;
pub mod trigger;
