// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Damped orbit camera controller.
//!
//! Orbitcam turns pointer, touch, wheel and keyboard input into a smooth,
//! constraint-respecting camera orbit around a target point, with inertial
//! momentum after release and independently timed animated transitions.
//!
//! # Key entry points
//!
//! - [`OrbitControls`] - the controller: input, per-frame update,
//!   animation
//! - [`camera::CameraHandle`] - the camera contract the controller drives
//! - [`input::InputSurface`] - where the controller registers listeners
//! - [`options::Options`] - runtime configuration (gestures, motion,
//!   limits, keybindings)
//! - [`session::ViewSession`] - switching between orbit and an alternate
//!   controller
//!
//! # Frame loop
//!
//! ```ignore
//! controls.handle_event(&event);
//! let moved = controls.update(dt) | controls.run_animation_frame(now);
//! if moved {
//!     renderer.draw(&camera.borrow());
//! }
//! ```
//!
//! Input handlers only accumulate deltas; the camera pose is written once
//! per tick, by the integrator or by a running animation, never both.

pub mod camera;
pub mod controls;
pub mod error;
pub mod events;
pub mod input;
pub mod options;
pub mod session;
pub mod util;

pub use camera::{Camera, CameraHandle, SharedCamera};
pub use controls::OrbitControls;
pub use error::OrbitError;
pub use events::ControlEvent;
pub use input::{InputEvent, Modifiers, MouseButton};
pub use options::Options;
pub use session::{ViewMode, ViewSession};
