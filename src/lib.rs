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

//! Biomolecule structure model and animated camera/view engine.
//!
//! Vantage turns decoded atom records into a navigable 3D model: atoms are
//! grouped into residues, bonds are inferred with a uniform spatial grid,
//! ribbon plates and a backbone trace are built along each chain, and a
//! scene animates the world between saved viewpoints.
//!
//! # Key entry points
//!
//! - [`structure::Structure`] - atoms, residues and derived geometry
//! - [`scene::Scene`] - current/target/saved views and the animation tick
//! - [`camera::camera_transform`] - one step of the rigid motion between
//!   two camera poses
//! - [`view::View`] - a saved viewpoint and its persisted
//!   [`view::ViewRecord`] form
//! - [`options::Options`] - thresholds and lookup tables (TOML)
//!
//! # Architecture
//!
//! Everything is single threaded. Entities refer to each other by index
//! into the owning collection, so a structure or scene clones without
//! shared state. The host drives the scene by calling
//! [`scene::Scene::tick`] once per frame; each tick either advances the
//! animation by one step, settles on the target view, or does nothing.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod options;
pub mod scene;
pub mod structure;
pub mod view;

pub use error::VantageError;
pub use options::Options;
pub use scene::Scene;
pub use structure::Structure;
