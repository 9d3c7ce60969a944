//! Output rendering for the CLI.

pub mod json;

pub use json::{ValidationView, render_json};
