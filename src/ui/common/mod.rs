//! Common reusable UI components

pub mod spinner;

pub use spinner::{InlineSpinner, LoadingSpinner, Spinner, SpinnerSize};
