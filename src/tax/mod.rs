//! GST tax calculation

pub mod gst;

pub use gst::*;
