//! Removes markup spans of a given tag name from HTML text.

/// Defines `TagStripper`.
mod tag_stripper;

pub use tag_stripper::{
    TagStripper,
    Stripped,
    strip_tag,
    strip_tag_in_file,
};
