//! Reusable HTML components for page generation
//!
//! Maud component functions shared by the blog index, post and not found
//! pages.

pub mod layout;
pub mod nav;
pub mod status;
