//! Headless model of the register and post-request screens.
//!
//! Front ends own one of these per screen, feed it user input, and render
//! whatever option lists it hands back. All cascade bookkeeping lives here.

pub mod leg;
pub mod movement_draft;
pub mod post_request_draft;

pub use leg::{LegSelection, Side};
pub use movement_draft::MovementDraft;
pub use post_request_draft::PostRequestDraft;
