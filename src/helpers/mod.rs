//! Helper functions shared by the generator and the dev server

mod html;
mod url;

pub use html::*;
pub use url::*;
