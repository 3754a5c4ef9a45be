//! HTTP protocol layer module
//!
//! Protocol helpers shared by the handlers: response builders, content type
//! detection, date validation, URL path translation and directory listings.

pub mod cache;
pub mod listing;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use path::{translate_path, TranslatedPath};
pub use response::{
    build_304_response, build_403_response, build_404_response, build_501_response,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
    strip_body, HttpResponse,
};
