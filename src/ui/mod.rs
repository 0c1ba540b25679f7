/// View layer
///
/// This module builds the widget trees:
/// - The detect page and its render helpers (detect.rs)
/// - The static informational pages (pages.rs)

pub mod detect;
pub mod pages;
