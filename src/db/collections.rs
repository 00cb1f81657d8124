//! MongoDB collection names.

pub const BRANDS: &str = "brands";
pub const MODELS: &str = "models";
pub const DEALERS: &str = "dealers";
pub const PAGES: &str = "pages";
