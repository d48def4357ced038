pub mod load_source;
pub mod normalize_options;
pub mod resolve_id;
