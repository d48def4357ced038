pub mod condition_set;
pub mod entry_point;
pub mod import_kind;
pub mod import_record;
pub mod module_format;
pub mod module_id;
pub mod package_json;
pub mod raw_idx;
pub mod resolution_result;
pub mod resolved_id;
pub mod target;
