pub mod digits;
pub mod dp_cache;
