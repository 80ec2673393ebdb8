// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod listing_builder;

pub use listing_builder::{append_row, d, extract_path, ExtractFixture, ListingBuilder};
