// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod fixture_files;
pub mod test_data_builder;
