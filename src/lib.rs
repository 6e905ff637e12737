//! 将列分类模型的逐列预测与条件打分模型组合，合成单条可执行 SQL。

pub mod api;
pub mod config;
pub mod core;
pub mod infra;
pub mod models;
pub mod service;
