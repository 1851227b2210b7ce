//! 文档库批量导入
//!
//! 扫描文档目录中的 PDF，读取元数据，分类并匹配作者后登记为文档。
//! 以文件名作为幂等键，重复运行不会重复登记。

pub mod authors;
pub mod classify;
pub mod pdf_metadata;
pub mod pipeline;
pub mod scanner;

pub use pipeline::{IngestOptions, run_ingestion};
