//! # blockcodec
//!
//! 区块坐标编码引擎：把显式位置列表与两两比对压缩为最小游程区块列表。
//!
//! 本 crate 提供：
//!
//! - **区间编解码**：位置列表 ⇄ 区块列表，0-based / 1-based 互转
//! - **两两比对编码**：参考坐标系下的区块列表，负数哨兵区块记录参考缺口长度
//! - **位点删除**：删除序列位点并同步更新区块列表
//! - **外显子合并**：转录本外显子与 CDS 外显子合并为不重叠的带标记划分
//!
//! ## 快速示例
//!
//! ```rust
//! use blockcodec::align::pairwise_to_blocks;
//! use blockcodec::block::{codec, Block};
//!
//! let blocks = pairwise_to_blocks("ATGGAGCTG", "ATG---CAG", '-').unwrap();
//! assert_eq!(blocks, vec![Block::forward(0, 3), Block::forward(6, 9)]);
//! assert_eq!(codec::decode(&blocks), vec![0, 1, 2, 6, 7, 8]);
//! ```
//!
//! ## 模块说明
//!
//! - [`block`] — 区块模型、编解码 ([`block::codec`])、位点删除 ([`block::sites`])
//! - [`align`] — 两两比对编码与批量并行编码
//! - [`exon`] — 外显子区块合并与注释
//! - [`io`] — 比对 FASTA 读取、区块文本格式与区块表文件
//! - [`error`] — 错误类型

pub mod align;
pub mod block;
pub mod error;
pub mod exon;
pub mod io;

pub use block::{Block, Direction, Indexing, Position};
pub use error::BlockError;
