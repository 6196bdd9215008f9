//! 比对编码：两条等长比对序列 → 参考坐标系下的区块列表

pub mod batch;
pub mod pairwise;

pub use batch::encode_against_reference;
pub use pairwise::{pairwise_to_blocks, ColumnClass};
