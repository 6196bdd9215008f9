//! 外显子区块：转录本划分与 CDS 划分的合并及注释

pub mod annotate;
pub mod merge;

pub use annotate::{annotate_exons, ExonRecord, TranscriptAnchor};
pub use merge::{merge_exon_blocks, ExonBlock};
