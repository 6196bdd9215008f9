use log::{debug, trace};

use crate::block::Block;
use crate::error::{BlockError, Result};

/// 比对列的四种状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// reference and other both filled (FF)
    Filled,
    /// reference filled, other gapped (FG)
    RefOnly,
    /// both gapped (GG)
    Empty,
    /// reference gapped, other filled (GF)
    OtherOnly,
}

impl ColumnClass {
    #[inline]
    pub fn classify(reference: char, other: char, gap: char) -> Self {
        match (reference != gap, other != gap) {
            (true, true) => ColumnClass::Filled,
            (true, false) => ColumnClass::RefOnly,
            (false, false) => ColumnClass::Empty,
            (false, true) => ColumnClass::OtherOnly,
        }
    }

    /// Whether the column consumes a reference coordinate.
    #[inline]
    pub fn advances_reference(self) -> bool {
        matches!(self, ColumnClass::Filled | ColumnClass::RefOnly)
    }

    fn marker(self) -> char {
        match self {
            ColumnClass::Filled => '|',
            ColumnClass::RefOnly => '_',
            ColumnClass::Empty => '=',
            ColumnClass::OtherOnly => '-',
        }
    }
}

/// 扫描状态：参考坐标计数、连续 GF 列计数、当前打开的区块起点
struct Scan {
    seq_cnt: i64,
    gap_cnt: i64,
    open: Option<i64>,
    blocks: Vec<Block>,
}

impl Scan {
    fn new() -> Self {
        // an implicit block is open at 0 until the first FF or GF column
        Self { seq_cnt: 0, gap_cnt: 0, open: Some(0), blocks: Vec::new() }
    }

    fn open_here(&mut self) {
        self.open = Some(self.seq_cnt);
    }

    fn close(&mut self) {
        if let Some(start) = self.open.take() {
            if start < self.seq_cnt {
                self.blocks.push(Block::forward(start, self.seq_cnt));
            }
        }
    }

    fn flush_gap(&mut self) {
        if self.gap_cnt > 0 {
            self.blocks.push(Block::reverse(-1 - self.gap_cnt, -1));
            self.gap_cnt = 0;
        }
    }

    fn step(&mut self, prev: Option<ColumnClass>, cur: ColumnClass) {
        use ColumnClass::*;

        match (prev, cur) {
            // first column: only the counters move
            (None, Filled | RefOnly | Empty) => {}
            (None, OtherOnly) => self.open = None,

            (Some(Filled), Filled) => {}
            (Some(RefOnly | Empty), Filled) => self.open_here(),
            (Some(OtherOnly), Filled) => {
                self.flush_gap();
                self.open_here();
            }

            (Some(Filled), RefOnly | Empty) => self.close(),
            (Some(RefOnly | Empty), RefOnly | Empty) => {}
            (Some(OtherOnly), RefOnly | Empty) => self.flush_gap(),

            (Some(Filled), OtherOnly) => self.close(),
            (Some(RefOnly | Empty), OtherOnly) => self.open = None,
            (Some(OtherOnly), OtherOnly) => {}
        }

        if let Some(p) = prev {
            trace!("{} {}", p.marker(), self.seq_cnt);
        }
        if cur.advances_reference() {
            self.seq_cnt += 1;
        }
        if cur == OtherOnly {
            self.gap_cnt += 1;
        }
    }

    fn finish(mut self) -> Vec<Block> {
        // a pending GF run implies no block is open
        self.flush_gap();
        self.close();
        self.blocks
    }
}

/// 将两条等长比对序列编码为相对参考序列坐标的区块列表
///
/// Ascending blocks are spans of the reference's 0-based coordinates where
/// `other` has characters. A run of columns where only `other` has characters
/// becomes a sentinel block `(-1 - n, -1, -1)` recording its length `n`.
///
/// ```
/// use blockcodec::align::pairwise_to_blocks;
/// use blockcodec::block::Block;
///
/// let blocks = pairwise_to_blocks("ATG---CTG", "ATGGAGCAG", '-').unwrap();
/// assert_eq!(blocks, vec![Block::forward(0, 3), Block::reverse(-4, -1), Block::forward(3, 6)]);
/// ```
pub fn pairwise_to_blocks(reference: &str, other: &str, gap: char) -> Result<Vec<Block>> {
    let ref_len = reference.chars().count();
    let other_len = other.chars().count();
    if ref_len != other_len {
        return Err(BlockError::UnequalAlignmentLength { reference: ref_len, other: other_len });
    }

    let mut scan = Scan::new();
    let mut prev: Option<ColumnClass> = None;
    for (r, o) in reference.chars().zip(other.chars()) {
        let cur = ColumnClass::classify(r, o, gap);
        scan.step(prev, cur);
        prev = Some(cur);
    }

    let blocks = scan.finish();
    debug!("pairwise_to_blocks: {} columns -> {} blocks", ref_len, blocks.len());
    Ok(blocks)
}
