use log::debug;
use serde::{Deserialize, Serialize};

use crate::block::{Block, Direction};
use crate::error::{BlockError, Result};

/// 带转录标记的外显子区块（0-based，半开区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExonBlock {
    pub start: i64,
    pub stop: i64,
    /// `true` for a coding-sequence exon, `false` for an untranslated region
    pub transcribed: bool,
}

impl ExonBlock {
    pub fn new(start: i64, stop: i64, transcribed: bool) -> Self {
        Self { start, stop, transcribed }
    }

    #[inline]
    pub fn len(&self) -> usize {
        (self.stop - self.start).unsigned_abs() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn to_block(self) -> Block {
        Block::forward(self.start, self.stop)
    }
}

/// Checks that `blocks` is an ordered, non-overlapping list of ascending
/// non-empty blocks over real coordinates.
pub fn validate_partition(blocks: &[Block], label: &str) -> Result<()> {
    for b in blocks {
        if b.direction != Direction::Forward || b.start < 0 || b.start >= b.stop {
            return Err(BlockError::MalformedBlockList(format!(
                "{} block {} is not an ascending coordinate run",
                label, b
            )));
        }
    }
    for w in blocks.windows(2) {
        if w[0].stop > w[1].start {
            return Err(BlockError::MalformedBlockList(format!(
                "{} blocks {} and {} are out of order or overlap",
                label, w[0], w[1]
            )));
        }
    }
    Ok(())
}

fn check_cds_inside_transcript(transcript: &[Block], cds: &[Block]) -> Result<()> {
    for c in cds {
        let inside = transcript.iter().any(|t| t.start <= c.start && c.stop <= t.stop);
        if !inside {
            return Err(BlockError::MalformedBlockList(format!(
                "cds block {} lies outside every transcript block",
                c
            )));
        }
    }
    Ok(())
}

/// 合并转录本外显子区块与 CDS 外显子区块，得到不重叠、有序、带标记的划分
///
/// Both inputs are 0-based. The blocks are tagged, concatenated and sorted by
/// `(start, stop)`; adjacent pairs that share a boundary are split at the CDS
/// boundary and share one group id. Where both span the same interval only the
/// CDS block is kept. Returns the merged blocks and one group id per block;
/// ids increase by one per consumed group.
pub fn merge_exon_blocks(transcript: &[Block], cds: &[Block]) -> Result<(Vec<ExonBlock>, Vec<usize>)> {
    validate_partition(transcript, "transcript")?;
    validate_partition(cds, "cds")?;
    check_cds_inside_transcript(transcript, cds)?;

    let mut raw: Vec<ExonBlock> = transcript
        .iter()
        .map(|b| ExonBlock::new(b.start, b.stop, false))
        .chain(cds.iter().map(|b| ExonBlock::new(b.start, b.stop, true)))
        .collect();
    // transcript sorts before cds on an identical span
    raw.sort_by_key(|b| (b.start, b.stop, b.transcribed));

    let mut merged = Vec::with_capacity(raw.len() + 1);
    let mut group_ids = Vec::with_capacity(raw.len() + 1);
    let mut group = 0usize;
    let mut i = 0usize;

    while i < raw.len() {
        let cur = raw[i];
        match raw.get(i + 1).copied() {
            // (0, 10, utr) + (5, 10, cds) -> (0, 5, utr), (5, 10, cds)
            Some(next) if cur.start < next.start && cur.stop == next.stop => {
                merged.push(ExonBlock::new(cur.start, next.start, cur.transcribed));
                merged.push(next);
                group_ids.extend([group, group]);
                i += 2;
            }
            // (0, 5, cds) + (0, 10, utr) -> (0, 5, cds), (5, 10, utr)
            Some(next) if cur.start == next.start && cur.stop < next.stop => {
                merged.push(cur);
                merged.push(ExonBlock::new(cur.stop, next.stop, next.transcribed));
                group_ids.extend([group, group]);
                i += 2;
            }
            // identical span: keep the cds block
            Some(next) if cur.start == next.start && cur.stop == next.stop => {
                merged.push(if cur.transcribed { cur } else { next });
                group_ids.push(group);
                i += 2;
            }
            // cds strictly inside a transcript block (single-exon gene)
            Some(next)
                if cur.start < next.start && next.stop < cur.stop && !cur.transcribed && next.transcribed =>
            {
                merged.push(ExonBlock::new(cur.start, next.start, false));
                merged.push(next);
                merged.push(ExonBlock::new(next.stop, cur.stop, false));
                group_ids.extend([group, group, group]);
                i += 2;
            }
            _ => {
                merged.push(cur);
                group_ids.push(group);
                i += 1;
            }
        }
        group += 1;
    }

    check_merged(&merged, transcript)?;
    debug!(
        "merge_exon_blocks: {} transcript + {} cds -> {} blocks in {} groups",
        transcript.len(),
        cds.len(),
        merged.len(),
        group
    );
    Ok((merged, group_ids))
}

/// The merged list must be ordered, non-overlapping and cover exactly the
/// transcript span.
fn check_merged(merged: &[ExonBlock], transcript: &[Block]) -> Result<()> {
    for w in merged.windows(2) {
        if w[0].stop > w[1].start {
            return Err(BlockError::MalformedBlockList(format!(
                "merged exons {}:{} and {}:{} overlap",
                w[0].start, w[0].stop, w[1].start, w[1].stop
            )));
        }
    }
    let covered: usize = merged.iter().map(ExonBlock::len).sum();
    let expected = crate::block::total_len(transcript);
    if covered != expected {
        return Err(BlockError::MalformedBlockList(format!(
            "merged exons cover {} positions, transcript has {}",
            covered, expected
        )));
    }
    Ok(())
}
