//! 位置列表与区块列表之间的无损转换（游程压缩）。
//!
//! 非负位置按 +1 步长连续，负数哨兵按 -1 步长连续；符号变化或步长不符即切分区块。

use super::{Block, Direction, Position};

#[inline]
fn continues(prev: i64, cur: i64) -> bool {
    let d = Direction::of(prev);
    d == Direction::of(cur) && cur - prev == d.step()
}

#[inline]
fn close(start: i64, last: i64) -> Block {
    let d = Direction::of(last);
    Block::new(start, last + d.step(), d)
}

/// 将显式位置列表压缩为最小区块列表
///
/// ```
/// use blockcodec::block::{codec, Block};
///
/// let blocks = codec::encode(&[1, 3, 5, 6, 7]);
/// assert_eq!(blocks, vec![Block::forward(1, 2), Block::forward(3, 4), Block::forward(5, 8)]);
/// ```
pub fn encode(positions: &[i64]) -> Vec<Block> {
    let Some((&first, rest)) = positions.split_first() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let mut start = first;
    let mut prev = first;
    for &cur in rest {
        if !continues(prev, cur) {
            blocks.push(close(start, prev));
            start = cur;
        }
        prev = cur;
    }
    blocks.push(close(start, prev));
    blocks
}

/// Like [`encode`], but `None` entries carry no position and always end the
/// current run.
pub fn encode_optional(positions: &[Option<i64>]) -> Vec<Block> {
    let mut blocks = Vec::new();
    // (start, prev) of the open run
    let mut run: Option<(i64, i64)> = None;

    for item in positions {
        run = match (run, *item) {
            (None, None) => None,
            (None, Some(cur)) => Some((cur, cur)),
            (Some((start, prev)), None) => {
                blocks.push(close(start, prev));
                None
            }
            (Some((start, prev)), Some(cur)) => {
                if continues(prev, cur) {
                    Some((start, cur))
                } else {
                    blocks.push(close(start, prev));
                    Some((cur, cur))
                }
            }
        };
    }
    if let Some((start, prev)) = run {
        blocks.push(close(start, prev));
    }
    blocks
}

/// 展开区块列表为显式位置列表
pub fn decode(blocks: &[Block]) -> Vec<i64> {
    let mut out = Vec::with_capacity(super::total_len(blocks));
    for b in blocks {
        out.extend(b.positions());
    }
    out
}

pub fn encode_positions(positions: &[Position]) -> Vec<Block> {
    let raw: Vec<i64> = positions.iter().map(|p| p.to_raw()).collect();
    encode(&raw)
}

pub fn decode_positions(blocks: &[Block]) -> Vec<Position> {
    blocks
        .iter()
        .flat_map(Block::positions)
        .map(Position::from_raw)
        .collect()
}
