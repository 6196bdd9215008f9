//! 区块（block）数据模型：方向、位置、索引约定。
//!
//! 一个 [`Block`] 表示一段连续位置：非负坐标按升序排列（方向 +1），
//! 负数哨兵计数按降序排列（方向 -1），后者只记录缺口长度，不代表真实坐标。

pub mod codec;
pub mod sites;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BlockError;

/// 区块方向，序列化为线格式整数 `1` / `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Direction implied by the sign class of a raw position.
    #[inline]
    pub fn of(pos: i64) -> Self {
        if pos >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    #[inline]
    pub fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> i8 {
        d.step() as i8
    }
}

impl TryFrom<i8> for Direction {
    type Error = BlockError;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Direction::Forward),
            -1 => Ok(Direction::Reverse),
            _ => Err(BlockError::InvalidBlock(format!("direction {}", v))),
        }
    }
}

/// Numbering convention of block boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indexing {
    #[default]
    ZeroBased,
    OneBased,
}

/// Typed view of a raw position.
///
/// `Real(n)` is the coordinate `n`. `Gap(k)` is the k-th slot (k >= 1) of a
/// span that has no coordinate; on the wire it is written as `-k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Real(u64),
    Gap(u64),
}

impl Position {
    #[inline]
    pub fn from_raw(v: i64) -> Self {
        if v >= 0 {
            Position::Real(v as u64)
        } else {
            Position::Gap(v.unsigned_abs())
        }
    }

    #[inline]
    pub fn to_raw(self) -> i64 {
        match self {
            Position::Real(n) => n as i64,
            Position::Gap(k) => -(k as i64),
        }
    }

    pub fn is_gap(self) -> bool {
        matches!(self, Position::Gap(_))
    }
}

impl From<i64> for Position {
    fn from(v: i64) -> Self {
        Position::from_raw(v)
    }
}

impl From<Position> for i64 {
    fn from(p: Position) -> i64 {
        p.to_raw()
    }
}

/// 区块 (start, stop, direction)，stop 为开区间端点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub start: i64,
    pub stop: i64,
    pub direction: Direction,
}

impl Block {
    pub fn new(start: i64, stop: i64, direction: Direction) -> Self {
        Self { start, stop, direction }
    }

    /// Ascending run `start..stop`.
    pub fn forward(start: i64, stop: i64) -> Self {
        Self::new(start, stop, Direction::Forward)
    }

    /// Sentinel run; `start` and `stop` are both negative.
    pub fn reverse(start: i64, stop: i64) -> Self {
        Self::new(start, stop, Direction::Reverse)
    }

    #[inline]
    pub fn len(&self) -> usize {
        (self.stop - self.start).unsigned_abs() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.start < 0
    }

    /// Member positions in run order: ascending when `start <= stop`,
    /// descending otherwise.
    pub fn positions(&self) -> impl Iterator<Item = i64> {
        let start = self.start;
        let step = if self.start <= self.stop { 1 } else { -1 };
        (0..self.len() as i64).map(move |k| start + step * k)
    }

    /// Shift the boundary between 0-based and 1-based numbering.
    pub fn convert(self, from: Indexing, to: Indexing) -> Self {
        match (from, to) {
            (Indexing::OneBased, Indexing::ZeroBased) => self.to_zero_based(),
            (Indexing::ZeroBased, Indexing::OneBased) => self.to_one_based(),
            _ => self,
        }
    }

    /// 1-based → 0-based：哨兵区块移动 stop，坐标区块移动 start
    pub fn to_zero_based(self) -> Self {
        if self.start < 0 {
            Self { stop: self.stop - 1, ..self }
        } else {
            Self { start: self.start - 1, ..self }
        }
    }

    /// 0-based → 1-based
    pub fn to_one_based(self) -> Self {
        if self.start < 0 {
            Self { stop: self.stop + 1, ..self }
        } else {
            Self { start: self.start + 1, ..self }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == Direction::of(self.start) {
            write!(f, "{}:{}", self.start, self.stop)
        } else {
            write!(f, "{}:{}:{}", self.start, self.stop, self.direction.step())
        }
    }
}

impl FromStr for Block {
    type Err = BlockError;

    /// Parses `start:stop` or `start:stop:dir`. Without `dir` the direction
    /// follows the sign of `start`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BlockError::InvalidBlock(s.to_string());
        let mut parts = s.trim().split(':');
        let start: i64 = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
        let stop: i64 = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
        let direction = match parts.next() {
            Some(d) => {
                let d: i8 = d.trim().parse().map_err(|_| invalid())?;
                Direction::try_from(d).map_err(|_| invalid())?
            }
            None => Direction::of(start),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Block::new(start, stop, direction))
    }
}

pub fn to_zero_based(blocks: &[Block]) -> Vec<Block> {
    blocks.iter().map(|b| b.to_zero_based()).collect()
}

pub fn to_one_based(blocks: &[Block]) -> Vec<Block> {
    blocks.iter().map(|b| b.to_one_based()).collect()
}

/// Total number of positions covered by a block list.
pub fn total_len(blocks: &[Block]) -> usize {
    blocks.iter().map(Block::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_convert_round_trip_both_sign_classes() {
        for b in [
            Block::forward(0, 5),
            Block::forward(10, 50),
            Block::reverse(-1, -5),
            Block::reverse(-5, -10),
        ] {
            assert_eq!(b.to_one_based().to_zero_based(), b);
            assert_eq!(b.to_zero_based().to_one_based(), b);
        }
    }

    #[test]
    fn index_convert_shifts_expected_boundary() {
        assert_eq!(Block::forward(1, 5).to_zero_based(), Block::forward(0, 5));
        assert_eq!(Block::forward(10, 50).to_zero_based(), Block::forward(9, 50));
        assert_eq!(Block::reverse(-1, -5).to_zero_based(), Block::reverse(-1, -6));
        assert_eq!(Block::reverse(-5, -10).to_one_based(), Block::reverse(-5, -9));
        assert_eq!(
            Block::forward(3, 7).convert(Indexing::ZeroBased, Indexing::ZeroBased),
            Block::forward(3, 7)
        );
    }

    #[test]
    fn positions_follow_boundary_order() {
        let up: Vec<i64> = Block::forward(2, 5).positions().collect();
        assert_eq!(up, vec![2, 3, 4]);
        let down: Vec<i64> = Block::reverse(-1, -4).positions().collect();
        assert_eq!(down, vec![-1, -2, -3]);
        assert_eq!(Block::reverse(-4, -1).len(), 3);
    }

    #[test]
    fn position_raw_mapping() {
        assert_eq!(Position::from_raw(7), Position::Real(7));
        assert_eq!(Position::from_raw(-3), Position::Gap(3));
        assert_eq!(Position::Gap(1).to_raw(), -1);
        assert!(Position::from(-1).is_gap());
    }

    #[test]
    fn block_text_form() {
        assert_eq!("0:3".parse::<Block>().unwrap(), Block::forward(0, 3));
        assert_eq!("-4:-1".parse::<Block>().unwrap(), Block::reverse(-4, -1));
        assert_eq!("5:2:-1".parse::<Block>().unwrap(), Block::reverse(5, 2));
        assert_eq!(Block::reverse(5, 2).to_string(), "5:2:-1");
        assert_eq!(Block::forward(0, 3).to_string(), "0:3");
        assert!("1:2:3".parse::<Block>().is_err());
        assert!("1".parse::<Block>().is_err());
        assert!("a:b".parse::<Block>().is_err());
    }
}
