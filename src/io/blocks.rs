use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::block::Block;
use crate::error::BlockError;

/// Parses `start:stop[:dir]` blocks separated by `;`. Empty text is an empty list.
pub fn parse_block_list(text: &str) -> std::result::Result<Vec<Block>, BlockError> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

pub fn format_block_list(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Integers separated by whitespace and/or commas.
pub fn parse_positions(text: &str) -> Result<Vec<i64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().with_context(|| format!("invalid position '{}'", s)))
        .collect()
}

pub fn parse_sites(text: &str) -> Result<Vec<usize>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().with_context(|| format!("invalid site index '{}'", s)))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableMeta {
    /// alignment file the table was built from
    pub source: Option<String>,
    /// id of the reference record
    pub reference: Option<String>,
    pub gap_char: char,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: String,
    pub blocks: Vec<Block>,
}

/// 区块表：一个参考序列下多条记录的区块列表，bincode 序列化
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockTable {
    pub meta: TableMeta,
    pub records: Vec<BlockRecord>,
}

impl BlockTable {
    pub fn new(meta: TableMeta) -> Self {
        Self { meta, records: Vec::new() }
    }

    pub fn push(&mut self, id: impl Into<String>, blocks: Vec<Block>) {
        self.records.push(BlockRecord { id: id.into(), blocks });
    }

    pub fn get(&self, id: &str) -> Option<&[Block]> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.blocks.as_slice())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let f = std::fs::File::create(path)
            .with_context(|| format!("cannot create block table '{}'", path.display()))?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("cannot open block table '{}'", path.display()))?;
        let table: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        Ok(table)
    }
}
