use log::{debug, warn};
use rayon::prelude::*;

use super::pairwise::pairwise_to_blocks;
use crate::block::Block;
use crate::error::Result;

/// 批量编码：每条记录独立地相对同一条参考序列编码，记录之间并行。
///
/// Results keep the input order. A record that fails (e.g. length mismatch)
/// carries its error in its own slot; the other records are unaffected.
pub fn encode_against_reference<'a>(
    reference: &str,
    records: &[(&'a str, &'a str)],
    gap: char,
) -> Vec<(&'a str, Result<Vec<Block>>)> {
    let out: Vec<(&'a str, Result<Vec<Block>>)> = records
        .par_iter()
        .map(|&(id, seq)| (id, pairwise_to_blocks(reference, seq, gap)))
        .collect();

    let failed = out.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        warn!("{} of {} records could not be encoded", failed, out.len());
    }
    debug!("encoded {} records on {} threads", out.len(), rayon::current_num_threads());
    out
}
