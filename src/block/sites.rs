use log::debug;

use super::codec;
use super::{to_one_based, to_zero_based, Block, Indexing};
use crate::error::{BlockError, Result};

/// Mask of surviving dense indices; duplicates in `removed` delete once.
fn keep_mask(removed: &[usize], len: usize) -> Result<Vec<bool>> {
    let mut keep = vec![true; len];
    for &index in removed {
        if index >= len {
            return Err(BlockError::SiteOutOfRange { index, len });
        }
        keep[index] = false;
    }
    Ok(keep)
}

fn zero_based(blocks: &[Block], indexing: Indexing) -> Vec<Block> {
    match indexing {
        Indexing::ZeroBased => blocks.to_vec(),
        Indexing::OneBased => to_zero_based(blocks),
    }
}

fn restore(blocks: Vec<Block>, indexing: Indexing) -> Vec<Block> {
    match indexing {
        Indexing::ZeroBased => blocks,
        Indexing::OneBased => to_one_based(&blocks),
    }
}

/// Removes characters at the dense 0-based indices `removed` from `seq` and
/// re-derives the block list of the survivors.
///
/// `blocks` must decode to exactly one position per character of `seq`.
/// Returns the shortened sequence together with its block list, expressed in
/// the same `indexing` convention as the input.
pub fn remove_sites(
    seq: &str,
    blocks: &[Block],
    removed: &[usize],
    indexing: Indexing,
) -> Result<(String, Vec<Block>)> {
    let chars: Vec<char> = seq.chars().collect();
    let abs = codec::decode(&zero_based(blocks, indexing));
    if abs.len() != chars.len() {
        return Err(BlockError::LengthMismatch { blocks: abs.len(), sequence: chars.len() });
    }

    let keep = keep_mask(removed, chars.len())?;
    let mut new_seq = String::with_capacity(chars.len());
    let mut survivors = Vec::with_capacity(chars.len());
    for ((c, pos), k) in chars.iter().zip(abs).zip(keep) {
        if k {
            new_seq.push(*c);
            survivors.push(pos);
        }
    }

    let new_blocks = codec::encode(&survivors);
    debug!(
        "remove_sites: {} -> {} sites, {} -> {} blocks",
        chars.len(),
        survivors.len(),
        blocks.len(),
        new_blocks.len()
    );
    Ok((new_seq, restore(new_blocks, indexing)))
}

/// Site removal over an aligned (gapped) sequence.
///
/// Here `blocks` covers only the non-gap characters of `seq`; gap characters
/// have no position. Survivors are re-encoded so that a gap always breaks a
/// run.
pub fn remove_aligned_sites(
    seq: &str,
    blocks: &[Block],
    removed: &[usize],
    gap: char,
    indexing: Indexing,
) -> Result<(String, Vec<Block>)> {
    let chars: Vec<char> = seq.chars().collect();
    let abs = codec::decode(&zero_based(blocks, indexing));
    let filled = chars.iter().filter(|&&c| c != gap).count();
    if abs.len() != filled {
        return Err(BlockError::LengthMismatch { blocks: abs.len(), sequence: filled });
    }

    let mut abs_iter = abs.into_iter();
    let slots: Vec<Option<i64>> = chars
        .iter()
        .map(|&c| if c != gap { abs_iter.next() } else { None })
        .collect();

    let keep = keep_mask(removed, chars.len())?;
    let mut new_seq = String::with_capacity(chars.len());
    let mut survivors = Vec::with_capacity(chars.len());
    for ((c, slot), k) in chars.iter().zip(slots).zip(keep) {
        if k {
            new_seq.push(*c);
            survivors.push(slot);
        }
    }

    let new_blocks = codec::encode_optional(&survivors);
    Ok((new_seq, restore(new_blocks, indexing)))
}
