use serde::{Deserialize, Serialize};

use super::merge::ExonBlock;
use crate::error::{BlockError, Result};

/// Where a transcript sits on the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptAnchor {
    /// genome coordinate of the transcription start site
    pub genome_start: i64,
    pub forward: bool,
}

impl TranscriptAnchor {
    #[inline]
    fn to_genome(self, offset: i64) -> i64 {
        if self.forward {
            self.genome_start + offset
        } else {
            self.genome_start - offset
        }
    }
}

/// One row of a merged exon table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExonRecord {
    pub exon_id: usize,
    pub transcribed: bool,
    pub baselen: usize,
    pub from_tss_start: i64,
    pub from_tss_stop: i64,
    /// only set for transcribed exons
    pub from_cds_start: Option<usize>,
    pub from_cds_stop: Option<usize>,
    pub genome_start: i64,
    pub genome_stop: i64,
    pub sequence: String,
}

/// 为合并后的外显子区块生成注释记录
///
/// CDS-relative coordinates accumulate over transcribed exons in order. When
/// `cds_sequence` is given, each transcribed exon takes its slice of it;
/// untranscribed exons (and all exons without a sequence) are filled with `N`.
pub fn annotate_exons(
    blocks: &[ExonBlock],
    group_ids: &[usize],
    anchor: TranscriptAnchor,
    cds_sequence: Option<&str>,
) -> Result<Vec<ExonRecord>> {
    if blocks.len() != group_ids.len() {
        return Err(BlockError::MalformedBlockList(format!(
            "{} exon blocks but {} group ids",
            blocks.len(),
            group_ids.len()
        )));
    }

    let cds_chars: Option<Vec<char>> = cds_sequence.map(|s| s.chars().collect());
    if let Some(chars) = &cds_chars {
        let needed: usize = blocks.iter().filter(|b| b.transcribed).map(ExonBlock::len).sum();
        if chars.len() < needed {
            return Err(BlockError::LengthMismatch { blocks: needed, sequence: chars.len() });
        }
    }

    let mut from_cds = 0usize;
    let mut records = Vec::with_capacity(blocks.len());
    for (b, &exon_id) in blocks.iter().zip(group_ids) {
        let baselen = b.len();
        let (from_cds_start, from_cds_stop, sequence) = if b.transcribed {
            let seq = match &cds_chars {
                Some(chars) => chars[from_cds..from_cds + baselen].iter().collect(),
                None => "N".repeat(baselen),
            };
            let span = (Some(from_cds), Some(from_cds + baselen), seq);
            from_cds += baselen;
            span
        } else {
            (None, None, "N".repeat(baselen))
        };

        records.push(ExonRecord {
            exon_id,
            transcribed: b.transcribed,
            baselen,
            from_tss_start: b.start,
            from_tss_stop: b.stop,
            from_cds_start,
            from_cds_stop,
            genome_start: anchor.to_genome(b.start),
            genome_stop: anchor.to_genome(b.stop),
            sequence,
        });
    }
    Ok(records)
}
