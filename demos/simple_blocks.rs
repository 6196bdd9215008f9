//! 演示如何在 library 模式下使用 blockcodec。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_blocks
//! ```

use blockcodec::align::pairwise_to_blocks;
use blockcodec::block::{codec, sites, Indexing};
use blockcodec::exon::{annotate_exons, merge_exon_blocks, TranscriptAnchor};
use blockcodec::io::blocks::format_block_list;
use blockcodec::Block;

fn main() -> anyhow::Result<()> {
    // 1. 位置列表 -> 区块
    let positions = [1, 3, 5, 6, 7];
    let blocks = codec::encode(&positions);
    println!("positions {:?} -> {}", positions, format_block_list(&blocks));

    // 2. 两两比对编码
    let reference = "ATG---CTG";
    let other = "ATGGAGCAG";
    let aln_blocks = pairwise_to_blocks(reference, other, '-')?;
    println!("ref   : {}", reference);
    println!("other : {}", other);
    println!("blocks: {}", format_block_list(&aln_blocks));

    // 3. 删除位点
    let seq = "ATGGAGCAG";
    let seq_blocks = [Block::forward(100, 109)];
    let (new_seq, new_blocks) = sites::remove_sites(seq, &seq_blocks, &[3, 4, 5], Indexing::ZeroBased)?;
    println!("remove 3,4,5: {} {}", new_seq, format_block_list(&new_blocks));

    // 4. 外显子合并
    let transcript = [Block::forward(0, 10), Block::forward(20, 30)];
    let cds = [Block::forward(5, 10), Block::forward(20, 25)];
    let (merged, ids) = merge_exon_blocks(&transcript, &cds)?;
    let anchor = TranscriptAnchor { genome_start: 1_000, forward: true };
    for rec in annotate_exons(&merged, &ids, anchor, Some("ATGCCGGATC"))? {
        println!(
            "exon {} transcribed={} tss=[{}, {}) genome=[{}, {}) {}",
            rec.exon_id,
            rec.transcribed,
            rec.from_tss_start,
            rec.from_tss_stop,
            rec.genome_start,
            rec.genome_stop,
            rec.sequence
        );
    }
    Ok(())
}
