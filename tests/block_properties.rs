use blockcodec::align::{pairwise_to_blocks, ColumnClass};
use blockcodec::block::{codec, sites, to_one_based, to_zero_based, Block, Indexing};
use blockcodec::exon::merge_exon_blocks;

/// Small deterministic LCG so the cases are reproducible.
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.0 >> 16
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next() % n
    }
}

/// Concatenation of ascending real runs and descending sentinel runs.
fn make_positions(rng: &mut Lcg) -> Vec<i64> {
    let mut out = Vec::new();
    let mut next_real = rng.below(5) as i64;
    for _ in 0..(1 + rng.below(8)) {
        let len = 1 + rng.below(6) as i64;
        if rng.below(3) == 0 {
            let top = -1 - rng.below(4) as i64;
            out.extend((0..len).map(|k| top - k));
        } else {
            out.extend(next_real..next_real + len);
            next_real += len + rng.below(4) as i64;
        }
    }
    out
}

fn make_alignment(rng: &mut Lcg, len: usize) -> (String, String, Vec<ColumnClass>) {
    let mut r = String::new();
    let mut o = String::new();
    let mut classes = Vec::new();
    for _ in 0..len {
        let (a, b) = match rng.below(4) {
            0 | 1 => ('A', 'C'),
            2 => ('G', '-'),
            _ => {
                if rng.below(2) == 0 {
                    ('-', 'T')
                } else {
                    ('-', '-')
                }
            }
        };
        r.push(a);
        o.push(b);
        classes.push(ColumnClass::classify(a, b, '-'));
    }
    (r, o, classes)
}

#[test]
fn encode_is_canonical() {
    let mut rng = Lcg(1_234_567);
    for _ in 0..200 {
        let positions = make_positions(&mut rng);
        let blocks = codec::encode(&positions);
        let decoded = codec::decode(&blocks);
        assert_eq!(decoded, positions);
        assert_eq!(codec::encode(&decoded), blocks);
        assert_eq!(blockcodec::block::total_len(&blocks), positions.len());
    }
}

#[test]
fn encoded_neighbours_never_merge() {
    let mut rng = Lcg(99);
    for _ in 0..200 {
        let blocks = codec::encode(&make_positions(&mut rng));
        for w in blocks.windows(2) {
            let merged = w[0].direction == w[1].direction && w[0].stop == w[1].start;
            assert!(!merged, "{} and {} should have been one block", w[0], w[1]);
        }
    }
}

#[test]
fn index_convert_is_involutive() {
    let mut rng = Lcg(7);
    for _ in 0..100 {
        let blocks = codec::encode(&make_positions(&mut rng));
        assert_eq!(to_zero_based(&to_one_based(&blocks)), blocks);
        let one = to_one_based(&blocks);
        assert_eq!(to_one_based(&to_zero_based(&one)), one);
    }
}

#[test]
fn pairwise_sentinels_count_reference_gaps() {
    let mut rng = Lcg(2024);
    for len in 1..60 {
        let (r, o, classes) = make_alignment(&mut rng, len);
        let blocks = pairwise_to_blocks(&r, &o, '-').unwrap();

        let gf = classes.iter().filter(|&&c| c == ColumnClass::OtherOnly).count();
        let sentinel: usize = blocks.iter().filter(|b| b.is_sentinel()).map(Block::len).sum();
        assert_eq!(sentinel, gf, "ref={} other={}", r, o);
    }
}

#[test]
fn pairwise_blocks_cover_filled_columns() {
    let mut rng = Lcg(31337);
    for len in 1..60 {
        let (mut r, mut o, mut classes) = make_alignment(&mut rng, len);
        // anchor the first column so no leading implicit block is in play
        r.insert(0, 'A');
        o.insert(0, 'A');
        classes.insert(0, ColumnClass::Filled);

        let mut expected = Vec::new();
        let mut seq_cnt = 0i64;
        for c in &classes {
            if *c == ColumnClass::Filled {
                expected.push(seq_cnt);
            }
            if c.advances_reference() {
                seq_cnt += 1;
            }
        }

        let blocks = pairwise_to_blocks(&r, &o, '-').unwrap();
        let real: Vec<i64> = blocks
            .iter()
            .filter(|b| !b.is_sentinel())
            .flat_map(Block::positions)
            .collect();
        assert_eq!(real, expected, "ref={} other={}", r, o);
    }
}

#[test]
fn site_removal_keeps_survivor_positions() {
    let mut rng = Lcg(55);
    for _ in 0..100 {
        let positions = make_positions(&mut rng);
        let blocks = codec::encode(&positions);
        let seq: String = (0..positions.len()).map(|i| ['A', 'C', 'G', 'T'][i % 4]).collect();

        let removed: Vec<usize> = (0..positions.len()).filter(|_| rng.below(4) == 0).collect();
        let (new_seq, new_blocks) = sites::remove_sites(&seq, &blocks, &removed, Indexing::ZeroBased).unwrap();

        let expected: Vec<i64> = positions
            .iter()
            .enumerate()
            .filter(|(i, _)| !removed.contains(i))
            .map(|(_, &p)| p)
            .collect();
        assert_eq!(new_seq.len(), positions.len() - removed.len());
        assert_eq!(codec::decode(&new_blocks), expected);

        let (one_seq, one_blocks) =
            sites::remove_sites(&seq, &to_one_based(&blocks), &removed, Indexing::OneBased).unwrap();
        assert_eq!(one_seq, new_seq);
        assert_eq!(to_zero_based(&one_blocks), new_blocks);
    }
}

#[test]
fn merged_exons_partition_the_transcript() {
    let mut rng = Lcg(4242);
    for _ in 0..100 {
        let mut transcript = Vec::new();
        let mut cds = Vec::new();
        let mut pos = 0i64;
        let n = 1 + rng.below(6);
        for _ in 0..n {
            let len = 4 + rng.below(20) as i64;
            let exon = Block::forward(pos, pos + len);
            // cds shares the start, the stop, the whole span, or is absent
            match rng.below(4) {
                0 => cds.push(Block::forward(pos + 1 + rng.below((len - 1) as u32) as i64, pos + len)),
                1 => cds.push(Block::forward(pos, pos + 1 + rng.below((len - 1) as u32) as i64)),
                2 => cds.push(exon),
                _ => {}
            }
            transcript.push(exon);
            pos += len + rng.below(10) as i64;
        }

        let (merged, ids) = merge_exon_blocks(&transcript, &cds).unwrap();
        assert_eq!(merged.len(), ids.len());
        for w in merged.windows(2) {
            assert!(w[0].stop <= w[1].start);
        }
        for w in ids.windows(2) {
            assert!(w[1] == w[0] || w[1] == w[0] + 1);
        }
        let covered: usize = merged.iter().map(|b| b.len()).sum();
        assert_eq!(covered, blockcodec::block::total_len(&transcript));
        let coding: usize = merged.iter().filter(|b| b.transcribed).map(|b| b.len()).sum();
        assert_eq!(coding, blockcodec::block::total_len(&cds));
    }
}
