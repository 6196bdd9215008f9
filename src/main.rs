use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, warn};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use blockcodec::align;
use blockcodec::block::{codec, sites, to_one_based, to_zero_based, Indexing};
use blockcodec::exon::{self, TranscriptAnchor};
use blockcodec::io::blocks::{self as block_io, BlockTable, TableMeta};
use blockcodec::io::fasta;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "blockcodec",
    author,
    version,
    about = "Block-coordinate encoding of positions, pairwise alignments and exon partitions",
    arg_required_else_help = true
)]
struct Cli {
    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress a list of positions (comma or whitespace separated) into blocks
    Encode {
        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
        /// Print blocks with 1-based boundaries
        #[arg(long)]
        one_based: bool,
    },
    /// Expand a block list (`start:stop;...`) into positions
    Decode {
        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
        /// Input blocks use 1-based boundaries
        #[arg(long)]
        one_based: bool,
    },
    /// Encode every record of an aligned FASTA relative to a reference record
    Pairwise {
        /// Aligned FASTA file
        alignment: PathBuf,
        /// Reference record id (first record if omitted)
        #[arg(short = 'r', long)]
        reference: Option<String>,
        #[arg(short = 'g', long = "gap", default_value_t = '-')]
        gap: char,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// Output TSV path (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also write a binary block table
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print a saved block table
    View {
        table: PathBuf,
    },
    /// Remove sites from a sequence and update its block list
    RemoveSites {
        #[arg(long)]
        seq: String,
        #[arg(long, allow_hyphen_values = true)]
        blocks: String,
        /// 0-based site indices, comma separated
        #[arg(long)]
        sites: String,
        #[arg(long)]
        one_based: bool,
        /// Treat the sequence as aligned; gap characters carry no position
        #[arg(long)]
        gap: Option<char>,
    },
    /// Merge transcript exon blocks with CDS exon blocks (0-based)
    MergeExons {
        #[arg(long, allow_hyphen_values = true)]
        transcript: String,
        #[arg(long, allow_hyphen_values = true)]
        cds: String,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        genome_start: i64,
        /// Transcript lies on the reverse strand
        #[arg(long)]
        reverse: bool,
        /// CDS sequence used to fill transcribed exons
        #[arg(long)]
        cds_seq: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        Commands::Encode { input, one_based } => run_encode(input.as_deref(), one_based),
        Commands::Decode { input, one_based } => run_decode(input.as_deref(), one_based),
        Commands::Pairwise {
            alignment,
            reference,
            gap,
            threads,
            out,
            save,
        } => run_pairwise(&alignment, reference.as_deref(), gap, threads, out.as_deref(), save.as_deref()),
        Commands::View { table } => run_view(&table),
        Commands::RemoveSites {
            seq,
            blocks,
            sites,
            one_based,
            gap,
        } => run_remove_sites(&seq, &blocks, &sites, one_based, gap),
        Commands::MergeExons {
            transcript,
            cds,
            genome_start,
            reverse,
            cds_seq,
        } => run_merge_exons(&transcript, &cds, genome_start, reverse, cds_seq.as_deref()),
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("cannot read '{}'", p.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match out {
        Some(p) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(p).with_context(|| format!("cannot create '{}'", p.display()))?,
        )),
        None => Box::new(std::io::BufWriter::new(std::io::stdout())),
    })
}

fn run_encode(input: Option<&Path>, one_based: bool) -> Result<()> {
    let positions = block_io::parse_positions(&read_input(input)?)?;
    let mut blocks = codec::encode(&positions);
    if one_based {
        blocks = to_one_based(&blocks);
    }
    println!("{}", block_io::format_block_list(&blocks));
    Ok(())
}

fn run_decode(input: Option<&Path>, one_based: bool) -> Result<()> {
    let mut blocks = block_io::parse_block_list(&read_input(input)?)?;
    if one_based {
        blocks = to_zero_based(&blocks);
    }
    let positions: Vec<String> = codec::decode(&blocks).iter().map(ToString::to_string).collect();
    println!("{}", positions.join(","));
    Ok(())
}

fn run_pairwise(
    alignment: &Path,
    reference: Option<&str>,
    gap: char,
    threads: usize,
    out: Option<&Path>,
    save: Option<&Path>,
) -> Result<()> {
    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        warn!("failed to configure thread pool: {}", e);
    }

    let records = fasta::read_alignment(alignment)?;
    let ref_idx = match reference {
        Some(id) => records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| anyhow!("reference '{}' not found in '{}'", id, alignment.display()))?,
        None => 0,
    };
    let ref_rec = &records[ref_idx];
    info!("alignment: {}", alignment.display());
    info!("reference: {} ({} columns)", ref_rec.id, ref_rec.seq.chars().count());

    let others: Vec<(&str, &str)> = records
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != ref_idx)
        .map(|(_, r)| (r.id.as_str(), r.seq.as_str()))
        .collect();
    if others.is_empty() {
        bail!("alignment '{}' has no records besides the reference", alignment.display());
    }

    let encoded = align::encode_against_reference(&ref_rec.seq, &others, gap);

    let mut table = BlockTable::new(TableMeta {
        source: Some(alignment.display().to_string()),
        reference: Some(ref_rec.id.clone()),
        gap_char: gap,
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    let mut w = open_output(out)?;
    for (id, res) in encoded {
        match res {
            Ok(blocks) => {
                writeln!(w, "{}\t{}", id, block_io::format_block_list(&blocks))?;
                table.push(id, blocks);
            }
            Err(e) => warn!("skipping {}: {}", id, e),
        }
    }
    w.flush()?;

    if let Some(p) = save {
        table.save_to_file(p)?;
        info!("block table saved: {} ({} records)", p.display(), table.records.len());
    }
    Ok(())
}

fn run_view(path: &Path) -> Result<()> {
    let table = BlockTable::load_from_file(path)?;
    let meta = &table.meta;
    println!("# source: {}", meta.source.as_deref().unwrap_or("-"));
    println!("# reference: {}", meta.reference.as_deref().unwrap_or("-"));
    println!("# gap: {}", meta.gap_char);
    if let Some(ts) = &meta.build_timestamp {
        println!("# built: {}", ts);
    }
    for rec in &table.records {
        println!("{}\t{}", rec.id, block_io::format_block_list(&rec.blocks));
    }
    Ok(())
}

fn run_remove_sites(seq: &str, blocks: &str, site_list: &str, one_based: bool, gap: Option<char>) -> Result<()> {
    let blocks = block_io::parse_block_list(blocks)?;
    let removed = block_io::parse_sites(site_list)?;
    let indexing = if one_based { Indexing::OneBased } else { Indexing::ZeroBased };

    let (new_seq, new_blocks) = match gap {
        Some(g) => sites::remove_aligned_sites(seq, &blocks, &removed, g, indexing)?,
        None => sites::remove_sites(seq, &blocks, &removed, indexing)?,
    };
    println!("{}\t{}", new_seq, block_io::format_block_list(&new_blocks));
    Ok(())
}

fn run_merge_exons(
    transcript: &str,
    cds: &str,
    genome_start: i64,
    reverse: bool,
    cds_seq: Option<&str>,
) -> Result<()> {
    let transcript = block_io::parse_block_list(transcript)?;
    let cds = block_io::parse_block_list(cds)?;
    let (merged, group_ids) = exon::merge_exon_blocks(&transcript, &cds)?;
    let anchor = TranscriptAnchor { genome_start, forward: !reverse };
    let records = exon::annotate_exons(&merged, &group_ids, anchor, cds_seq)?;

    let fmt_opt = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |x| x.to_string());
    let mut w = open_output(None)?;
    writeln!(
        w,
        "exon_id\ttranscribed\tbaselen\tfrom_tss_start\tfrom_tss_stop\tfrom_cds_start\tfrom_cds_stop\tgenome_start\tgenome_stop\tsequence"
    )?;
    for r in records {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.exon_id,
            r.transcribed,
            r.baselen,
            r.from_tss_start,
            r.from_tss_stop,
            fmt_opt(r.from_cds_start),
            fmt_opt(r.from_cds_stop),
            r.genome_start,
            r.genome_stop,
            r.sequence,
        )?;
    }
    w.flush()?;
    Ok(())
}
