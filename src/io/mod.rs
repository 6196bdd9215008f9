pub mod blocks;
pub mod fasta;
