use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

/// One sequence of an aligned FASTA file; gap characters are kept as-is.
#[derive(Debug, Clone)]
pub struct AlignedRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: String,
}

pub struct AlignedFastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> AlignedFastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<AlignedRecord>> {
        if self.done {
            return Ok(None);
        }

        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                self.buf.clear();
                let n = self.reader.read_line(&mut self.buf)?;
                if n == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break rest.trim().to_string();
                }
            }
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut seq = String::new();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some(rest.trim().to_string());
                break;
            }
            seq.extend(
                self.buf
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }

        Ok(Some(AlignedRecord { id, desc, seq }))
    }
}

/// Reads every record, rejecting duplicate ids.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<AlignedRecord>> {
    let mut r = AlignedFastaReader::new(reader);
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    while let Some(rec) = r.next_record()? {
        if !seen.insert(rec.id.clone()) {
            bail!("{} key already present", rec.id);
        }
        records.push(rec);
    }
    Ok(records)
}

pub fn read_alignment(path: &Path) -> Result<Vec<AlignedRecord>> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("cannot open alignment FASTA '{}'", path.display()))?;
    let records = read_records(std::io::BufReader::new(fh))?;
    if records.is_empty() {
        bail!("FASTA file '{}' contains no sequences", path.display());
    }
    Ok(records)
}
