use std::{
    collections::{BTreeSet, HashMap},
    io::BufRead,
    path::Path,
};

use anyhow::Context;
use compress_io::compress::CompressIo;

pub struct FastaRecord {
    id: Box<str>,
    seq: Vec<u8>,
}

impl FastaRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Aligned residues, upper case
    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }
}

struct FastaReader<R: BufRead> {
    rdr: R,
    buffer: String,
    line: usize,
    // Header (id, line number) seen while reading the previous record
    header: Option<(Box<str>, usize)>,
}

impl<R: BufRead> FastaReader<R> {
    fn new(rdr: R) -> FastaReader<R> {
        Self {
            rdr,
            buffer: String::new(),
            line: 0,
            header: None,
        }
    }

    fn read_line(&mut self) -> anyhow::Result<bool> {
        self.buffer.clear();
        let n = self
            .rdr
            .read_line(&mut self.buffer)
            .with_context(|| format!("Could not read line {}", self.line + 1))?;
        if n == 0 {
            Ok(false)
        } else {
            self.line += 1;
            Ok(true)
        }
    }

    // Skip anything before the first header line
    fn find_header(&mut self) -> anyhow::Result<bool> {
        let mut skipped = 0;
        let mut found = false;
        while self.read_line()? {
            let s = self.buffer.trim();
            if let Some(id) = s.strip_prefix('>') {
                self.header = Some((Box::from(id.trim()), self.line));
                found = true;
                break;
            } else if !s.is_empty() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(
                "Ignoring {} sequence line(s) before the first FASTA header",
                skipped
            );
        }
        Ok(found)
    }

    fn next_record(&mut self) -> anyhow::Result<Option<FastaRecord>> {
        loop {
            let (id, hdr_line) = match self.header.take() {
                Some(h) => h,
                None => {
                    if self.find_header()? {
                        continue;
                    }
                    return Ok(None);
                }
            };
            trace!("Found sequence {} at line {}", id, hdr_line);
            let mut seq = Vec::new();
            while self.read_line()? {
                let s = self.buffer.trim();
                if s.is_empty() {
                    continue;
                }
                if let Some(next_id) = s.strip_prefix('>') {
                    self.header = Some((Box::from(next_id.trim()), self.line));
                    break;
                }
                if !s.is_ascii() {
                    return Err(anyhow!("Illegal character in sequence at line {}", self.line));
                }
                seq.extend(s.bytes().map(|c| c.to_ascii_uppercase()));
            }
            if id.is_empty() {
                warn!("Skipping sequence with empty header at line {}", hdr_line);
                continue;
            }
            return Ok(Some(FastaRecord { id, seq }));
        }
    }
}

/// Sequences of an aligned FASTA file, kept in file order
#[derive(Default)]
pub struct Alignment {
    records: Vec<FastaRecord>,
    name2ix: HashMap<Box<str>, usize>,
}

impl Alignment {
    pub fn from_reader<R: BufRead>(rdr: R) -> anyhow::Result<Self> {
        let mut aln = Self::default();
        let mut fasta_rdr = FastaReader::new(rdr);
        while let Some(rec) = fasta_rdr.next_record()? {
            trace!("Read in sequence {} ({} residues)", rec.id, rec.len());
            aln.insert(rec);
        }
        debug!(
            "Read in {} sequences from {} lines",
            aln.len(),
            fasta_rdr.line
        );
        Ok(aln)
    }

    /// Read from a (possibly compressed) file, or from stdin if `path` is `None`
    pub fn from_path(path: Option<&Path>) -> anyhow::Result<Self> {
        let rdr = match path {
            Some(p) => {
                let rdr = CompressIo::new()
                    .path(p)
                    .bufreader()
                    .with_context(|| format!("Could not open {}", p.display()))?;
                debug!("Opened {} for input", p.display());
                rdr
            }
            None => {
                debug!("Reading from stdin");
                CompressIo::new().bufreader()?
            }
        };
        Self::from_reader(rdr)
    }

    // A repeated id takes the new sequence but keeps its first position
    fn insert(&mut self, rec: FastaRecord) {
        if let Some(&ix) = self.name2ix.get(rec.id()) {
            warn!("Duplicate sequence id {}: later entry replaces earlier one", rec.id);
            self.records[ix].seq = rec.seq;
        } else {
            self.name2ix.insert(rec.id.clone(), self.records.len());
            self.records.push(rec);
        }
    }

    pub fn get(&self, id: &str) -> Option<&FastaRecord> {
        self.name2ix.get(id).map(|ix| &self.records[*ix])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FastaRecord> {
        self.records.iter()
    }

    /// Common sequence length, or `None` if there are no sequences.
    ///
    /// Fails if the sequences do not all have the same length.
    pub fn aligned_length(&self) -> anyhow::Result<Option<usize>> {
        let lengths: BTreeSet<usize> = self.records.iter().map(|r| r.len()).collect();
        let mut it = lengths.iter();
        match (it.next(), it.next()) {
            (None, _) => Ok(None),
            (Some(l), None) => Ok(Some(*l)),
            _ => {
                let seen: Vec<_> = lengths.iter().map(|l| l.to_string()).collect();
                Err(anyhow!("Sequence lengths differ (seen {})", seen.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn parse(s: &str) -> Alignment {
        Alignment::from_reader(Cursor::new(s)).unwrap()
    }

    #[test]
    fn multi_line_records() {
        let aln = parse(">ref desc\nACGT\nacgt\n\n>s1\n  ACGT-CGA \n");
        assert_eq!(aln.len(), 2);
        let ids: Vec<_> = aln.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["ref desc", "s1"]);
        assert_eq!(aln.get("ref desc").unwrap().seq(), b"ACGTACGT");
        assert_eq!(aln.get("s1").unwrap().seq(), b"ACGT-CGA");
        assert_eq!(aln.aligned_length().unwrap(), Some(8));
    }

    #[test]
    fn header_whitespace_trimmed() {
        let aln = parse(">  seq1  \r\nAC\r\n");
        assert!(aln.get("seq1").is_some());
        assert_eq!(aln.get("seq1").unwrap().seq(), b"AC");
    }

    #[test]
    fn duplicate_id_keeps_position() {
        let aln = parse(">a\nAAAA\n>b\nCCCC\n>a\nGGGG\n");
        assert_eq!(aln.len(), 2);
        let recs: Vec<_> = aln.iter().map(|r| (r.id(), r.seq())).collect();
        assert_eq!(recs, [("a", &b"GGGG"[..]), ("b", &b"CCCC"[..])]);
    }

    #[test]
    fn empty_header_and_leading_lines_skipped() {
        let aln = parse("ACGT\n>\nTTTT\n>x\nGG\n");
        assert_eq!(aln.len(), 1);
        assert_eq!(aln.get("x").unwrap().seq(), b"GG");
        assert!(aln.get("").is_none());
    }

    #[test]
    fn header_without_sequence() {
        let aln = parse(">a\n>b\nAC\n");
        assert_eq!(aln.get("a").unwrap().len(), 0);
        assert!(aln.aligned_length().is_err());
    }

    #[test]
    fn empty_input() {
        let aln = parse("");
        assert!(aln.is_empty());
        assert_eq!(aln.aligned_length().unwrap(), None);
        let aln = parse("\n\n   \n");
        assert!(aln.is_empty());
    }

    #[test]
    fn unequal_lengths() {
        let aln = parse(">a\nACGT\n>b\nACG\n>c\nACGTA\n");
        let e = aln.aligned_length().unwrap_err();
        assert_eq!(e.to_string(), "Sequence lengths differ (seen 3, 4, 5)");
    }

    #[test]
    fn non_ascii_rejected() {
        let e = Alignment::from_reader(Cursor::new(">a\nAC\nAé\n"))
            .err()
            .unwrap();
        assert!(e.to_string().contains("line 3"));
    }
}
