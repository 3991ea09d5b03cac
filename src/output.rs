use std::{
    borrow::Cow,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use compress_io::compress::{CompressIo, Writer};

use crate::mutation::MutationRecord;

const CSV_HEADER: &str = "sequence_id,mutations,comparable_positions,mutation_rate";

// Quote a field only if it would otherwise break the row
fn csv_field(s: &str) -> Cow<'_, str> {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

pub fn write_csv<W: Write>(wrt: &mut W, records: &[MutationRecord]) -> anyhow::Result<()> {
    writeln!(wrt, "{}", CSV_HEADER)?;
    for rec in records {
        let cts = rec.counts();
        writeln!(
            wrt,
            "{},{},{},{:.6}",
            csv_field(rec.id()),
            cts.mutations(),
            cts.comparable(),
            cts.rate()
        )?;
    }
    Ok(())
}

/// Buffered writer to `path` (compressed according to the file suffix) or to stdout
pub fn open_output(path: Option<&Path>) -> anyhow::Result<BufWriter<Writer>> {
    match path {
        Some(p) => {
            let wrt = CompressIo::new()
                .path(p)
                .bufwriter()
                .with_context(|| format!("Could not open {} for output", p.display()))?;
            debug!("Opened {} for output", p.display());
            Ok(wrt)
        }
        None => Ok(CompressIo::new().bufwriter()?),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mutation::{GapHandling, MutationCounts};

    fn record<'a>(id: &'a str, r: &[u8], t: &[u8]) -> MutationRecord<'a> {
        MutationRecord::new(id, MutationCounts::compare(r, t, GapHandling::Include).unwrap())
    }

    #[test]
    fn csv_layout() {
        let recs = vec![
            record("ref", b"ACG", b"ACG"),
            record("s1", b"ACG", b"ATT"),
            record("s2", b"", b""),
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &recs).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "sequence_id,mutations,comparable_positions,mutation_rate\n\
             ref,0,3,0.000000\n\
             s1,2,3,0.666667\n\
             s2,0,0,0.000000\n"
        );
    }

    #[test]
    fn header_only_when_empty() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(out, format!("{}\n", CSV_HEADER).into_bytes());
    }

    #[test]
    fn quoting() {
        assert_eq!(csv_field("seq 1|x"), "seq 1|x");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(csv_field("cr\rid"), "\"cr\rid\"");
    }
}
