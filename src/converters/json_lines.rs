//! Newline-delimited JSON output

use std::io::Write;

use super::{Record, RecordSink};
use crate::error::Result;

/// Writes one compact JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        for id in ["1", "2"] {
            let mut record = Record::new("A");
            record.attributes.insert("ID".to_string(), id.to_string());
            sink.emit(&record).unwrap();
        }
        assert_eq!(sink.written(), 2);

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: Record = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.attributes["ID"], "2");
        assert!(out.ends_with('\n'));
    }
}
