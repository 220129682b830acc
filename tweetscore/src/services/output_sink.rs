//! Result output
//!
//! Sinks receive each `AggregateResult` as soon as its tweet completes.

use std::io::Write;

use crate::models::AggregateResult;

/// Destination for scored tweets
pub trait OutputSink {
    fn emit(&mut self, result: &AggregateResult) -> std::io::Result<()>;
}

/// Pretty-printed JSON, one record after another
pub struct PrettyJsonSink<W: Write> {
    writer: W,
}

impl<W: Write> PrettyJsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for PrettyJsonSink<W> {
    fn emit(&mut self, result: &AggregateResult) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, result)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Compact JSON, one record per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for JsonLinesSink<W> {
    fn emit(&mut self, result: &AggregateResult) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, result)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn emit(&mut self, result: &AggregateResult) -> std::io::Result<()> {
        (**self).emit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    fn result(text: &str) -> AggregateResult {
        AggregateResult {
            text: text.to_string(),
            name: "Rust".to_string(),
            entity_type: "OTHER".to_string(),
            salience: 1.0,
            entity_sentiment: Sentiment::new(0.5, 0.5),
            document_sentiment: Sentiment::new(0.5, 0.5),
            aggregate: 0.25,
        }
    }

    #[test]
    fn test_pretty_sink_writes_multiline_records() {
        let mut sink = PrettyJsonSink::new(Vec::new());
        sink.emit(&result("one")).unwrap();
        sink.emit(&result("two")).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("  \"text\": \"one\""));
        assert!(out.contains("\"entitySentiment\": {"));
        assert!(out.ends_with("}\n"));
        assert_eq!(out.matches("\"aggregate\"").count(), 2);
    }

    #[test]
    fn test_json_lines_sink_one_record_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&result("one")).unwrap();
        sink.emit(&result("two")).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: AggregateResult = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.text, "two");
    }
}
