use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "eventType")]
pub enum HashEvent {
    HashStart(HashStartInfo),
    BlockProcessed(BlockInfo),
    OutputResized(ResizeInfo),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HashStartInfo {
    pub input_len: usize,
    pub block_count: usize,
    pub block_size: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub index: usize,
    /// The block after chaining, i.e. what the angles were derived from.
    pub effective_input: Vec<u8>,
    pub gate_count: usize,
    pub raw_digest: Vec<u8>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResizeInfo {
    pub raw_len: usize,
    pub output_len: usize,
}

/// Writes one event as a single JSON line.
pub fn emit_event(event: &HashEvent, writer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, event)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_json_lines() {
        let mut out = Vec::new();
        emit_event(
            &HashEvent::HashStart(HashStartInfo {
                input_len: 3,
                block_count: 1,
                block_size: 8,
            }),
            &mut out,
        )
        .unwrap();
        emit_event(
            &HashEvent::OutputResized(ResizeInfo {
                raw_len: 8,
                output_len: 3,
            }),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["eventType"], "HashStart");
        assert_eq!(first["blockSize"], 8);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outputLen"], 3);
    }
}
