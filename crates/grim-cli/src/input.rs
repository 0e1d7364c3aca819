use std::io::Read;

use anyhow::Context;
use serde_json::Value;

/// Read a JSON payload from a file path, or stdin for `-`.
///
/// Input that is not JSON is taken as a plain string payload.
pub fn read_payload(input: &str) -> anyhow::Result<Value> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read payload file {input}"))?
    };
    Ok(parse_payload(&text))
}

pub fn parse_payload(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|error| {
        tracing::debug!(%error, "payload is not JSON; using it as text");
        Value::String(text.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_and_text_payloads() {
        assert_eq!(parse_payload(r#"{"name": "Mira"}"#), json!({"name": "Mira"}));
        assert_eq!(parse_payload("just prose"), json!("just prose"));
    }

    #[test]
    fn reads_payload_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("npc.json");
        std::fs::write(&path, r#"{"name": "Mira"}"#).unwrap();
        let value = read_payload(path.to_str().unwrap()).unwrap();
        assert_eq!(value["name"], json!("Mira"));
        assert!(read_payload(dir.path().join("missing.json").to_str().unwrap()).is_err());
    }
}
