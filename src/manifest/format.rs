//! Manifest text layout.
//!
//! serde_json's pretty printer puts every array element on its own line,
//! which turns a bounding box into eight lines. The flat layout keeps arrays
//! of scalars on one line and indents everything else the same way.

use serde_json::Value;

use crate::util::Result;

/// Text layout of the written manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ManifestLayout {
    /// Arrays of scalars on a single line.
    #[default]
    FlatArrays,
    /// serde_json pretty printing; every element on its own line.
    Indented,
}

const INDENT: &str = "  ";

/// Serialize a tree with the given layout.
pub fn to_string(value: &Value, layout: ManifestLayout) -> Result<String> {
    match layout {
        ManifestLayout::Indented => Ok(serde_json::to_string_pretty(value)?),
        ManifestLayout::FlatArrays => {
            let mut out = String::new();
            write_value(&mut out, value, 0)?;
            Ok(out)
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn write_value(out: &mut String, value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push('{');
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, depth + 1);
                out.push_str(&serde_json::to_string(key)?);
                out.push_str(": ");
                write_value(out, child, depth + 1)?;
            }
            newline(out, depth);
            out.push('}');
        }
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) if items.iter().all(is_scalar) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&serde_json::to_string(item)?);
            }
            out.push(']');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, depth + 1);
                write_value(out, item, depth + 1)?;
            }
            newline(out, depth);
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_arrays() {
        let v = json!({ "Box": [1, 2.5, -3], "Name": "a\"b", "Empty": [], "Obj": {} });
        let text = to_string(&v, ManifestLayout::FlatArrays).unwrap();
        assert_eq!(
            text,
            "{\n  \"Box\": [1, 2.5, -3],\n  \"Name\": \"a\\\"b\",\n  \"Empty\": [],\n  \"Obj\": {}\n}"
        );
    }

    #[test]
    fn test_nested_arrays_of_objects() {
        let v = json!({ "Children": [{ "A": [0, 1] }, { "B": true }] });
        let text = to_string(&v, ManifestLayout::FlatArrays).unwrap();
        assert!(text.contains("\"A\": [0, 1]"));
        assert_eq!(text.lines().count(), 10);
    }

    #[test]
    fn test_layouts_parse_identically() {
        let v = json!({ "K": [[1, 2], [3]], "S": { "T": [true, null, "x"] } });
        for layout in [ManifestLayout::FlatArrays, ManifestLayout::Indented] {
            let text = to_string(&v, layout).unwrap();
            let back: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(back, v);
        }
    }
}
