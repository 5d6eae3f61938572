//! `State.json` placeholder.
//!
//! The editor refuses to open a project without a tool-state file. Its
//! content does not affect the scene, so a fixed neutral state is written:
//! no layer selected for move, paint or camera, and the paint tool active.

use serde_json::{json, Value};

/// Grey used for every color palette entry.
const PALETTE_LUMA: f32 = 0.82;
const PALETTE_ENTRIES: usize = 16;

/// Build the placeholder state document.
pub fn state_document() -> Value {
    let palette: Vec<f32> = vec![PALETTE_LUMA; PALETTE_ENTRIES * 3];
    json!({
        "Quill": {
            "Rulers": { "ShowGrid": false },
            "DetailRender": {
                "Surface": { "Texture": "None", "Scale": 1.0 }
            },
            "MoveLayer": "",
            "PaintLayer": "",
            "CameraLayer": "",
            "DirectManipulation": 0,
            "ToolName": "Paint",
            "Tool": {
                "BrushID": 3,
                "Color": [0.0, 0.0, 0.0],
                "Opacity": 1.0,
                "Size": 0.01,
                "TransparentTaper": "None",
                "WidthTaper": "Pressure",
                "DirectionalStroke": false
            },
            "ColorPalette": palette,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shape() {
        let state = state_document();
        let quill = &state["Quill"];
        assert_eq!(quill["ToolName"], "Paint");
        assert_eq!(quill["Tool"]["BrushID"], 3);
        assert_eq!(quill["ColorPalette"].as_array().map(Vec::len), Some(48));
        assert_eq!(quill["PaintLayer"], "");
    }
}
