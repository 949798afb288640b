//! Export payload sent to the recognition endpoint, and the records it
//! returns.

use std::fmt;

use image::RgbaImage;
use serde::{Deserialize, Deserializer, Serialize};

use crate::snapshot::decode_data_url;
use crate::{CanvasResult, Surface, VariableContext};

/// The image and variables sent on submit.
///
/// Built fresh for every submission and never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    /// PNG snapshot as a `data:image/png;base64,` URL.
    pub image: String,
    /// Variable context at capture time.
    #[serde(rename = "dictOfvars", default)]
    pub variables: VariableContext,
}

impl ExportPayload {
    /// Snapshot the surface and copy the context.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::UninitializedSurface`] if the surface
    /// does not exist yet, or an encoding error.
    pub fn capture(surface: &Surface, variables: &VariableContext) -> CanvasResult<Self> {
        let snapshot = surface.snapshot()?;
        Ok(Self {
            image: snapshot.to_data_url(),
            variables: variables.clone(),
        })
    }

    /// Decode the image back into pixels.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::Decode`] if the image is not a PNG data URL.
    pub fn decode_image(&self) -> CanvasResult<RgbaImage> {
        decode_data_url(&self.image)
    }
}

/// One record returned by the recognition endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// The recognized expression, or the variable name for assignments.
    #[serde(rename = "expr", alias = "expression")]
    pub expression: String,
    /// The computed value.
    #[serde(rename = "result", alias = "value", deserialize_with = "scalar_as_string")]
    pub value: String,
    /// Whether this record assigns a variable rather than evaluating.
    #[serde(rename = "assign", alias = "isAssignment", default)]
    pub is_assignment: bool,
}

impl fmt::Display for RecognitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_assignment {
            write!(f, "{} := {}", self.expression, self.value)
        } else {
            write!(f, "{} = {}", self.expression, self.value)
        }
    }
}

/// Accept strings, numbers and booleans as the result value.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a scalar result value, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanvasError;
    use serde_json::json;

    #[test]
    fn test_capture_requires_initialized_surface() {
        let err = ExportPayload::capture(&Surface::default(), &VariableContext::new()).unwrap_err();
        assert!(matches!(err, CanvasError::UninitializedSurface));
    }

    #[test]
    fn test_payload_wire_shape() {
        let mut surface = Surface::default();
        surface.initialize(2, 2).expect("initialize");
        let mut vars = VariableContext::new();
        vars.insert("x", 3);

        let payload = ExportPayload::capture(&surface, &vars).expect("capture");
        let json = serde_json::to_value(&payload).expect("ser");

        assert!(json["image"]
            .as_str()
            .expect("image string")
            .starts_with("data:image/png;base64,"));
        assert_eq!(json["dictOfvars"], json!({"x": 3}));
    }

    #[test]
    fn test_result_wire_names() {
        let r: RecognitionResult =
            serde_json::from_value(json!({"expr": "x", "result": "4", "assign": true}))
                .expect("parse");
        assert_eq!(r.expression, "x");
        assert_eq!(r.value, "4");
        assert!(r.is_assignment);
    }

    #[test]
    fn test_result_accepts_long_names_and_numbers() {
        let r: RecognitionResult =
            serde_json::from_value(json!({"expression": "2 * 3", "value": 6}))
                .expect("parse");
        assert_eq!(r.value, "6");
        assert!(!r.is_assignment);
    }

    #[test]
    fn test_result_rejects_structured_value() {
        let parsed: Result<RecognitionResult, _> =
            serde_json::from_value(json!({"expr": "x", "result": [1, 2]}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_display() {
        let eval = RecognitionResult {
            expression: "2 + 2".into(),
            value: "4".into(),
            is_assignment: false,
        };
        let assign = RecognitionResult {
            expression: "y".into(),
            value: "7".into(),
            is_assignment: true,
        };
        assert_eq!(eval.to_string(), "2 + 2 = 4");
        assert_eq!(assign.to_string(), "y := 7");
    }
}
