//! The classification output contract returned to clients.

use serde::{Deserialize, Serialize};

use crate::guide::Guide;
use crate::points::points_for_category;

/// One model prediction: a label from [`MATERIAL_CLASSES`](crate::MATERIAL_CLASSES)
/// and a confidence in the 0–100 range.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// The response body for `POST /api/classify`.
///
/// Always well-formed: when no guide matches the predicted material, the
/// category degrades to `unknown` with empty instructions and zero points
/// rather than failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    #[serde(rename = "type")]
    pub material: String,
    pub confidence: f32,
    /// Client-supplied filename, echoed back verbatim.
    pub filename: String,
    pub instructions: Vec<String>,
    pub category: String,
    #[serde(rename = "pointsEarned")]
    pub points_earned: u32,
}

impl ClassifyResponse {
    /// Assemble the response from a prediction and an optional guide match.
    pub fn assemble(prediction: Prediction, filename: String, guide: Option<Guide>) -> Self {
        let (category, instructions) = match guide {
            Some(guide) => (guide.category, guide.instructions),
            None => ("unknown".to_string(), Vec::new()),
        };
        let points_earned = points_for_category(&category);

        Self {
            material: prediction.label,
            confidence: prediction.confidence,
            filename,
            instructions,
            category,
            points_earned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> Prediction {
        Prediction {
            label: "plastic".to_string(),
            confidence: 97.42,
        }
    }

    #[test]
    fn assemble_with_guide() {
        let guide = Guide {
            material: "Plastic".to_string(),
            category: "recyclable".to_string(),
            recyclable: true,
            biodegradable: false,
            hazardous: false,
            instructions: vec!["Rinse".to_string(), "Recycle".to_string()],
        };
        let response = ClassifyResponse::assemble(prediction(), "bottle.jpg".to_string(), Some(guide));
        assert_eq!(response.material, "plastic");
        assert_eq!(response.category, "recyclable");
        assert_eq!(response.instructions, vec!["Rinse", "Recycle"]);
        assert_eq!(response.points_earned, 10);
        assert_eq!(response.filename, "bottle.jpg");
    }

    #[test]
    fn assemble_without_guide_degrades_to_defaults() {
        let response = ClassifyResponse::assemble(prediction(), "pile.png".to_string(), None);
        assert_eq!(response.category, "unknown");
        assert!(response.instructions.is_empty());
        assert_eq!(response.points_earned, 0);
    }

    #[test]
    fn guide_with_unrecognized_category_earns_one_point() {
        let guide: Guide = serde_json::from_str(
            r#"{"type": "plastic", "category": "compostable"}"#,
        )
        .unwrap();
        let response = ClassifyResponse::assemble(prediction(), "x.jpg".to_string(), Some(guide));
        assert_eq!(response.points_earned, 1);
    }

    #[test]
    fn json_keys_match_the_wire_contract() {
        let response = ClassifyResponse::assemble(prediction(), "bottle.jpg".to_string(), None);
        let value = serde_json::to_value(&response).unwrap();
        for key in ["type", "confidence", "filename", "instructions", "category", "pointsEarned"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["type"], "plastic");
        assert_eq!(value["pointsEarned"], 0);
    }
}
