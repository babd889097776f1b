//! Quiz document types as they appear on the wire.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct choice
    #[serde(rename = "answer")]
    pub answer_index: usize,
    /// Optional hint, empty when the question has none
    #[serde(default)]
    pub hint: String,
    /// Relative path (`/images/...`), absolute URL, or empty
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

impl Question {
    /// Whether `image_url` still needs a base URL in front of it
    pub fn has_relative_image(&self) -> bool {
        self.image_url.starts_with('/')
    }
}

/// The whole quiz document served by `/api/quiz`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

#[cfg(test)]
impl Question {
    /// Text of the correct option
    pub fn answer_text(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: 9,
            text: "Pick one".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            answer_index: 1,
            hint: String::new(),
            image_url: "/images/x.png".to_string(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["answer"], 1);
        assert_eq!(json["imageUrl"], "/images/x.png");
        assert_eq!(json["hint"], "");
        assert!(json.get("answer_index").is_none());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_answer_text() {
        let mut q = sample();
        assert_eq!(q.answer_text(), Some("b"));
        q.answer_index = 5;
        assert_eq!(q.answer_text(), None);
    }

    #[test]
    fn test_missing_optional_fields_default_to_empty() {
        let q: Question =
            serde_json::from_str(r#"{"id":1,"text":"t","options":["x","y"],"answer":0}"#)
                .unwrap();
        assert!(q.hint.is_empty());
        assert!(q.image_url.is_empty());
        assert!(!q.has_relative_image());
    }
}
