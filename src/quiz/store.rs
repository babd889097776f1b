//! Compiled-in quiz content
//!
//! The records below are `'static` and never written to. Callers that need
//! to transform the document take an owned copy with [`snapshot`].

use super::model::{Question, Quiz};

/// One question as stored in the binary
#[derive(Debug)]
pub struct QuestionRecord {
    pub id: u32,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub answer_index: usize,
    pub hint: &'static str,
    pub image_url: &'static str,
}

impl QuestionRecord {
    /// Owned copy suitable for per-request transformation
    pub fn to_question(&self) -> Question {
        Question {
            id: self.id,
            text: self.text.to_string(),
            options: self.options.iter().map(ToString::to_string).collect(),
            answer_index: self.answer_index,
            hint: self.hint.to_string(),
            image_url: self.image_url.to_string(),
        }
    }
}

static QUESTIONS: [QuestionRecord; 7] = [
    QuestionRecord {
        id: 1,
        text: "What is the capital of France?",
        options: &["London", "Berlin", "Paris", "Madrid"],
        answer_index: 2,
        hint: "It is home to the Eiffel Tower.",
        image_url: "/images/eiffel-tower.jpg",
    },
    QuestionRecord {
        id: 2,
        text: "Which planet is known as the Red Planet?",
        options: &["Venus", "Mars", "Jupiter", "Saturn"],
        answer_index: 1,
        hint: "Named after the Roman god of war.",
        image_url: "/images/mars.jpg",
    },
    QuestionRecord {
        id: 3,
        text: "What is the largest mammal?",
        options: &["Elephant", "Blue Whale", "Giraffe", "Hippopotamus"],
        answer_index: 1,
        hint: "It lives in the ocean.",
        image_url: "/images/blue-whale.jpg",
    },
    QuestionRecord {
        id: 4,
        text: "Who painted the Mona Lisa?",
        options: &[
            "Vincent van Gogh",
            "Pablo Picasso",
            "Leonardo da Vinci",
            "Michelangelo",
        ],
        answer_index: 2,
        hint: "He also sketched flying machines.",
        image_url: "https://upload.wikimedia.org/wikipedia/commons/6/6a/Mona_Lisa.jpg",
    },
    QuestionRecord {
        id: 5,
        text: "What is the chemical symbol for gold?",
        options: &["Go", "Gd", "Au", "Ag"],
        answer_index: 2,
        hint: "From the Latin word aurum.",
        image_url: "",
    },
    QuestionRecord {
        id: 6,
        text: "Which country is home to the kangaroo?",
        options: &["New Zealand", "South Africa", "Australia", "Brazil"],
        answer_index: 2,
        hint: "",
        image_url: "/images/kangaroo.jpg",
    },
    QuestionRecord {
        id: 7,
        text: "What is the largest planet in our solar system?",
        options: &["Earth", "Mars", "Jupiter", "Saturn"],
        answer_index: 2,
        hint: "A gas giant with a Great Red Spot.",
        image_url: "",
    },
];

/// Read-only view of the stored questions
pub fn questions() -> &'static [QuestionRecord] {
    &QUESTIONS
}

/// Owned copy of the whole quiz document
pub fn snapshot() -> Quiz {
    Quiz {
        questions: QUESTIONS.iter().map(QuestionRecord::to_question).collect(),
    }
}
