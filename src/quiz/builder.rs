//! Response document construction
//!
//! Turns the stored quiz into the document sent to clients, prefixing every
//! relative image path with the public base URL of this server.

use super::model::Quiz;
use super::store;

/// Prefix `image_url` with `base_url` when it is a relative path.
///
/// Empty strings and URLs that do not start with `/` are returned unchanged.
/// A trailing `/` on `base_url` is ignored.
///
/// # Examples
/// ```
/// use quiz_server::quiz::builder::absolutize;
/// assert_eq!(
///     absolutize("/images/a.jpg", "http://localhost:8080"),
///     "http://localhost:8080/images/a.jpg"
/// );
/// assert_eq!(absolutize("", "http://localhost:8080"), "");
/// ```
pub fn absolutize(image_url: &str, base_url: &str) -> String {
    if image_url.starts_with('/') {
        format!("{}{image_url}", base_url.trim_end_matches('/'))
    } else {
        image_url.to_string()
    }
}

/// Build the quiz document for one response
///
/// Always starts from a fresh snapshot of the store.
pub fn build_quiz(base_url: &str) -> Quiz {
    let mut quiz = store::snapshot();
    for question in &mut quiz.questions {
        if question.has_relative_image() {
            question.image_url = absolutize(&question.image_url, base_url);
        }
    }
    quiz
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::store::questions;

    const BASE: &str = "http://localhost:8080";

    #[test]
    fn test_absolutize_relative() {
        assert_eq!(
            absolutize("/images/eiffel-tower.jpg", BASE),
            "http://localhost:8080/images/eiffel-tower.jpg"
        );
    }

    #[test]
    fn test_absolutize_keeps_absolute_and_empty() {
        let absolute = "https://cdn.example.com/a.png";
        assert_eq!(absolutize(absolute, BASE), absolute);
        assert_eq!(absolutize("", BASE), "");
        // Not starting with '/' means not a server-relative path
        assert_eq!(absolutize("images/a.png", BASE), "images/a.png");
    }

    #[test]
    fn test_absolutize_trailing_slash_on_base() {
        assert_eq!(
            absolutize("/images/a.png", "http://quiz.example.com/"),
            "http://quiz.example.com/images/a.png"
        );
    }

    #[test]
    fn test_build_quiz_first_question() {
        let quiz = build_quiz(BASE);
        assert_eq!(quiz.questions[0].id, 1);
        assert_eq!(
            quiz.questions[0].image_url,
            "http://localhost:8080/images/eiffel-tower.jpg"
        );
    }

    #[test]
    fn test_build_quiz_preserves_everything_else() {
        let quiz = build_quiz(BASE);
        assert_eq!(quiz.questions.len(), questions().len());
        for (q, record) in quiz.questions.iter().zip(questions()) {
            assert_eq!(q.id, record.id);
            assert_eq!(q.text, record.text);
            assert_eq!(q.options, record.options);
            assert_eq!(q.answer_index, record.answer_index);
            assert_eq!(q.hint, record.hint);
            if record.image_url.starts_with('/') {
                assert_eq!(q.image_url, format!("{BASE}{}", record.image_url));
            } else {
                assert_eq!(q.image_url, record.image_url);
            }
        }
    }

    #[test]
    fn test_build_quiz_does_not_touch_store() {
        let _ = build_quiz("http://first.example");
        let quiz = build_quiz("http://second.example");
        assert_eq!(
            quiz.questions[0].image_url,
            "http://second.example/images/eiffel-tower.jpg"
        );
        assert_eq!(questions()[0].image_url, "/images/eiffel-tower.jpg");
    }

    #[test]
    fn test_concurrent_builds_do_not_leak() {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                std::thread::spawn(move || {
                    let base = format!("http://host{i}:8080");
                    for _ in 0..50 {
                        let quiz = build_quiz(&base);
                        for q in &quiz.questions {
                            if q.image_url.starts_with("http://host") {
                                assert!(q.image_url.starts_with(&base));
                                assert_eq!(q.image_url.matches("http://").count(), 1);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
