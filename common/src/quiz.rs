//! Exact-match grading of multiple-choice quiz attempts.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub order_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswerInput {
    pub question_id: String,
    pub selected_choice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedAnswer {
    pub question_id: String,
    pub selected_choice: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttemptGrade {
    pub score_raw: usize,
    pub max_points: usize,
    pub score_percent: u32,
    pub evaluated_answers: Vec<EvaluatedAnswer>,
}

/// Grades an attempt by comparing each selected choice to the stored answer verbatim.
///
/// Unanswered questions count as incorrect. Answers that reference a question outside
/// `questions` reject the whole attempt.
pub fn grade_quiz_attempt(
    questions: &[QuizQuestion],
    answers: &[QuizAnswerInput],
) -> Result<QuizAttemptGrade, AppError> {
    let known_ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
    if let Some(unknown) = answers
        .iter()
        .find(|answer| !known_ids.contains(answer.question_id.as_str()))
    {
        return Err(AppError::Validation(format!(
            "Submitted answers include unknown question id '{}'",
            unknown.question_id
        )));
    }

    // First submission wins when a question is answered twice.
    let mut submitted: HashMap<&str, &str> = HashMap::new();
    for answer in answers {
        submitted
            .entry(answer.question_id.as_str())
            .or_insert(answer.selected_choice.as_str());
    }

    let evaluated_answers: Vec<EvaluatedAnswer> = questions
        .iter()
        .map(|question| {
            let selected_choice = submitted
                .get(question.id.as_str())
                .copied()
                .unwrap_or_default()
                .to_string();
            EvaluatedAnswer {
                is_correct: selected_choice == question.answer,
                question_id: question.id.clone(),
                selected_choice,
                correct_answer: question.answer.clone(),
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let score_raw = evaluated_answers.iter().filter(|a| a.is_correct).count();
    let max_points = questions.len();

    Ok(QuizAttemptGrade {
        score_raw,
        max_points,
        score_percent: score_percent(score_raw, max_points),
        evaluated_answers,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_percent(score_raw: usize, max_points: usize) -> u32 {
    if max_points == 0 {
        return 0;
    }
    ((score_raw as f64 / max_points as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, answer: &str, order_index: u32) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            question: format!("Question {id}"),
            choices: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            answer: answer.into(),
            explanation: "Basic addition.".into(),
            order_index,
        }
    }

    fn answer(question_id: &str, choice: &str) -> QuizAnswerInput {
        QuizAnswerInput {
            question_id: question_id.into(),
            selected_choice: choice.into(),
        }
    }

    #[test]
    fn grades_exact_match_answers() {
        let questions = vec![question("q1", "2", 0), question("q2", "4", 1)];
        let answers = vec![answer("q1", "2"), answer("q2", "3")];

        let graded = grade_quiz_attempt(&questions, &answers).expect("grading should succeed");

        assert_eq!(graded.score_raw, 1);
        assert_eq!(graded.max_points, 2);
        assert_eq!(graded.score_percent, 50);
        assert!(graded.evaluated_answers[0].is_correct);
        assert!(!graded.evaluated_answers[1].is_correct);
    }

    #[test]
    fn comparison_is_case_and_whitespace_sensitive() {
        let questions = vec![question("q1", "Mitochondria", 0)];
        let answers = vec![answer("q1", "mitochondria ")];

        let graded = grade_quiz_attempt(&questions, &answers).expect("grading should succeed");

        assert_eq!(graded.score_raw, 0);
    }

    #[test]
    fn missing_answers_count_as_blank() {
        let questions = vec![question("q1", "2", 0), question("q2", "4", 1), question("q3", "1", 2)];
        let answers = vec![answer("q2", "4")];

        let graded = grade_quiz_attempt(&questions, &answers).expect("grading should succeed");

        assert_eq!(graded.score_raw, 1);
        assert_eq!(graded.score_percent, 33);
        assert_eq!(graded.evaluated_answers[0].selected_choice, "");
    }

    #[test]
    fn empty_quiz_scores_zero() {
        let graded = grade_quiz_attempt(&[], &[]).expect("grading should succeed");

        assert_eq!(graded.max_points, 0);
        assert_eq!(graded.score_percent, 0);
    }

    #[test]
    fn rejects_unknown_question_ids() {
        let questions = vec![question("q1", "2", 0)];
        let answers = vec![answer("q1", "2"), answer("q9", "1")];

        let result = grade_quiz_attempt(&questions, &answers);

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
