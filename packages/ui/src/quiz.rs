//! Quiz authoring and quiz taking logic.
//!
//! Grading is automatic only for multiple-choice questions that have an
//! answer key entry; short answers count toward the total but are never
//! auto-scored, so a perfect multiple-choice run on a quiz that is half
//! short-answer points caps out at 50%.

use std::collections::HashMap;
use std::fmt;

/// Time allowed for an attempt, in seconds.
pub const QUIZ_TIME_LIMIT_SECS: u32 = 30 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    ShortAnswer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quiz {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    /// question id -> correct option, multiple choice only.
    pub answer_key: HashMap<String, String>,
}

impl Quiz {
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// The built-in "Network Security Basics" quiz.
    pub fn network_security_basics() -> Self {
        Self {
            title: "Network Security Basics".to_string(),
            description: "Covers VPNs, common ports, and encryption fundamentals.".to_string(),
            questions: vec![
                Question {
                    id: "1".to_string(),
                    text: "What does VPN stand for?".to_string(),
                    kind: QuestionKind::MultipleChoice,
                    options: vec![
                        "Virtual Private Network".to_string(),
                        "Very Private Network".to_string(),
                        "Virtual Public Network".to_string(),
                        "Verified Private Network".to_string(),
                    ],
                    points: 5,
                },
                Question {
                    id: "2".to_string(),
                    text: "Which port does HTTPS use by default?".to_string(),
                    kind: QuestionKind::MultipleChoice,
                    options: vec![
                        "80".to_string(),
                        "443".to_string(),
                        "8080".to_string(),
                        "21".to_string(),
                    ],
                    points: 5,
                },
                Question {
                    id: "3".to_string(),
                    text: "Explain the difference between symmetric and asymmetric encryption."
                        .to_string(),
                    kind: QuestionKind::ShortAnswer,
                    options: Vec::new(),
                    points: 10,
                },
            ],
            answer_key: HashMap::from([
                ("1".to_string(), "Virtual Private Network".to_string()),
                ("2".to_string(), "443".to_string()),
            ]),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum QuizError {
    /// A question is missing its text, options, correct answer, or points.
    IncompleteQuestion,
    /// The quiz as a whole is missing a title or has no questions.
    IncompleteQuiz,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IncompleteQuestion => {
                write!(f, "fill in the question text, options, and correct answer")
            }
            QuizError::IncompleteQuiz => write!(f, "a quiz needs a title and at least one question"),
        }
    }
}

impl std::error::Error for QuizError {}

/// A question being filled in by the quiz builder form.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftQuestion {
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: u32,
}

impl Default for DraftQuestion {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: QuestionKind::MultipleChoice,
            options: vec![String::new(); 4],
            correct_answer: String::new(),
            points: 5,
        }
    }
}

/// A quiz under construction in the builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    questions: Vec<Question>,
    answer_key: HashMap<String, String>,
    /// Ids are never reused, even after a removal.
    next_id: u64,
}

impl QuizDraft {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Validate and append a question from the builder form.
    pub fn add_question(&mut self, draft: DraftQuestion) -> Result<(), QuizError> {
        if draft.text.trim().is_empty() || draft.points == 0 {
            return Err(QuizError::IncompleteQuestion);
        }
        let options: Vec<String> = draft
            .options
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if draft.kind == QuestionKind::MultipleChoice {
            let correct = draft.correct_answer.trim();
            if options.len() < 2 || !options.iter().any(|o| o == correct) {
                return Err(QuizError::IncompleteQuestion);
            }
        }

        self.next_id += 1;
        let id = self.next_id.to_string();
        if draft.kind == QuestionKind::MultipleChoice {
            self.answer_key
                .insert(id.clone(), draft.correct_answer.trim().to_string());
        }
        self.questions.push(Question {
            id,
            text: draft.text.trim().to_string(),
            kind: draft.kind,
            options: if draft.kind == QuestionKind::MultipleChoice {
                options
            } else {
                Vec::new()
            },
            points: draft.points,
        });
        Ok(())
    }

    pub fn remove_question(&mut self, index: usize) {
        if index < self.questions.len() {
            let removed = self.questions.remove(index);
            self.answer_key.remove(&removed.id);
        }
    }

    /// Persistence is not wired up yet; a valid draft is only logged.
    pub fn save(&self) -> Result<(), QuizError> {
        if self.title.trim().is_empty() || self.questions.is_empty() {
            return Err(QuizError::IncompleteQuiz);
        }
        tracing::info!(
            "saving quiz '{}' with {} questions",
            self.title,
            self.questions.len()
        );
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    pub score: u32,
    pub total: u32,
    pub percent: u32,
}

/// One student's run through a quiz: answers, navigation, countdown, result.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizAttempt {
    quiz: Quiz,
    pub answers: HashMap<String, String>,
    pub current: usize,
    pub time_left: u32,
    pub report: Option<ScoreReport>,
}

impl QuizAttempt {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            answers: HashMap::new(),
            current: 0,
            time_left: QUIZ_TIME_LIMIT_SECS,
            report: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    pub fn answer_for(&self, question_id: &str) -> &str {
        self.answers.get(question_id).map(String::as_str).unwrap_or("")
    }

    /// Record an answer for a question. Ignored once submitted.
    pub fn answer(&mut self, question_id: &str, value: &str) {
        if self.report.is_some() {
            return;
        }
        self.answers
            .insert(question_id.to_string(), value.to_string());
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.quiz.questions.len() {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Advance the countdown by one second. When it runs out the attempt is
    /// submitted; further ticks do nothing.
    pub fn tick(&mut self) {
        if self.report.is_some() {
            return;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.submit();
        } else {
            self.time_left -= 1;
        }
    }

    /// Grade and finalize the attempt. Idempotent.
    pub fn submit(&mut self) {
        if self.report.is_some() {
            return;
        }
        self.report = Some(self.grade());
    }

    fn grade(&self) -> ScoreReport {
        let mut score = 0;
        for question in &self.quiz.questions {
            if question.kind != QuestionKind::MultipleChoice {
                continue;
            }
            let Some(correct) = self.quiz.answer_key.get(&question.id) else {
                continue;
            };
            if self.answers.get(&question.id) == Some(correct) {
                score += question.points;
            }
        }
        let total = self.quiz.total_points();
        let percent = if total == 0 {
            0
        } else {
            (f64::from(score) / f64::from(total) * 100.0).round() as u32
        };
        ScoreReport {
            score,
            total,
            percent,
        }
    }

    pub fn format_time_left(&self) -> String {
        format!("{}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered_attempt() -> QuizAttempt {
        let mut attempt = QuizAttempt::new(Quiz::network_security_basics());
        attempt.answer("1", "Virtual Private Network");
        attempt.answer("2", "443");
        attempt.answer("3", "Symmetric uses one shared key; asymmetric uses a key pair.");
        attempt
    }

    #[test]
    fn sample_quiz_is_worth_twenty_points() {
        let quiz = Quiz::network_security_basics();
        assert_eq!(quiz.total_points(), 20);
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.answer_key.len(), 2);
    }

    #[test]
    fn perfect_multiple_choice_run_scores_fifty_percent() {
        let mut attempt = answered_attempt();
        attempt.submit();
        let report = attempt.report.unwrap();
        assert_eq!(report.score, 10);
        assert_eq!(report.total, 20);
        assert_eq!(report.percent, 50);
    }

    #[test]
    fn short_answers_are_never_auto_scored() {
        let mut with_essay = answered_attempt();
        with_essay.submit();

        let mut without_essay = QuizAttempt::new(Quiz::network_security_basics());
        without_essay.answer("1", "Virtual Private Network");
        without_essay.answer("2", "443");
        without_essay.submit();

        assert_eq!(with_essay.report, without_essay.report);
    }

    #[test]
    fn one_right_answer_scores_twenty_five_percent() {
        let mut attempt = QuizAttempt::new(Quiz::network_security_basics());
        attempt.answer("1", "Virtual Private Network");
        attempt.answer("2", "80");
        attempt.submit();
        let report = attempt.report.unwrap();
        assert_eq!(report.score, 5);
        assert_eq!(report.percent, 25);
    }

    #[test]
    fn blank_run_scores_zero() {
        let mut attempt = QuizAttempt::new(Quiz::network_security_basics());
        attempt.submit();
        assert_eq!(attempt.report.unwrap().score, 0);
        assert_eq!(attempt.report.unwrap().percent, 0);
    }

    #[test]
    fn percent_is_rounded() {
        let quiz = Quiz {
            title: "Ports".to_string(),
            description: String::new(),
            questions: vec![
                Question {
                    id: "1".to_string(),
                    text: "SSH port?".to_string(),
                    kind: QuestionKind::MultipleChoice,
                    options: vec!["22".to_string(), "23".to_string()],
                    points: 1,
                },
                Question {
                    id: "2".to_string(),
                    text: "Why is telnet unsafe?".to_string(),
                    kind: QuestionKind::ShortAnswer,
                    options: Vec::new(),
                    points: 2,
                },
            ],
            answer_key: HashMap::from([("1".to_string(), "22".to_string())]),
        };
        let mut attempt = QuizAttempt::new(quiz);
        attempt.answer("1", "22");
        attempt.submit();
        assert_eq!(attempt.report.unwrap().percent, 33);
    }

    #[test]
    fn countdown_starts_at_thirty_minutes() {
        let attempt = QuizAttempt::new(Quiz::network_security_basics());
        assert_eq!(attempt.time_left, 1800);
        assert_eq!(attempt.format_time_left(), "30:00");
    }

    #[test]
    fn countdown_expiry_submits_exactly_once() {
        let mut attempt = answered_attempt();
        for _ in 0..1799 {
            attempt.tick();
        }
        assert_eq!(attempt.time_left, 1);
        assert!(attempt.report.is_none());

        attempt.tick();
        assert_eq!(attempt.time_left, 0);
        let report = attempt.report.unwrap();
        assert_eq!(report.percent, 50);

        // Further ticks and submits leave the result alone.
        attempt.tick();
        attempt.submit();
        assert_eq!(attempt.time_left, 0);
        assert_eq!(attempt.report.unwrap(), report);
    }

    #[test]
    fn answers_are_frozen_after_submit() {
        let mut attempt = QuizAttempt::new(Quiz::network_security_basics());
        attempt.submit();
        attempt.answer("1", "Virtual Private Network");
        assert!(attempt.answers.is_empty());
    }

    #[test]
    fn navigation_clamps_to_question_range() {
        let mut attempt = QuizAttempt::new(Quiz::network_security_basics());
        attempt.prev();
        assert_eq!(attempt.current, 0);
        attempt.next();
        attempt.next();
        attempt.next();
        assert_eq!(attempt.current, 2);
        assert_eq!(attempt.current_question().unwrap().id, "3");
    }

    #[test]
    fn empty_quiz_has_no_current_question() {
        let attempt = QuizAttempt::new(Quiz {
            title: "Placeholder".to_string(),
            description: String::new(),
            questions: Vec::new(),
            answer_key: HashMap::new(),
        });
        assert!(attempt.current_question().is_none());
    }

    #[test]
    fn builder_rejects_incomplete_questions() {
        let mut draft = QuizDraft::default();

        let blank = DraftQuestion::default();
        assert_eq!(draft.add_question(blank), Err(QuizError::IncompleteQuestion));

        let no_correct = DraftQuestion {
            text: "Which port is DNS?".to_string(),
            options: vec!["53".to_string(), "80".to_string(), String::new(), String::new()],
            correct_answer: "25".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.add_question(no_correct),
            Err(QuizError::IncompleteQuestion)
        );
        assert!(draft.questions().is_empty());
    }

    #[test]
    fn builder_accepts_short_answers_without_options() {
        let mut draft = QuizDraft::default();
        draft
            .add_question(DraftQuestion {
                text: "Describe a man-in-the-middle attack.".to_string(),
                kind: QuestionKind::ShortAnswer,
                points: 10,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(draft.questions().len(), 1);
        assert!(draft.questions()[0].options.is_empty());
    }

    #[test]
    fn save_requires_title_and_questions() {
        let mut draft = QuizDraft::default();
        assert_eq!(draft.save(), Err(QuizError::IncompleteQuiz));

        draft.title = "Week 1 check".to_string();
        assert_eq!(draft.save(), Err(QuizError::IncompleteQuiz));

        draft
            .add_question(DraftQuestion {
                text: "SSH port?".to_string(),
                options: vec!["22".to_string(), "23".to_string(), String::new(), String::new()],
                correct_answer: "22".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(draft.save(), Ok(()));
    }

    fn port_question(text: &str, correct: &str) -> DraftQuestion {
        DraftQuestion {
            text: text.to_string(),
            options: vec![
                correct.to_string(),
                "1024".to_string(),
                String::new(),
                String::new(),
            ],
            correct_answer: correct.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn removing_a_question_drops_its_key_entry() {
        let mut draft = QuizDraft::default();
        draft.add_question(port_question("SSH port?", "22")).unwrap();
        draft.remove_question(0);
        assert!(draft.questions().is_empty());
        assert!(draft.answer_key.is_empty());

        draft.remove_question(5); // out of range is a no-op
    }

    #[test]
    fn question_ids_are_not_reused_after_removal() {
        let mut draft = QuizDraft::default();
        draft.add_question(port_question("SSH port?", "22")).unwrap();
        draft.add_question(port_question("HTTP port?", "80")).unwrap();
        draft.remove_question(0);
        draft.add_question(port_question("HTTPS port?", "443")).unwrap();

        let ids: Vec<&str> = draft.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(draft.answer_key["2"], "80");
        assert_eq!(draft.answer_key["3"], "443");

        // Removing the survivor takes out its own key entry, nobody else's.
        draft.remove_question(0);
        assert_eq!(draft.answer_key.len(), 1);
        assert_eq!(draft.answer_key["3"], "443");
    }
}
