//! How much of the question (and its sub-tasks) the answer addresses.

use lattice_text::token_set_ratio;

fn match_score(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }
    token_set_ratio(a, b)
}

/// Blend of question coverage and sub-task coverage. With sub-tasks present
/// the question itself counts 0.35 and the mean sub-task match 0.65, since
/// sub-tasks are the decomposition the answer was asked to follow. Without
/// sub-tasks the question match stands alone.
pub fn coverage_score(question: &str, answer: &str, sub_tasks: &[String]) -> f64 {
    if question.trim().is_empty() || answer.trim().is_empty() {
        return 0.0;
    }

    let q_score = match_score(question, answer);

    let tasks: Vec<&String> = sub_tasks.iter().filter(|t| !t.trim().is_empty()).collect();
    if tasks.is_empty() {
        return q_score.min(1.0);
    }

    let task_mean =
        tasks.iter().map(|t| match_score(t, answer)).sum::<f64>() / tasks.len() as f64;
    (0.35 * q_score + 0.65 * task_mean).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(coverage_score("", "an answer", &[]), 0.0);
        assert_eq!(coverage_score("a question", "", &[]), 0.0);
    }

    #[test]
    fn blank_sub_tasks_fall_back_to_question_match() {
        let with_blank = coverage_score(
            "what is dropout",
            "dropout randomly disables units during training",
            &["  ".to_string()],
        );
        let without = coverage_score(
            "what is dropout",
            "dropout randomly disables units during training",
            &[],
        );
        assert_eq!(with_blank, without);
    }

    #[test]
    fn addressed_sub_tasks_raise_the_score() {
        let answer = "Dropout randomly disables units during training. \
                      It reduces overfitting by preventing co-adaptation.";
        let on_topic = coverage_score(
            "explain dropout",
            answer,
            &["define dropout".to_string(), "explain overfitting reduction".to_string()],
        );
        let off_topic = coverage_score(
            "explain dropout",
            answer,
            &["compare database indexing strategies".to_string()],
        );
        assert!(on_topic > off_topic);
    }

    #[test]
    fn stays_within_unit_interval() {
        let s = coverage_score("same words", "same words", &["same words".to_string()]);
        assert!((0.0..=1.0).contains(&s));
    }
}
