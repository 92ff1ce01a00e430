use serde::{Deserialize, Serialize};

use super::Tuning;

/// A partial tuning update carried by an adaptation action.
///
/// Only the fields an action touches are set; `apply` folds them into an
/// existing tuning. This is the only mechanism by which recommendations
/// become effective, and it runs on the retry path, never inside a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningPatch {
    pub top_k: Option<usize>,
    pub min_overlap: Option<f64>,
    pub temperature: Option<f64>,
    pub critique_enabled: Option<bool>,
    pub graph_update_enabled: Option<bool>,
}

impl TuningPatch {
    pub fn is_empty(&self) -> bool {
        self.top_k.is_none()
            && self.min_overlap.is_none()
            && self.temperature.is_none()
            && self.critique_enabled.is_none()
            && self.graph_update_enabled.is_none()
    }

    pub fn apply(&self, tuning: &mut Tuning) {
        if let Some(v) = self.top_k {
            tuning.top_k = v;
        }
        if let Some(v) = self.min_overlap {
            tuning.min_overlap = v;
        }
        if let Some(v) = self.temperature {
            tuning.temperature = v;
        }
        if let Some(v) = self.critique_enabled {
            tuning.critique_enabled = v;
        }
        if let Some(v) = self.graph_update_enabled {
            tuning.graph_update_enabled = v;
        }
    }
}

/// A named, explained, patch-bearing recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationAction {
    pub name: String,
    pub reason: String,
    pub patch: TuningPatch,
}

impl AdaptationAction {
    pub fn new(name: impl Into<String>, reason: impl Into<String>, patch: TuningPatch) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            patch,
        }
    }
}

/// Output of the adaptation advisor. Pure: never mutates caller state,
/// never triggers a retry by itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationDecision {
    /// The tuning the decision was computed against (unmodified).
    pub tuning: Tuning,
    pub actions: Vec<AdaptationAction>,
    pub should_retry: bool,
    /// Suggested tuning for a manual retry, when one is recommended.
    pub retry_with: Option<Tuning>,
}

impl AdaptationDecision {
    pub fn no_op(tuning: Tuning) -> Self {
        Self {
            tuning,
            actions: Vec::new(),
            should_retry: false,
            retry_with: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_applies_only_set_fields() {
        let mut t = Tuning::default();
        let patch = TuningPatch {
            top_k: Some(10),
            temperature: Some(0.1),
            ..TuningPatch::default()
        };
        patch.apply(&mut t);
        assert_eq!(t.top_k, 10);
        assert!((t.temperature - 0.1).abs() < f64::EPSILON);
        assert!(t.critique_enabled);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut t = Tuning::default();
        let before = t.clone();
        TuningPatch::default().apply(&mut t);
        assert_eq!(t, before);
    }
}
