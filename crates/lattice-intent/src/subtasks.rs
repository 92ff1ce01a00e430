//! Sub-task normalization and per-intent defaults.

use lattice_core::constants::{MAX_SUB_TASKS, MAX_SUB_TASK_WORDS};
use lattice_core::Intent;

/// Verbs a sub-task may open with. Anything else gets the intent's default
/// verb prefixed.
const IMPERATIVE_VERBS: &[&str] = &[
    "define", "explain", "compare", "contrast", "summarize", "identify", "analyze",
    "describe", "list", "evaluate", "assess", "outline", "discuss", "examine", "highlight",
];

fn default_verb(intent: Intent) -> &'static str {
    match intent {
        Intent::Summary => "summarize",
        Intent::Comparison => "compare",
        Intent::Concepts => "define",
        Intent::Gap => "identify",
        Intent::DeepAnalysis => "analyze",
        Intent::Other => "explain",
    }
}

/// Force raw sub-tasks into the bounded imperative shape: at most
/// `MAX_SUB_TASKS` items of at most `MAX_SUB_TASK_WORDS` words, each opening
/// with an allowed verb.
pub fn normalize_sub_tasks(intent: Intent, raw: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for task in raw {
        let task = task.trim().trim_end_matches(['.', '!', '?']);
        if task.is_empty() {
            continue;
        }

        let mut words: Vec<&str> = task.split_whitespace().collect();
        let first = words[0].trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        let needs_verb = !IMPERATIVE_VERBS.contains(&first.as_str());

        let verb = default_verb(intent);
        let budget = if needs_verb { MAX_SUB_TASK_WORDS - 1 } else { MAX_SUB_TASK_WORDS };
        words.truncate(budget);

        let mut text = words.join(" ");
        if needs_verb {
            text = format!("{verb} {text}");
        }
        out.push(text);

        if out.len() == MAX_SUB_TASKS {
            break;
        }
    }
    out
}

/// Fixed fallback decomposition when the model supplies nothing usable.
pub fn default_sub_tasks(intent: Intent) -> Vec<String> {
    let tasks: &[&str] = match intent {
        Intent::Summary => &[
            "summarize the main findings",
            "highlight the key methods",
            "note reported limitations",
        ],
        Intent::Comparison => &[
            "define each compared approach",
            "compare their mechanisms",
            "contrast their reported results",
        ],
        Intent::Concepts => &[
            "define the central concepts",
            "explain relations between the concepts",
        ],
        Intent::Gap => &[
            "identify stated limitations",
            "identify unexplored directions",
            "list future work suggestions",
        ],
        Intent::DeepAnalysis => &[
            "analyze the core method",
            "assess the strength of the evidence",
            "discuss broader implications",
        ],
        Intent::Other => &["explain the topic clearly"],
    };
    tasks.iter().map(|t| t.to_string()).collect()
}
