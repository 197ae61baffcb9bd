//! Label naming for the lowering pass
//! 
//! Every label synthesized while lowering one program must be unique. Labels
//! are an escaped base name plus `$` plus a per-name counter. Escaping turns
//! every `_` in a source name into `$` (after doubling existing `$`), so an
//! escaped user name never contains `_` and never matches the `$<digits>`
//! suffix shape on its own.

use crate::IF_COUNTER_KEY;
use log::trace;
use std::collections::HashMap;

/// Escape a source name for use as a label base
pub fn escape_name(name: &str) -> String {
    name.replace('$', "$$").replace('_', "$")
}

/// The three labels of one conditional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalLabels {
    pub if_label: String,
    pub else_label: String,
    pub endif_label: String,
}

impl ConditionalLabels {
    pub fn new(tag: u32) -> Self {
        Self {
            if_label: format!("if${}", tag),
            else_label: format!("else${}", tag),
            endif_label: format!("endif${}", tag),
        }
    }
}

/// Per-program naming counters
/// 
/// Owned by a single `lower_program` call and passed by `&mut` through the
/// whole lowering. Counts only ever increase.
#[derive(Debug)]
pub struct NameCounters {
    counts: HashMap<String, u32>,
}

impl NameCounters {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        counts.insert(IF_COUNTER_KEY.to_string(), 0);
        Self { counts }
    }

    /// Current count for a name (0 if never used)
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(counter_key(name)).copied().unwrap_or(0)
    }

    /// Produce `<base>$<n>` and bump the counter for `base`
    pub fn fresh_label(&mut self, base: &str) -> String {
        let id = self.bump(counter_key(base));
        let label = format!("{}${}", base, id);
        trace!("Allocated label '{}'", label);
        label
    }

    /// Allocate the tag for the next conditional
    pub fn next_if_tag(&mut self) -> u32 {
        self.bump(IF_COUNTER_KEY)
    }

    fn bump(&mut self, key: &str) -> u32 {
        let counter = self.counts.entry(key.to_string()).or_insert(0);
        let id = *counter;
        *counter += 1;
        id
    }
}

impl Default for NameCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Lambdas named like a conditional label prefix draw from the conditional
/// counter, so `else$<n>` from a lambda can never equal a conditional's.
fn counter_key(base: &str) -> &str {
    match base {
        "else" | "endif" => IF_COUNTER_KEY,
        _ => base,
    }
}
