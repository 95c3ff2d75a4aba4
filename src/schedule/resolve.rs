use super::types::{ClassEntry, ResolvedPeriod};

/// Course name that wins a period over anything else, and the text
/// replaced on X-Day by the free period name.
pub const FOUNDATIONS: &str = "Foundations";

/// One step of a tie-break policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRule {
    /// First entry whose name contains this text (case-sensitive)
    NameContains(String),
    /// First entry in input order
    FirstInOrder,
}

impl SelectionRule {
    fn select(&self, entries: &[ClassEntry]) -> Option<usize> {
        match self {
            SelectionRule::NameContains(text) => {
                entries.iter().position(|e| e.name.contains(text.as_str()))
            }
            SelectionRule::FirstInOrder => (!entries.is_empty()).then_some(0),
        }
    }
}

/// Ordered rules for picking a period's primary entry. The first rule
/// that selects something wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieBreakPolicy {
    rules: Vec<SelectionRule>,
}

impl TieBreakPolicy {
    pub fn new(rules: Vec<SelectionRule>) -> Self {
        Self { rules }
    }

    /// Index of the primary entry. Falls back to the first entry when
    /// no rule matches.
    pub fn select(&self, entries: &[ClassEntry]) -> Option<usize> {
        self.rules
            .iter()
            .find_map(|rule| rule.select(entries))
            .or_else(|| SelectionRule::FirstInOrder.select(entries))
    }
}

impl Default for TieBreakPolicy {
    /// Foundations first, then input order
    fn default() -> Self {
        Self::new(vec![
            SelectionRule::NameContains(FOUNDATIONS.to_string()),
            SelectionRule::FirstInOrder,
        ])
    }
}

/// Picks one primary entry for a period and summarizes the rest.
///
/// A period with no named entry resolves to an empty primary and no
/// note, even when rooms or teachers were supplied.
pub fn resolve_period(entries: &[ClassEntry], policy: &TieBreakPolicy) -> ResolvedPeriod {
    if !entries.iter().any(ClassEntry::has_name) {
        return ResolvedPeriod::empty();
    }

    let Some(index) = policy.select(entries) else {
        return ResolvedPeriod::empty();
    };

    let alternates: Vec<&ClassEntry> = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, e)| e)
        .collect();

    ResolvedPeriod {
        primary: entries[index].clone(),
        also_note: also_note(&alternates),
    }
}

/// `also classes: A; B; rooms: 1; 2; teachers: X; Y`
///
/// Blank values keep their position. The rooms or teachers part is left
/// out only when every alternate leaves that field blank.
fn also_note(alternates: &[&ClassEntry]) -> String {
    if alternates.is_empty() {
        return String::new();
    }

    let join = |field: fn(&ClassEntry) -> &str| {
        alternates
            .iter()
            .map(|e| field(e))
            .collect::<Vec<_>>()
            .join("; ")
    };
    let any = |field: fn(&ClassEntry) -> &str| alternates.iter().any(|e| !field(e).is_empty());

    let mut parts = vec![format!("also classes: {}", join(|e| &e.name))];
    if any(|e| &e.room) {
        parts.push(format!("rooms: {}", join(|e| &e.room)));
    }
    if any(|e| &e.teacher) {
        parts.push(format!("teachers: {}", join(|e| &e.teacher)));
    }
    parts.join("; ")
}
