// Classifies a before/after pair of "currently playing" snapshots.
// Pure: it only looks at the two snapshots, never at the tracker tables.

/// What changed in a user's playing activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Not playing before or after, or still playing the same game.
    Unchanged,
    Start(String),
    Stop(String),
    /// Stop `from` then start `to`, applied as one step.
    Switch { from: String, to: String },
}

pub fn classify(previous: Option<&str>, current: Option<&str>) -> Transition {
    match (previous, current) {
        (None, None) => Transition::Unchanged,
        (None, Some(game)) => Transition::Start(game.to_string()),
        (Some(game), None) => Transition::Stop(game.to_string()),
        (Some(old), Some(new)) if old == new => Transition::Unchanged,
        (Some(old), Some(new)) => Transition::Switch {
            from: old.to_string(),
            to: new.to_string(),
        },
    }
}
