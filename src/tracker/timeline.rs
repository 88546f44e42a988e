/// One stage of the repair lifecycle as the tracker renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStage {
    pub name: String,
    /// On the completed path (up to and including the current stage).
    pub reached: bool,
    /// The connector leaving this stage is on the completed path, i.e. this
    /// stage lies strictly before the current one.
    pub edge_reached: bool,
    /// This is the stage the booking is currently in.
    pub current: bool,
}

/// Projection of a booking's status onto the configured stage order,
/// recomputed from scratch on every lookup.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub stages: Vec<TimelineStage>,
}

impl Timeline {
    /// Highlight the prefix ending at `status`. A status that matches no
    /// configured stage produces a timeline with nothing highlighted.
    pub fn compute(stage_names: &[String], status: &str) -> Self {
        let position = stage_names.iter().position(|name| name == status);

        let stages = stage_names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let (reached, edge_reached, current) = match position {
                    Some(pos) => (idx <= pos, idx < pos, idx == pos),
                    None => (false, false, false),
                };
                TimelineStage {
                    name: name.clone(),
                    reached,
                    edge_reached,
                    current,
                }
            })
            .collect();

        Self { stages }
    }

    pub fn has_match(&self) -> bool {
        self.stages.iter().any(|s| s.current)
    }
}
