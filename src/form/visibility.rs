use std::collections::HashSet;

use crate::schema::schema_model::{Grouping, Screen};

/// Which sections the current step shows, and which one owns the button bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
    pub grouping: Grouping,
    pub visible_section_ids: HashSet<String>,
    pub last_visible_section_id: Option<String>,
    /// Screen carries no grouping data at all: every section is visible.
    pub show_all: bool,
}

impl Visibility {
    pub fn is_visible(&self, section_id: &str) -> bool {
        self.show_all || self.visible_section_ids.contains(section_id)
    }
}

/// Resolve the visible sections for `grouping_index` (default 0).
///
/// An index past the end yields an empty grouping and no visible sections.
/// Only a screen without any groupings falls back to showing everything.
pub fn resolve_visibility(screen: &Screen, grouping_index: Option<usize>) -> Visibility {
    let index = grouping_index.unwrap_or(0);

    let groupings = match screen.groupings.as_deref() {
        Some(groupings) if !groupings.is_empty() => groupings,
        _ => {
            return Visibility {
                grouping: Grouping::default(),
                visible_section_ids: screen
                    .sections
                    .iter()
                    .map(|s| s.section_id.clone())
                    .collect(),
                last_visible_section_id: screen.sections.last().map(|s| s.section_id.clone()),
                show_all: true,
            };
        }
    };

    let grouping = groupings.get(index).cloned().unwrap_or_default();

    let mut visible_section_ids = HashSet::new();
    let mut last_visible_section_id = None;
    for section_id in grouping.section_ids.iter().filter(|id| !id.is_empty()) {
        visible_section_ids.insert(section_id.clone());
        last_visible_section_id = Some(section_id.clone());
    }

    Visibility {
        grouping,
        visible_section_ids,
        last_visible_section_id,
        show_all: false,
    }
}
