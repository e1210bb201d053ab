//! Ten-god resolution.
//!
//! A pillar's ten god is its element relation to the day master, split in two
//! by whether its polarity matches the day master's. The day pillar itself is
//! labelled with the `DayMaster` sentinel rather than a computed relation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Element, ElementRelation, FourPillars, Pillar, Polarity, Stem, TenGod};

/// Position of the day pillar in chart order.
pub const DAY_INDEX: usize = 2;

/// Ten god of a single element/polarity relative to the day master.
pub fn ten_god_of(day_master: Stem, element: Element, polarity: Polarity) -> TenGod {
    let relation = ElementRelation::between(day_master.element(), element);
    TenGod::classify(relation, polarity == day_master.polarity())
}

/// Ten gods of the four pillar stems, in chart order.
pub fn resolve_ten_gods(day_master: Stem, pillars: &[Pillar; 4]) -> [TenGod; 4] {
    let mut out = [TenGod::DayMaster; 4];
    for (i, pillar) in pillars.iter().enumerate() {
        if i == DAY_INDEX {
            continue;
        }
        out[i] = ten_god_of(day_master, pillar.stem.element(), pillar.stem.polarity());
    }
    out
}

/// All ten-god labels a chart exhibits.
///
/// Combines the three non-day stems with the four branches (branch element and
/// branch polarity), so a chart can show up to seven relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenGodProfile {
    pub stems: [TenGod; 4],
    pub branches: [TenGod; 4],
}

impl TenGodProfile {
    pub fn from_chart(chart: &FourPillars) -> Self {
        let dm = chart.day_master();
        let pillars = chart.as_array();
        let stems = resolve_ten_gods(dm, &pillars);
        let branches =
            pillars.map(|p| ten_god_of(dm, p.branch.element(), p.branch.polarity()));
        Self { stems, branches }
    }

    /// Labels present anywhere in the chart, excluding the day-master sentinel.
    pub fn present(&self) -> BTreeSet<TenGod> {
        self.stems
            .iter()
            .chain(self.branches.iter())
            .copied()
            .filter(|g| *g != TenGod::DayMaster)
            .collect()
    }

    pub fn contains(&self, god: TenGod) -> bool {
        self.stems.contains(&god) || self.branches.contains(&god)
    }

    pub fn distinct_count(&self) -> usize {
        self.present().len()
    }
}
