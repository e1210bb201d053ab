//! Shared domain types.
//!
//! The sexagenary vocabulary is closed (5 elements, 10 stems, 12 branches), so
//! every lookup here is an exhaustive `match` or a fixed array indexed by the
//! enum discriminant. Values are `Copy` and serialize with their hangul labels
//! so exported JSON reads the way the product displays it.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Hangul label (목/화/토/금/수).
    pub fn korean(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }

    /// The element this one feeds in the generation cycle.
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one suppresses in the destruction cycle.
    pub fn restrains(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }
}

/// How an element relates to a reference element (usually the day master).
///
/// Always read from the reference's point of view: `Generates` means the
/// reference feeds `other`, `GeneratedBy` means `other` feeds the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRelation {
    Same,
    Generates,
    Restrains,
    RestrainedBy,
    GeneratedBy,
}

impl ElementRelation {
    pub fn between(reference: Element, other: Element) -> ElementRelation {
        if reference == other {
            ElementRelation::Same
        } else if reference.generates() == other {
            ElementRelation::Generates
        } else if reference.restrains() == other {
            ElementRelation::Restrains
        } else if other.restrains() == reference {
            ElementRelation::RestrainedBy
        } else {
            // Five elements, four non-identical partners: the last one is the parent.
            ElementRelation::GeneratedBy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Even positions in either cycle are yang.
    pub fn from_index(index: usize) -> Polarity {
        if index % 2 == 0 { Polarity::Yang } else { Polarity::Yin }
    }
}

/// Heavenly stem (천간).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "갑")]
    Gap,
    #[serde(rename = "을")]
    Eul,
    #[serde(rename = "병")]
    Byeong,
    #[serde(rename = "정")]
    Jeong,
    #[serde(rename = "무")]
    Mu,
    #[serde(rename = "기")]
    Gi,
    #[serde(rename = "경")]
    Gyeong,
    #[serde(rename = "신")]
    Sin,
    #[serde(rename = "임")]
    Im,
    #[serde(rename = "계")]
    Gye,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Sin,
        Stem::Im,
        Stem::Gye,
    ];

    /// Total over `usize`: the index wraps around the 10-stem cycle.
    pub fn from_index(index: usize) -> Stem {
        Stem::ALL[index % Stem::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }

    pub fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    pub fn korean(self) -> &'static str {
        match self {
            Stem::Gap => "갑",
            Stem::Eul => "을",
            Stem::Byeong => "병",
            Stem::Jeong => "정",
            Stem::Mu => "무",
            Stem::Gi => "기",
            Stem::Gyeong => "경",
            Stem::Sin => "신",
            Stem::Im => "임",
            Stem::Gye => "계",
        }
    }
}

/// Earthly branch (지지).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "자")]
    Ja,
    #[serde(rename = "축")]
    Chuk,
    #[serde(rename = "인")]
    In,
    #[serde(rename = "묘")]
    Myo,
    #[serde(rename = "진")]
    Jin,
    #[serde(rename = "사")]
    Sa,
    #[serde(rename = "오")]
    O,
    #[serde(rename = "미")]
    Mi,
    #[serde(rename = "신")]
    Sin,
    #[serde(rename = "유")]
    Yu,
    #[serde(rename = "술")]
    Sul,
    #[serde(rename = "해")]
    Hae,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Sin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    /// Total over `usize`: the index wraps around the 12-branch cycle.
    pub fn from_index(index: usize) -> Branch {
        Branch::ALL[index % Branch::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        match self {
            Branch::In | Branch::Myo => Element::Wood,
            Branch::Sa | Branch::O => Element::Fire,
            Branch::Chuk | Branch::Jin | Branch::Mi | Branch::Sul => Element::Earth,
            Branch::Sin | Branch::Yu => Element::Metal,
            Branch::Hae | Branch::Ja => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    pub fn korean(self) -> &'static str {
        match self {
            Branch::Ja => "자",
            Branch::Chuk => "축",
            Branch::In => "인",
            Branch::Myo => "묘",
            Branch::Jin => "진",
            Branch::Sa => "사",
            Branch::O => "오",
            Branch::Mi => "미",
            Branch::Sin => "신",
            Branch::Yu => "유",
            Branch::Sul => "술",
            Branch::Hae => "해",
        }
    }
}

/// A (stem, branch) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Build a pillar from raw cycle positions (wrapping).
    pub fn from_indices(stem: usize, branch: usize) -> Self {
        Self::new(Stem::from_index(stem), Branch::from_index(branch))
    }

    /// Position in the 60-pair cycle (갑자 = 0).
    ///
    /// Only pairs of equal parity exist in the cycle; for those the CRT solution
    /// is `6·stem − 5·branch (mod 60)`.
    pub fn cycle_index(self) -> usize {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        (6 * s - 5 * b).rem_euclid(60) as usize
    }

    /// Hangul label, e.g. `경오`.
    pub fn label(self) -> String {
        format!("{}{}", self.stem.korean(), self.branch.korean())
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.korean(), self.branch.korean())
    }
}

/// A natal chart: year, month, day and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    /// Calendar month number used for the month pillar (1..=12).
    pub birth_month: u32,
}

impl FourPillars {
    /// Stem of the day pillar, the reference point of every relation.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Pillars in chart order: year, month, day, hour.
    pub fn as_array(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn season(&self) -> Season {
        Season::from_month(self.birth_month)
    }
}

/// Pillars for the year, month and day of a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrentPillars {
    pub as_of: NaiveDate,
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Month → season: 3–5 spring, 6–8 summer, 9–11 autumn, otherwise winter.
    pub fn from_month(month: u32) -> Season {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn korean(self) -> &'static str {
        match self {
            Season::Spring => "봄",
            Season::Summer => "여름",
            Season::Autumn => "가을",
            Season::Winter => "겨울",
        }
    }
}

/// Ten-god (십신) label of a pillar relative to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenGod {
    #[serde(rename = "비견")]
    BiGyeon,
    #[serde(rename = "겁재")]
    GeopJae,
    #[serde(rename = "식신")]
    SikSin,
    #[serde(rename = "상관")]
    SangGwan,
    #[serde(rename = "편재")]
    PyeonJae,
    #[serde(rename = "정재")]
    JeongJae,
    #[serde(rename = "편관")]
    PyeonGwan,
    #[serde(rename = "정관")]
    JeongGwan,
    #[serde(rename = "편인")]
    PyeonIn,
    #[serde(rename = "정인")]
    JeongIn,
    /// Sentinel for the day pillar itself.
    #[serde(rename = "일간")]
    DayMaster,
}

impl TenGod {
    /// Split a relation into its two canonical names by polarity match.
    pub fn classify(relation: ElementRelation, same_polarity: bool) -> TenGod {
        match (relation, same_polarity) {
            (ElementRelation::Same, true) => TenGod::BiGyeon,
            (ElementRelation::Same, false) => TenGod::GeopJae,
            (ElementRelation::Generates, true) => TenGod::SikSin,
            (ElementRelation::Generates, false) => TenGod::SangGwan,
            (ElementRelation::Restrains, true) => TenGod::PyeonJae,
            (ElementRelation::Restrains, false) => TenGod::JeongJae,
            (ElementRelation::RestrainedBy, true) => TenGod::PyeonGwan,
            (ElementRelation::RestrainedBy, false) => TenGod::JeongGwan,
            (ElementRelation::GeneratedBy, true) => TenGod::PyeonIn,
            (ElementRelation::GeneratedBy, false) => TenGod::JeongIn,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            TenGod::BiGyeon => "비견",
            TenGod::GeopJae => "겁재",
            TenGod::SikSin => "식신",
            TenGod::SangGwan => "상관",
            TenGod::PyeonJae => "편재",
            TenGod::JeongJae => "정재",
            TenGod::PyeonGwan => "편관",
            TenGod::JeongGwan => "정관",
            TenGod::PyeonIn => "편인",
            TenGod::JeongIn => "정인",
            TenGod::DayMaster => "일간",
        }
    }
}

/// How the day-pillar cycle is anchored at 1900-01-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DayAnchor {
    /// Cycle index 36 at 1900-01-01; matches charts already issued by the product.
    Legacy,
    /// Cycle index 10 (갑술) at 1900-01-01, the historical day count.
    Sexagenary,
}

impl DayAnchor {
    pub fn offset(self) -> i64 {
        match self {
            DayAnchor::Legacy => 36,
            DayAnchor::Sexagenary => 10,
        }
    }
}

/// Knobs for a single analysis run.
///
/// Derived from CLI flags (plus defaults) by the binary; library callers can
/// start from `AnalysisConfig::default()`.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub day_anchor: DayAnchor,
    /// Days added to a lunar birth date before computing pillars.
    pub lunar_offset_days: i64,
    /// Ranked items kept per category.
    pub top_items: usize,
    /// Reference date for temporal scores; `None` means today (local clock).
    pub as_of: Option<NaiveDate>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            day_anchor: DayAnchor::Legacy,
            lunar_offset_days: 11,
            top_items: 5,
            as_of: None,
        }
    }
}

impl AnalysisConfig {
    /// The effective reference date.
    pub fn as_of_or_today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
