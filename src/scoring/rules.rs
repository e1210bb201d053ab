//! Category profiles and keyword tables.
//!
//! The catalog only names categories; what a category *means* for scoring
//! (its element, the ten gods that suit it, the seasons that favor it) lives
//! here. Lookup order: exact middle-category name, then keyword match on the
//! name, then a neutral profile.

use crate::domain::{Element, MajorType, Season, TenGod};

use Season::{Autumn, Spring, Summer, Winter};
use TenGod::*;

/// Scoring profile of a middle category.
///
/// For negative categories the suitable gods are the protective ones: a high
/// harmony yields a high safety score, which inversion turns into a low risk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub element: Option<Element>,
    pub suitable_gods: &'static [(TenGod, f64)],
    pub seasons: &'static [Season],
}

impl CategoryProfile {
    pub const NEUTRAL: CategoryProfile = CategoryProfile {
        element: None,
        suitable_gods: &[],
        seasons: &[],
    };

    /// Bonus for a god if it suits this category.
    pub fn god_bonus(&self, god: TenGod) -> Option<f64> {
        self.suitable_gods
            .iter()
            .find(|(g, _)| *g == god)
            .map(|(_, bonus)| *bonus)
    }
}

const ENTERTAINMENT: CategoryProfile = CategoryProfile {
    element: Some(Element::Fire),
    suitable_gods: &[(SangGwan, 22.0), (SikSin, 20.0), (PyeonJae, 15.0)],
    seasons: &[Summer],
};
const ART: CategoryProfile = CategoryProfile {
    element: Some(Element::Wood),
    suitable_gods: &[(SangGwan, 20.0), (PyeonIn, 18.0), (SikSin, 15.0)],
    seasons: &[Spring],
};
const ACADEMICS: CategoryProfile = CategoryProfile {
    element: Some(Element::Water),
    suitable_gods: &[(JeongIn, 25.0), (PyeonIn, 20.0), (JeongGwan, 15.0)],
    seasons: &[Autumn, Winter],
};
const BUSINESS: CategoryProfile = CategoryProfile {
    element: Some(Element::Earth),
    suitable_gods: &[(PyeonJae, 25.0), (JeongJae, 20.0), (SikSin, 15.0)],
    seasons: &[Summer, Autumn],
};
const FINANCE: CategoryProfile = CategoryProfile {
    element: Some(Element::Metal),
    suitable_gods: &[(JeongJae, 25.0), (PyeonJae, 20.0), (JeongGwan, 15.0)],
    seasons: &[Autumn],
};
const LEADERSHIP: CategoryProfile = CategoryProfile {
    element: Some(Element::Metal),
    suitable_gods: &[(JeongGwan, 25.0), (PyeonGwan, 22.0), (BiGyeon, 15.0)],
    seasons: &[Autumn],
};
const SPORTS: CategoryProfile = CategoryProfile {
    element: Some(Element::Wood),
    suitable_gods: &[(PyeonGwan, 20.0), (GeopJae, 18.0), (BiGyeon, 15.0)],
    seasons: &[Spring, Autumn],
};
const HEALING: CategoryProfile = CategoryProfile {
    element: Some(Element::Water),
    suitable_gods: &[(JeongIn, 22.0), (SikSin, 18.0), (PyeonIn, 15.0)],
    seasons: &[Winter],
};
const TECHNOLOGY: CategoryProfile = CategoryProfile {
    element: Some(Element::Metal),
    suitable_gods: &[(PyeonIn, 22.0), (SikSin, 18.0), (PyeonGwan, 15.0)],
    seasons: &[Autumn, Winter],
};

const HEALTH: CategoryProfile = CategoryProfile {
    element: Some(Element::Earth),
    suitable_gods: &[(JeongIn, 20.0), (SikSin, 18.0)],
    seasons: &[Summer],
};
const MONEY_LOSS: CategoryProfile = CategoryProfile {
    element: Some(Element::Metal),
    suitable_gods: &[(JeongJae, 20.0), (JeongGwan, 18.0)],
    seasons: &[Autumn],
};
const CONFLICT: CategoryProfile = CategoryProfile {
    element: Some(Element::Earth),
    suitable_gods: &[(JeongGwan, 20.0), (JeongIn, 18.0), (SikSin, 15.0)],
    seasons: &[],
};
const ACCIDENT: CategoryProfile = CategoryProfile {
    element: Some(Element::Fire),
    suitable_gods: &[(JeongIn, 22.0), (JeongGwan, 15.0)],
    seasons: &[Spring, Autumn],
};
const LEGAL: CategoryProfile = CategoryProfile {
    element: Some(Element::Metal),
    suitable_gods: &[(JeongGwan, 25.0), (JeongIn, 15.0)],
    seasons: &[],
};
const ADDICTION: CategoryProfile = CategoryProfile {
    element: Some(Element::Water),
    suitable_gods: &[(JeongIn, 20.0), (JeongGwan, 18.0)],
    seasons: &[Winter],
};

const EXACT: &[(&str, CategoryProfile)] = &[
    ("연예", ENTERTAINMENT),
    ("예술", ART),
    ("학업", ACADEMICS),
    ("사업", BUSINESS),
    ("금융", FINANCE),
    ("리더십", LEADERSHIP),
    ("스포츠", SPORTS),
    ("의료", HEALING),
    ("기술", TECHNOLOGY),
    ("건강", HEALTH),
    ("재물 손실", MONEY_LOSS),
    ("대인관계", CONFLICT),
    ("사고", ACCIDENT),
    ("법적 분쟁", LEGAL),
    ("중독", ADDICTION),
];

const POSITIVE_KEYWORDS: &[(&str, CategoryProfile)] = &[
    ("방송", ENTERTAINMENT),
    ("음악", ENTERTAINMENT),
    ("공연", ENTERTAINMENT),
    ("미술", ART),
    ("디자인", ART),
    ("창작", ART),
    ("공부", ACADEMICS),
    ("교육", ACADEMICS),
    ("연구", ACADEMICS),
    ("창업", BUSINESS),
    ("영업", BUSINESS),
    ("투자", FINANCE),
    ("재테크", FINANCE),
    ("관리", LEADERSHIP),
    ("운동", SPORTS),
    ("야외", SPORTS),
    ("치유", HEALING),
    ("상담", HEALING),
    ("공학", TECHNOLOGY),
    ("개발", TECHNOLOGY),
];

const NEGATIVE_KEYWORDS: &[(&str, CategoryProfile)] = &[
    ("질환", HEALTH),
    ("질병", HEALTH),
    ("손실", MONEY_LOSS),
    ("사기", MONEY_LOSS),
    ("갈등", CONFLICT),
    ("이별", CONFLICT),
    ("부상", ACCIDENT),
    ("교통", ACCIDENT),
    ("소송", LEGAL),
    ("분쟁", LEGAL),
    ("도박", ADDICTION),
    ("음주", ADDICTION),
];

/// Profile of a middle category.
pub fn profile_for(major: MajorType, name: &str) -> CategoryProfile {
    let name = name.trim();
    if let Some((_, p)) = EXACT.iter().find(|(n, _)| *n == name) {
        return *p;
    }
    let keywords = match major {
        MajorType::Positive => POSITIVE_KEYWORDS,
        MajorType::Negative => NEGATIVE_KEYWORDS,
    };
    keywords
        .iter()
        .find(|(kw, _)| name.contains(kw))
        .map(|(_, p)| *p)
        .unwrap_or(CategoryProfile::NEUTRAL)
}

/// Item-name keywords that resonate with each element.
pub fn element_keywords(element: Element) -> &'static [&'static str] {
    match element {
        Element::Wood => &["교육", "출판", "디자인", "원예", "목공", "패션", "작가"],
        Element::Fire => &["방송", "공연", "무대", "영상", "조명", "요리", "마케팅"],
        Element::Earth => &["부동산", "건축", "농업", "중개", "상담", "관리"],
        Element::Metal => &["금융", "법", "회계", "기계", "군인", "경찰", "외과"],
        Element::Water => &["연구", "무역", "유통", "여행", "수산", "철학", "심리"],
    }
}

/// Item-name keywords that resonate with each ten god.
pub fn ten_god_keywords(god: TenGod) -> &'static [&'static str] {
    match god {
        SikSin => &["요리", "음식", "교육", "창작"],
        SangGwan => &["연기", "노래", "가수", "배우", "방송", "예능"],
        PyeonJae => &["투자", "사업", "무역", "영업"],
        JeongJae => &["회계", "금융", "저축", "관리"],
        PyeonGwan => &["군인", "경찰", "운동", "격투", "소방"],
        JeongGwan => &["공무", "행정", "법", "관리"],
        PyeonIn => &["연구", "철학", "종교", "디자인", "기술"],
        JeongIn => &["학문", "교육", "자격", "문서", "상담"],
        BiGyeon => &["협업", "동업", "팀"],
        GeopJae => &["경쟁", "승부", "도전"],
        DayMaster => &[],
    }
}

pub fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| name.contains(kw))
}
