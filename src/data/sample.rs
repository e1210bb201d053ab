//! Built-in category catalog.
//!
//! Used by the CLI when neither a catalog file nor a catalog URL is given.
//! Middle-category names line up with the scoring profiles so every category
//! here gets a real element/ten-god profile.

use crate::domain::{CatalogEntry, MajorType};

type Group = (MajorType, &'static str, &'static str, &'static [(&'static str, f64)]);

const DEFAULT_CONFIDENCE: f64 = 0.85;

const GROUPS: &[Group] = &[
    (
        MajorType::Positive,
        "연예",
        "🎤",
        &[("배우", 1.2), ("가수", 1.2), ("방송 진행자", 1.0), ("무대 연출가", 0.9), ("유튜버", 1.0)],
    ),
    (
        MajorType::Positive,
        "예술",
        "🎨",
        &[("화가", 1.1), ("패션 디자이너", 1.0), ("작가", 1.0), ("사진작가", 0.9), ("공예가", 0.8)],
    ),
    (
        MajorType::Positive,
        "학업",
        "📚",
        &[("연구원", 1.2), ("교수", 1.1), ("교육 전문가", 1.0), ("자격증 취득", 0.9), ("철학자", 0.8)],
    ),
    (
        MajorType::Positive,
        "사업",
        "💼",
        &[("창업가", 1.2), ("영업 전문가", 1.0), ("무역업", 1.0), ("부동산 중개", 0.9), ("유통업", 0.9)],
    ),
    (
        MajorType::Positive,
        "금융",
        "💰",
        &[("투자 분석가", 1.1), ("회계사", 1.1), ("은행원", 1.0), ("금융 설계사", 0.9)],
    ),
    (
        MajorType::Positive,
        "리더십",
        "👑",
        &[("경영 관리자", 1.2), ("공무원", 1.0), ("행정가", 1.0), ("팀 리더", 0.9)],
    ),
    (
        MajorType::Positive,
        "스포츠",
        "⚽",
        &[("운동선수", 1.2), ("격투기 선수", 1.0), ("트레이너", 1.0), ("야외 활동 가이드", 0.8)],
    ),
    (
        MajorType::Positive,
        "의료",
        "🩺",
        &[("의사", 1.2), ("외과 의사", 1.1), ("심리 상담사", 1.0), ("간호사", 1.0)],
    ),
    (
        MajorType::Positive,
        "기술",
        "💻",
        &[("소프트웨어 개발자", 1.2), ("기계 공학자", 1.0), ("데이터 연구원", 1.0), ("기술 디자이너", 0.9)],
    ),
    (
        MajorType::Negative,
        "건강",
        "🏥",
        &[("위장 질환", 1.0), ("호흡기 질환", 1.0), ("피부 질환", 0.8), ("만성 피로", 0.9)],
    ),
    (
        MajorType::Negative,
        "재물 손실",
        "📉",
        &[("투자 손실", 1.1), ("사기 피해", 1.0), ("과소비", 0.9)],
    ),
    (
        MajorType::Negative,
        "대인관계",
        "💔",
        &[("직장 내 갈등", 1.0), ("가족 갈등", 0.9), ("이별", 0.9)],
    ),
    (
        MajorType::Negative,
        "사고",
        "🚑",
        &[("교통사고", 1.1), ("운동 중 부상", 0.9)],
    ),
    (
        MajorType::Negative,
        "법적 분쟁",
        "⚖️",
        &[("계약 분쟁", 1.0), ("소송", 1.0)],
    ),
    (
        MajorType::Negative,
        "중독",
        "🍷",
        &[("음주", 1.0), ("도박", 1.0), ("게임 과몰입", 0.8)],
    ),
];

/// Flat rows of the built-in catalog.
pub fn sample_catalog() -> Vec<CatalogEntry> {
    GROUPS
        .iter()
        .flat_map(|(major, middle, icon, items)| {
            items.iter().map(move |(minor, weight)| CatalogEntry {
                major_type: *major,
                middle_name: (*middle).to_string(),
                icon: Some((*icon).to_string()),
                minor_name: (*minor).to_string(),
                base_weight: *weight,
                confidence_factor: DEFAULT_CONFIDENCE,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryTree;
    use crate::scoring::{CategoryProfile, profile_for};

    #[test]
    fn every_sample_category_has_a_profile() {
        let tree = CategoryTree::from_entries(&sample_catalog());
        assert_eq!(tree.positive().count(), 9);
        assert_eq!(tree.negative().count(), 6);
        for category in tree.categories() {
            assert_ne!(
                profile_for(category.major_type, &category.name),
                CategoryProfile::NEUTRAL,
                "{}",
                category.name
            );
            assert!(category.icon.is_some());
        }
    }
}
