use super::*;
use crate::constants::UNKNOWN_FIELD;

#[test]
fn test_item_new_requires_id_and_description() {
    assert_eq!(Item::new("", "text").unwrap_err(), ItemError::EmptyId);
    assert_eq!(
        Item::new("42", "   ").unwrap_err(),
        ItemError::EmptyDescription {
            id: "42".to_string()
        }
    );
    assert!(Item::new("42", "Fitness AI").is_ok());
}

#[test]
fn test_item_optional_fields_render_unknown() {
    let item = Item::new("1", "Fitness AI").unwrap();

    assert_eq!(item.title_or_unknown(), UNKNOWN_FIELD);
    assert_eq!(item.updated_at_or_unknown(), UNKNOWN_FIELD);
    assert_eq!(format!("{}", item), "unknown (1)");

    let blank_title = item.clone().with_title("  ");
    assert_eq!(blank_title.title_or_unknown(), UNKNOWN_FIELD);
}

#[test]
fn test_item_display_with_metadata() {
    let item = Item::new("7", "Diet tracker")
        .unwrap()
        .with_title("NutriTrack")
        .with_updated_at("2024-05-01")
        .with_retrieval_score(0.912);

    assert_eq!(item.updated_at_or_unknown(), "2024-05-01");
    assert_eq!(format!("{}", item), "NutriTrack (7) [retrieval 0.91]");
}

#[test]
fn test_item_retrieval_score_is_clamped() {
    let item = Item::new("1", "a").unwrap().with_retrieval_score(1.3);
    assert_eq!(item.retrieval_score, Some(1.0));

    let item = Item::new("1", "a").unwrap().with_retrieval_score(-0.2);
    assert_eq!(item.retrieval_score, Some(0.0));

    let item = Item::new("1", "a").unwrap().with_retrieval_score(f32::NAN);
    assert_eq!(item.retrieval_score, Some(0.0));
}

#[test]
fn test_item_validate_catches_deserialized_violations() {
    let item: Item = serde_json::from_value(serde_json::json!({
        "id": "9",
        "description": "x",
        "retrievalScore": 3.0
    }))
    .unwrap();

    assert!(matches!(
        item.validate(),
        Err(ItemError::RetrievalScoreOutOfRange { .. })
    ));
}

#[test]
fn test_item_serde_uses_camel_case_and_skips_absent() {
    let item = Item::new("1", "Fitness AI")
        .unwrap()
        .with_updated_at("2024-01-01");
    let value = serde_json::to_value(&item).unwrap();

    assert_eq!(value["updatedAt"], "2024-01-01");
    assert!(value.get("title").is_none());
    assert!(value.get("retrievalScore").is_none());
}

#[test]
fn test_judgment_accepts_unit_range() {
    let judgment = Judgment::new("s", "sim", "diff", 0.75, Some(0.9), "why").unwrap();

    assert_eq!(judgment.score, 0.75);
    assert_eq!(judgment.confidence, Some(0.9));
    assert!(judgment.has_confidence());
    assert_eq!(format!("{}", judgment), "score 0.75, confidence 0.90");
}

#[test]
fn test_judgment_clamps_within_tolerance() {
    let judgment = Judgment::with_score(1.004).unwrap();
    assert_eq!(judgment.score, 1.0);

    let judgment = Judgment::with_score(-0.003).unwrap();
    assert_eq!(judgment.score, 0.0);
}

#[test]
fn test_judgment_rejects_percentage_scale() {
    assert_eq!(
        Judgment::with_score(85.0).unwrap_err(),
        JudgmentError::OutOfRange {
            field: "score",
            value: 85.0
        }
    );
}

#[test]
fn test_judgment_rejects_bad_confidence() {
    let err = Judgment::new("", "", "", 0.5, Some(1.5), "").unwrap_err();
    assert!(matches!(
        err,
        JudgmentError::OutOfRange {
            field: "confidence",
            ..
        }
    ));

    let err = Judgment::new("", "", "", f32::INFINITY, None, "").unwrap_err();
    assert_eq!(err, JudgmentError::NotFinite { field: "score" });
}

#[test]
fn test_ranked_result_exposes_judgment_score() {
    let result = RankedResult::new(
        Item::new("1", "Fitness AI").unwrap(),
        Judgment::with_score(0.6).unwrap(),
    );

    assert_eq!(result.score(), 0.6);
    assert_eq!(result.item.id, "1");
}
