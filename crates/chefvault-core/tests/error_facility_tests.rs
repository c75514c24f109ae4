use chefvault_core::errors::{ExError, ExErrorKind};
use chefvault_core::rules::validation::ValidationError;

#[test]
fn test_empty_name_is_invalid_input() {
    let ex_err: ExError = ValidationError::EmptyName.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert!(ex_err.message().contains("name"));
}

#[test]
fn test_rating_out_of_range_carries_score() {
    let ex_err: ExError = ValidationError::RatingOutOfRange { score: 6 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidRating);
    assert_eq!(ex_err.code(), "ERR_INVALID_RATING");
    assert!(ex_err.message().contains('6'));
}

#[test]
fn test_not_completed_distinct_from_invalid_rating() {
    let ex_err: ExError = ValidationError::NotCompleted { recipe_id: 3 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotCompleted);
    assert_ne!(ex_err.kind(), ExErrorKind::InvalidRating);
    assert_eq!(ex_err.entity_id(), Some("3"));
}

#[test]
fn test_rating_without_completion_is_invalid_rating() {
    let ex_err: ExError = ValidationError::RatingWithoutCompletion { rating: 4 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidRating);
}

#[test]
fn test_builder_context() {
    let err = ExError::new(ExErrorKind::MissingTable)
        .with_op("restore_validate")
        .with_entity_id("/tmp/backup.db")
        .with_message("Missing tables: recipe_tags");

    assert_eq!(err.op(), Some("restore_validate"));
    assert_eq!(err.entity_id(), Some("/tmp/backup.db"));
    assert_eq!(err.code(), "ERR_MISSING_TABLE");
    assert!(err.to_string().contains("recipe_tags"));
}

#[test]
fn test_serde_json_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json")
        .err()
        .unwrap();
    let err: ExError = json_err.into();

    assert_eq!(err.kind(), ExErrorKind::Serialization);
}
