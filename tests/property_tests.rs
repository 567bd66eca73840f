/// Property-based tests using proptest
/// Tests invariants of argument validation, request encoding and response decoding
use idscan_screening::models::ScreeningRequest;
use idscan_screening::services::ServiceType;
use idscan_screening::validation::{is_unsupported_state_error, require_non_empty};
use idscan_screening::ScreeningResult;
use proptest::prelude::*;

fn optional_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[A-Za-z0-9 -]{1,12}".prop_map(Some),
    ]
}

fn service() -> impl Strategy<Value = ServiceType> {
    prop::sample::select(ServiceType::ALL.to_vec())
}

// Property: Validation should never panic and rejects exactly the empty inputs
proptest! {
    #[test]
    fn validation_never_panics(args in prop::collection::vec("\\PC*", 0..8)) {
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let _ = require_non_empty(&refs);
    }

    #[test]
    fn any_empty_argument_is_rejected(
        args in prop::collection::vec("[a-zA-Z0-9]{1,10}", 1..7),
        blank in any::<prop::sample::Index>()
    ) {
        let mut refs: Vec<&str> = args.iter().map(String::as_str).collect();
        prop_assert!(require_non_empty(&refs).is_ok());

        let idx = blank.index(refs.len());
        refs[idx] = "";
        let err = require_non_empty(&refs).unwrap_err();
        prop_assert!(err.is_validation());
    }
}

// Property: Unsupported-state detection is a plain substring match
proptest! {
    #[test]
    fn unsupported_marker_detected_anywhere(prefix in "\\PC{0,20}", suffix in "\\PC{0,20}") {
        let message = format!("{}is not yet supported{}", prefix, suffix);
        prop_assert!(is_unsupported_state_error(&message));
    }

    #[test]
    fn messages_without_marker_are_failures(message in "[a-z ]{0,40}") {
        prop_assume!(!message.contains("is not yet supported"));
        prop_assert!(!is_unsupported_state_error(&message));
    }
}

// Property: Encoded requests never carry blank optional fields
proptest! {
    #[test]
    fn request_never_emits_blank_fields(
        first_name in optional_field(),
        last_name in optional_field(),
        state in optional_field(),
        ssn in optional_field(),
        reference_id in optional_field(),
        services in prop::collection::vec(service(), 0..4),
        document_category_code in 0u32..5
    ) {
        let request = ScreeningRequest {
            first_name,
            last_name,
            state,
            ssn,
            reference_id,
            document_category_code,
            ..ScreeningRequest::new(services.clone())
        };
        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();

        prop_assert_eq!(object["services"].as_array().unwrap().len(), services.len());
        prop_assert_eq!(object["documentCategoryCode"].as_u64(), Some(document_category_code as u64));
        for (key, field) in object {
            if key != "services" && key != "documentCategoryCode" {
                prop_assert!(
                    field.as_str().is_some_and(|s| !s.is_empty()),
                    "blank or non-string field emitted: {}", key
                );
            }
        }
    }
}

// Property: Result decoding tolerates missing and null fields
proptest! {
    #[test]
    fn partial_results_decode(
        include_error in any::<bool>(),
        null_profiles in any::<bool>(),
        success in any::<bool>()
    ) {
        let mut body = serde_json::json!({"success": success});
        if include_error {
            body["error"] = serde_json::json!("boom");
        }
        if null_profiles {
            body["profiles"] = serde_json::Value::Null;
        }

        let result: ScreeningResult = serde_json::from_value(body).unwrap();
        prop_assert_eq!(result.success, success);
        prop_assert_eq!(result.error.is_some(), include_error);
        prop_assert!(result.profiles.is_empty());
    }
}
