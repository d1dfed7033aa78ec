#![allow(clippy::unwrap_used, clippy::expect_used)]

use varsetx_core::errors::{ExError, ExErrorKind, VarsetXError};
use varsetx_core::model::SelectionLevel;
use varsetx_core_types::SessionId;

#[test]
fn test_domain_errors_map_to_stable_kinds() {
    let cases = vec![
        (
            VarsetXError::InvalidSelection {
                level: SelectionLevel::Node,
                value: "/B".to_string(),
                candidates: vec!["/A".to_string()],
            },
            ExErrorKind::InvalidSelection,
            "ERR_INVALID_SELECTION",
        ),
        (
            VarsetXError::IncompleteSelection {
                field: SelectionLevel::Choice,
            },
            ExErrorKind::IncompleteSelection,
            "ERR_INCOMPLETE_SELECTION",
        ),
        (
            VarsetXError::SceneQueryFailed {
                node_path: "/A".to_string(),
                reason: "gone".to_string(),
            },
            ExErrorKind::SceneQueryFailed,
            "ERR_SCENE_QUERY_FAILED",
        ),
        (
            VarsetXError::NoAttachmentPoint,
            ExErrorKind::NoAttachmentPoint,
            "ERR_NO_ATTACHMENT_POINT",
        ),
        (
            VarsetXError::ChainMutationFailed {
                reason: "locked".to_string(),
            },
            ExErrorKind::ChainMutationFailed,
            "ERR_CHAIN_MUTATION_FAILED",
        ),
        (
            VarsetXError::LoadFailed {
                locator: "scene.yaml".to_string(),
                diagnostic: "bad".to_string(),
            },
            ExErrorKind::LoadFailed,
            "ERR_LOAD_FAILED",
        ),
        (
            VarsetXError::ChainCycleDetected {
                node_id: "e1".to_string(),
            },
            ExErrorKind::CycleDetected,
            "ERR_CYCLE_DETECTED",
        ),
    ];

    for (err, kind, code) in cases {
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), kind);
        assert_eq!(ex.code(), code);
    }
}

#[test]
fn test_ex_error_display_includes_context() {
    let ex: ExError = VarsetXError::InvalidSelection {
        level: SelectionLevel::Choice,
        value: "green".to_string(),
        candidates: vec!["red".to_string(), "blue".to_string()],
    }
    .into();
    let ex = ex.with_op("select_choice").with_node_path("/A");

    let rendered = ex.to_string();
    assert!(rendered.starts_with("[ERR_INVALID_SELECTION] in operation 'select_choice'"));
    assert!(rendered.contains("(node: /A)"));
    assert!(rendered.contains("(choice: green)"));
    assert_eq!(
        ex.candidates(),
        Some(&["red".to_string(), "blue".to_string()][..])
    );
}

#[test]
fn test_ex_error_carries_session_and_source() {
    let session = SessionId::from_string("session-7".to_string());
    let cause: ExError = VarsetXError::ChainMutationFailed {
        reason: "locked".to_string(),
    }
    .into();

    let ex = ExError::new(ExErrorKind::Internal)
        .with_session_id(session.clone())
        .with_source(cause);

    assert_eq!(ex.session_id(), Some(&session));
    assert_eq!(
        ex.source_error().map(|s| s.kind()),
        Some(ExErrorKind::ChainMutationFailed)
    );
    assert!(std::error::Error::source(&ex).is_some());
}

#[test]
fn test_domain_error_messages() {
    assert_eq!(
        VarsetXError::IncompleteSelection {
            field: SelectionLevel::Group
        }
        .to_string(),
        "Incomplete selection: group is empty"
    );
    assert_eq!(
        VarsetXError::InvalidSelection {
            level: SelectionLevel::Node,
            value: "/B".to_string(),
            candidates: vec![],
        }
        .to_string(),
        "Invalid node selection: '/B' is not a current candidate"
    );
}
