//! Property-based tests for error formatting and classification.

use pidffb_errors::{ErrorCategory, ErrorSeverity, PidffbError, ProtocolError};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn too_short_message_mentions_lengths(report_id in any::<u8>(), expected in 1usize..64, actual in 0usize..64) {
        let err = ProtocolError::TooShort { report_id, expected, actual };
        let msg = err.to_string();
        let expected_text = format!("expected {expected} bytes");
        let actual_text = format!("got {actual}");
        prop_assert!(msg.contains(&expected_text));
        prop_assert!(msg.contains(&actual_text));
    }

    #[test]
    fn unknown_report_ids_are_informational(report_id in any::<u8>()) {
        let err: PidffbError = ProtocolError::UnknownReportId(report_id).into();
        prop_assert_eq!(err.category(), ErrorCategory::Protocol);
        prop_assert_eq!(err.severity(), ErrorSeverity::Info);
        prop_assert!(err.severity() < ErrorSeverity::Error);
    }
}
