// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Marker Property Tests

use proptest::prelude::*;
use samplesync_core::sync::marker::parse_marker;
use samplesync_core::{NetworkError, SyncExtras, SyncHandler, SyncResult};

use super::fakes::{create_server_contact, create_test_harness};

/// Strategy for one server response: either a batch of change counters or a failure.
fn response_strategy() -> impl Strategy<Value = Option<Vec<i64>>> {
    prop_oneof![
        4 => prop::collection::vec(0i64..10_000, 0..5).prop_map(Some),
        1 => Just(None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The stored marker never decreases and tracks the highest counter seen.
    #[test]
    fn prop_marker_is_monotonic(
        start in 0i64..5_000,
        responses in prop::collection::vec(response_strategy(), 1..6),
    ) {
        let h = create_test_harness(Some("secret"));
        h.set_marker(start);
        let mut expected = start;
        let mut next_server_id = 1;

        for response in responses {
            let before = h.marker();
            match &response {
                Some(states) => {
                    let delta = states
                        .iter()
                        .map(|state| {
                            next_server_id += 1;
                            create_server_contact(next_server_id, "x", *state)
                        })
                        .collect();
                    h.server.push_response(Ok(delta));
                    expected = states.iter().copied().fold(expected, i64::max);
                }
                None => h.server.push_response(Err(NetworkError::Io("offline".into()))),
            }

            let mut result = SyncResult::new();
            h.adapter.on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

            prop_assert!(h.marker() >= before);
            prop_assert_eq!(h.marker(), expected);
            prop_assert_eq!(result.has_error(), response.is_none());
        }
    }

    /// Any stored text reads back as a non-negative marker.
    #[test]
    fn prop_parse_marker_never_negative(raw in ".{0,20}") {
        prop_assert!(parse_marker(Some(&raw)) >= 0);
    }
}
