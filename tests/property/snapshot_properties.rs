//! Property tests for the snapshot codec and display helpers.
//!
//! Uses proptest to verify:
//! 1. Arbitrary text never makes any snapshot decoder panic.
//! 2. Task lists survive encode → decode (camelCase field names included).
//! 3. `format_duration` is lossless and keeps minutes/seconds below 60.
//! 4. `normalize_url` always yields an `http`-prefixed URL.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use studydash_core::codec;
use studydash_core::material::{StudyMaterial, normalize_url};
use studydash_core::task::{Priority, Task, TaskId};
use studydash_core::timer::{TimerSnapshot, format_duration};

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low)
    ]
}

fn arb_task() -> impl Strategy<Value = Task> {
    (
        "[a-zA-Z0-9-]{1,36}",
        "[^\x00]{1,64}",
        1u32..10_000,
        any::<u32>(),
        any::<bool>(),
        0u8..=100,
        any::<bool>(),
        arb_priority(),
        0i64..4_102_444_800_000,
    )
        .prop_map(
            |(id, name, expected_time, actual, is_completed, progress, is_active, priority, ms)| {
                Task {
                    id: TaskId::from_string(id),
                    name,
                    expected_time,
                    actual_time: u64::from(actual),
                    is_completed,
                    progress,
                    is_active,
                    priority,
                    created_at: Utc.timestamp_millis_opt(ms).unwrap(),
                }
            },
        )
}

proptest! {
    #[test]
    fn decoders_never_panic(text in ".{0,256}") {
        let _ = codec::decode::<Vec<Task>>(&text);
        let _ = codec::decode::<TimerSnapshot>(&text);
        let _ = codec::decode::<Vec<StudyMaterial>>(&text);
    }

    #[test]
    fn task_list_round_trips(tasks in prop::collection::vec(arb_task(), 0..8)) {
        let text = codec::encode(&tasks).unwrap();
        prop_assert!(!text.contains("is_active"));
        let decoded: Vec<Task> = codec::decode(&text).unwrap();
        prop_assert_eq!(decoded, tasks);
    }

    #[test]
    fn format_duration_is_lossless(total in 0u64..1_000_000) {
        let shown = format_duration(total);
        let parts: Vec<u64> = shown.split(':').map(|p| p.parse().unwrap()).collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[1] < 60 && parts[2] < 60);
        prop_assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], total);
    }

    #[test]
    fn normalized_urls_start_with_http(raw in "[a-z0-9./:-]{1,40}") {
        prop_assert!(normalize_url(&raw).starts_with("http"));
    }
}
