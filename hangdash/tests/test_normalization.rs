use hangdash::domain::DayId;
use hangdash::profile::{normalize_fragments, DayTable, Profile, RawProfile};
use hangdash::retrieval::parse_fragment;
use std::path::PathBuf;

fn fixture(name: &str) -> RawProfile {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    let body = std::fs::read(&path).expect("fixture should exist");
    parse_fragment(name, &body).expect("fixture should parse")
}

fn two_threads() -> Profile {
    normalize_fragments(vec![fixture("two_threads.json")]).unwrap()
}

#[test]
fn test_every_thread_gets_the_union_of_dates() {
    let profile = two_threads();
    let axis = vec![DayId(20_170_801), DayId(20_170_802), DayId(20_170_803)];

    assert_eq!(profile.dates, axis);
    for thread in &profile.threads {
        assert_eq!(thread.date_axis(), axis, "thread {:?}", thread.name);
    }
}

#[test]
fn test_missing_days_are_zero_filled() {
    let profile = two_threads();

    let gecko = &profile.threads[0];
    assert_eq!(gecko.dates[1], DayTable::zeroed(DayId(20_170_802), 5));

    let child = &profile.threads[1];
    assert_eq!(child.dates[0], DayTable::zeroed(DayId(20_170_801), 2));
    assert_eq!(child.dates[2], DayTable::zeroed(DayId(20_170_803), 2));
    assert_eq!(child.dates[1].sample_hang_ms, vec![7.0, 8.0]);
}

#[test]
fn test_all_days_totals_match_per_day_sums() {
    let profile = two_threads();

    for thread in &profile.threads {
        for j in 0..thread.sample_table.length {
            let ms: f32 = thread.dates.iter().map(|d| d.sample_hang_ms[j]).sum();
            let count: f32 = thread.dates.iter().map(|d| d.sample_hang_count[j]).sum();
            assert_eq!(thread.sample_table.sample_hang_ms[j], ms);
            assert_eq!(thread.sample_table.sample_hang_count[j], count);
        }
    }
    assert_eq!(profile.threads[0].sample_table.sample_hang_ms, vec![11.0, 2.0, 3.0, 4.0, 55.0]);
}

#[test]
fn test_depth_follows_prefix() {
    let profile = two_threads();

    for thread in &profile.threads {
        let table = &thread.stack_table;
        for i in 0..table.len() {
            match table.prefix[i] {
                None => assert_eq!(table.depth[i], 0),
                Some(p) => assert_eq!(table.depth[i], table.depth[p] + 1),
            }
        }
    }
    assert_eq!(profile.threads[0].stack_table.depth, vec![0, 1, 2, 1, 0]);
}

#[test]
fn test_function_names_resolve_through_string_table() {
    let profile = two_threads();
    let gecko = &profile.threads[0];

    assert_eq!(gecko.func_name(2).unwrap(), "js::GCRuntime::collect");
    assert!(gecko.func_name(5).is_err());
}

#[test]
fn test_metadata_is_kept() {
    let profile = two_threads();
    assert_eq!(profile.uuid.as_deref(), Some("7c1e3b0a-two-threads"));
    assert_eq!(profile.usage_hours_by_date.as_ref().map(|u| u.len()), Some(3));
}

#[test]
fn test_split_fragments_merge_onto_one_axis() {
    let profile = normalize_fragments(vec![fixture("split_thread_a.json"), fixture("split_thread_b.json")]).unwrap();

    assert_eq!(profile.dates, vec![DayId(1), DayId(2), DayId(3)]);
    assert_eq!(profile.uuid.as_deref(), Some("split-a"));
    assert!(profile.usage_hours_by_date.unwrap().contains_key("1"));

    let a = &profile.threads[0];
    assert_eq!(a.name.as_deref(), Some("A"));
    assert_eq!(a.dates[2], DayTable::zeroed(DayId(3), 1));

    let b = &profile.threads[1];
    assert_eq!(b.name.as_deref(), Some("B"));
    assert_eq!(b.dates[0], DayTable::zeroed(DayId(1), 1));
    assert_eq!(b.sample_table.sample_hang_ms, vec![4.0]);
}
