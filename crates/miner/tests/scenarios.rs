//! End-to-end mining scenarios over the public API.
//!
//! Mirrors a short syslog session: records are whitespace-split and
//! partitioned by process name.

use miner::{MinerConfig, Parameter, PartitionedTemplateStore, Symbol, TemplateStore};

const S1: &str = "daemon service x regen started";
const S2: &str = "daemon service y regen started";
const S3: &str = "daemon service x regen stopped";
const SDIFF: &str = "this is a different log not the same as other log messages";

fn tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

// ===========================================================================
// 1. FLAT STORE
// ===========================================================================

#[test]
fn single_record_matches_itself_with_full_score() {
    let mut store = TemplateStore::new();
    store.insert(&tokens(S1));

    assert_eq!(store.len(), 1);
    let template = store.find_match(&tokens(S1)).unwrap();
    assert_eq!(template.score(&tokens(S1)), 5);
}

#[test]
fn second_record_generalizes_the_template() {
    let mut store = TemplateStore::new();
    store.insert(&tokens(S1));
    store.insert(&tokens(S2));

    assert_eq!(store.len(), 1);
    let template = store.template_at(0).unwrap();
    assert_eq!(template.to_string(), "daemon service * regen started");
    assert_eq!(template.wildcard_positions(), &[3]);
    assert_eq!(
        template.symbols()[2],
        Symbol::Wildcard,
    );
}

#[test]
fn short_record_is_pruned_by_length() {
    let mut store = TemplateStore::new();
    store.insert(&tokens(S1));
    store.insert(&tokens(S2));
    assert!(store.find_match(&tokens("this will fail")).is_none());
}

#[test]
fn unrelated_record_starts_a_new_template() {
    let mut store = TemplateStore::new();
    store.insert(&tokens(S1));
    store.insert(&tokens(S2));
    store.insert(&tokens(SDIFF));

    assert_eq!(store.len(), 2);
    assert!(store.find_match(&tokens(S1)).is_some());
    assert!(store.find_match(&tokens(SDIFF)).is_some());
}

#[test]
fn leading_token_never_becomes_a_wildcard() {
    let mut store = TemplateStore::new();
    for line in [
        "sshd accepted key for alice",
        "cron accepted key for bob",
        "kernel accepted key for carol",
    ] {
        store.insert(&tokens(line));
    }

    assert_eq!(store.len(), 1);
    let template = store.template_at(0).unwrap();
    assert_eq!(template.to_string(), "sshd accepted key for *");
    assert_eq!(template.wildcard_positions(), &[5]);
}

// ===========================================================================
// 2. PARTITIONED STORE
// ===========================================================================

#[test]
fn partitioned_match_reports_parameters() {
    let mut mm = PartitionedTemplateStore::new();
    mm.insert("proj1".to_string(), &tokens(S1));
    mm.insert("proj1".to_string(), &tokens(S2));

    let found = mm.find_match("proj1", &tokens(S3)).unwrap();
    assert_eq!(
        found.parameters,
        vec![Parameter { position: 3, value: "x".to_string() }]
    );
}

#[test]
fn unseen_partition_returns_nothing() {
    let mut mm: PartitionedTemplateStore<String, String> = PartitionedTemplateStore::new();
    assert!(mm.find_match("proj2", &tokens(S1)).is_none());

    mm.insert("proj1".to_string(), &tokens(S1));
    assert!(mm.find_match("proj2", &tokens(S1)).is_none());
}

#[test]
fn partitions_do_not_share_templates() {
    let mut mm = PartitionedTemplateStore::new();
    mm.insert("xccd".to_string(), &tokens("Connection handler finished"));
    mm.insert("cronimon".to_string(), &tokens("Service uplink-a is dead"));

    assert!(mm.find_match("xccd", &tokens("Service uplink-b is dead")).is_none());
    assert!(mm.find_match("cronimon", &tokens("Service uplink-b is dead")).is_some());
    assert_eq!(mm.store("xccd").unwrap().last_record_id(), 1);
    assert_eq!(mm.store("cronimon").unwrap().last_record_id(), 1);
}

// ===========================================================================
// 3. CONFIGURATION
// ===========================================================================

#[test]
fn toml_config_drives_partition_stores() {
    let config = MinerConfig::from_toml_str(
        r#"
            match_threshold = 1.0
            preserve_leading_token = false
        "#,
    )
    .unwrap();

    let mut mm = PartitionedTemplateStore::with_config(config);
    mm.insert("proj1".to_string(), &tokens(S1));
    mm.insert("proj1".to_string(), &tokens(S2));

    // A full match is now required, so the variation starts its own template
    assert_eq!(mm.store("proj1").unwrap().len(), 2);
    assert!(mm.find_match("proj1", &tokens(S3)).is_none());
}
