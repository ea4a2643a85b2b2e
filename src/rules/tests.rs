use crate::ansi::Palette;
use crate::engine::{BlockDispatcher, EventBroadcaster, PathNormalizer, RuleRegistry};
use crate::rules::maven;
use crate::Rule;
use std::cell::RefCell;
use std::rc::Rc;

/// Run `lines` through a fresh dispatcher with the default Maven table and
/// collect everything it emits. Colors disabled so assertions stay readable.
fn curate(lines: &[&str]) -> Vec<String> {
    let registry = RuleRegistry::new(maven::rules().unwrap());
    let mut dispatcher =
        BlockDispatcher::new(&registry, EventBroadcaster::new(), PathNormalizer::none(), Palette::new(false));
    lines.iter().filter_map(|line| dispatcher.process(line)).collect()
}

#[test]
fn table_construction_succeeds() {
    let rules = maven::rules().unwrap();

    assert!(!rules.is_empty());
    // Exactly one block rule: the surefire results block.
    assert_eq!(rules.iter().filter(|r| matches!(r, Rule::MultiLine { .. })).count(), 1);
}

#[test]
fn successful_build_transcript() {
    let curated = curate(&[
        "[INFO] Scanning for projects...",
        "[INFO]",
        "[INFO] Building demo 0.1.0",
        "[WARNING] Using platform encoding (UTF-8 actually) to copy filtered resources",
        "[INFO] BUILD SUCCESS",
        "[INFO] Total time:  1.042 s",
        "[INFO] Finished at: 2024-11-02T09:14:55+01:00",
    ]);

    assert_eq!(
        curated,
        vec![
            "demo 0.1.0",
            "Using platform encoding (UTF-8 actually) to copy filtered resources",
            "BUILD SUCCESS",
        ]
    );
}

#[test]
fn failed_build_transcript_with_results_block() {
    let curated = curate(&[
        "[INFO] Scanning for projects...",
        "[INFO] ------------------< com.example:app >-------------------",
        "[INFO] Building app 1.0-SNAPSHOT",
        "[INFO]",
        "[INFO] -------------------------------------------------------",
        " T E S T S",
        "Results :",
        "",
        "Tests in error:",
        "  AppTest.testBroken:42 » NullPointer",
        "",
        "Tests run: 5, Failures: 0, Errors: 1, Skipped: 0",
        "[ERROR] There are test failures.",
        "[INFO] BUILD FAILURE",
        "[INFO] Total time:  3.214 s",
        "[INFO] Finished at: 2024-11-02T09:16:01+01:00",
        "[ERROR] never printed: processing stopped at the fatal marker",
    ]);

    assert_eq!(
        curated,
        vec![
            "[INFO] ------------------< com.example:app >-------------------",
            "app 1.0-SNAPSHOT",
            " T E S T S",
            "Results :",
            "Tests in error:",
            "  AppTest.testBroken:42 » NullPointer",
            "Tests run: 5, Failures: 0, Errors: 1, Skipped: 0",
            "There are test failures.",
            "BUILD FAILURE",
        ]
    );
}

#[test]
fn results_block_listener_fires_once_at_block_open() {
    let registry = RuleRegistry::new(maven::rules().unwrap());
    let results_rule = registry.find(|rule| matches!(rule, Rule::MultiLine { .. })).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut broadcaster = EventBroadcaster::new();
    let sink = Rc::clone(&seen);
    broadcaster.register(results_rule, move |line| sink.borrow_mut().push(line.to_string()));

    let mut dispatcher =
        BlockDispatcher::new(&registry, broadcaster, PathNormalizer::none(), Palette::new(false));
    let emitted: Vec<String> = ["Results :", "Tests in error:", "Tests run: 1, Failures: 0, Errors: 1, Skipped: 0"]
        .iter()
        .filter_map(|line| dispatcher.process(line))
        .collect();

    // The listener observed the block exactly once, and emission was untouched.
    assert_eq!(*seen.borrow(), vec!["Results :".to_string()]);
    assert_eq!(
        emitted,
        vec!["Results :", "Tests in error:", "Tests run: 1, Failures: 0, Errors: 1, Skipped: 0"]
    );
}
