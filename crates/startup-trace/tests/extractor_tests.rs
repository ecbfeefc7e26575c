use pretty_assertions::assert_eq;
use startup_trace::parser::schema::{ExtractionConfig, PairedMarkerSpec};
use startup_trace::parser::{extract_metrics, TraceMetricExtractor};
use startup_trace::utils::ConfigError;

const PACKAGE: &str = "com.example.app";

const ATRACE: &str = "\
# tracer: nop
#
  system_server-1234  (1234) [001] ...1  100.000000: tracing_mark_write: B|1234|Startup
  system_server-1234  (1234) [001] ...1  100.050000: tracing_mark_write: B|1234|launching: com.example.app
  com.example.app-5678  (5678) [002] ...1  100.250000: tracing_mark_write: B|5678|performCreate:com.example.app.MainActivity
  com.example.app-5678  (5678) [002] ...1  100.300000: tracing_mark_write: B|5678|performStart:com.example.app.MainActivity
  com.example.app-5678  (5678) [002] ...1  100.400000: tracing_mark_write: B|5678|performResume:com.example.app.MainActivity
  com.example.app-5678  (5678) [003] ...1  100.700000: tracing_mark_write: B|5678|bundle_load_start
  com.example.app-5678  (5678) [003] ...1  101.200000: tracing_mark_write: B|5678|bundle_load_end
  com.example.app-5678  (5678) [002] ...1  101.500000: tracing_mark_write: B|5678|app_js_initialized
  com.example.app-5678  (5678) [002] ...1  102.000000: tracing_mark_write: B|5678|reportFullyDrawn:com.example.app
";

fn config(markers: &[&str], pairs: Vec<PairedMarkerSpec>) -> ExtractionConfig {
    ExtractionConfig::new(
        PACKAGE,
        markers.iter().map(|m| m.to_string()).collect(),
        pairs,
    )
    .unwrap()
}

fn bundle_pair() -> PairedMarkerSpec {
    PairedMarkerSpec::new("bundle_load_start", "bundle_load_end", "bundleLoad")
}

#[test]
fn test_full_atrace_capture() {
    let metrics = extract_metrics(ATRACE, &config(&["app_js_initialized"], vec![bundle_pair()]))
        .unwrap();

    assert_eq!(metrics.get("appStartTimestamp"), Some(100.0));

    assert_eq!(metrics.get("activityCreateTimestamp"), Some(100.25));
    assert_eq!(metrics.get("timeToCreate"), Some(0.25));
    assert_eq!(metrics.get("activityStartTimestamp"), Some(100.3));
    assert_eq!(metrics.get("timeToStart"), Some(0.3));
    assert_eq!(metrics.get("activityResumeTimestamp"), Some(100.4));
    assert_eq!(metrics.get("timeToResume"), Some(0.4));
    assert_eq!(metrics.get("activityDrawnTimestamp"), Some(102.0));
    assert_eq!(metrics.get("timeToDrawn"), Some(2.0));

    assert_eq!(metrics.get("app_js_initializedTimestamp"), Some(101.5));
    assert_eq!(metrics.get("timeToapp_js_initialized"), Some(1.5));

    assert_eq!(metrics.get("bundle_load_startTimestamp"), Some(100.7));
    assert_eq!(metrics.get("bundle_load_endTimestamp"), Some(101.2));
    assert_eq!(metrics.get("timeTobundle_load_start"), Some(0.7));
    assert_eq!(metrics.get("timeTobundle_load_end"), Some(1.2));
    assert_eq!(metrics.get("bundleLoadDuration"), Some(0.5));
}

#[test]
fn test_startup_and_marker_scenario() {
    let trace = "... 123.456: tracing_mark_write: B|100|Startup ...\n\
                 ... 124.100: tracing_mark_write: B|100|app_js_initialized ...\n";
    let metrics = extract_metrics(trace, &config(&["app_js_initialized"], vec![])).unwrap();

    assert_eq!(metrics.get("appStartTimestamp"), Some(123.456));
    assert_eq!(metrics.get("app_js_initializedTimestamp"), Some(124.1));
    assert_eq!(metrics.get("timeToapp_js_initialized"), Some(0.644));
}

#[test]
fn test_logcat_monotonic_capture() {
    let trace = "\
    10.000  1000  1000 I ActivityManager: Start proc 4321:com.example.app/u0a12 for activity
    10.800  4321  4321 I ReactNativeJS: app_ready
    11.100  1000  1000 I ActivityTaskManager: Fully drawn com.example.app/.MainActivity: +1s100ms
";
    let metrics = extract_metrics(trace, &config(&["app_ready"], vec![])).unwrap();

    assert_eq!(metrics.get("appStartTimestamp"), Some(10.0));
    assert_eq!(metrics.get("app_readyTimestamp"), Some(10.8));
    assert_eq!(metrics.get("timeToapp_ready"), Some(0.8));
    assert_eq!(metrics.get("activityDrawnTimestamp"), Some(11.1));
    assert_eq!(metrics.get("timeToDrawn"), Some(1.1));
    assert!(!metrics.contains("activityCreateTimestamp"));
}

#[test]
fn test_microsecond_timestamps_are_normalized() {
    let trace = "1500000: tracing_mark_write: B|1|Startup\n\
                 2000000: tracing_mark_write: B|1|ready\n";
    let metrics = extract_metrics(trace, &config(&["ready"], vec![])).unwrap();

    assert_eq!(metrics.get("appStartTimestamp"), Some(1.5));
    assert_eq!(metrics.get("readyTimestamp"), Some(2.0));
    assert_eq!(metrics.get("timeToready"), Some(0.5));
}

#[test]
fn test_zero_anchor_means_no_relative_metrics() {
    let trace = "0.000: tracing_mark_write: B|1|Startup\n\
                 2.000: tracing_mark_write: B|1|ready\n";
    let metrics = extract_metrics(trace, &config(&["ready"], vec![])).unwrap();

    assert!(!metrics.contains("appStartTimestamp"));
    assert_eq!(metrics.get("readyTimestamp"), Some(2.0));
    assert!(metrics.keys().all(|k| !k.starts_with("timeTo")));
}

#[test]
fn test_one_sided_pair_has_no_duration() {
    let trace = "1.000: tracing_mark_write: B|1|Startup\n\
                 1.400: tracing_mark_write: B|1|bundle_load_start\n";
    let metrics = extract_metrics(trace, &config(&[], vec![bundle_pair()])).unwrap();

    assert_eq!(metrics.get("bundle_load_startTimestamp"), Some(1.4));
    assert_eq!(metrics.get("timeTobundle_load_start"), Some(0.4));
    assert!(!metrics.contains("bundle_load_endTimestamp"));
    assert!(!metrics.contains("bundleLoadDuration"));
}

#[test]
fn test_identical_pair_sides_give_zero_duration() {
    let trace = "1.000: tracing_mark_write: B|1|Startup\n\
                 1.400: tracing_mark_write: B|1|tick\n";
    let pair = PairedMarkerSpec::new("tick", "tick", "same");
    let metrics = extract_metrics(trace, &config(&[], vec![pair])).unwrap();

    assert_eq!(metrics.get("sameDuration"), Some(0.0));
}

#[test]
fn test_structured_marker_preferred_over_earlier_mention() {
    let trace = "1.000: tracing_mark_write: B|1|Startup\n\
                 1.100: I ReactNativeJS: waiting for app_ready\n\
                 1.900: tracing_mark_write: B|1|app_ready\n";
    let metrics = extract_metrics(trace, &config(&["app_ready"], vec![])).unwrap();

    assert_eq!(metrics.get("app_readyTimestamp"), Some(1.9));
}

#[test]
fn test_lifecycle_of_other_package_is_ignored() {
    let trace = "1.000: tracing_mark_write: B|1|Startup\n\
                 1.200: tracing_mark_write: B|2|performResume:com.other.app.MainActivity\n";
    let metrics = extract_metrics(trace, &config(&[], vec![])).unwrap();

    assert!(!metrics.contains("activityResumeTimestamp"));
}

#[test]
fn test_lifecycle_of_prefix_sharing_package_is_ignored() {
    let trace = "1.000: tracing_mark_write: B|1|Startup\n\
                 1.200: tracing_mark_write: B|2|performResume:com.example.appstore.MainActivity\n\
  com.example.appstore-9  (9) [002] ...1  2.500: tracing_mark_write: B|9|performCreate\n";
    let metrics = extract_metrics(trace, &config(&[], vec![])).unwrap();

    assert!(!metrics.contains("activityResumeTimestamp"));
    assert!(!metrics.contains("activityCreateTimestamp"));

    let own = "  com.example.app-5  (5) [002] ...1  3.500: tracing_mark_write: B|5|performCreate\n";
    let metrics = extract_metrics(own, &config(&[], vec![])).unwrap();
    assert_eq!(metrics.get("activityCreateTimestamp"), Some(3.5));
}

#[test]
fn test_mid_line_integer_is_not_a_timestamp() {
    let metrics = extract_metrics("I Foo: step 3: ready\n", &config(&["ready"], vec![])).unwrap();

    assert!(metrics.is_empty());
}

#[test]
fn test_malformed_input_yields_empty_set() {
    let extractor = TraceMetricExtractor::new(config(&["ready"], vec![bundle_pair()])).unwrap();

    assert!(extractor.extract("").is_empty());
    assert!(extractor.extract("no timestamps at all\nready\n").is_empty());

    let lossy = String::from_utf8_lossy(&[0xff, 0xfe, b'\n', 0x80]);
    assert!(extractor.extract(&lossy).is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let extractor =
        TraceMetricExtractor::new(config(&["app_js_initialized"], vec![bundle_pair()])).unwrap();

    assert_eq!(extractor.extract(ATRACE), extractor.extract(ATRACE));
}

#[test]
fn test_extractor_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TraceMetricExtractor>();

    let extractor = TraceMetricExtractor::new(config(&["app_js_initialized"], vec![])).unwrap();
    let expected = extractor.extract(ATRACE);
    let extractor = &extractor;

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(scope.spawn(move || extractor.extract(ATRACE)));
        }
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_blank_names_are_config_errors() {
    assert!(matches!(
        ExtractionConfig::new("  ", vec![], vec![]),
        Err(ConfigError::EmptyPackageId)
    ));
    assert!(matches!(
        ExtractionConfig::new(PACKAGE, vec!["ok".to_string(), "".to_string()], vec![]),
        Err(ConfigError::EmptyMarkerName(1))
    ));
    assert!(matches!(
        ExtractionConfig::new(PACKAGE, vec![], vec![PairedMarkerSpec::new("a", "b", "")]),
        Err(ConfigError::EmptyPairedName { .. })
    ));
}
