use std::rc::Rc;
use std::time::Duration;

use serde_json::json;

use chart_host::api::{AdapterConfig, ChartLifecycleAdapter};
use chart_host::core::{ChartOptions, ThemeSelector};
use chart_host::engine::NullEngineFactory;
use chart_host::host::{
    BreakpointClassifier, BreakpointGrid, HeadlessContainer, HeadlessContainerSource, HostEnv,
    ManualResizeSource, ManualScheduler, ObservableValue,
};

struct Harness {
    scheduler: Rc<ManualScheduler>,
    element: Rc<HeadlessContainer>,
    adapter: ChartLifecycleAdapter<NullEngineFactory>,
}

fn harness(height: u32) -> Harness {
    let scheduler = Rc::new(ManualScheduler::new());
    let element = HeadlessContainer::with_height(height);
    let source = HeadlessContainerSource::mounted(Rc::clone(&element));
    let env = HostEnv {
        scheduler: scheduler.clone(),
        resize_events: Rc::new(ManualResizeSource::new()),
        dark_mode: ObservableValue::new(false),
        sidebar_collapsed: ObservableValue::new(false),
        breakpoints: BreakpointClassifier::new(ObservableValue::new(1024), BreakpointGrid::default()),
    };
    let adapter = ChartLifecycleAdapter::new(
        source.clone(),
        NullEngineFactory::new(),
        env,
        AdapterConfig::new().with_theme(ThemeSelector::Default),
    );
    Harness {
        scheduler,
        element,
        adapter,
    }
}

fn series_options() -> ChartOptions {
    ChartOptions::from_value(json!({
        "series": [{"type": "line", "data": [1, 2, 3]}],
        "xAxis": {"type": "category"}
    }))
    .expect("options payload")
}

#[test]
fn apply_options_dispatches_after_the_tick_delay() {
    let harness = harness(400);
    let completion = harness.adapter.apply_options(series_options());

    assert_eq!(harness.adapter.factory().created_count(), 0);
    assert!(!completion.is_resolved());

    harness.scheduler.advance(Duration::from_millis(30));

    let engine = harness.adapter.factory().latest().expect("engine created");
    assert_eq!(engine.apply_count(), 1);
    assert_eq!(engine.clear_count(), 1);
    assert!(completion.is_resolved());

    let payload = engine.last_applied().expect("payload dispatched");
    assert_eq!(
        payload.get("series"),
        Some(&json!([{"type": "line", "data": [1, 2, 3]}]))
    );
    assert!(payload.contains("toolbox"));
    assert!(!payload.contains("backgroundColor"));
}

#[test]
fn apply_preserving_the_previous_drawing_skips_clear() {
    let harness = harness(400);
    harness
        .adapter
        .apply_options_with(series_options(), false);
    harness.scheduler.advance(Duration::from_millis(30));

    let engine = harness.adapter.factory().latest().expect("engine created");
    assert_eq!(engine.apply_count(), 1);
    assert_eq!(engine.clear_count(), 0);
}

#[test]
fn zero_height_defers_dispatch_until_layout_settles() {
    let harness = harness(0);
    let completion = harness.adapter.apply_options(series_options());

    harness.scheduler.advance(Duration::from_millis(30));
    let engine = harness.adapter.factory().latest().expect("engine created");
    assert_eq!(engine.apply_count(), 0);
    assert!(!completion.is_resolved());

    harness.element.set_height(420);
    harness.scheduler.advance(Duration::from_millis(30));

    assert_eq!(engine.apply_count(), 1);
    assert!(completion.is_resolved());
    let payload = engine.last_applied().expect("payload dispatched");
    assert!(payload.contains("toolbox"));
}

#[test]
fn zero_height_start_may_dispatch_twice_once_settled() {
    let harness = harness(0);
    harness.adapter.apply_options(series_options());

    harness.scheduler.advance(Duration::from_millis(30));
    harness.element.set_height(420);
    harness.scheduler.advance(Duration::from_millis(60));

    // Retry path and tick path both complete after layout settles.
    let engine = harness.adapter.factory().latest().expect("engine created");
    assert_eq!(engine.apply_count(), 2);
}

#[test]
fn unresolved_container_defers_silently() {
    let scheduler = Rc::new(ManualScheduler::new());
    let source = HeadlessContainerSource::detached();
    let env = HostEnv {
        scheduler: scheduler.clone(),
        resize_events: Rc::new(ManualResizeSource::new()),
        dark_mode: ObservableValue::new(false),
        sidebar_collapsed: ObservableValue::new(false),
        breakpoints: BreakpointClassifier::new(ObservableValue::new(1024), BreakpointGrid::default()),
    };
    let adapter = ChartLifecycleAdapter::new(
        source.clone(),
        NullEngineFactory::new(),
        env,
        AdapterConfig::new(),
    );

    let completion = adapter.apply_options(series_options());
    scheduler.advance(Duration::from_millis(120));
    assert_eq!(adapter.factory().created_count(), 0);
    assert!(!completion.is_resolved());

    source.mount(HeadlessContainer::with_height(300));
    let completion = adapter.apply_options(series_options());
    scheduler.advance(Duration::from_millis(30));
    assert_eq!(adapter.factory().created_count(), 1);
    assert!(completion.is_resolved());
}

#[test]
fn second_apply_fully_replaces_the_cached_payload() {
    let harness = harness(400);
    harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));

    let replacement = ChartOptions::from_value(json!({"legend": {"show": true}}))
        .expect("replacement payload");
    harness.adapter.apply_options(replacement.clone());
    harness.scheduler.advance(Duration::from_millis(30));

    assert_eq!(harness.adapter.cached_options(), replacement);
    let engine = harness.adapter.factory().latest().expect("engine created");
    let payload = engine.last_applied().expect("payload dispatched");
    assert!(payload.contains("legend"));
    assert!(!payload.contains("series"));
    assert!(!payload.contains("xAxis"));
}

#[test]
fn failed_engine_init_degrades_to_no_dispatch() {
    let harness = harness(400);
    harness.adapter.factory().fail_next_init();

    let completion = harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));
    assert_eq!(harness.adapter.factory().created_count(), 0);
    assert!(!completion.is_resolved());

    let completion = harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));
    assert_eq!(harness.adapter.factory().created_count(), 1);
    assert!(completion.is_resolved());
}

#[test]
fn dispatch_reads_the_cache_at_fire_time() {
    let harness = harness(400);
    harness.adapter.apply_options(series_options());
    let replacement =
        ChartOptions::from_value(json!({"legend": {"show": false}})).expect("payload");
    harness.adapter.apply_options(replacement);

    harness.scheduler.advance(Duration::from_millis(30));

    // Both pending dispatches observe the latest cache.
    let engine = harness.adapter.factory().latest().expect("engine created");
    assert_eq!(engine.apply_count(), 2);
    for payload in engine.applied() {
        assert!(payload.contains("legend"));
        assert!(!payload.contains("series"));
    }
}
