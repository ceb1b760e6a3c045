use std::rc::Rc;
use std::time::Duration;

use serde_json::json;

use chart_host::api::{AdapterConfig, ChartLifecycleAdapter, LifecyclePhase};
use chart_host::core::{ChartOptions, ResolvedTheme};
use chart_host::engine::{EngineInstance, NullEngineFactory};
use chart_host::host::{
    BreakpointClassifier, BreakpointGrid, HeadlessContainer, HeadlessContainerSource, HostEnv,
    ManualResizeSource, ManualScheduler, ObservableValue,
};

struct Harness {
    scheduler: Rc<ManualScheduler>,
    resize_events: ManualResizeSource,
    dark_mode: ObservableValue<bool>,
    source: Rc<HeadlessContainerSource>,
    adapter: ChartLifecycleAdapter<NullEngineFactory>,
}

fn harness(height: u32, mounted: bool) -> Harness {
    let scheduler = Rc::new(ManualScheduler::new());
    let resize_events = ManualResizeSource::new();
    let dark_mode = ObservableValue::new(false);
    let source = if mounted {
        HeadlessContainerSource::mounted(HeadlessContainer::with_height(height))
    } else {
        HeadlessContainerSource::detached()
    };
    let env = HostEnv {
        scheduler: scheduler.clone(),
        resize_events: Rc::new(resize_events.clone()),
        dark_mode: dark_mode.clone(),
        sidebar_collapsed: ObservableValue::new(false),
        breakpoints: BreakpointClassifier::new(ObservableValue::new(1024), BreakpointGrid::default()),
    };
    let adapter = ChartLifecycleAdapter::new(
        source.clone(),
        NullEngineFactory::new(),
        env,
        AdapterConfig::new(),
    );
    Harness {
        scheduler,
        resize_events,
        dark_mode,
        source,
        adapter,
    }
}

fn series_options() -> ChartOptions {
    ChartOptions::from_value(json!({"series": [{"type": "line", "data": [7]}]}))
        .expect("options payload")
}

#[test]
fn teardown_is_idempotent() {
    let harness = harness(400, true);
    let engine = harness.adapter.instance().expect("engine");
    assert_eq!(harness.resize_events.listener_count(), 1);

    harness.adapter.teardown();
    assert_eq!(harness.adapter.phase(), LifecyclePhase::Disposed);
    assert!(engine.is_disposed());
    assert_eq!(harness.resize_events.listener_count(), 0);

    harness.adapter.teardown();
    assert_eq!(harness.adapter.phase(), LifecyclePhase::Disposed);
    drop(harness.adapter);
    assert_eq!(harness.resize_events.listener_count(), 0);
}

#[test]
fn teardown_after_theme_disposal_leaves_no_live_instance() {
    let harness = harness(400, true);
    harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));

    harness.dark_mode.set(true);
    let second = harness.adapter.factory().latest().expect("second engine");
    assert_eq!(second.theme(), ResolvedTheme::Dark);

    harness.adapter.teardown();
    assert!(second.is_disposed());
    assert_eq!(harness.adapter.phase(), LifecyclePhase::Disposed);
}

#[test]
fn pending_dispatch_after_unmount_is_a_no_op() {
    let harness = harness(400, true);
    harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));
    let engine = harness.adapter.factory().latest().expect("engine");
    assert_eq!(engine.apply_count(), 1);

    harness.adapter.apply_options(series_options());
    drop(harness.adapter);

    harness.scheduler.advance(Duration::from_millis(60));
    assert_eq!(engine.apply_count(), 1);
    assert!(engine.is_disposed());
}

#[test]
fn calls_after_teardown_are_no_ops() {
    let harness = harness(400, true);
    harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));
    let cached = harness.adapter.cached_options();

    harness.adapter.teardown();

    let replacement =
        ChartOptions::from_value(json!({"legend": {"show": true}})).expect("payload");
    let completion = harness.adapter.apply_options(replacement);
    harness.scheduler.advance(Duration::from_millis(120));

    assert!(!completion.is_resolved());
    assert_eq!(harness.adapter.cached_options(), cached);
    assert!(harness.adapter.instance().is_none());
    harness.adapter.force_resize();
    assert_eq!(harness.adapter.factory().created_count(), 1);
}

#[test]
fn instance_accessor_lazily_initializes_once() {
    let harness = harness(400, true);
    assert_eq!(harness.adapter.phase(), LifecyclePhase::Uninitialized);

    let first = harness.adapter.instance().expect("engine");
    assert_eq!(harness.adapter.phase(), LifecyclePhase::Ready);
    let second = harness.adapter.instance().expect("engine");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(harness.adapter.factory().created_count(), 1);
}

#[test]
fn instance_accessor_returns_none_while_detached() {
    let harness = harness(0, false);
    assert!(harness.adapter.instance().is_none());
    assert_eq!(harness.adapter.factory().created_count(), 0);

    harness.source.mount(HeadlessContainer::with_height(300));
    assert!(harness.adapter.instance().is_some());
}

#[test]
fn unmount_during_the_retry_loop_is_quiet() {
    let harness = harness(0, true);
    harness.adapter.apply_options(series_options());
    harness.scheduler.advance(Duration::from_millis(30));

    drop(harness.adapter);
    harness.scheduler.advance(Duration::from_millis(300));
    assert_eq!(harness.scheduler.pending(), 0);
}
