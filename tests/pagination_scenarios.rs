// tests/pagination_scenarios.rs
//! End-to-end pagination behavior through the public controller API,
//! driven by in-memory page sources.

use catalog_scroll::{
    CatalogController, CatalogEvent, DispatchOutcome, FetchError, Item, PageIndex, PageLimit,
    PageResult, PageSource, RejectReason, SchedulerPolicy, ScrollMetrics,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

fn policy(limit: u32) -> SchedulerPolicy {
    SchedulerPolicy {
        page_limit: PageLimit::new(limit).unwrap(),
        ..SchedulerPolicy::default()
    }
}

fn names(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.name.clone()).collect()
}

/// Serves pages from a map; indices not in the map fail with a transport error.
struct MapSource {
    pages: HashMap<u32, Vec<String>>,
    requested: Mutex<Vec<u32>>,
}

impl MapSource {
    fn new(pages: &[(u32, &[&str])]) -> Arc<Self> {
        Self::from_pages(
            pages
                .iter()
                .map(|(i, names)| (*i, names.iter().map(|n| n.to_string()).collect()))
                .collect(),
        )
    }

    fn from_pages(pages: HashMap<u32, Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            pages,
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().clone()
    }
}

#[async_trait::async_trait]
impl PageSource for MapSource {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        self.requested.lock().push(page_index.get());
        match self.pages.get(&page_index.get()) {
            Some(names) => Ok(PageResult::new(
                "Catalog",
                names.iter().map(|n| Item::new(n.clone())).collect(),
            )),
            None => Err(FetchError::transport(page_index, "connection refused")),
        }
    }
}

#[tokio::test]
async fn three_page_catalog_loads_in_order_then_stops() {
    let source = MapSource::new(&[(1, &["A", "B"]), (2, &["C", "D"]), (3, &["E", "F"])]);
    let controller = CatalogController::new(source.clone(), policy(3));

    controller.start().await;
    controller.on_proximity().await;
    controller.on_proximity().await;

    let snapshot = controller.snapshot();
    assert_eq!(names(&snapshot.items), vec!["A", "B", "C", "D", "E", "F"]);
    assert!(!snapshot.has_more);

    let outcome = controller.on_proximity().await;
    assert_eq!(outcome, DispatchOutcome::Rejected(RejectReason::Exhausted));
    assert_eq!(source.requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn n_pages_of_k_items_concatenate() {
    const PAGES: u32 = 6;
    const PER_PAGE: usize = 4;
    let pages: HashMap<u32, Vec<String>> = (1..=PAGES)
        .map(|p| (p, (0..PER_PAGE).map(|i| format!("p{}-{}", p, i)).collect()))
        .collect();
    let source = MapSource::from_pages(pages.clone());
    let controller = CatalogController::new(source, policy(PAGES));

    controller.start().await;
    while controller.on_proximity().await.was_dispatched() {}

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.items.len(), PAGES as usize * PER_PAGE);
    let expected: Vec<String> = (1..=PAGES).flat_map(|p| pages[&p].clone()).collect();
    assert_eq!(names(&snapshot.items), expected);
}

#[tokio::test]
async fn failed_second_page_is_skipped() {
    let source = MapSource::new(&[(1, &["A", "B"]), (3, &["E"])]);
    let controller = CatalogController::new(source.clone(), policy(3));

    controller.start().await;
    let outcome = controller.on_proximity().await;

    match outcome {
        DispatchOutcome::Failed { page_index, error } => {
            assert_eq!(page_index.get(), 2);
            assert_eq!(error.page_index.get(), 2);
        }
        other => panic!("expected a failed dispatch, got {:?}", other),
    }

    let snapshot = controller.snapshot();
    assert_eq!(names(&snapshot.items), vec!["A", "B"]);
    assert!(!snapshot.in_flight);
    assert!(snapshot.has_more);
    assert_eq!(snapshot.next_page_index.get(), 3);

    controller.on_proximity().await;
    assert_eq!(names(&controller.snapshot().items), vec!["A", "B", "E"]);
    assert_eq!(source.requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn cursor_counts_every_dispatch() {
    // Nothing but failures: the cursor still moves once per dispatch.
    let source = MapSource::new(&[]);
    let controller = CatalogController::new(source.clone(), policy(10));

    controller.start().await;
    for _ in 0..4 {
        controller.on_proximity().await;
    }

    assert_eq!(controller.snapshot().next_page_index.get(), 1 + 5);
    assert_eq!(source.requested(), vec![1, 2, 3, 4, 5]);
}

/// Holds every fetch until the test releases a permit.
struct GatedSource {
    gate: Semaphore,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl PageSource for GatedSource {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| FetchError::transport(page_index, e.to_string()))?;
        Ok(PageResult::new("Gated", vec![Item::new(format!("item {}", page_index))]))
    }
}

#[tokio::test]
async fn trigger_during_flight_makes_no_call() {
    let source = Arc::new(GatedSource {
        gate: Semaphore::new(0),
        calls: AtomicUsize::new(0),
    });
    let controller = Arc::new(CatalogController::new(source.clone(), policy(3)));

    let initial = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.start().await })
    };
    while source.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    assert!(controller.snapshot().in_flight);
    assert_eq!(
        controller.on_proximity().await,
        DispatchOutcome::Rejected(RejectReason::InFlight)
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    source.gate.add_permits(1);
    let outcome = initial.await.unwrap();
    assert!(matches!(outcome, DispatchOutcome::Merged { .. }));
    assert!(!controller.snapshot().in_flight);
}

/// Records how many fetches overlap.
struct OverlapProbe {
    active: AtomicUsize,
    max_active: AtomicUsize,
    requested: Mutex<Vec<u32>>,
}

#[async_trait::async_trait]
impl PageSource for OverlapProbe {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        self.requested.lock().push(page_index.get());
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(PageResult::new("Probe", vec![Item::new(page_index.to_string())]))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_triggers_never_overlap() {
    let source = Arc::new(OverlapProbe {
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
        requested: Mutex::new(Vec::new()),
    });
    let controller = Arc::new(CatalogController::new(source.clone(), policy(50)));
    controller.start().await;

    for _ in 0..10 {
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let controller = Arc::clone(&controller);
            tasks.spawn(async move { controller.on_proximity().await });
        }
        while tasks.join_next().await.is_some() {}
    }

    assert_eq!(source.max_active.load(Ordering::SeqCst), 1);

    let requested = source.requested.lock().clone();
    let expected: Vec<u32> = (1..=requested.len() as u32).collect();
    assert_eq!(requested, expected);

    // Merge order follows request order.
    let merged: Vec<String> = names(&controller.snapshot().items);
    let expected_names: Vec<String> = expected.iter().map(|i| i.to_string()).collect();
    assert_eq!(merged, expected_names);
}

#[tokio::test]
async fn has_more_only_ever_falls() {
    let source = MapSource::new(&[(1, &["A"]), (2, &[]), (3, &["C"])]);
    let controller = CatalogController::new(source, policy(3));
    let mut history = vec![controller.snapshot().has_more];

    controller.start().await;
    history.push(controller.snapshot().has_more);
    for _ in 0..3 {
        controller.on_proximity().await;
        history.push(controller.snapshot().has_more);
    }

    assert_eq!(history, vec![true, true, true, false, false]);
}

#[tokio::test]
async fn failed_last_page_never_requests_past_limit() {
    let source = MapSource::new(&[(1, &["A", "B"]), (2, &["C", "D"])]);
    let controller = CatalogController::new(source.clone(), policy(3));

    controller.start().await;
    for _ in 0..5 {
        controller.on_proximity().await;
    }

    assert_eq!(source.requested(), vec![1, 2, 3]);
    let snapshot = controller.snapshot();
    assert_eq!(names(&snapshot.items), vec!["A", "B", "C", "D"]);
    assert!(!snapshot.has_more);
    assert_eq!(
        controller.on_proximity().await,
        DispatchOutcome::Rejected(RejectReason::Exhausted)
    );
}

/// Never answers for page 1; serves every later page immediately.
struct StallsOnFirstPage;

#[async_trait::async_trait]
impl PageSource for StallsOnFirstPage {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        if page_index == PageIndex::FIRST {
            std::future::pending::<()>().await;
        }
        Ok(PageResult::new("Stall", vec![Item::new(page_index.to_string())]))
    }
}

#[tokio::test]
async fn abandoned_fetch_does_not_block_later_triggers() {
    let controller = CatalogController::new(Arc::new(StallsOnFirstPage), policy(3));
    let mut signals = controller.detector().subscribe();

    let started = tokio::time::timeout(Duration::from_millis(10), controller.start()).await;
    assert!(started.is_err());
    assert!(!controller.snapshot().in_flight);

    let metrics = ScrollMetrics {
        scroll_offset: 0,
        viewport_height: 1,
        last_item_offset: Some(0),
    };
    assert!(controller.detector().observe(metrics));

    let outcomes = controller.drain_signals(&mut signals).await;
    assert_eq!(
        outcomes,
        vec![DispatchOutcome::Merged {
            page_index: PageIndex::new(2).unwrap(),
            items_added: 1,
        }]
    );
    assert_eq!(names(&controller.snapshot().items), vec!["2"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn loading_events_alternate_under_racing_triggers() {
    const PAGES: u32 = 8;
    let source = Arc::new(OverlapProbe {
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
        requested: Mutex::new(Vec::new()),
    });
    let controller = Arc::new(CatalogController::new(source, policy(PAGES)));
    let mut events = controller.subscribe_events();

    controller.start().await;
    while controller.snapshot().has_more {
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..4 {
            let controller = Arc::clone(&controller);
            tasks.spawn(async move { controller.on_proximity().await });
        }
        while tasks.join_next().await.is_some() {}
    }

    let mut loading = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let CatalogEvent::LoadingChanged { in_flight } = event {
            loading.push(in_flight);
        }
    }
    let expected: Vec<bool> = (0..PAGES).flat_map(|_| [true, false]).collect();
    assert_eq!(loading, expected);
}
