use std::sync::{Arc, Mutex};
use std::time::Duration;

use equity_pl_report::{DebounceConfig, Debouncer, ReportError};
use tokio::time::sleep;

fn collector() -> (Arc<Mutex<Vec<u32>>>, impl FnMut(u32) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = Arc::clone(&seen);
        move |value: u32| seen.lock().expect("lock").push(value)
    };
    (seen, sink)
}

fn values(seen: &Arc<Mutex<Vec<u32>>>) -> Vec<u32> {
    seen.lock().expect("lock").clone()
}

#[tokio::test(start_paused = true)]
async fn burst_emits_last_value_once() {
    let (seen, sink) = collector();
    let window = DebounceConfig::default().selection();
    assert_eq!(window, Duration::from_millis(200));
    let debouncer = Debouncer::spawn(window, sink);

    for value in 1..=5 {
        debouncer.push(value).expect("push");
        sleep(Duration::from_millis(50)).await;
    }
    assert!(values(&seen).is_empty());

    sleep(Duration::from_millis(300)).await;
    assert_eq!(values(&seen), [5]);
}

#[tokio::test(start_paused = true)]
async fn separated_values_each_emit() {
    let (seen, sink) = collector();
    let window = DebounceConfig::default().filter();
    let debouncer = Debouncer::spawn(window, sink);

    debouncer.push(1).expect("push");
    sleep(Duration::from_millis(400)).await;
    debouncer.push(2).expect("push");
    sleep(Duration::from_millis(400)).await;

    assert_eq!(values(&seen), [1, 2]);
}

#[tokio::test(start_paused = true)]
async fn cancel_discards_pending_value() {
    let (seen, sink) = collector();
    let mut debouncer = Debouncer::spawn(Duration::from_millis(200), sink);

    debouncer.push(7).expect("push");
    debouncer.cancel();
    sleep(Duration::from_millis(500)).await;

    assert!(values(&seen).is_empty());
    assert!(matches!(debouncer.push(8), Err(ReportError::DebouncerClosed)));
}

#[tokio::test(start_paused = true)]
async fn drop_discards_pending_value() {
    let (seen, sink) = collector();
    let debouncer = Debouncer::spawn(Duration::from_millis(200), sink);
    debouncer.push(3).expect("push");
    drop(debouncer);
    sleep(Duration::from_millis(500)).await;
    assert!(values(&seen).is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_flushes_pending_value() {
    let (seen, sink) = collector();
    let debouncer = Debouncer::spawn(Duration::from_millis(200), sink);

    debouncer.push(9).expect("push");
    debouncer.shutdown().await;

    assert_eq!(values(&seen), [9]);
}
