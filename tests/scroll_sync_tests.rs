//! Header scroll synchronization tests
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use timeline_engine::scroll_sync::{FrameScheduler, HeaderScrollSync, ScrollTarget, SyncState};
use timeline_engine::{EngineConfig, TimelineEngine};

const FRAME: Duration = Duration::from_millis(16);

struct RecordingHeader {
    writes: Vec<f64>,
}

impl ScrollTarget for RecordingHeader {
    fn set_scroll_left(&mut self, scroll_left: f64) {
        self.writes.push(scroll_left);
    }
}

// 1フレーム内の連続スクロールのテスト
// 10回のスクロールイベントでもヘッダーへの書き込みは1回で、最後の値になることを確認
#[tokio::test(start_paused = true)]
async fn test_burst_within_one_frame_writes_once() {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&writes);
    let scheduler = FrameScheduler::new(FRAME, move |left: f64| sink.lock().unwrap().push(left));

    for i in 0..10 {
        scheduler.push(f64::from(i) * 10.0);
        assert_eq!(scheduler.state(), SyncState::FramePending);
    }

    tokio::time::sleep(FRAME * 3).await;
    assert_eq!(*writes.lock().unwrap(), vec![90.0]);
    assert_eq!(scheduler.state(), SyncState::Idle);
    assert_eq!(scheduler.applied_count(), 1);
}

// フレームをまたぐスクロールのテスト
// フレームが発火した後のイベントは新しい書き込みになることを確認
#[tokio::test(start_paused = true)]
async fn test_separate_frames_write_separately() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let scheduler = FrameScheduler::new(FRAME, move |_: f64| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    scheduler.push(1.0);
    tokio::time::sleep(FRAME * 2).await;
    scheduler.push(2.0);
    scheduler.push(3.0);
    tokio::time::sleep(FRAME * 2).await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

// 再スケジュールのテスト
// フレーム発火前に届いたイベントで保留中のフレームが取り消されることを確認
#[tokio::test(start_paused = true)]
async fn test_event_before_frame_reschedules() {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&writes);
    let scheduler = FrameScheduler::new(FRAME, move |left: f64| sink.lock().unwrap().push(left));

    scheduler.push(5.0);
    tokio::time::sleep(Duration::from_millis(10)).await;
    scheduler.push(6.0);
    tokio::time::sleep(Duration::from_millis(10)).await;
    // The first frame would have fired at 16ms but was cancelled
    assert!(writes.lock().unwrap().is_empty());

    tokio::time::sleep(FRAME).await;
    assert_eq!(*writes.lock().unwrap(), vec![6.0]);
}

// キャンセルのテスト
// cancel後は何も書き込まれないことを確認
#[tokio::test(start_paused = true)]
async fn test_cancel_discards_pending_write() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let scheduler = FrameScheduler::new(FRAME, move |_: f64| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    scheduler.push(1.0);
    scheduler.cancel();
    assert_eq!(scheduler.state(), SyncState::Idle);
    tokio::time::sleep(FRAME * 2).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

// エンジン経由のヘッダー同期テスト
// 設定のフレーム間隔で同期されることを確認
#[tokio::test(start_paused = true)]
async fn test_engine_header_sync_uses_config_frame() {
    let engine = TimelineEngine::new(EngineConfig {
        frame_interval_ms: 40,
        ..Default::default()
    });
    let writes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&writes);
    let sync = engine.header_sync(move |left| sink.lock().unwrap().push(left));

    sync.push(120.0);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(writes.lock().unwrap().is_empty());
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(*writes.lock().unwrap(), vec![120.0]);
}

// 手動フレームループでの同期テスト
// 古いトークンでは書き込まれず、最新トークンで1回だけ書き込まれることを確認
#[test]
fn test_manual_frame_loop() {
    let mut sync = HeaderScrollSync::new();
    let mut header = RecordingHeader { writes: Vec::new() };

    let first = sync.on_body_scroll(10.0);
    let second = sync.on_body_scroll(20.0);
    assert_eq!(second.cancel, Some(first.schedule));

    assert!(!sync.on_frame(first.schedule, &mut header));
    assert!(sync.on_frame(second.schedule, &mut header));
    assert_eq!(header.writes, vec![20.0]);
    assert_eq!(sync.writes(), 1);
    assert_eq!(sync.state(), SyncState::Idle);
}
