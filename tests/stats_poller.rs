// tests/stats_poller.rs

use std::time::Duration;

use tokio::sync::mpsc;

use taskboard::engine::{RefreshTimer, TimerTarget};
use taskboard::stats::StatisticsPoller;
use taskboard::status::GroupStatistics;
use taskboard_test_utils::FakeBackend;

fn poller() -> (StatisticsPoller, mpsc::Receiver<taskboard::engine::DashboardEvent>) {
    let (tx, rx) = mpsc::channel(16);
    let timer = RefreshTimer::new(TimerTarget::Statistics, Duration::from_secs(8), tx);
    (StatisticsPoller::new(timer), rx)
}

#[tokio::test(start_paused = true)]
async fn failed_poll_keeps_last_values() {
    let stats = GroupStatistics {
        loaded: 10,
        in_progress: 2,
        completed: 5,
        failed: 1,
        remaining: 2,
    };
    let backend = FakeBackend::new().with_statistics(stats);
    let (mut poller, _rx) = poller();
    assert!(poller.current().is_none());

    assert!(poller.poll(&backend).await);
    assert_eq!(poller.current(), Some(&stats));
    let first_update = poller.updated_at();

    backend.fail_statistics(true);
    tokio::time::advance(Duration::from_secs(8)).await;
    assert!(!poller.poll(&backend).await);
    assert_eq!(poller.current(), Some(&stats));
    assert_eq!(poller.updated_at(), first_update);
    assert_eq!(backend.statistics_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn first_tick_arrives_immediately() {
    let (mut poller, mut rx) = poller();
    poller.start();

    let event = tokio::time::timeout(Duration::from_millis(10), rx.recv())
        .await
        .expect("tick within 10ms")
        .expect("channel open");
    assert_eq!(
        event,
        taskboard::engine::DashboardEvent::Tick {
            target: TimerTarget::Statistics,
            generation: 1
        }
    );
    assert!(poller.accepts_tick(1));

    poller.stop();
    assert!(!poller.accepts_tick(1));
}
