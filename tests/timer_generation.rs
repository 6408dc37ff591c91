// tests/timer_generation.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use taskboard::engine::{DashboardEvent, RefreshTimer, TimerTarget};

const PERIOD: Duration = Duration::from_secs(8);

fn drain(rx: &mut mpsc::Receiver<DashboardEvent>) -> Vec<DashboardEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn two_consecutive_starts_leave_one_timer() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut timer = RefreshTimer::new(TimerTarget::Table, PERIOD, tx);

    timer.start();
    timer.start();
    assert_eq!(timer.generation(), 2);

    sleep(PERIOD + Duration::from_millis(1)).await;
    assert_eq!(
        drain(&mut rx),
        vec![DashboardEvent::Tick {
            target: TimerTarget::Table,
            generation: 2
        }]
    );

    sleep(PERIOD * 2).await;
    assert_eq!(drain(&mut rx).len(), 2, "one tick per period");
}

#[tokio::test(start_paused = true)]
async fn stale_generations_are_rejected() {
    let (tx, _rx) = mpsc::channel(16);
    let mut timer = RefreshTimer::new(TimerTarget::Table, PERIOD, tx);

    timer.start();
    assert!(timer.accepts(1));

    timer.start();
    assert!(!timer.accepts(1));
    assert!(timer.accepts(2));

    timer.stop();
    assert!(!timer.is_active());
    assert!(!timer.accepts(2));
}

#[tokio::test(start_paused = true)]
async fn stopped_timer_sends_nothing() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut timer = RefreshTimer::new(TimerTarget::Statistics, PERIOD, tx);
    let activity = timer.activity();

    timer.start();
    assert!(activity.is_active());
    timer.stop();
    assert!(!activity.is_active());

    sleep(PERIOD * 3).await;
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn immediate_first_tick() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut timer =
        RefreshTimer::new(TimerTarget::Statistics, PERIOD, tx).with_immediate_first_tick();

    timer.start();
    sleep(Duration::from_millis(1)).await;
    assert_eq!(
        drain(&mut rx),
        vec![DashboardEvent::Tick {
            target: TimerTarget::Statistics,
            generation: 1
        }]
    );

    sleep(PERIOD).await;
    assert_eq!(drain(&mut rx).len(), 1);
}
