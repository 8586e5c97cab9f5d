//! Integration tests for the clock ticker, run on a paused tokio clock.

use futsal_console::logic::ClockState;
use futsal_console::ClockTicker;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn ticks_once_a_second_and_rings_at_regulation_time() {
    let mut ticker = ClockTicker::new(600);
    assert!(ticker.start());

    sleep(Duration::from_millis(599_500)).await;
    let before = ticker.snapshot();
    assert_eq!(before.seconds, 599);
    assert!(!before.alarmed);
    assert!(!before.time_up);

    sleep(Duration::from_secs(1)).await;
    let after = ticker.snapshot();
    assert_eq!(after.seconds, 600);
    assert_eq!(after.display, "10:00");
    assert!(after.alarmed);
    assert!(after.time_up);
    assert_eq!(after.state, ClockState::Running);
}

#[tokio::test(start_paused = true)]
async fn pause_stops_the_count_and_start_resumes_it() {
    let mut ticker = ClockTicker::new(600);
    ticker.start();
    sleep(Duration::from_millis(5_500)).await;
    assert!(ticker.pause());
    assert_eq!(ticker.snapshot().seconds, 5);

    sleep(Duration::from_secs(10)).await;
    let paused = ticker.snapshot();
    assert_eq!(paused.seconds, 5);
    assert_eq!(paused.state, ClockState::Paused);

    assert!(ticker.start());
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(ticker.snapshot().seconds, 7);
}

#[tokio::test(start_paused = true)]
async fn second_start_does_not_double_the_speed() {
    let mut ticker = ClockTicker::new(600);
    assert!(ticker.start());
    assert!(!ticker.start());
    sleep(Duration::from_millis(4_500)).await;
    assert_eq!(ticker.snapshot().seconds, 4);
}

#[tokio::test(start_paused = true)]
async fn reset_goes_back_to_zero_and_stays_there() {
    let mut ticker = ClockTicker::new(600);
    ticker.start();
    sleep(Duration::from_millis(3_500)).await;
    assert!(ticker.reset());
    sleep(Duration::from_secs(5)).await;
    let snapshot = ticker.snapshot();
    assert_eq!(snapshot.seconds, 0);
    assert_eq!(snapshot.display, "00:00");
    assert_eq!(snapshot.state, ClockState::NotStarted);
}

#[tokio::test(start_paused = true)]
async fn ended_clock_cannot_restart() {
    let mut ticker = ClockTicker::new(600);
    ticker.start();
    sleep(Duration::from_millis(2_500)).await;
    ticker.end();
    assert!(!ticker.start());
    assert!(!ticker.reset());
    sleep(Duration::from_secs(5)).await;
    let snapshot = ticker.snapshot();
    assert_eq!(snapshot.seconds, 2);
    assert_eq!(snapshot.state, ClockState::Ended);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_tick() {
    let mut ticker = ClockTicker::new(600);
    let rx = ticker.subscribe();
    ticker.start();
    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(rx.borrow().seconds, 3);
    assert_eq!(rx.borrow().state, ClockState::Running);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_ticker_stops_the_task() {
    let mut ticker = ClockTicker::new(600);
    let rx = ticker.subscribe();
    ticker.start();
    sleep(Duration::from_millis(1_500)).await;
    drop(ticker);
    sleep(Duration::from_secs(5)).await;
    assert_eq!(rx.borrow().seconds, 1);
}

#[tokio::test(start_paused = true)]
async fn new_limit_applies_to_the_running_clock() {
    let mut ticker = ClockTicker::new(600);
    ticker.start();
    ticker.set_limit(3);
    sleep(Duration::from_millis(3_500)).await;
    let snapshot = ticker.snapshot();
    assert!(snapshot.alarmed);
    assert!(snapshot.time_up);
    assert_eq!(ticker.limit_seconds(), 3);
}
