//! Tests for subscriptions and the scripted provider

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::unbounded;
use sensor_dashboard::error::{SensorError, SensorSource};
use sensor_dashboard::sim::{ScriptedAvailability, ScriptedStream};
use sensor_dashboard::stream::{StreamEvent, StreamProvider, Subscription};

#[test]
fn test_drop_runs_cancel_once() {
    let cancelled = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = unbounded::<StreamEvent<u32>>();

    let counter = Arc::clone(&cancelled);
    let subscription = Subscription::new(rx, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    tx.send(StreamEvent::Update(7)).expect("receiver alive");
    assert_eq!(subscription.pending(), 1);
    assert_eq!(subscription.try_next(), Some(StreamEvent::Update(7)));
    assert_eq!(subscription.try_next(), None);

    subscription.cancel();
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
}

#[test]
fn test_drain_preserves_arrival_order() {
    let (tx, rx) = unbounded();
    let subscription = Subscription::new(rx, || {});
    for i in 0..4 {
        tx.send(StreamEvent::Update(i)).expect("receiver alive");
    }
    tx.send(StreamEvent::Error(SensorError::UserPausedTracking))
        .expect("receiver alive");

    let events: Vec<StreamEvent<i32>> = subscription.drain().collect();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0], StreamEvent::Update(0));
    assert_eq!(events[3], StreamEvent::Update(3));
    assert!(matches!(events[4], StreamEvent::Error(_)));
    assert_eq!(subscription.pending(), 0);
}

#[test]
fn test_scripted_stream_broadcasts_to_live_subscriptions() {
    let stream = ScriptedStream::<u32>::new(SensorSource::Accelerometer);
    let first = stream.subscribe().expect("available");
    let second = stream.subscribe().expect("available");
    assert_eq!(stream.active_subscriptions(), 2);

    stream.emit(1);
    drop(first);
    assert_eq!(stream.active_subscriptions(), 1);
    stream.emit(2);

    let received: Vec<StreamEvent<u32>> = second.drain().collect();
    assert_eq!(received, vec![StreamEvent::Update(1), StreamEvent::Update(2)]);
    assert_eq!(stream.total_subscriptions(), 2);
}

#[test]
fn test_scripted_stream_availability() {
    let stream = ScriptedStream::<u32>::with_availability(
        SensorSource::Gyroscope,
        ScriptedAvailability::Unsupported,
    );
    assert_eq!(
        stream.subscribe().err(),
        Some(SensorError::unsupported(SensorSource::Gyroscope))
    );

    stream.set_availability(ScriptedAvailability::PermissionDenied);
    assert_eq!(
        stream.subscribe().err(),
        Some(SensorError::permission_denied(SensorSource::Gyroscope))
    );

    stream.set_availability(ScriptedAvailability::Available);
    assert!(stream.subscribe().is_ok());
    assert_eq!(stream.total_subscriptions(), 1);
}
