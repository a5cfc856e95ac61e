use super::*;
use crate::landmarks::{Landmark, Point2};
use crate::test_support::{hand, HandPose};
use std::time::{Duration, Instant};

use crate::recognition::GestureLabel::{ClosedSideways, Love, None_, Open, Point, Unknown, Victory};

const CLOSED: GestureLabel = GestureLabel::Closed;

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

/// Feed `(ms, label, wrist_x)` frames and collect `(ms, event)` pairs
fn run(
    tracker: &mut CompositeTracker,
    base: Instant,
    frames: &[(u64, GestureLabel, f32)],
) -> Vec<(u64, GestureEvent)> {
    frames
        .iter()
        .filter_map(|(ms, label, x)| {
            let wrist = (*label != None_).then_some(Point2 { x: *x, y: 0.9 });
            tracker
                .update(*label, wrist, at(base, *ms))
                .map(|event| (*ms, event))
        })
        .collect()
}

/// `label` every 100ms over `[from, to]` with a fixed wrist
fn hold(label: GestureLabel, from: u64, to: u64) -> Vec<(u64, GestureLabel, f32)> {
    (from..=to).step_by(100).map(|ms| (ms, label, 0.5)).collect()
}

#[test]
fn test_debounce_suppresses_short_poses() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = hold(Point, 0, 300);
    frames.extend(hold(Victory, 400, 700));

    assert!(run(&mut tracker, base, &frames).is_empty());
}

#[test]
fn test_debounce_confirms_once() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();

    let events = run(&mut tracker, base, &hold(Point, 0, 500));
    assert_eq!(
        events,
        vec![(400, GestureEvent::Simple(SimpleGesture::Point))]
    );
}

#[test]
fn test_held_pose_is_not_repeated_until_hand_lost() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = hold(Love, 0, 2000);
    frames.push((2100, None_, 0.0));
    frames.extend(hold(Love, 2200, 2600));

    let events = run(&mut tracker, base, &frames);
    assert_eq!(
        events,
        vec![
            (400, GestureEvent::Simple(SimpleGesture::Love)),
            (2600, GestureEvent::Simple(SimpleGesture::Love)),
        ]
    );
}

#[test]
fn test_closed_timeout_falls_back_to_simple() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();

    let events = run(&mut tracker, base, &hold(CLOSED, 0, 1100));
    assert_eq!(
        events,
        vec![(1100, GestureEvent::Simple(SimpleGesture::Closed))]
    );
    assert_eq!(tracker.mode(), TrackingMode::Idle);

    // Back in idle: an open hand starts fresh tracking instead of opening the panel
    assert_eq!(tracker.update(Open, Some(Point2 { x: 0.5, y: 0.9 }), at(base, 1200)), None);
    assert_eq!(tracker.mode(), TrackingMode::TrackingOpen);

    let events = run(&mut tracker, base, &hold(Open, 1300, 2300));
    assert!(events.is_empty());
    assert_eq!(tracker.mode(), TrackingMode::Idle);
}

#[test]
fn test_timeout_wins_over_follow_up() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames = vec![(0, CLOSED, 0.5), (1200, Open, 0.5)];

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(1200, GestureEvent::Simple(SimpleGesture::Closed))]
    );
}

#[test]
fn test_closed_then_open_opens_panel() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = hold(CLOSED, 0, 200);
    frames.push((300, Open, 0.5));

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(300, GestureEvent::Composite(CompositeGesture::OpenPanel))]
    );
    assert_eq!(tracker.mode(), TrackingMode::Idle);
}

#[test]
fn test_drag_past_threshold_toggles_invisible() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames = vec![(0, CLOSED, 0.5), (100, CLOSED, 0.6), (200, CLOSED, 0.25)];

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(200, GestureEvent::Composite(CompositeGesture::ToggleInvisible))]
    );
}

#[test]
fn test_short_drag_falls_through_to_timeout() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames: Vec<_> = (0..=11u64)
        .map(|i| (i * 100, CLOSED, 0.5 + 0.1 * (i.min(5) as f32) / 5.0))
        .collect();

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(1100, GestureEvent::Simple(SimpleGesture::Closed))]
    );
}

#[test]
fn test_ambiguous_interruption_cancels_silently() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames = vec![
        (0, CLOSED, 0.5),
        (100, Unknown, 0.5),
        (200, Open, 0.5),
        (300, Unknown, 0.5),
        (400, CLOSED, 0.9),
    ];

    assert!(run(&mut tracker, base, &frames).is_empty());
    assert_eq!(tracker.mode(), TrackingMode::TrackingClosed);
}

#[test]
fn test_hand_lost_after_timeout_is_silent() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames = vec![(0, CLOSED, 0.5), (1500, None_, 0.0)];

    assert!(run(&mut tracker, base, &frames).is_empty());
    assert_eq!(tracker.mode(), TrackingMode::Idle);
}

#[test]
fn test_open_then_sideways_fist_grabs() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = hold(Open, 0, 300);
    frames.push((400, ClosedSideways, 0.5));

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(400, GestureEvent::Composite(CompositeGesture::Grab))]
    );
}

#[test]
fn test_open_timeout_is_silent() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = hold(Open, 0, 1100);
    frames.extend(hold(ClosedSideways, 1200, 1800));

    assert!(run(&mut tracker, base, &frames).is_empty());
}

#[test]
fn test_open_then_plain_fist_abandons() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames = vec![(0, Open, 0.5), (100, CLOSED, 0.5)];

    assert!(run(&mut tracker, base, &frames).is_empty());
    assert_eq!(tracker.mode(), TrackingMode::Idle);
}

#[test]
fn test_interrupting_frame_restarts_debounce() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = vec![(0, CLOSED, 0.5)];
    frames.extend(hold(Point, 100, 600));

    // The frame that abandons tracking is not fed to the debouncer
    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(600, GestureEvent::Simple(SimpleGesture::Point))]
    );
}

#[test]
fn test_sideways_fist_breaks_repeat_suppression() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let mut frames = hold(Victory, 0, 500);
    frames.extend(hold(ClosedSideways, 600, 1100));
    frames.extend(hold(Victory, 1200, 1600));

    let events = run(&mut tracker, base, &frames);
    assert_eq!(
        events,
        vec![
            (400, GestureEvent::Simple(SimpleGesture::Victory)),
            (1600, GestureEvent::Simple(SimpleGesture::Victory)),
        ]
    );
}

#[test]
fn test_clock_regression_never_times_out() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();
    let frames = vec![
        (500, CLOSED, 0.5),
        (0, CLOSED, 0.5),
        (1400, CLOSED, 0.5),
        (1600, CLOSED, 0.5),
    ];

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(1600, GestureEvent::Simple(SimpleGesture::Closed))]
    );
}

#[test]
fn test_custom_timings() {
    let mut tracker = CompositeTracker::new(TrackerTimings {
        debounce: Duration::from_millis(100),
        tracking_timeout: Duration::from_millis(300),
        drag_threshold: 0.05,
    });
    let base = Instant::now();
    let frames = vec![(0, CLOSED, 0.5), (100, CLOSED, 0.57)];

    assert_eq!(
        run(&mut tracker, base, &frames),
        vec![(100, GestureEvent::Composite(CompositeGesture::ToggleInvisible))]
    );
    assert_eq!(
        run(&mut tracker, base, &hold(Point, 200, 300)),
        vec![(300, GestureEvent::Simple(SimpleGesture::Point))]
    );
}

#[test]
fn test_snapshot_reports_tracking() {
    let mut tracker = CompositeTracker::default();
    let base = Instant::now();

    tracker.update(Victory, Some(Point2 { x: 0.5, y: 0.9 }), base);
    let snapshot = tracker.snapshot(at(base, 50));
    assert_eq!(snapshot.mode, TrackingMode::Idle);
    assert_eq!(snapshot.pending_label, Some(Victory));
    assert_eq!(snapshot.tracking_elapsed, None);

    tracker.update(CLOSED, Some(Point2 { x: 0.3, y: 0.8 }), at(base, 100));
    let snapshot = tracker.snapshot(at(base, 350));
    assert_eq!(snapshot.mode, TrackingMode::TrackingClosed);
    assert_eq!(snapshot.anchor, Some(Point2 { x: 0.3, y: 0.8 }));
    assert_eq!(snapshot.tracking_elapsed, Some(Duration::from_millis(250)));
    assert_eq!(snapshot.pending_label, None);

    tracker.reset();
    assert_eq!(tracker.snapshot(at(base, 400)), TrackerSnapshot::default());
}

fn pose_frames(poses: &[Option<HandPose>]) -> Vec<Option<Vec<Landmark>>> {
    poses
        .iter()
        .map(|pose| pose.map(|pose| hand(pose, 0.5).points().to_vec()))
        .collect()
}

#[test]
fn test_end_to_end_closed_then_open() {
    let mut pipeline = RecognitionPipeline::default();
    let base = Instant::now();
    let frames = pose_frames(&[
        None,
        None,
        Some(HandPose::Fist),
        Some(HandPose::Fist),
        Some(HandPose::Fist),
        Some(HandPose::OpenPalm),
    ]);

    let outcomes: Vec<FrameOutcome> = frames
        .into_iter()
        .enumerate()
        .map(|(i, detection)| pipeline.process(detection, at(base, i as u64 * 100)))
        .collect();

    let labels: Vec<GestureLabel> = outcomes.iter().map(|o| o.label).collect();
    assert_eq!(labels, vec![None_, None_, CLOSED, CLOSED, CLOSED, Open]);

    let events: Vec<(usize, GestureEvent)> = outcomes
        .iter()
        .enumerate()
        .filter_map(|(i, o)| o.event.map(|event| (i, event)))
        .collect();
    assert_eq!(
        events,
        vec![(5, GestureEvent::Composite(CompositeGesture::OpenPanel))]
    );

    let metrics = pipeline.metrics();
    assert_eq!(metrics.frames_processed, 6);
    assert_eq!(metrics.hands_seen, 4);
    assert_eq!(metrics.events_emitted, 1);
    assert_eq!(metrics.malformed_frames, 0);
}

#[test]
fn test_pipeline_drag_uses_wrist_position() {
    let mut pipeline = RecognitionPipeline::default();
    let base = Instant::now();

    let first = hand(HandPose::Fist, 0.3);
    let dragged = hand(HandPose::Fist, 0.55);
    assert_eq!(pipeline.process_hand(Some(&first), base).event, None);
    assert_eq!(
        pipeline.process_hand(Some(&dragged), at(base, 100)).event,
        Some(GestureEvent::Composite(CompositeGesture::ToggleInvisible))
    );
}

#[test]
fn test_malformed_detection_counts_as_no_hand() {
    let mut pipeline = RecognitionPipeline::default();
    let base = Instant::now();

    pipeline.process(Some(hand(HandPose::Fist, 0.5).points().to_vec()), base);
    assert_eq!(pipeline.snapshot(base).mode, TrackingMode::TrackingClosed);

    let mut broken = hand(HandPose::OpenPalm, 0.5).points().to_vec();
    broken[3].x = f32::NAN;
    let outcome = pipeline.process(Some(broken), at(base, 100));
    assert_eq!(outcome.label, None_);
    assert_eq!(outcome.event, None);
    assert_eq!(pipeline.snapshot(at(base, 100)).mode, TrackingMode::Idle);

    let outcome = pipeline.process(Some(vec![Landmark::default(); 5]), at(base, 200));
    assert_eq!(outcome.label, None_);
    assert_eq!(pipeline.metrics().malformed_frames, 2);
    assert_eq!(pipeline.metrics().hands_seen, 1);
}
