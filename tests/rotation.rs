mod common;

use std::cell::Cell;
use std::rc::Rc;

use rotator::{EventKind, Opacity, Rotation, RotationError};
use test_case::test_case;

use common::*;

#[test]
fn start_element_shown_without_animation() {
    let rotation = Rotation::new(RecordingRenderer::new(3), config(1000, 200).with_start_index(1))
        .expect("valid rotation");

    assert_eq!(rotation.index(), Some(1));
    assert_eq!(
        rotation.renderer().calls,
        vec![Call::Hide(0), Call::Hide(1), Call::Hide(2), Call::Show(1)]
    );
    assert!(rotation.is_playing());
}

#[test]
fn autoplay_timeline() {
    let mut rotation = Rotation::new(RecordingRenderer::new(3), config(1000, 200)).unwrap();
    let transitions = record(&mut rotation, EventKind::Transition);
    assert_eq!(rotation.index(), Some(0));

    rotation.update(ms(999));
    assert!(rotation.renderer().shown().is_empty());

    rotation.update(ms(1));
    assert_eq!(rotation.renderer().shown(), vec![1]);
    assert_eq!(rotation.index(), Some(1));
    assert!(rotation
        .renderer()
        .calls
        .contains(&Call::FadeTo(0, Opacity::Transparent, ms(200))));
    assert!(transitions.borrow().is_empty());

    rotation.update(ms(199));
    assert!(transitions.borrow().is_empty());
    rotation.update(ms(1));
    assert_eq!(*transitions.borrow(), vec![0]);

    rotation.update(ms(800));
    assert_eq!(rotation.renderer().shown(), vec![1, 2]);
    assert_eq!(rotation.index(), Some(2));
}

#[test]
fn bounded_cycles_stop_on_end_index() {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(4),
        config(100, 10).with_cycle_count(2).with_cycle_end_index(0),
    )
    .unwrap();
    let transitions = record(&mut rotation, EventKind::Transition);
    let cycle_ends = record(&mut rotation, EventKind::CycleEnd);

    run_for(&mut rotation, ms(2000), ms(10));

    assert_eq!(rotation.renderer().shown(), vec![1, 2, 3, 0, 1, 2, 3, 0]);
    assert_eq!(transitions.borrow().len(), 8);
    assert_eq!(*cycle_ends.borrow(), vec![0]);
    assert!(!rotation.is_playing());
    assert_eq!(rotation.loops_elapsed(), 0);
    assert_eq!(rotation.index(), Some(0));
}

#[test]
fn bounded_cycle_waits_for_end_index() {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(3),
        config(100, 10).with_cycle_count(1).with_cycle_end_index(2),
    )
    .unwrap();
    let cycle_ends = record(&mut rotation, EventKind::CycleEnd);

    run_for(&mut rotation, ms(1000), ms(10));

    // Budget of 3 is used up on index 0, rotation carries on until 2.
    assert_eq!(rotation.renderer().shown(), vec![1, 2, 0, 1, 2]);
    assert_eq!(*cycle_ends.borrow(), vec![2]);
}

#[test]
fn play_twice_is_play_once() {
    let mut once = Rotation::new(RecordingRenderer::new(3), config(100, 10).with_autoplay(false)).unwrap();
    let mut twice = Rotation::new(RecordingRenderer::new(3), config(100, 10).with_autoplay(false)).unwrap();

    once.play(false);
    twice.play(false).play(false);
    run_for(&mut once, ms(450), ms(10));
    run_for(&mut twice, ms(450), ms(10));

    assert_eq!(once.renderer().calls, twice.renderer().calls);
    assert_eq!(once.renderer().shown(), vec![1, 2, 0, 1]);
}

#[test]
fn stop_then_play_resets_loops() {
    let mut rotation = Rotation::new(RecordingRenderer::new(4), config(100, 10)).unwrap();
    run_for(&mut rotation, ms(300), ms(10));
    assert_eq!(rotation.loops_elapsed(), 3);

    rotation.stop().play(false);
    assert!(rotation.is_playing());
    assert_eq!(rotation.loops_elapsed(), 0);

    // A fresh full delay before the next automatic transition.
    run_for(&mut rotation, ms(90), ms(10));
    assert_eq!(rotation.renderer().shown().len(), 3);
    run_for(&mut rotation, ms(10), ms(10));
    assert_eq!(rotation.renderer().shown().len(), 4);
    assert_eq!(rotation.loops_elapsed(), 1);
}

#[test]
fn stop_is_idempotent() {
    let mut rotation = Rotation::new(RecordingRenderer::new(3), config(100, 10)).unwrap();
    rotation.stop().stop();
    assert!(!rotation.is_playing());
    assert_eq!(rotation.next_tick(), None);

    run_for(&mut rotation, ms(500), ms(10));
    assert!(rotation.renderer().shown().is_empty());
}

#[test]
fn jump_to_visible_element_does_nothing() {
    let mut rotation = Rotation::new(RecordingRenderer::immediate(3), config(100, 10).with_autoplay(false)).unwrap();
    let transitions = record(&mut rotation, EventKind::Transition);
    rotation.jump(2).unwrap();
    assert_eq!(*transitions.borrow(), vec![0]);
    let calls = rotation.renderer().calls.len();

    rotation.jump(2).unwrap();

    let after: Vec<_> = rotation.renderer().calls[calls..].to_vec();
    assert_eq!(after, vec![Call::Halt]);
    assert_eq!(*transitions.borrow(), vec![0]);
}

#[test]
fn jump_stops_autoplay_and_lands_on_target() {
    let mut rotation = Rotation::new(RecordingRenderer::new(5), config(100, 10)).unwrap();
    run_for(&mut rotation, ms(100), ms(10));
    assert_eq!(rotation.index(), Some(1));

    rotation.jump(3).unwrap();
    assert_eq!(rotation.index(), Some(3));
    assert!(!rotation.is_playing());

    run_for(&mut rotation, ms(500), ms(10));
    assert_eq!(rotation.renderer().shown(), vec![1, 3]);
}

#[test]
fn jump_then_play_continues_from_target() {
    let mut rotation = Rotation::new(RecordingRenderer::new(5), config(100, 10).with_autoplay(false)).unwrap();
    rotation.jump(3).unwrap().play(false);
    run_for(&mut rotation, ms(200), ms(10));
    assert_eq!(rotation.renderer().shown(), vec![3, 4, 0]);
}

#[test]
fn jump_out_of_range_is_rejected_untouched() {
    let mut rotation = Rotation::new(RecordingRenderer::new(3), config(100, 10)).unwrap();
    let calls = rotation.renderer().calls.len();

    let err = rotation.jump(3).err();

    assert_eq!(err, Some(RotationError::IndexOutOfRange { index: 3, len: 3 }));
    assert!(rotation.is_playing());
    assert_eq!(rotation.index(), Some(0));
    assert_eq!(rotation.renderer().calls.len(), calls);
}

#[test_case(5, 0 => 4 ; "wraps to the last element")]
#[test_case(5, 3 => 2 ; "steps back one")]
#[test_case(2, 1 => 0 ; "two elements")]
fn prev_from_start(len: usize, start: usize) -> usize {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(len),
        config(100, 10).with_autoplay(false).with_start_index(start),
    )
    .unwrap();
    rotation.prev();
    assert_eq!(rotation.renderer().shown().len(), 1);
    rotation.index().unwrap()
}

#[test]
fn prev_follows_autoplay_position() {
    let mut rotation = Rotation::new(RecordingRenderer::new(5), config(100, 10)).unwrap();
    run_for(&mut rotation, ms(300), ms(10));
    assert_eq!(rotation.index(), Some(3));

    rotation.prev();
    assert_eq!(rotation.index(), Some(2));
    assert!(!rotation.is_playing());
    rotation.prev();
    assert_eq!(rotation.index(), Some(1));
}

#[test_case(3, 0 => vec![1, 2, 0] ; "from the first element")]
#[test_case(4, 2 => vec![3, 0, 1] ; "from a later start")]
fn next_steps_forward(len: usize, start: usize) -> Vec<usize> {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(len),
        config(100, 10).with_start_index(start),
    )
    .unwrap();
    rotation.next().next().next();
    assert!(!rotation.is_playing());
    rotation.renderer().shown()
}

#[test_case(4, 0 => vec![1, 2, 3, 0] ; "forward from zero")]
#[test_case(4, 2 => vec![3, 0, 1, 2] ; "forward from a later start")]
fn autoplay_order(len: usize, start: usize) -> Vec<usize> {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(len),
        config(100, 10).with_start_index(start),
    )
    .unwrap();
    run_for(&mut rotation, ms(400), ms(10));
    rotation.renderer().shown()
}

#[test]
fn reverse_autoplay() {
    let mut rotation = Rotation::new(RecordingRenderer::new(3), config(100, 10).with_autoplay(false)).unwrap();
    rotation.play(true);
    run_for(&mut rotation, ms(300), ms(10));
    assert_eq!(rotation.renderer().shown(), vec![2, 1, 0]);
}

#[test]
fn stop_halts_renderer_and_swallows_pending_transition() {
    let mut renderer = RecordingRenderer::new(3);
    renderer.ignore_halt = true;
    let mut rotation = Rotation::new(renderer, config(100, 50)).unwrap();
    let transitions = record(&mut rotation, EventKind::Transition);

    run_for(&mut rotation, ms(100), ms(10));
    assert_eq!(rotation.renderer().shown(), vec![1]);

    rotation.stop();
    assert_eq!(rotation.renderer().halts(), 1);
    run_for(&mut rotation, ms(200), ms(10));
    assert!(transitions.borrow().is_empty());
}

#[test]
fn stop_from_transition_handler() {
    let mut rotation = Rotation::new(RecordingRenderer::new(4), config(100, 10)).unwrap();
    rotation.bind("transition", |rotation, _| {
        rotation.stop();
    });

    run_for(&mut rotation, ms(1000), ms(10));

    assert!(!rotation.is_playing());
    assert_eq!(rotation.renderer().shown(), vec![1]);
}

#[test]
fn jump_from_cycle_end_handler() {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(3),
        config(100, 10).with_cycle_count(1),
    )
    .unwrap();
    rotation.bind("cycleEnd", |rotation, _| {
        rotation.jump(2).expect("index in range");
    });

    run_for(&mut rotation, ms(1000), ms(10));

    assert_eq!(rotation.renderer().shown(), vec![1, 2, 0, 2]);
    assert_eq!(rotation.index(), Some(2));
    assert!(!rotation.is_playing());
}

#[test]
fn handler_may_restart_playback() {
    let mut rotation = Rotation::new(
        RecordingRenderer::new(2),
        config(100, 10).with_cycle_count(1),
    )
    .unwrap();
    let ends = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ends);
    rotation.bind("cycleEnd", move |rotation, _| {
        counter.set(counter.get() + 1);
        if counter.get() < 2 {
            rotation.play(false);
        }
    });

    run_for(&mut rotation, ms(2000), ms(10));

    assert_eq!(ends.get(), 2);
    assert_eq!(rotation.renderer().shown(), vec![1, 0, 1, 0]);
}

#[test]
fn unknown_event_name_is_ignored() {
    let mut rotation = Rotation::new(RecordingRenderer::immediate(3), config(100, 10)).unwrap();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    rotation.bind("click", move |_, _| flag.set(true));

    rotation.next();

    assert!(!fired.get());
}

#[test]
fn rebinding_replaces_handler() {
    let mut rotation = Rotation::new(RecordingRenderer::immediate(3), config(100, 10)).unwrap();
    let first = record(&mut rotation, EventKind::Transition);
    let second = record(&mut rotation, EventKind::Transition);

    rotation.next();

    assert!(first.borrow().is_empty());
    assert_eq!(*second.borrow(), vec![0]);
}

#[test]
fn immediate_completion_fires_within_the_call() {
    let mut rotation = Rotation::new(RecordingRenderer::immediate(4), config(100, 10).with_autoplay(false)).unwrap();
    let transitions = record(&mut rotation, EventKind::Transition);

    rotation.jump(2).unwrap();
    assert_eq!(*transitions.borrow(), vec![0]);
    rotation.prev();
    assert_eq!(*transitions.borrow(), vec![0, 2]);
}

#[test_case(0 ; "no elements")]
#[test_case(1 ; "single element")]
fn fewer_than_two_elements_is_inert(len: usize) {
    let mut rotation = Rotation::new(RecordingRenderer::new(len), config(100, 10).with_start_index(4)).unwrap();
    let transitions = record(&mut rotation, EventKind::Transition);

    rotation.play(false).next().prev().stop();
    assert!(rotation.jump(7).is_ok());
    run_for(&mut rotation, ms(1000), ms(10));

    assert_eq!(rotation.index(), None);
    assert!(!rotation.is_playing());
    assert!(rotation.renderer().calls.is_empty());
    assert!(transitions.borrow().is_empty());
}

#[test]
fn invalid_start_index_is_rejected() {
    let result = Rotation::new(RecordingRenderer::new(3), config(100, 10).with_start_index(3));
    assert!(matches!(result, Err(RotationError::InvalidConfig(_))));

    let result = Rotation::new(RecordingRenderer::new(3), config(100, 10).with_cycle_end_index(9));
    assert!(matches!(result, Err(RotationError::InvalidConfig(_))));
}

#[test]
fn zero_delay_advances_once_per_update() {
    let mut rotation = Rotation::new(RecordingRenderer::new(3), config(0, 0)).unwrap();
    rotation.update(ms(0));
    assert_eq!(rotation.renderer().shown(), vec![1]);
    rotation.update(ms(0));
    assert_eq!(rotation.renderer().shown(), vec![1, 2]);
}

#[test]
fn dropping_cancels_everything() {
    let fired = Rc::new(Cell::new(0));
    {
        let mut rotation = Rotation::new(RecordingRenderer::new(3), config(100, 50)).unwrap();
        let counter = Rc::clone(&fired);
        rotation.bind("transition", move |_, _| counter.set(counter.get() + 1));
        run_for(&mut rotation, ms(100), ms(10));
        assert!(rotation.next_tick().is_some());
        assert_eq!(Rc::strong_count(&fired), 2);
    }

    assert_eq!(Rc::strong_count(&fired), 1);
    assert_eq!(fired.get(), 0);
}
