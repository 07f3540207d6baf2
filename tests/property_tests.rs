//! Property-based tests for carousel navigation.
//!
//! These tests use proptest to verify the index invariants hold across
//! many randomly generated lists and operation sequences.

use carousel::clock::ManualClock;
use carousel::core::{CarouselState, Direction, ItemClass};
use carousel::events::EventLog;
use carousel::{Carousel, CarouselConfig};
use proptest::prelude::*;
use std::time::Duration;

#[derive(Clone, Debug)]
enum Op {
    Next,
    Previous,
    GoTo(i64),
    Pause,
    Resume,
    Wait(u64),
}

prop_compose! {
    fn arbitrary_op()(variant in 0..6u8, index in -20i64..40, wait in 0u64..12_000) -> Op {
        match variant {
            0 => Op::Next,
            1 => Op::Previous,
            2 => Op::GoTo(index),
            3 => Op::Pause,
            4 => Op::Resume,
            _ => Op::Wait(wait),
        }
    }
}

fn build_carousel(len: usize) -> (Carousel<usize, ManualClock>, ManualClock, EventLog<usize>) {
    let clock = ManualClock::new();
    let log = EventLog::new();
    let carousel = Carousel::with_clock(
        (0..len).collect(),
        CarouselConfig::default(),
        clock.clone(),
    )
    .with_sink(log.clone());
    (carousel, clock, log)
}

proptest! {
    #[test]
    fn index_stays_in_bounds(
        len in 1usize..12,
        ops in prop::collection::vec(arbitrary_op(), 0..60)
    ) {
        let (mut carousel, clock, log) = build_carousel(len);

        for op in ops {
            match op {
                Op::Next => carousel.go_to_next(),
                Op::Previous => carousel.go_to_previous(),
                Op::GoTo(index) => carousel.go_to_index(index),
                Op::Pause => carousel.pause(),
                Op::Resume => carousel.resume(),
                Op::Wait(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    carousel.poll_timer();
                }
            }
            prop_assert!(carousel.current_index() < len);
            if let Some(previous) = carousel.previous_index() {
                prop_assert!(previous < len);
            }
        }

        prop_assert!(log.index_changes().iter().all(|&i| i < len));
    }

    #[test]
    fn empty_list_never_moves(ops in prop::collection::vec(arbitrary_op(), 0..30)) {
        let (mut carousel, clock, log) = build_carousel(0);

        for op in ops {
            match op {
                Op::Next => carousel.go_to_next(),
                Op::Previous => carousel.go_to_previous(),
                Op::GoTo(index) => carousel.go_to_index(index),
                Op::Pause => carousel.pause(),
                Op::Resume => carousel.resume(),
                Op::Wait(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    carousel.poll_timer();
                }
            }
            prop_assert_eq!(carousel.current_index(), 0);
        }

        prop_assert!(log.is_empty());
    }

    #[test]
    fn len_steps_forward_is_a_full_circle(len in 1usize..20, start in 0i64..20) {
        let mut state = CarouselState::new().jump(start, len).unwrap();
        let origin = state.current();

        for _ in 0..len {
            state = state.forward(len).unwrap();
        }

        prop_assert_eq!(state.current(), origin);
    }

    #[test]
    fn forward_then_backward_is_identity(len in 1usize..20, start in 0i64..20) {
        let state = CarouselState::new().jump(start, len).unwrap();
        let round_trip = state.forward(len).unwrap().backward(len).unwrap();
        prop_assert_eq!(round_trip.current(), state.current());
    }

    #[test]
    fn jump_clamps_rather_than_wraps(len in 1usize..20, index in any::<i64>()) {
        let state = CarouselState::new().jump(index, len).unwrap();
        let expected = index.clamp(0, len as i64 - 1) as usize;
        prop_assert_eq!(state.current(), expected);
    }

    #[test]
    fn exactly_one_slide_is_active(
        len in 1usize..12,
        moves in prop::collection::vec(-3i64..3, 0..20)
    ) {
        let mut state = CarouselState::new();
        for step in moves {
            state = match step {
                s if s < 0 => state.backward(len).unwrap(),
                0 => state.jump(len as i64 / 2, len).unwrap(),
                _ => state.forward(len).unwrap(),
            };
        }

        let active = (0..len)
            .filter(|&i| ItemClass::of(&state, i) == ItemClass::Active)
            .count();
        prop_assert_eq!(active, 1);

        let entering = match state.direction() {
            Direction::Next => ItemClass::EnterRight,
            Direction::Prev => ItemClass::EnterLeft,
        };
        for i in 0..len {
            if i != state.current() && Some(i) != state.previous() {
                prop_assert_eq!(ItemClass::of(&state, i), entering);
            }
        }
    }

    #[test]
    fn late_poll_advances_at_most_once(len in 2usize..10, waited in 0u64..60_000) {
        let (mut carousel, clock, log) = build_carousel(len);

        clock.advance(Duration::from_millis(waited));
        let fired = carousel.poll_timer();

        prop_assert_eq!(fired, usize::from(waited >= 5000));
        prop_assert_eq!(carousel.current_index(), fired);
        prop_assert_eq!(log.len(), fired);
    }

    #[test]
    fn replacing_items_always_resets(
        len in 1usize..10,
        jump in 0i64..10,
        new_len in 0usize..10
    ) {
        let (mut carousel, _, _) = build_carousel(len);
        carousel.go_to_index(jump);

        carousel.replace_items((0..new_len).collect());

        prop_assert_eq!(carousel.current_index(), 0);
        prop_assert_eq!(carousel.previous_index(), None);
    }
}
