mod common;
use common::*;

use punchkiosk::backend::{BackendError, PunchCommand};
use punchkiosk::core::machine::{Input, KioskEvent, KioskMachine, LockReason, Step, StepKind};
use punchkiosk::core::timers::TimerKind;
use punchkiosk::models::{ActionSlot, ClockStatus, EmployeeSource, PunchAction};
use std::time::{Duration, Instant};

const SECOND: Duration = Duration::from_secs(1);

#[test]
fn store_code_resolves_tenant_and_opens_pin_pad() {
    let now = Instant::now();
    let wall = Box::new(FixedClock(local(2026, 10, 20, 10, 0)));
    let mut machine = KioskMachine::new(ScriptedBackend::new(), wall, now);

    assert_eq!(machine.step_kind(), StepKind::StoreCode);
    machine.handle(Input::SubmitStoreCode(" brew42 ".into()), now);

    assert_eq!(machine.step_kind(), StepKind::Pin);
    assert_eq!(machine.tenant().unwrap().tenant_name, "Brew House");
    assert_eq!(machine.backend().calls.borrow().verify, vec!["BREW42".to_string()]);
}

#[test]
fn invalid_store_code_is_rejected_without_a_request() {
    let now = Instant::now();
    let wall = Box::new(FixedClock(local(2026, 10, 20, 10, 0)));
    let mut machine = KioskMachine::new(ScriptedBackend::new(), wall, now);

    machine.handle(Input::SubmitStoreCode("brew-42".into()), now);

    assert_eq!(machine.step_kind(), StepKind::StoreCode);
    assert!(machine.error().is_some());
    assert!(machine.backend().calls.borrow().verify.is_empty());
}

#[test]
fn unknown_store_stays_on_store_step() {
    let now = Instant::now();
    let wall = Box::new(FixedClock(local(2026, 10, 20, 10, 0)));
    let backend = ScriptedBackend::new().with_store(Err(BackendError::NotFound));
    let mut machine = KioskMachine::new(backend, wall, now);

    machine.handle(Input::SubmitStoreCode("nope1".into()), now);

    assert_eq!(machine.step_kind(), StepKind::StoreCode);
    assert!(machine.tenant().is_none());
    assert!(machine.error().unwrap().starts_with("Store not found"));
}

#[test]
fn change_store_drops_the_tenant() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());
    kiosk.type_pin("12");

    kiosk.press(Input::ChangeStore);

    assert_eq!(kiosk.machine.step_kind(), StepKind::StoreCode);
    assert!(kiosk.machine.tenant().is_none());
    assert!(kiosk.machine.pin().is_empty());
}

#[test]
fn fourth_digit_submits_exactly_once_after_short_delay() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedOut)));
    let mut kiosk = Kiosk::at_pin(backend);

    kiosk.type_pin("4821");
    assert!(kiosk.machine.is_timer_armed(TimerKind::PinSubmit));
    assert_eq!(kiosk.backend().pin_calls(), 0);

    kiosk.advance(Duration::from_millis(99));
    assert_eq!(kiosk.backend().pin_calls(), 0);

    kiosk.advance(Duration::from_millis(1));
    assert_eq!(kiosk.backend().pin_calls(), 1);
    assert_eq!(
        kiosk.backend().calls.borrow().pins[0],
        ("tenant-1".to_string(), "4821".to_string())
    );

    kiosk.advance(5 * SECOND);
    assert_eq!(kiosk.backend().pin_calls(), 1);
    assert_eq!(kiosk.machine.step_kind(), StepKind::Confirm);
}

#[test]
fn fifth_digit_is_ignored() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());

    kiosk.type_pin("48213");
    assert_eq!(kiosk.machine.pin().len(), 4);

    kiosk.advance(Duration::from_millis(100));
    assert_eq!(kiosk.backend().calls.borrow().pins[0].1, "4821");
}

#[test]
fn backspace_before_submit_cancels_it() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());

    kiosk.type_pin("4821");
    kiosk.press(Input::Backspace);
    kiosk.advance(SECOND);

    assert_eq!(kiosk.backend().pin_calls(), 0);
    assert_eq!(kiosk.machine.pin().len(), 3);
    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
}

#[test]
fn backspace_clears_the_error_for_a_new_attempt() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());
    kiosk.sign_in("1111");
    assert!(kiosk.machine.error().is_some());

    kiosk.press(Input::Backspace);

    assert_eq!(kiosk.machine.error(), None);
    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
}

#[test]
fn clear_empties_buffer() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());

    kiosk.type_pin("482");
    kiosk.press(Input::Clear);

    assert!(kiosk.machine.pin().is_empty());
}

#[test]
fn unrecognized_pin_shakes_and_clears() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());

    kiosk.sign_in("0000");

    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
    assert!(kiosk.machine.pin().is_empty());
    assert!(kiosk.machine.pin_shake());
    assert!(kiosk.machine.error().unwrap().starts_with("PIN not recognized"));
    assert!(kiosk.machine.session().is_none());

    kiosk.press(Input::Digit(1));
    assert!(!kiosk.machine.pin_shake());
    assert!(kiosk.machine.error().is_none());
}

#[test]
fn rate_limited_pin_shows_wait_message() {
    let backend = ScriptedBackend::new().with_pin(Err(BackendError::RateLimited));
    let mut kiosk = Kiosk::at_pin(backend);

    kiosk.sign_in("1111");

    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
    assert!(kiosk.machine.error().unwrap().starts_with("Too many attempts"));
    assert!(kiosk.machine.pin_shake());
    assert!(kiosk.machine.pin().is_empty());
    assert!(kiosk.machine.take_events().contains(&KioskEvent::PinRateLimited));
}

#[test]
fn connection_failure_on_pin_lookup_does_not_shake() {
    let backend =
        ScriptedBackend::new().with_pin(Err(BackendError::Transport("timed out".into())));
    let mut kiosk = Kiosk::at_pin(backend);

    kiosk.sign_in("1111");

    assert!(kiosk.machine.error().unwrap().starts_with("Connection error"));
    assert!(!kiosk.machine.pin_shake());
    assert!(kiosk.machine.pin().is_empty());
}

#[test]
fn status_decides_offered_actions() {
    let cases = [
        (ClockStatus::ClockedOut, PunchAction::ClockIn, None),
        (
            ClockStatus::ClockedIn,
            PunchAction::ClockOut,
            Some(PunchAction::BreakStart),
        ),
        (ClockStatus::OnBreak, PunchAction::BreakEnd, None),
    ];

    for (status, primary, secondary) in cases {
        let backend = ScriptedBackend::new().with_pin(Ok(lookup(status)));
        let mut kiosk = Kiosk::at_pin(backend);
        kiosk.sign_in("4821");

        let session = kiosk.machine.session().unwrap();
        assert_eq!(session.choice.primary, primary, "{status:?}");
        assert_eq!(session.choice.secondary, secondary, "{status:?}");
    }
}

#[test]
fn countdown_runs_five_seconds_then_punches_once() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedOut)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");

    kiosk.press(Input::ChooseAction(ActionSlot::Primary));
    assert_eq!(
        kiosk.machine.step(),
        &Step::Countdown {
            action: PunchAction::ClockIn,
            remaining: 5
        }
    );

    for expected in [4, 3, 2, 1] {
        kiosk.advance(SECOND);
        assert_eq!(
            kiosk.machine.step(),
            &Step::Countdown {
                action: PunchAction::ClockIn,
                remaining: expected
            }
        );
        assert!(kiosk.backend().punch_calls().is_empty());
    }

    kiosk.advance(SECOND);
    assert_eq!(
        kiosk.machine.step(),
        &Step::Success {
            action: PunchAction::ClockIn
        }
    );
    assert_eq!(
        kiosk.backend().punch_calls(),
        vec![PunchCommand::ClockIn {
            tenant_id: "tenant-1".into(),
            employee_id: "emp-7".into(),
            source: EmployeeSource::Staff,
            employee_name: "Ana Ruiz".into(),
        }]
    );
}

#[test]
fn late_ticks_still_punch_only_once() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedOut)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Primary));

    for _ in 0..6 {
        kiosk.advance(12 * SECOND);
    }

    assert_eq!(kiosk.backend().punch_calls().len(), 1);
}

#[test]
fn stalled_host_keeps_the_cancel_window() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedIn)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Primary));

    kiosk.advance(12 * SECOND);
    assert_eq!(
        kiosk.machine.step(),
        &Step::Countdown {
            action: PunchAction::ClockOut,
            remaining: 4
        }
    );

    kiosk.press(Input::CancelCountdown);
    kiosk.run_countdown();
    assert_eq!(kiosk.machine.step_kind(), StepKind::Confirm);
    assert!(kiosk.backend().punch_calls().is_empty());
}

#[test]
fn cancel_at_any_count_sends_nothing() {
    for elapsed in 0..5 {
        let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedIn)));
        let mut kiosk = Kiosk::at_pin(backend);
        kiosk.sign_in("4821");
        kiosk.press(Input::ChooseAction(ActionSlot::Primary));

        for _ in 0..elapsed {
            kiosk.advance(SECOND);
        }
        kiosk.press(Input::CancelCountdown);
        assert_eq!(kiosk.machine.step_kind(), StepKind::Confirm);

        kiosk.advance(10 * SECOND);
        assert!(
            kiosk.backend().punch_calls().is_empty(),
            "cancelled after {elapsed}s"
        );
        assert!(!kiosk.machine.is_timer_armed(TimerKind::Countdown));
    }
}

#[test]
fn success_screen_locks_after_three_seconds() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedOut)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Primary));
    kiosk.run_countdown();
    kiosk.machine.take_events();

    kiosk.advance(Duration::from_millis(2_900));
    assert_eq!(kiosk.machine.step_kind(), StepKind::Success);

    kiosk.advance(Duration::from_millis(100));
    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
    assert!(kiosk.machine.session().is_none());
    assert!(kiosk.machine.pin().is_empty());
    assert!(kiosk.machine.take_events().contains(&KioskEvent::Locked {
        reason: LockReason::Completed
    }));
}

#[test]
fn success_screen_is_timed_from_the_punch_response() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedOut)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Primary));
    kiosk.backend().set_latency(&kiosk.mono, 4 * SECOND);

    kiosk.run_countdown();
    assert_eq!(kiosk.machine.step_kind(), StepKind::Success);
    let answered = kiosk.mono.get();
    assert_eq!(
        kiosk.machine.timer_deadline(TimerKind::Success),
        Some(answered + 3 * SECOND)
    );

    kiosk.advance(Duration::from_millis(2_900));
    assert_eq!(kiosk.machine.step_kind(), StepKind::Success);

    kiosk.advance(Duration::from_millis(100));
    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
}

#[test]
fn failed_punch_returns_to_confirm_without_retry() {
    let backend = ScriptedBackend::new()
        .with_pin(Ok(lookup(ClockStatus::ClockedIn)))
        .with_punch(Err(BackendError::Rejected { status: 500 }));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");

    kiosk.press(Input::ChooseAction(ActionSlot::Primary));
    kiosk.run_countdown();

    assert_eq!(kiosk.machine.step_kind(), StepKind::Confirm);
    assert_eq!(
        kiosk.machine.error(),
        Some("Action failed. Please try again.")
    );
    assert!(kiosk.machine.session().is_some());

    kiosk.advance(30 * SECOND);
    assert_eq!(kiosk.backend().punch_calls().len(), 1);
}

#[test]
fn break_actions_carry_the_active_ids() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedIn)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Secondary));
    kiosk.run_countdown();

    assert_eq!(
        kiosk.backend().punch_calls(),
        vec![PunchCommand::BreakStart {
            tenant_id: "tenant-1".into(),
            employee_id: "emp-7".into(),
            entry_id: "entry-1".into(),
        }]
    );

    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::OnBreak)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Primary));
    kiosk.run_countdown();

    assert_eq!(
        kiosk.backend().punch_calls(),
        vec![PunchCommand::BreakEnd {
            break_id: "break-1".into()
        }]
    );
}

#[test]
fn on_break_offers_no_secondary_action() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::OnBreak)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");

    kiosk.press(Input::ChooseAction(ActionSlot::Secondary));

    assert_eq!(kiosk.machine.step_kind(), StepKind::Confirm);
}

#[test]
fn done_locks_back_to_pin() {
    let backend = ScriptedBackend::new().with_pin(Ok(lookup(ClockStatus::ClockedIn)));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");

    kiosk.press(Input::Done);

    assert_eq!(kiosk.machine.step_kind(), StepKind::Pin);
    assert!(kiosk.machine.employee().is_none());
    assert!(kiosk.machine.take_events().contains(&KioskEvent::Locked {
        reason: LockReason::Dismissed
    }));
}

#[test]
fn tip_roster_employee_clocks_in_with_its_source() {
    let mut found = lookup(ClockStatus::ClockedOut);
    found.employee = employee(EmployeeSource::TipRoster);
    let backend = ScriptedBackend::new().with_pin(Ok(found));
    let mut kiosk = Kiosk::at_pin(backend);
    kiosk.sign_in("4821");
    kiosk.press(Input::ChooseAction(ActionSlot::Primary));
    kiosk.run_countdown();

    match &kiosk.backend().punch_calls()[0] {
        PunchCommand::ClockIn { source, .. } => assert_eq!(*source, EmployeeSource::TipRoster),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn footer_clock_ticks_every_second() {
    let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());
    let before = kiosk.machine.clock().ticks();

    kiosk.advance(3 * SECOND);

    assert_eq!(kiosk.machine.clock().ticks(), before + 3);
}

#[test]
fn every_pin_is_submitted_exactly_once() {
    for pin in ["0000", "1234", "9999", "0470", "5081"] {
        let mut kiosk = Kiosk::at_pin(ScriptedBackend::new());
        kiosk.type_pin(pin);
        kiosk.type_pin("7");
        assert!(kiosk.machine.pin().len() <= 4);

        kiosk.advance(2 * SECOND);

        let calls = kiosk.backend().calls.borrow();
        assert_eq!(calls.pins.len(), 1, "{pin}");
        assert_eq!(calls.pins[0].1, pin);
    }
}
