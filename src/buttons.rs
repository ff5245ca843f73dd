//! Button edge handling
//!
//! Both buttons are active-low with pull-ups, so a press is a falling edge.
//! The watcher waits on both lines at once and hands every edge to
//! [`ButtonHandler`], which applies the debounce window and flips the shared
//! flags. Nothing is queued: an edge inside the window is simply dropped.

use embassy_futures::select::{Either, select};
use embedded_hal_async::digital::Wait;

use crate::debounce::Debouncer;
use crate::hardware::traits::{Clock, Led};
use crate::toggles::ToggleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Joystick push button: green LED and display polarity
    Main,
    /// Extra button: PWM outputs on/off
    Alt,
}

impl Button {
    pub const fn index(self) -> usize {
        match self {
            Button::Main => 0,
            Button::Alt => 1,
        }
    }
}

/// What an accepted edge did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    MainToggled { green_led_on: bool, display_inverted: bool },
    PwmToggled { pwm_enabled: bool },
}

pub struct ButtonHandler<'a, L> {
    debouncer: &'a Debouncer,
    toggles: &'a ToggleState,
    green_led: L,
}

impl<'a, L: Led> ButtonHandler<'a, L> {
    /// Takes ownership of the green LED and drives it to the current flag value
    pub fn new(debouncer: &'a Debouncer, toggles: &'a ToggleState, mut green_led: L) -> Self {
        green_led.set(toggles.green_led_on());
        Self { debouncer, toggles, green_led }
    }

    /// Handle one falling edge seen at `now_ms`.
    ///
    /// Returns `None` if the edge fell inside the debounce window.
    pub fn on_falling_edge(&mut self, button: Button, now_ms: u32) -> Option<ButtonAction> {
        if !self.debouncer.try_accept(button, now_ms) {
            debug!("{}: edge at {}ms ignored", button, now_ms);
            return None;
        }

        let action = match button {
            Button::Main => {
                let green_led_on = self.toggles.toggle_green_led();
                self.green_led.set(green_led_on);
                let display_inverted = self.toggles.toggle_display_inverted();
                ButtonAction::MainToggled { green_led_on, display_inverted }
            }
            Button::Alt => ButtonAction::PwmToggled {
                pwm_enabled: self.toggles.toggle_pwm_enabled(),
            },
        };
        debug!("{}: edge at {}ms -> {}", button, now_ms, action);
        Some(action)
    }

    /// Wait for falling edges on both buttons forever
    pub async fn watch<M, A, C>(&mut self, main: &mut M, alt: &mut A, clock: &C) -> !
    where
        M: Wait,
        A: Wait,
        C: Clock,
    {
        info!("watching buttons, debounce policy {}", self.debouncer.policy());
        loop {
            let edge = select(main.wait_for_falling_edge(), alt.wait_for_falling_edge()).await;
            let (button, res) = match edge {
                Either::First(res) => (Button::Main, res.is_ok()),
                Either::Second(res) => (Button::Alt, res.is_ok()),
            };
            if !res {
                warn!("{}: edge wait failed", button);
                continue;
            }
            // stamped when this task is polled, which can trail the EXTI wake by one frame
            self.on_falling_edge(button, clock.now_ms());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::debounce::DebouncePolicy;
    use core::cell::Cell;
    use core::future::pending;
    use embassy_futures::{block_on, yield_now};
    use embedded_hal::digital::{ErrorKind, ErrorType};

    #[derive(Default)]
    struct FakeLed {
        lit: bool,
        writes: usize,
    }

    impl Led for &mut FakeLed {
        fn on(&mut self) {
            self.lit = true;
            self.writes += 1;
        }

        fn off(&mut self) {
            self.lit = false;
            self.writes += 1;
        }
    }

    fn state() -> (Debouncer, ToggleState) {
        let cfg = BoardConfig::BLUE_PILL;
        (
            Debouncer::new(cfg.debounce_ms, cfg.debounce_policy),
            ToggleState::new(cfg.initial),
        )
    }

    #[test]
    fn new_drives_led_to_flag() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed { lit: true, writes: 0 };
        ButtonHandler::new(&debouncer, &toggles, &mut led);
        assert!(!led.lit);
        assert_eq!(led.writes, 1);
    }

    #[test]
    fn main_press_toggles_led_and_polarity() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);

        let action = handler.on_falling_edge(Button::Main, 1000);
        assert_eq!(
            action,
            Some(ButtonAction::MainToggled { green_led_on: true, display_inverted: false })
        );
        assert!(toggles.pwm_enabled());
        drop(handler);
        assert!(led.lit);
    }

    #[test]
    fn alt_press_toggles_pwm_only() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);

        assert_eq!(
            handler.on_falling_edge(Button::Alt, 1000),
            Some(ButtonAction::PwmToggled { pwm_enabled: false })
        );
        assert!(!toggles.green_led_on());
        assert!(toggles.display_inverted());
    }

    #[test]
    fn bounce_inside_window_toggles_once() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);

        assert!(handler.on_falling_edge(Button::Main, 1000).is_some());
        assert!(handler.on_falling_edge(Button::Main, 1005).is_none());
        assert!(handler.on_falling_edge(Button::Main, 1199).is_none());
        assert!(toggles.green_led_on());
        assert!(!toggles.display_inverted());
    }

    #[test]
    fn double_press_restores_state() {
        let (debouncer, toggles) = state();
        let before = toggles.snapshot();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);

        assert!(handler.on_falling_edge(Button::Main, 1000).is_some());
        assert!(handler.on_falling_edge(Button::Main, 1200).is_some());
        assert_eq!(toggles.snapshot(), before);
        drop(handler);
        assert!(!led.lit);
        assert_eq!(led.writes, 3);
    }

    #[test]
    fn shared_clock_suppresses_other_button() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);

        assert!(handler.on_falling_edge(Button::Main, 1000).is_some());
        assert!(handler.on_falling_edge(Button::Alt, 1100).is_none());
        assert!(toggles.pwm_enabled());
    }

    #[test]
    fn per_button_clock_lets_other_button_through() {
        let debouncer = Debouncer::new(200, DebouncePolicy::PerButton);
        let toggles = ToggleState::new(BoardConfig::BLUE_PILL.initial);
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);

        assert!(handler.on_falling_edge(Button::Main, 1000).is_some());
        assert!(handler.on_falling_edge(Button::Alt, 1100).is_some());
        assert!(!toggles.pwm_enabled());
    }

    #[derive(Debug)]
    struct LineFault;

    impl embedded_hal::digital::Error for LineFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Input that reports `faults` failed waits, then `edges` falling edges,
    /// then never fires again
    struct ScriptedPin {
        faults: usize,
        edges: usize,
    }

    impl ScriptedPin {
        fn edges(edges: usize) -> Self {
            Self { faults: 0, edges }
        }

        async fn next_edge(&mut self) -> Result<(), LineFault> {
            if self.faults > 0 {
                self.faults -= 1;
                return Err(LineFault);
            }
            if self.edges > 0 {
                self.edges -= 1;
                return Ok(());
            }
            pending().await
        }
    }

    impl ErrorType for ScriptedPin {
        type Error = LineFault;
    }

    impl Wait for ScriptedPin {
        async fn wait_for_high(&mut self) -> Result<(), LineFault> {
            pending().await
        }

        async fn wait_for_low(&mut self) -> Result<(), LineFault> {
            pending().await
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), LineFault> {
            pending().await
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), LineFault> {
            self.next_edge().await
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), LineFault> {
            self.next_edge().await
        }
    }

    /// Clock that moves forward by `step_ms` on every read
    struct SteppingClock {
        now: Cell<u32>,
        step_ms: u32,
        reads: Cell<usize>,
    }

    impl SteppingClock {
        fn new(step_ms: u32) -> Self {
            Self { now: Cell::new(1000), step_ms, reads: Cell::new(0) }
        }
    }

    impl Clock for SteppingClock {
        fn now_ms(&self) -> u32 {
            let now = self.now.get() + self.step_ms;
            self.now.set(now);
            self.reads.set(self.reads.get() + 1);
            now
        }
    }

    /// Run the watcher until both pins are idle
    fn run_watch(
        handler: &mut ButtonHandler<'_, &mut FakeLed>,
        main: &mut ScriptedPin,
        alt: &mut ScriptedPin,
        clock: &SteppingClock,
    ) {
        let watcher = async {
            let _: () = handler.watch(main, alt, clock).await;
        };
        block_on(select(watcher, async {
            for _ in 0..16 {
                yield_now().await;
            }
        }));
    }

    #[test]
    fn watch_routes_alt_edge_to_pwm_flag() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);
        let clock = SteppingClock::new(500);

        run_watch(&mut handler, &mut ScriptedPin::edges(0), &mut ScriptedPin::edges(1), &clock);

        assert_eq!(clock.reads.get(), 1);
        assert!(!toggles.pwm_enabled());
        assert!(!toggles.green_led_on());
        assert!(toggles.display_inverted());
        drop(handler);
        assert!(!led.lit);
    }

    #[test]
    fn watch_routes_main_edge_to_led_and_polarity() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);
        let clock = SteppingClock::new(500);

        run_watch(&mut handler, &mut ScriptedPin::edges(1), &mut ScriptedPin::edges(0), &clock);

        assert_eq!(clock.reads.get(), 1);
        assert!(toggles.pwm_enabled());
        assert!(toggles.green_led_on());
        assert!(!toggles.display_inverted());
        drop(handler);
        assert!(led.lit);
    }

    #[test]
    fn watch_handles_every_edge_of_both_buttons() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);
        let clock = SteppingClock::new(500);

        run_watch(&mut handler, &mut ScriptedPin::edges(3), &mut ScriptedPin::edges(2), &clock);

        assert_eq!(clock.reads.get(), 5);
        // three main toggles, two alt toggles
        assert!(toggles.green_led_on());
        assert!(!toggles.display_inverted());
        assert!(toggles.pwm_enabled());
    }

    #[test]
    fn watch_applies_debounce_to_edges() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);
        // bounces 50ms apart: only the first of the four is accepted
        let clock = SteppingClock::new(50);

        run_watch(&mut handler, &mut ScriptedPin::edges(4), &mut ScriptedPin::edges(0), &clock);

        assert_eq!(clock.reads.get(), 4);
        assert!(toggles.green_led_on());
        assert!(!toggles.display_inverted());
    }

    #[test]
    fn watch_skips_failed_waits() {
        let (debouncer, toggles) = state();
        let mut led = FakeLed::default();
        let mut handler = ButtonHandler::new(&debouncer, &toggles, &mut led);
        let clock = SteppingClock::new(500);
        let mut alt = ScriptedPin { faults: 2, edges: 1 };

        run_watch(&mut handler, &mut ScriptedPin::edges(0), &mut alt, &clock);

        // failed waits never read the clock or touch the flags
        assert_eq!(clock.reads.get(), 1);
        assert!(!toggles.pwm_enabled());
        assert!(!toggles.green_led_on());
    }
}
