//! Mode and menu controller.
//!
//! Routes every decoded [`Key`] to the right consumer:
//!
//! - mode keys (numpad toggle, send-result, menu, quick-exit) act directly
//! - while the macro menu is open only navigation and mode keys count
//! - in numpad passthrough keys go to the [`KeystrokeSink`]
//! - while a macro awaits input, equals submits the displayed value
//! - everything else drives the plain calculator
//!
//! The "SENT" acknowledgment is timed state checked by [`Controller::tick`]
//! rather than a blocking delay.

use crate::calc::{parse_value, CalculatorState, ClearStage};
use crate::config::SENT_ACK_MS;
use crate::hid::{numpad_usage, KeystrokeSink};
use crate::keypad::Key;
use crate::macro_engine::{MacroContext, MacroId, MacroState};
use crate::menu::MenuContext;

#[derive(Clone, Debug, Default)]
pub struct Controller {
    calc: CalculatorState,
    macro_ctx: MacroContext,
    menu: MenuContext,
    ack_until: Option<u64>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calc(&self) -> &CalculatorState {
        &self.calc
    }

    pub fn macro_ctx(&self) -> &MacroContext {
        &self.macro_ctx
    }

    pub fn menu(&self) -> &MenuContext {
        &self.menu
    }

    pub fn menu_open(&self) -> bool {
        self.macro_ctx.state() == MacroState::MenuOpen
    }

    /// True while the "SENT" acknowledgment replaces the value.
    pub fn sent_ack_active(&self) -> bool {
        self.ack_until.is_some()
    }

    /// Dispatch one key at `now_ms`.
    pub fn handle_key<S: KeystrokeSink + ?Sized>(&mut self, key: Key, now_ms: u64, sink: &mut S) {
        debug!("dispatch {}", key);
        if key != Key::SendResult {
            self.ack_until = None;
        }
        if key.is_mode_key() {
            self.handle_mode_key(key, now_ms, sink);
        } else {
            self.handle_value_key(key, sink);
        }
    }

    /// Expire timed state. Returns true when the screen needs redrawing.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.ack_until {
            Some(until) if now_ms >= until => {
                self.ack_until = None;
                true
            }
            _ => false,
        }
    }

    fn handle_mode_key<S: KeystrokeSink + ?Sized>(&mut self, key: Key, now_ms: u64, sink: &mut S) {
        match key {
            Key::QuickExit => self.quick_exit(),
            Key::ToggleNumpad => self.toggle_numpad(),
            Key::SendResult => self.send_result(now_ms, sink),
            Key::OpenMenu => self.open_menu(),
            Key::NavUp | Key::NavDown | Key::Confirm => self.navigate(key),
            _ => {}
        }
    }

    fn quick_exit(&mut self) {
        self.macro_ctx.cancel();
        if self.calc.numpad_mode() {
            // The numpad echo is not an operand.
            self.calc.reset();
        }
        self.calc.clear_function();
        self.calc.set_numpad_mode(false);
        info!("quick exit to calculator");
    }

    fn toggle_numpad(&mut self) {
        let enabled = !self.calc.numpad_mode();
        self.macro_ctx.cancel();
        self.calc.reset();
        self.calc.set_numpad_mode(enabled);
        info!("numpad passthrough {}", if enabled { "on" } else { "off" });
    }

    fn send_result<S: KeystrokeSink + ?Sized>(&mut self, now_ms: u64, sink: &mut S) {
        for c in self.calc.display().chars() {
            sink.send_character(c);
        }
        self.ack_until = Some(now_ms + SENT_ACK_MS);
        info!("sent {}", self.calc.display());
    }

    fn open_menu(&mut self) {
        self.macro_ctx.open_menu();
        self.menu.open(&MacroId::CATALOG);
        info!("macro menu open");
    }

    fn navigate(&mut self, key: Key) {
        if !self.menu_open() {
            return;
        }
        match key {
            Key::NavUp => self.menu.up(),
            Key::NavDown => self.menu.down(),
            Key::Confirm => self.confirm(),
            _ => {}
        }
    }

    fn confirm(&mut self) {
        let Some(id) = self.menu.selected() else {
            self.macro_ctx.cancel();
            return;
        };
        if self.calc.numpad_mode() {
            self.calc.reset();
        }
        self.macro_ctx.start(id);
        self.calc.set_function(id.label());
        self.calc.clear_operation();
        self.calc.reset_entry();
    }

    fn handle_value_key<S: KeystrokeSink + ?Sized>(&mut self, key: Key, sink: &mut S) {
        if self.menu_open() {
            return;
        }

        if self.calc.numpad_mode() {
            if let Some(code) = numpad_usage(key) {
                sink.send_raw_keycode(code);
            }
            match key {
                Key::Digit(_) | Key::Point => self.calc.apply(key),
                _ => self.calc.reset_entry(),
            }
            return;
        }

        match key {
            Key::Equals if self.macro_ctx.state() == MacroState::AwaitingInput => {
                self.submit_macro_input();
            }
            Key::Clear => {
                let stage = self.calc.press_clear();
                if stage == Some(ClearStage::Function) && self.macro_ctx.state() != MacroState::Idle
                {
                    self.macro_ctx.cancel();
                    info!("macro cancelled");
                }
            }
            _ => self.calc.apply(key),
        }
    }

    fn submit_macro_input(&mut self) {
        self.calc.press_equals();
        let value = parse_value(self.calc.display());
        if self.macro_ctx.submit_param(value) {
            if let Some(result) = self.macro_ctx.result() {
                self.calc.load_result(result);
            }
            // The label stays up; only the collection state goes.
            self.macro_ctx.cancel();
        } else {
            self.calc.reset_entry();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::Op;

    #[derive(Default)]
    struct RecordingSink {
        chars: String,
        raw: Vec<u8>,
    }

    impl KeystrokeSink for RecordingSink {
        fn send_character(&mut self, c: char) {
            self.chars.push(c);
        }

        fn send_raw_keycode(&mut self, code: u8) {
            self.raw.push(code);
        }
    }

    fn press(ctrl: &mut Controller, sink: &mut RecordingSink, keys: &str) {
        for b in keys.bytes() {
            let key = Key::from_legend(b).unwrap();
            ctrl.handle_key(key, 0, sink);
        }
    }

    fn open_and_pick(ctrl: &mut Controller, sink: &mut RecordingSink, downs: usize) {
        ctrl.handle_key(Key::OpenMenu, 0, sink);
        for _ in 0..downs {
            ctrl.handle_key(Key::NavDown, 0, sink);
        }
        ctrl.handle_key(Key::Confirm, 0, sink);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Plain calculator & send-result
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn plain_keys_reach_calculator() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        press(&mut ctrl, &mut sink, "2+3*4=");
        assert_eq!(ctrl.calc().display(), "20");
        assert!(sink.chars.is_empty());
        assert!(sink.raw.is_empty());
    }

    #[test]
    fn send_result_types_display_and_acknowledges() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        press(&mut ctrl, &mut sink, "1-3.5=");
        ctrl.handle_key(Key::SendResult, 1_000, &mut sink);
        assert_eq!(sink.chars, "-2.5");
        assert!(ctrl.sent_ack_active());

        assert!(!ctrl.tick(1_000 + SENT_ACK_MS - 1));
        assert!(ctrl.sent_ack_active());
        assert!(ctrl.tick(1_000 + SENT_ACK_MS));
        assert!(!ctrl.sent_ack_active());
        assert_eq!(ctrl.calc().display(), "-2.5");
    }

    #[test]
    fn any_other_key_ends_acknowledgment() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        ctrl.handle_key(Key::SendResult, 0, &mut sink);
        press(&mut ctrl, &mut sink, "7");
        assert!(!ctrl.sent_ack_active());
        assert_eq!(ctrl.calc().display(), "7");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Numpad passthrough
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn numpad_forwards_keypad_usages() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        assert!(ctrl.calc().numpad_mode());

        press(&mut ctrl, &mut sink, "12+");
        ctrl.handle_key(Key::Equals, 0, &mut sink);
        assert_eq!(sink.raw, vec![0x59, 0x5A, 0x57, 0x58]);
        assert_eq!(ctrl.calc().pending_op(), None);
    }

    #[test]
    fn numpad_echoes_digits_and_resets_on_operators() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        press(&mut ctrl, &mut sink, "4.5");
        assert_eq!(ctrl.calc().display(), "4.5");
        press(&mut ctrl, &mut sink, "*");
        assert_eq!(ctrl.calc().display(), "0");
    }

    #[test]
    fn toggle_twice_returns_to_clean_calculator() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        press(&mut ctrl, &mut sink, "9*");
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        assert_eq!(*ctrl.calc(), CalculatorState::new());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Menu & macros
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn menu_ignores_value_keys() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        press(&mut ctrl, &mut sink, "5");
        ctrl.handle_key(Key::OpenMenu, 0, &mut sink);
        press(&mut ctrl, &mut sink, "9+C");
        assert_eq!(ctrl.calc().display(), "5");
        assert_eq!(ctrl.calc().pending_op(), None);
        assert!(ctrl.menu_open());
    }

    #[test]
    fn navigation_outside_menu_does_nothing() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        ctrl.handle_key(Key::NavDown, 0, &mut sink);
        ctrl.handle_key(Key::Confirm, 0, &mut sink);
        assert_eq!(ctrl.macro_ctx().state(), MacroState::Idle);
        assert_eq!(ctrl.menu().selected_index(), 0);
    }

    #[test]
    fn confirm_starts_selected_macro() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        press(&mut ctrl, &mut sink, "8+");
        open_and_pick(&mut ctrl, &mut sink, 2);
        assert_eq!(ctrl.macro_ctx().macro_id(), Some(MacroId::Percent));
        assert_eq!(ctrl.macro_ctx().state(), MacroState::AwaitingInput);
        assert_eq!(ctrl.calc().function_name(), "PCT");
        assert_eq!(ctrl.calc().display(), "0");
        assert_eq!(ctrl.calc().pending_op(), None);
        assert_eq!(ctrl.macro_ctx().current_prompt(), "Amount?");
    }

    #[test]
    fn macro_collects_params_and_shows_result() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        open_and_pick(&mut ctrl, &mut sink, 0);
        press(&mut ctrl, &mut sink, "100");
        ctrl.handle_key(Key::Equals, 0, &mut sink);
        assert_eq!(ctrl.macro_ctx().param_index(), 1);
        assert_eq!(ctrl.calc().display(), "0");
        press(&mut ctrl, &mut sink, "20");
        ctrl.handle_key(Key::Equals, 0, &mut sink);

        assert_eq!(ctrl.macro_ctx().state(), MacroState::Idle);
        assert_eq!(ctrl.calc().display(), "120");
        assert_eq!(ctrl.calc().function_name(), "TAX+");
        assert!(ctrl.calc().is_new_entry());
    }

    #[test]
    fn macro_input_resolves_pending_arithmetic_first() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        open_and_pick(&mut ctrl, &mut sink, 2);
        press(&mut ctrl, &mut sink, "50*4");
        ctrl.handle_key(Key::Equals, 0, &mut sink);
        assert_eq!(ctrl.macro_ctx().params(), &[200.0]);
        assert_eq!(ctrl.calc().pending_op(), None);
        press(&mut ctrl, &mut sink, "10");
        ctrl.handle_key(Key::Equals, 0, &mut sink);
        assert_eq!(ctrl.calc().display(), "20");
    }

    #[test]
    fn third_clear_stage_cancels_macro() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        open_and_pick(&mut ctrl, &mut sink, 4);
        press(&mut ctrl, &mut sink, "5+6");
        press(&mut ctrl, &mut sink, "C");
        assert_eq!(ctrl.macro_ctx().state(), MacroState::AwaitingInput);
        press(&mut ctrl, &mut sink, "C");
        assert_eq!(ctrl.calc().pending_op(), None);
        assert_eq!(ctrl.macro_ctx().state(), MacroState::AwaitingInput);
        press(&mut ctrl, &mut sink, "C");
        assert_eq!(ctrl.macro_ctx().state(), MacroState::Idle);
        assert_eq!(ctrl.calc().function_name(), "");
    }

    #[test]
    fn confirm_from_numpad_leaves_numpad() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        open_and_pick(&mut ctrl, &mut sink, 1);
        assert!(!ctrl.calc().numpad_mode());
        assert_eq!(ctrl.calc().function_name(), "TAX-");
        press(&mut ctrl, &mut sink, "5");
        assert!(sink.raw.is_empty());
    }

    #[test]
    fn quick_exit_is_a_panic_button() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        open_and_pick(&mut ctrl, &mut sink, 5);
        press(&mut ctrl, &mut sink, "1000");
        ctrl.handle_key(Key::Equals, 0, &mut sink);
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        ctrl.handle_key(Key::OpenMenu, 0, &mut sink);

        ctrl.handle_key(Key::QuickExit, 0, &mut sink);
        assert_eq!(ctrl.macro_ctx().state(), MacroState::Idle);
        assert_eq!(ctrl.calc().function_name(), "");
        assert!(!ctrl.calc().numpad_mode());
        press(&mut ctrl, &mut sink, "3-1=");
        assert_eq!(ctrl.calc().display(), "2");
        assert_eq!(ctrl.calc().pending_op(), None::<Op>);
    }

    #[test]
    fn quick_exit_from_numpad_starts_fresh_entry() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        ctrl.handle_key(Key::ToggleNumpad, 0, &mut sink);
        press(&mut ctrl, &mut sink, "12");
        assert_eq!(ctrl.calc().display(), "12");

        ctrl.handle_key(Key::QuickExit, 0, &mut sink);
        assert!(!ctrl.calc().numpad_mode());
        assert_eq!(ctrl.calc().display(), "0");
        press(&mut ctrl, &mut sink, "3");
        assert_eq!(ctrl.calc().display(), "3");
    }

    #[test]
    fn quick_exit_keeps_plain_entry() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        press(&mut ctrl, &mut sink, "8*");
        ctrl.handle_key(Key::QuickExit, 0, &mut sink);
        press(&mut ctrl, &mut sink, "2=");
        assert_eq!(ctrl.calc().display(), "16");
    }

    #[test]
    fn reopening_menu_discards_partial_macro() {
        let mut ctrl = Controller::new();
        let mut sink = RecordingSink::default();
        open_and_pick(&mut ctrl, &mut sink, 5);
        press(&mut ctrl, &mut sink, "1000");
        ctrl.handle_key(Key::Equals, 0, &mut sink);
        ctrl.handle_key(Key::OpenMenu, 0, &mut sink);
        assert!(ctrl.menu_open());
        assert_eq!(ctrl.macro_ctx().param_index(), 0);
        assert_eq!(ctrl.menu().selected(), Some(MacroId::Compound));
    }
}
