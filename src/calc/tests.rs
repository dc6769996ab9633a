//! Unit tests for calculator arithmetic and the entry state machine.
//!
//! These tests run on the host and drive the state machine one key at
//! a time, the same way the controller does.

use super::*;
use crate::keypad::Key;

fn press(calc: &mut CalculatorState, keys: &str) {
    for b in keys.bytes() {
        if let Some(key) = Key::from_legend(b) {
            calc.apply(key);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Formatting & Evaluation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn format_strips_trailing_zeros() {
    assert_eq!(format_result(2.5).as_str(), "2.5");
    assert_eq!(format_result(4.0).as_str(), "4");
    assert_eq!(format_result(0.125).as_str(), "0.125");
    assert_eq!(format_result(-12.0).as_str(), "-12");
    assert_eq!(format_result(100.0).as_str(), "100");
}

#[test]
fn format_rounds_to_six_places() {
    assert_eq!(format_result(1.0 / 3.0).as_str(), "0.333333");
    assert_eq!(format_result(2.0 / 3.0).as_str(), "0.666667");
    // Below the precision bound the value collapses to zero.
    assert_eq!(format_result(0.0000001).as_str(), "0");
    assert_eq!(format_result(-0.0000001).as_str(), "0");
}

#[test]
fn format_falls_back_to_exponent_for_huge_values() {
    let out = format_result(1.0e40);
    assert_eq!(out.as_str(), "1e40");
    assert_eq!(parse_value(&out), 1.0e40);
}

#[test]
fn evaluate_examples() {
    assert_eq!(evaluate("1", Op::Div, "3").as_str(), "0.333333");
    assert_eq!(evaluate("4", Op::Div, "2").as_str(), "2");
    assert_eq!(evaluate("2.5", Op::Mul, "4").as_str(), "10");
    assert_eq!(evaluate("1", Op::Sub, "3").as_str(), "-2");
    assert_eq!(evaluate("0.1", Op::Add, "0.2").as_str(), "0.3");
}

#[test]
fn division_by_zero_is_zero() {
    for x in ["0", "1", "-7.5", "123456789", "0."] {
        assert_eq!(evaluate(x, Op::Div, "0").as_str(), "0");
        assert_eq!(evaluate(x, Op::Div, "0.").as_str(), "0");
    }
}

#[test]
fn parse_is_total() {
    assert_eq!(parse_value("0."), 0.0);
    assert_eq!(parse_value("12.5"), 12.5);
    assert_eq!(parse_value(""), 0.0);
    assert_eq!(parse_value("abc"), 0.0);
}

#[test]
fn op_symbols_map_both_ways() {
    for op in [Op::Add, Op::Sub, Op::Mul, Op::Div] {
        assert_eq!(Op::from_symbol(op.symbol()), Some(op));
    }
    assert_eq!(Op::from_symbol(b'='), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Entry
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn starts_at_zero_in_new_entry() {
    let calc = CalculatorState::new();
    assert_eq!(calc.display(), "0");
    assert!(calc.is_new_entry());
    assert_eq!(calc.pending_op(), None);
    assert_eq!(calc.stored(), "");
    assert_eq!(calc.function_name(), "");
    assert!(!calc.numpad_mode());
}

#[test]
fn digits_replace_then_append() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "42");
    assert_eq!(calc.display(), "42");
    assert!(!calc.is_new_entry());
}

#[test]
fn digits_beyond_ten_characters_are_dropped() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "123456789012345");
    assert_eq!(calc.display(), "1234567890");
}

#[test]
fn point_starts_fresh_entry_as_zero_point() {
    let mut calc = CalculatorState::new();
    press(&mut calc, ".5");
    assert_eq!(calc.display(), "0.5");
}

#[test]
fn second_point_is_ignored() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "1.2.3.");
    assert_eq!(calc.display(), "1.23");
}

// ═══════════════════════════════════════════════════════════════════════════
// Operators
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn simple_addition() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "12+30=");
    assert_eq!(calc.display(), "42");
    assert_eq!(calc.pending_op(), None);
    assert_eq!(calc.stored(), "");
    assert!(calc.is_new_entry());
}

#[test]
fn chaining_is_left_to_right() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "2+3*4=");
    assert_eq!(calc.display(), "20");
}

#[test]
fn operator_shows_intermediate_result() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "2+3*");
    assert_eq!(calc.display(), "5");
    assert_eq!(calc.stored(), "5");
    assert_eq!(calc.pending_op(), Some(Op::Mul));
}

#[test]
fn repeated_operator_only_swaps_the_pending_op() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "8+-*/");
    assert_eq!(calc.display(), "8");
    assert_eq!(calc.stored(), "8");
    assert_eq!(calc.pending_op(), Some(Op::Div));
    press(&mut calc, "2=");
    assert_eq!(calc.display(), "4");
}

#[test]
fn equals_without_pending_op_is_noop() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "7");
    assert!(!calc.press_equals());
    assert_eq!(calc.display(), "7");
    assert!(!calc.is_new_entry());
}

#[test]
fn pending_op_always_has_stored_operand() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "*");
    assert_eq!(calc.pending_op(), Some(Op::Mul));
    assert_eq!(calc.stored(), "0");
}

#[test]
fn divide_by_zero_through_keys() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "9/0=");
    assert_eq!(calc.display(), "0");
}

#[test]
fn digit_after_result_starts_new_number() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "1+1=5");
    assert_eq!(calc.display(), "5");
}

// ═══════════════════════════════════════════════════════════════════════════
// Progressive Clear
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn clear_runs_one_stage_per_press() {
    let mut calc = CalculatorState::new();
    calc.set_function("TAX+");
    press(&mut calc, "5+7");

    assert_eq!(calc.press_clear(), Some(ClearStage::Entry));
    assert_eq!(calc.display(), "0");
    assert_eq!(calc.pending_op(), Some(Op::Add));
    assert_eq!(calc.function_name(), "TAX+");

    assert_eq!(calc.press_clear(), Some(ClearStage::Operation));
    assert_eq!(calc.pending_op(), None);
    assert_eq!(calc.stored(), "");
    assert_eq!(calc.function_name(), "TAX+");

    assert_eq!(calc.press_clear(), Some(ClearStage::Function));
    assert_eq!(calc.function_name(), "");

    assert_eq!(calc.press_clear(), None);
    assert_eq!(calc, CalculatorState::new());
}

#[test]
fn clear_skips_entry_stage_when_display_is_fresh() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "3+");
    // Display shows "3" but it is not being edited.
    assert_eq!(calc.press_clear(), Some(ClearStage::Operation));
    assert_eq!(calc.display(), "3");
}

#[test]
fn clear_of_typed_zero_goes_to_next_stage() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "0");
    assert_eq!(calc.press_clear(), None);
}

#[test]
fn reset_restores_defaults() {
    let mut calc = CalculatorState::new();
    press(&mut calc, "12*");
    calc.set_function("PCT");
    calc.set_numpad_mode(true);
    calc.reset();
    assert_eq!(calc, CalculatorState::new());
}

#[test]
fn long_labels_are_truncated() {
    let mut calc = CalculatorState::new();
    calc.set_function("MUCHTOOLONGLABEL");
    assert_eq!(calc.function_name(), "MUCHTOOL");
}
