//! Per-operator coverage: coercions, short-circuiting, and error paths.

mod common;

use common::*;
use knight::Error;

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn test_add() {
    assert_eq!(eval_int("+ 1 2"), 3);
    assert_eq!(eval_int("+ 1 '2'"), 3);
    assert_eq!(eval_int("+ 5 TRUE"), 6);
    assert_eq!(eval_int("+ 5 NULL"), 5);
    assert_eq!(eval_string("+ 'a' 'b'"), "ab");
    assert_eq!(eval_string("+ 'n=' 5"), "n=5");
    assert_eq!(eval_string("+ 'is ' TRUE"), "is true");
    assert_eq!(eval_err("+ TRUE 1"), Error::invalid_type('+', "boolean"));
    assert_eq!(eval_err("+ NULL 1"), Error::invalid_type('+', "null"));
}

#[test]
fn test_concat_empty_identities() {
    assert_eq!(eval_string("+ '' 'xyz'"), "xyz");
    assert_eq!(eval_string("+ 'xyz' ''"), "xyz");
    assert_eq!(eval_string("+ '' ''"), "");
}

#[test]
fn test_subtract() {
    assert_eq!(eval_int("- 5 3"), 2);
    assert_eq!(eval_int("- 3 5"), -2);
    assert_eq!(eval_err("- '5' 3"), Error::invalid_type('-', "string"));
}

#[test]
fn test_multiply() {
    assert_eq!(eval_int("* 6 7"), 42);
    assert_eq!(eval_int("* 6 '7'"), 42);
    assert_eq!(eval_string("* 'ab' 3"), "ababab");
    assert_eq!(eval_string("* 'ab' 0"), "");
    assert_eq!(eval_string("* 'ab' 1"), "ab");
    assert!(matches!(
        eval_err("* 'ab' - 0 1"),
        Error::DomainError { .. }
    ));
    assert_eq!(eval_err("* TRUE 2"), Error::invalid_type('*', "boolean"));
}

#[test]
fn test_divide() {
    assert_eq!(eval_int("/ 7 2"), 3);
    assert_eq!(eval_int("/ - 0 7 2"), -3);
    assert_eq!(eval_err("/ 1 0"), Error::DivisionByZero);
}

#[test]
fn test_modulo_signs() {
    assert_eq!(eval_int("% 7 3"), 1);
    assert_eq!(eval_err("% 7 0"), Error::DivisionByZero);
    assert_eq!(eval_err("% 7 - 0 3"), Error::NegativeDenominator);
}

#[test]
fn test_power() {
    assert_eq!(eval_int("^ 2 10"), 1024);
    assert_eq!(eval_int("^ 10 0"), 1);
    assert_eq!(eval_int("^ 0 0"), 1);
    assert_eq!(eval_int("^ 0 5"), 0);
    assert_eq!(eval_int("^ - 0 1 3"), -1);
    assert_eq!(eval_int("^ - 0 1 4"), 1);
    assert!(matches!(eval_err("^ 2 - 0 1"), Error::DomainError { .. }));
    assert_eq!(eval_err("^ 2 62"), Error::Overflow);
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn test_less_and_greater_integers() {
    assert!(eval_bool("< 1 2"));
    assert!(!eval_bool("< 2 1"));
    assert!(eval_bool("> 2 1"));
    // The right side coerces to the left side's type.
    assert!(eval_bool("< 5 '10'"));
}

#[test]
fn test_comparison_strings() {
    assert!(eval_bool("< 'abc' 'abd'"));
    assert!(eval_bool("< 'ab' 'abc'"));
    // Lexicographic, not numeric: "10" < "9".
    assert!(eval_bool("< '10' 9"));
    assert!(eval_bool("> 'b' 'a'"));
}

#[test]
fn test_comparison_booleans() {
    assert!(eval_bool("< FALSE TRUE"));
    assert!(!eval_bool("< TRUE TRUE"));
    assert!(eval_bool("> TRUE 0"));
}

#[test]
fn test_comparison_invalid_lhs() {
    assert_eq!(eval_err("< NULL 1"), Error::invalid_type('<', "null"));
    assert_eq!(eval_err("> NULL 1"), Error::invalid_type('>', "null"));
}

// =============================================================================
// Logic
// =============================================================================

#[test]
fn test_not() {
    assert!(!eval_bool("! TRUE"));
    assert!(eval_bool("! NULL"));
    assert!(eval_bool("! 0"));
    assert!(!eval_bool("! 'x'"));
    assert!(eval_bool("! !! ''"));
}

#[test]
fn test_and_short_circuits() {
    // A falsy left side is returned unchanged, right side untouched.
    assert_eq!(eval_int("& 0 QUIT 1"), 0);
    assert_eq!(eval_int("& 1 2"), 2);
    assert!(!eval_bool("& FALSE TRUE"));
    assert_eq!(eval_string("& 'yes' 'also'"), "also");
    eval_null("& NULL QUIT 1");
}

#[test]
fn test_or_short_circuits() {
    assert_eq!(eval_int("| 1 QUIT 1"), 1);
    assert_eq!(eval_int("| 0 2"), 2);
    assert_eq!(eval_string("| '' 'fallback'"), "fallback");
    assert!(eval_bool("| TRUE QUIT 1"));
}

// =============================================================================
// Control
// =============================================================================

#[test]
fn test_then_returns_rhs() {
    assert_eq!(eval_int("; 1 2"), 2);
    assert_eq!(eval_int("; O 'effect\\' 9"), 9);
}

#[test]
fn test_if_branches() {
    assert_eq!(eval_int("IF TRUE 1 2"), 1);
    assert_eq!(eval_int("IF FALSE 1 2"), 2);
    assert_eq!(eval_int("IF '' 1 2"), 2);
    assert_eq!(eval_int("IF 'x' 1 2"), 1);
}

#[test]
fn test_while_yields_null() {
    eval_null("WHILE FALSE QUIT 1");
    eval_null("; = i 3 WHILE i = i - i 1");
}

#[test]
fn test_assign_returns_value_and_updates() {
    assert_eq!(eval_int("= x 5"), 5);
    assert_eq!(eval_int("; = x 5 ; = x + x 1 x"), 6);
    assert_eq!(eval_err("= 1 2"), Error::invalid_type('=', "integer"));
}

#[test]
fn test_assign_does_not_evaluate_lhs() {
    // Were the left side evaluated, this would be an undefined variable.
    assert_eq!(eval_int("= never_seen_before 1"), 1);
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        eval_err("missing"),
        Error::UndefinedVariable {
            name: "missing".to_string()
        }
    );
}

#[test]
fn test_block_defers_side_effects() {
    // The QUIT inside the block must not run.
    assert_eq!(eval_int("; = b BLOCK QUIT 7 3"), 3);
}

#[test]
fn test_call_runs_deferred_assignment() {
    assert_eq!(eval_int("; = b BLOCK = x + x 1 ; = x 0 ; CALL b ; CALL b x"), 2);
}

#[test]
fn test_quit_range_check() {
    assert!(matches!(eval_err("QUIT 256"), Error::DomainError { .. }));
    assert!(matches!(eval_err("QUIT - 0 1"), Error::DomainError { .. }));
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn test_length() {
    assert_eq!(eval_int("L 'hello'"), 5);
    assert_eq!(eval_int("L ''"), 0);
    // Coerces first: 123 -> "123".
    assert_eq!(eval_int("L 123"), 3);
    assert_eq!(eval_int("L TRUE"), 4);
}

#[test]
fn test_ascii() {
    assert_eq!(eval_string("A 65"), "A");
    assert_eq!(eval_string("A 10"), "\n");
    assert_eq!(eval_int("A 'A'"), 65);
    assert_eq!(eval_int("A 'abc'"), 97);
    assert_eq!(eval_err("A ''"), Error::EmptyString);
    assert_eq!(eval_err("A 256"), Error::NotAnAsciiInteger { value: 256 });
    assert_eq!(
        eval_err("A - 0 1"),
        Error::NotAnAsciiInteger { value: -1 }
    );
    assert_eq!(eval_err("A TRUE"), Error::invalid_type('A', "boolean"));
}

#[test]
fn test_get() {
    assert_eq!(eval_string("G 'hello' 1 3"), "ell");
    assert_eq!(eval_string("G 'hello' 0 5"), "hello");
    // Non-string sources coerce first.
    assert_eq!(eval_string("G 12345 1 2"), "23");
    assert!(matches!(
        eval_err("G 'hello' - 0 1 2"),
        Error::DomainError { .. }
    ));
}

#[test]
fn test_set() {
    assert_eq!(eval_string("S 'hello' 1 3 'u'"), "huo");
    assert_eq!(eval_string("S 'hello' 0 0 '>'"), ">hello");
    assert_eq!(eval_string("S 'hello' 5 0 '!'"), "hello!");
    assert_eq!(eval_string("S 'hello' 0 5 ''"), "");
    assert_eq!(eval_string("S 'hello' 2 2 'xxx'"), "hexxxo");
    assert_eq!(
        eval_err("S 'hi' 1 5 'x'"),
        Error::OutOfBounds {
            index: 6,
            length: 2
        }
    );
}

// =============================================================================
// I/O-adjacent
// =============================================================================

#[test]
fn test_system_captures_stdout() {
    assert_eq!(eval_string("` 'printf hi'"), "hi");
}

#[test]
fn test_random_is_non_negative() {
    for _ in 0..8 {
        assert!(eval_int("R") >= 0);
    }
}
