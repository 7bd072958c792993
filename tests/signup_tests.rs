// Host-side tests for the newsletter widget's validation and state machine.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod ocean_core;

use ocean_core::signup::*;

#[test]
fn email_rule_matches_widget() {
    for ok in ["a@b.co", "first.last@mail.example.org", "x@y.z.io"] {
        assert!(is_valid_email(ok), "{ok} should be valid");
    }
    for bad in ["", "@b.co", "a@.co", "a@b.c", "a@bco", "plain", "a@b."] {
        assert!(!is_valid_email(bad), "{bad} should be invalid");
    }
}

#[test]
fn typing_moves_between_input_states() {
    let s = SignupState::from_input("");
    assert_eq!(s, SignupState::Empty);
    let s = s.on_input("me@");
    assert_eq!(s, SignupState::Invalid);
    assert!(!s.submit_visible());
    let s = s.on_input("me@sea.io");
    assert_eq!(s, SignupState::Valid);
    assert!(s.submit_visible());
    assert_eq!(s.message(), None);
}

#[test]
fn only_valid_input_submits() {
    assert_eq!(SignupState::Invalid.on_submit(), None);
    assert_eq!(SignupState::Empty.on_submit(), None);
    assert_eq!(SignupState::Valid.on_submit(), Some(SignupState::Submitting));
    assert_eq!(SignupState::Submitting.message(), Some(MSG_SUBMITTING));
}

#[test]
fn success_is_final() {
    let s = SignupState::Submitting.on_response(true);
    assert_eq!(s, SignupState::Succeeded);
    assert_eq!(s.message(), Some(MSG_SUCCESS));
    assert_eq!(s.on_input(""), SignupState::Succeeded);
    assert_eq!(s.on_failure_timeout("a@b.co"), SignupState::Succeeded);
}

#[test]
fn failure_reopens_the_form() {
    let s = SignupState::Submitting.on_response(false);
    assert_eq!(s, SignupState::Failed);
    assert_eq!(s.message(), Some(MSG_FAILURE));
    assert_eq!(s.on_failure_timeout("a@b.co"), SignupState::Valid);
    assert_eq!(s.on_failure_timeout(""), SignupState::Empty);
    assert_eq!(FAILURE_RESET_MS, 2000);
}

#[test]
fn input_is_ignored_while_submitting() {
    assert_eq!(SignupState::Submitting.on_input(""), SignupState::Submitting);
    assert_eq!(SignupState::Valid.on_response(true), SignupState::Valid);
}

#[test]
fn request_body_is_json_with_escaping() {
    assert_eq!(request_body("a@b.co"), r#"{"email":"a@b.co"}"#);
    assert_eq!(request_body(r#"a"b\c@d.ef"#), r#"{"email":"a\"b\\c@d.ef"}"#);
}
