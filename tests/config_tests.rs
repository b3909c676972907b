// Host-side tests for query-string configuration.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod noel {
    pub mod config {
        include!("../src/core/config.rs");
    }
}

use noel::config::*;

#[test]
fn defaults_without_query() {
    let cfg = SceneConfig::from_query("");
    assert_eq!(cfg, SceneConfig::default());
    assert!(cfg.show_ground_plane);
    assert!(!cfg.preemptive_unlock);
    assert_eq!(cfg.greeting_lines(), vec!["Merry Christmas!", "圣诞快乐"]);
}

#[test]
fn greeting_is_percent_decoded() {
    let cfg = SceneConfig::from_query("?t=Hello%20World");
    assert_eq!(cfg.greeting, "Hello World");
    assert_eq!(cfg.greeting_lines(), vec!["Hello World"]);
}

#[test]
fn empty_greeting_keeps_default() {
    let cfg = SceneConfig::from_query("?t=&ground=0");
    assert_eq!(cfg.greeting, DEFAULT_GREETING);
    assert!(!cfg.show_ground_plane);
}

#[test]
fn encoded_newline_splits_lines() {
    let cfg = SceneConfig::from_query("t=Happy%0AHolidays");
    assert_eq!(cfg.greeting_lines(), vec!["Happy", "Holidays"]);
}

#[test]
fn markup_stays_literal() {
    let cfg = SceneConfig::from_query("?t=%3Cb%3Ehi%3C%2Fb%3E");
    assert_eq!(cfg.greeting, "<b>hi</b>");
}

#[test]
fn flags() {
    let cfg = SceneConfig::from_query("?ground=off&unlock=1");
    assert!(!cfg.show_ground_plane);
    assert!(cfg.preemptive_unlock);

    let cfg = SceneConfig::from_query("?ground=TRUE&unlock=no");
    assert!(cfg.show_ground_plane);
    assert!(!cfg.preemptive_unlock);

    // unparsable values fall back to defaults
    let cfg = SceneConfig::from_query("?ground=maybe&unlock=2");
    assert!(cfg.show_ground_plane);
    assert!(!cfg.preemptive_unlock);
}

#[test]
fn first_value_wins() {
    let cfg = SceneConfig::from_query("?t=one&t=two");
    assert_eq!(cfg.greeting, "one");
}

#[test]
fn query_param_lookup() {
    assert_eq!(query_param("?a=1&b=2", "b"), Some("2".to_string()));
    assert_eq!(query_param("a=1", "missing"), None);
    assert_eq!(query_param("?flag&x=1", "flag"), Some(String::new()));
    assert_eq!(query_param("", "t"), None);
}

#[test]
fn percent_decode_cases() {
    assert_eq!(percent_decode("%E5%9C%A3"), "圣");
    assert_eq!(percent_decode("100%"), "100%");
    assert_eq!(percent_decode("%zz"), "%zz");
    assert_eq!(percent_decode("a%2"), "a%2");
    assert_eq!(percent_decode("%FF"), "\u{FFFD}");
    assert_eq!(percent_decode("plain"), "plain");
}
