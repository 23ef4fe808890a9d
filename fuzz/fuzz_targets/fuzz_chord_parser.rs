//! Fuzz target for key chord parsing.
//!
//! Parsing must never panic, and any chord that parses must survive a
//! display/parse round trip.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plainpad::KeyEvent;

fuzz_target!(|data: &str| {
    let Ok(event) = data.parse::<KeyEvent>() else {
        return;
    };
    let shown = event.to_string();
    let reparsed = shown
        .parse::<KeyEvent>()
        .unwrap_or_else(|e| panic!("{shown:?} failed to reparse: {e}"));
    assert_eq!(reparsed.normalized(), event.normalized());
});
