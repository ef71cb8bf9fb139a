use haltalks::commands::Command;
use haltalks::core::{Responder, Rule};
use haltalks::terminal::UserEvent;
use proptest::prelude::*;
use std::time::Instant;

const FALLBACKS: [&str; 2] = ["Is everything OK?", "Can you still communicate?"];

#[test]
fn test_garbage_input_flood() {
    let responder = Responder::hal9000().expect("default rules compile");

    // Simulate a flood of random garbage text
    let garbage = [
        "asdfghjkl",
        "!!! @@@ ###",
        "1234567890",
        "%1 %2 %9 %",
        "extremely long string that doesn't mean anything to the system at all but might cause buffer issues if we were in C but we are in Rust so it's just a long string",
        "",
        " ",
        "\u{1F916}\u{1F916}\u{1F916}",
    ];

    for text in garbage {
        let reply = responder.respond(text);
        assert!(FALLBACKS.contains(&reply.as_str()), "{:?} -> {}", text, reply);
    }

    let start = Instant::now();
    for i in 0..1000 {
        let _ = responder.respond(garbage[i % garbage.len()]);
    }
    println!("Answered 1000 inputs in {:?}", start.elapsed());

    // Stability check: responder still matches real rules
    assert_eq!(responder.matching_rule("You are scary"), Some(0));
}

#[test]
fn test_custom_table_without_catch_all_still_answers() {
    let responder = Responder::new(vec![Rule::new("ping", &["pong"])]).expect("compile");
    assert_eq!(responder.respond("ping"), "pong");
    assert!(FALLBACKS.contains(&responder.respond("pong").as_str()));
}

proptest! {
    #[test]
    fn prop_respond_never_fails(input in any::<String>()) {
        let responder = Responder::hal9000().expect("default rules compile");
        let reply = responder.respond(&input);
        prop_assert!(!reply.is_empty());
    }

    #[test]
    fn prop_unmatched_input_hits_catch_all(input in "[b-xz0-9 ,.!]{0,40}") {
        let responder = Responder::hal9000().expect("default rules compile");
        let reply = responder.respond(&input);
        prop_assert!(FALLBACKS.contains(&reply.as_str()));
    }

    #[test]
    fn prop_you_are_rule_substitutes(word in "(worrying|scary|disturbing)", tail in "[ .!]{0,5}") {
        let responder = Responder::hal9000().expect("default rules compile");
        let reply = responder.respond(&format!("You are {}{}", word, tail));
        let yes_i_am = format!("Yes, I am {}.", word);
        let oh_sooo = format!("Oh, sooo {}.", word);
        prop_assert!(reply == yes_i_am || reply == oh_sooo);
    }

    #[test]
    fn prop_event_and_command_parsing_never_panic(line in any::<String>()) {
        if let Some(UserEvent::Command(text)) = UserEvent::parse(&line) {
            let _ = Command::parse(&text);
        }
    }
}
