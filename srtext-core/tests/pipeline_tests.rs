// srtext-core/tests/pipeline_tests.rs
//! End-to-end checks of raw text -> sanitizer -> history.

use test_log::test;

use srtext_core::{
    find_name_by_icon_index, sanitize_general, sanitize_name_box, Announcement, Announcer, DatabaseEntry,
    DatabaseKind, ReferenceTable, ReferenceTables, Speaker,
};

/// A spread of markup-heavy inputs, including malformed and nested tokens.
fn noisy_inputs() -> Vec<String> {
    let fragments = [
        "<WordWrap>", "<br>", "<BR>", "<CENTER>", "<SIMPLE>", "RESETCOLOR", "RESET", "COLOR",
        r"\c[3]", r"\\c[12]", "c[7]", r"\c", "\u{1b}", "\u{7f}", "{", "}", "^", r"\I[4]", "Hero",
        " says hi.", "<", ">", "[", "]", "\\",
    ];
    let mut inputs = Vec::new();
    for (i, a) in fragments.iter().enumerate() {
        for (j, b) in fragments.iter().enumerate() {
            let c = fragments[(i * 7 + j * 3) % fragments.len()];
            inputs.push(format!("{a}{b}{c}{a}"));
        }
    }
    inputs
}

#[test]
fn test_general_sanitizer_is_idempotent() {
    for raw in noisy_inputs() {
        let once = sanitize_general(&raw);
        assert_eq!(sanitize_general(&once), once, "input {raw:?}");
    }
}

#[test]
fn test_general_output_has_no_known_tokens() {
    for raw in noisy_inputs() {
        let out = sanitize_general(&raw);
        for token in ["<br>", "<BR>", "<WordWrap>", "<CENTER>", "<SIMPLE>", "RESETCOLOR", "{", "}", "^", "\u{1b}"] {
            assert!(!out.contains(token), "{token:?} left in {out:?} from {raw:?}");
        }
    }
}

#[test]
fn test_name_box_output_character_class() {
    for raw in noisy_inputs() {
        let out = sanitize_name_box(&raw);
        assert!(
            out.chars().all(|c| c.is_alphanumeric() || c == '_' || ".,?!* -".contains(c)),
            "{out:?} from {raw:?}"
        );
    }
}

#[test]
fn test_icon_priority_across_all_tables() {
    let tables: Vec<ReferenceTable> = DatabaseKind::ICON_PRIORITY
        .iter()
        .map(|kind| ReferenceTable::new(*kind, vec![None, Some(DatabaseEntry::with_icon(10, kind.to_string()))]))
        .collect();

    assert_eq!(find_name_by_icon_index(10, &tables), Some("items"));
    assert_eq!(find_name_by_icon_index(10, &tables[1..]), Some("weapons"));
    assert_eq!(find_name_by_icon_index(10, &tables[3..]), Some("skills"));
    assert_eq!(find_name_by_icon_index(10, &tables[4..]), Some("states"));
}

#[test]
fn test_rolling_history_through_announcer() {
    let mut announcer = Announcer::with_defaults().unwrap();
    for page in 0..=21 {
        announcer.announce(&Announcement::text(format!("This is page {page}<br>")));
    }
    let entries = announcer.log().entries();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0], "This is page 21 ");
}

#[test]
fn test_repeated_message_from_two_paths_is_logged_once() {
    let mut announcer = Announcer::with_defaults().unwrap();
    let page = Announcement::Message {
        body: "This message will be repeated".to_string(),
        speaker: None,
    };
    announcer.announce(&page);
    announcer.announce(&Announcement::text("This message will be repeated"));
    announcer.announce(&Announcement::text("This will be a unique, separate message."));

    assert_eq!(
        announcer.log().entries(),
        vec!["This will be a unique, separate message.", "This message will be repeated"]
    );
}

#[test]
fn test_full_message_with_colour_name_and_reset_tokens() {
    let tables = ReferenceTables::new();
    let mut announcer = Announcer::new(Box::new(srtext_core::MarkupEngine::with_defaults().unwrap()), tables);
    let spoken = announcer.announce(&Announcement::Message {
        body: "No matter how c[12]darkRESETCOLOR the night, the c[2]morningRESETCOLOR always comes.".to_string(),
        speaker: Some(Speaker::NameBox(r"\c[15]<Lulu>RESETCOLOR".to_string())),
    });
    assert_eq!(spoken, "Lulu: No matter how dark the night, the morning always comes.");
}
