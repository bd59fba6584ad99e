#![no_main]

use chainmail_core::{Tutorial, is_valid_tutorial_name, to_dash_case};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    let id = to_dash_case(name);
    assert!(
        id.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'),
        "unsafe id {id:?}"
    );
    assert!(!id.contains("--"));
    assert_eq!(to_dash_case(&id), id);
    assert_eq!(is_valid_tutorial_name(name), !id.is_empty());

    let tutorial = Tutorial::new_named(name);
    assert_eq!(tutorial.metadata.id, id);
    assert_eq!(tutorial.file_name(), format!("{id}.json"));
});
