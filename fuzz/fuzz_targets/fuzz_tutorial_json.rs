#![no_main]

use chainmail_core::Tutorial;
use chainmail_runtime::EditorStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tutorial) = Tutorial::from_json_str(text) else {
        return;
    };
    let mut store = EditorStore::from_tutorial(tutorial.clone());
    assert_eq!(store.rings(), tutorial.rings.as_slice());

    // Fresh ids never collide with whatever the document contained.
    let id = store.add_ring();
    assert_eq!(store.rings().iter().filter(|r| r.id == id).count(), 1);
    assert!(store.undo());
    assert_eq!(store.rings(), tutorial.rings.as_slice());

    if let Ok(json) = store.export_json() {
        let again = Tutorial::from_json_str(&json).expect("exported JSON must parse");
        assert_eq!(again.rings.len(), tutorial.rings.len());
        assert_eq!(again.metadata.id, tutorial.metadata.id);
    }
});
