#![no_main]

use arbitrary::Arbitrary;
use chainmail_core::{KeyCode, KeyEvent, Modifiers, Ring, RingPatch};
use chainmail_runtime::{Axis, CommandRouter, EditorStore, TransformPhase};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Add,
    Duplicate(u8),
    Delete(u8),
    Select(u8),
    Move { ring: u8, x: i8, y: i8, z: i8, commit: bool },
    InvertAll(u8),
    InvertAxis(u8, u8),
    Gauge(u8, u8),
    Toggle(u8),
    HideOthers(u8),
    ShowAll,
    AddStep,
    DeleteStep(u8),
    Undo,
    Redo,
    Key { ch: u8, ctrl: bool, shift: bool, focused: bool },
}

fn target(store: &EditorStore, index: u8) -> String {
    let rings = store.rings();
    if rings.is_empty() {
        // Unknown ids must be harmless.
        format!("ring-{index}")
    } else {
        rings[usize::from(index) % rings.len()].id.clone()
    }
}

fn axis(a: u8) -> Axis {
    match a % 3 {
        0 => Axis::X,
        1 => Axis::Y,
        _ => Axis::Z,
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let router = CommandRouter::with_defaults();
    let mut store = EditorStore::new(vec![Ring::with_default_geometry("ring-1")], None);

    for op in ops.into_iter().take(256) {
        match op {
            Op::Add => {
                store.add_ring();
            }
            Op::Duplicate(i) => {
                let id = target(&store, i);
                store.duplicate_ring(&id);
            }
            Op::Delete(i) => {
                let id = target(&store, i);
                store.delete_ring(&id);
            }
            Op::Select(i) => {
                let id = target(&store, i);
                store.select_ring(Some(&id));
            }
            Op::Move { ring, x, y, z, commit } => {
                let id = target(&store, ring);
                let phase = if commit {
                    TransformPhase::Commit
                } else {
                    TransformPhase::Preview
                };
                let position = [f64::from(x) / 8.0, f64::from(y) / 8.0, f64::from(z) / 8.0];
                store.update_ring_transform(&id, position, [0.0; 3], phase);
            }
            Op::InvertAll(i) => {
                let id = target(&store, i);
                store.invert_ring_rotation(&id);
            }
            Op::InvertAxis(i, a) => {
                let id = target(&store, i);
                store.invert_ring_rotation_axis(&id, axis(a));
            }
            Op::Gauge(i, g) => {
                let id = target(&store, i);
                store.update_ring(&id, &RingPatch::new().wire_gauge(f64::from(g) / 100.0));
            }
            Op::Toggle(i) => {
                let id = target(&store, i);
                store.toggle_ring_visibility(&id);
            }
            Op::HideOthers(i) => {
                let id = target(&store, i);
                store.hide_other_rings(&id);
            }
            Op::ShowAll => store.show_all_rings(),
            Op::AddStep => {
                store.add_step();
            }
            Op::DeleteStep(n) => store.delete_step(u32::from(n)),
            Op::Undo => {
                store.undo();
            }
            Op::Redo => {
                store.redo();
            }
            Op::Key { ch, ctrl, shift, focused } => {
                let mut modifiers = Modifiers::NONE;
                if ctrl {
                    modifiers |= Modifiers::CTRL;
                }
                if shift {
                    modifiers |= Modifiers::SHIFT;
                }
                let event = KeyEvent::new(KeyCode::Char(char::from(ch))).with_modifiers(modifiers);
                router.dispatch(&event, focused, &mut store);
            }
        }

        // Post-conditions that must always hold:
        let mut ids: Vec<&str> = store.rings().iter().map(|r| r.id.as_str()).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count, "duplicate ring ids");
        assert!(store.history().total_snapshots() <= 50, "history bound exceeded");
        let numbers: Vec<u32> = store.steps().iter().map(|s| s.step_number).collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "steps out of order");
    }
});
