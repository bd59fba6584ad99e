#![forbid(unsafe_code)]

//! Default step synthesis.
//!
//! When a ring collection arrives without authored steps the editor still
//! needs a narrative to play back. [`synthesize_steps`] derives one step per
//! ring, numbered by position. The result depends only on the input.

use crate::tutorial::{Ring, Step};

pub const SEED_STEP_TITLE: &str = "Start with the Seed Ring";
pub const SEED_STEP_DESCRIPTION: &str =
    "Begin with a single closed ring. This will be the foundation of your weave.";
pub const SEED_STEP_TIP: &str = "This is the starting ring of your custom weave";
pub const THREAD_TIP: &str = "Thread this ring through the connected rings";

/// One step per ring, `step_number` = 1-based position.
///
/// The first ring and any ring whose color role is `seed` get the
/// introductory step. Every other ring gets a generic "add ring" step that
/// highlights the first ring.
#[must_use]
pub fn synthesize_steps(rings: &[Ring]) -> Vec<Step> {
    let Some(first) = rings.first() else {
        return Vec::new();
    };

    (1u32..)
        .zip(rings)
        .map(|(step_number, ring)| {
            if step_number == 1 || ring.is_seed() {
                seed_step(step_number, ring)
            } else {
                add_ring_step(step_number, ring, &first.id)
            }
        })
        .collect()
}

fn seed_step(step_number: u32, ring: &Ring) -> Step {
    Step {
        step_number,
        title: SEED_STEP_TITLE.to_string(),
        description: SEED_STEP_DESCRIPTION.to_string(),
        rings_to_add: vec![ring.id.clone()],
        rings_to_highlight: None,
        tips: Some(vec![SEED_STEP_TIP.to_string()]),
    }
}

fn add_ring_step(step_number: u32, ring: &Ring, first_id: &str) -> Step {
    Step {
        step_number,
        title: format!("Add Ring {step_number}"),
        description: format!("Add {} to the weave.", ring.id),
        rings_to_add: vec![ring.id.clone()],
        rings_to_highlight: Some(vec![first_id.to_string()]),
        tips: Some(vec![THREAD_TIP.to_string()]),
    }
}
