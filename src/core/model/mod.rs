//! In-memory element tree for workflow documents.

pub mod element;
pub mod kinds;
pub mod path;
pub mod slots;
pub mod walk;

pub use element::{Element, ElementKind, Node};
pub use kinds::{ChildSpec, Family, Shorthand, StepKind};
pub use path::{Path, PathParseError, Resolution, Segment, PLACEHOLDER};
pub use slots::{element_slots, step_slots, SlotShape, StepSlot};
pub use walk::{collect_paths, walk};

use rand::Rng;

/// Random identifier in the `<prefix>-<digits>` form used for new entities and steps.
pub fn random_id(prefix: &str, digits: usize) -> String {
    let digits = digits.clamp(1, 9) as u32;
    let upper = 10u32.pow(digits);
    let value = rand::thread_rng().gen_range(0..upper);
    format!("{}-{:0width$}", prefix, value, width = digits as usize)
}
