mod descriptor;
mod ids;
mod item;

pub use descriptor::Descriptor;
pub use ids::{ItemId, NodeId};
pub use item::{AudioFormat, ItemDetails, ItemKind, PlayableItem};
