//! Per-domain section orders.

pub(crate) mod lore;
pub(crate) mod monster;
pub(crate) mod npc;
pub(crate) mod prose;
