//! Pointer-chain resolution from the module base to live entities.
//!
//! The play layer only exists while a level is loaded; the player and the
//! objects array hang off it. Resolution walks the chain top-down and stops
//! at the first null link, so nothing is ever read through a null parent.

use tracing::trace;

use crate::offset::OffsetTable;
use crate::process::{ReadMemory, RemoteMemory};

/// Address of an entity that was live when it was resolved.
///
/// Never zero: a null pointer resolves to `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(u64);

impl EntityHandle {
    pub fn new(address: u64) -> Option<Self> {
        (address != 0).then_some(Self(address))
    }

    pub fn address(self) -> u64 {
        self.0
    }

    /// Address of a field inside this entity
    pub fn field(self, offset: u64) -> u64 {
        self.0.wrapping_add(offset)
    }
}

/// The object pointer array and how many slots to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectsArray {
    pub handle: EntityHandle,
    pub count: u32,
}

/// Everything resolved for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedEntities {
    pub play_layer: Option<EntityHandle>,
    pub player: Option<EntityHandle>,
    pub objects: Option<ObjectsArray>,
}

pub struct EntityLocator<'a, R: ReadMemory + ?Sized> {
    memory: RemoteMemory<'a, R>,
    module_base: u64,
    offsets: &'a OffsetTable,
    object_scan_limit: u32,
}

impl<'a, R: ReadMemory + ?Sized> EntityLocator<'a, R> {
    pub fn new(
        reader: &'a R,
        module_base: u64,
        offsets: &'a OffsetTable,
        object_scan_limit: u32,
    ) -> Self {
        Self {
            memory: RemoteMemory::new(reader, offsets.pointer_width),
            module_base,
            offsets,
            object_scan_limit,
        }
    }

    pub fn memory(&self) -> &RemoteMemory<'a, R> {
        &self.memory
    }

    pub fn offsets(&self) -> &OffsetTable {
        self.offsets
    }

    pub fn play_layer(&self) -> Option<EntityHandle> {
        EntityHandle::new(
            self.memory
                .read_pointer(self.module_base.wrapping_add(self.offsets.playlayer)),
        )
    }

    /// Resolve the whole chain from scratch
    pub fn resolve(&self) -> ResolvedEntities {
        let Some(play_layer) = self.play_layer() else {
            trace!("Play layer is null, no level loaded");
            return ResolvedEntities::default();
        };

        let player = EntityHandle::new(
            self.memory
                .read_pointer(play_layer.field(self.offsets.player_object)),
        );

        let objects = EntityHandle::new(
            self.memory
                .read_pointer(play_layer.field(self.offsets.objects_array)),
        )
        .map(|handle| ObjectsArray {
            handle,
            count: self.object_count(play_layer),
        });

        ResolvedEntities {
            play_layer: Some(play_layer),
            player,
            objects,
        }
    }

    fn object_count(&self, play_layer: EntityHandle) -> u32 {
        let raw = self
            .memory
            .read_i32(play_layer.field(self.offsets.object_count));
        clamp_count(raw, self.object_scan_limit)
    }
}

/// Negative counts are garbage and count as zero
fn clamp_count(raw: i32, limit: u32) -> u32 {
    u32::try_from(raw).unwrap_or(0).min(limit)
}
