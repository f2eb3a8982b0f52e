use crate::coin::CoinId;
use crate::projection::{CoinSurface, CoinTransform};
use crate::shader::CoinInstance;

/// Keeps one GPU instance per live coin, indexed by [`CoinId`].
///
/// Removed coins leave an empty slot behind; ids are never reused.
#[derive(Debug, Default)]
pub struct InstanceSurface {
    slots: Vec<Option<CoinInstance>>,
}

impl InstanceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live instances in creation order, later coins drawn on top.
    pub fn instances(&self) -> impl Iterator<Item = &CoinInstance> {
        self.slots.iter().flatten()
    }

    /// Replace `out` with the live instances.
    pub fn collect_into(&self, out: &mut Vec<CoinInstance>) {
        out.clear();
        out.extend(self.instances().copied());
    }

    pub fn live_count(&self) -> usize {
        self.instances().count()
    }

    fn write(slot: &mut CoinInstance, transform: &CoinTransform) {
        let half = slot.size * 0.5;
        *slot = CoinInstance::new(
            [transform.translate.x + half, transform.translate.y + half],
            slot.size,
            transform.rotation_deg,
            transform.opacity,
        );
    }
}

impl CoinSurface for InstanceSurface {
    fn spawn(&mut self, id: CoinId, size: f32, initial: &CoinTransform) {
        let index = id.index();
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        let mut instance = CoinInstance::new([0.0, 0.0], size, 0.0, 0.0);
        Self::write(&mut instance, initial);
        self.slots[index] = Some(instance);
    }

    fn project(&mut self, id: CoinId, transform: &CoinTransform) {
        match self.slots.get_mut(id.index()) {
            Some(Some(slot)) => Self::write(slot, transform),
            _ => log::warn!("Projected coin {} has no instance", id.index()),
        }
    }

    fn discard(&mut self, id: CoinId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn transform(x: f32, y: f32, opacity: f32) -> CoinTransform {
        CoinTransform {
            translate: Vec2::new(x, y),
            rotation_deg: 90.0,
            opacity,
        }
    }

    #[test]
    fn test_spawn_project_discard() {
        let mut surface = InstanceSurface::new();
        surface.spawn(CoinId(0), 64.0, &transform(0.0, -50.0, 0.0));
        surface.spawn(CoinId(1), 100.0, &transform(200.0, -50.0, 0.0));
        assert_eq!(surface.live_count(), 2);

        surface.project(CoinId(1), &transform(210.0, 10.0, 0.5));
        let second = surface.instances().nth(1).copied().unwrap();
        assert_eq!(second.center, [260.0, 60.0]);
        assert_eq!(second.size, 100.0);
        assert_eq!(second.opacity, 0.5);

        surface.discard(CoinId(0));
        let mut out = Vec::new();
        surface.collect_into(&mut out);
        assert_eq!(out, vec![second]);
    }

    #[test]
    fn test_project_unknown_id_is_ignored() {
        let mut surface = InstanceSurface::new();
        surface.project(CoinId(3), &transform(0.0, 0.0, 1.0));
        surface.discard(CoinId(3));
        assert_eq!(surface.live_count(), 0);
    }
}
