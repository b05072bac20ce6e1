use orrery_engine::EntityId;
use crate::bodies::SpinAxis;

/// Handle to one animated body and, for planets, the pivot that carries it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyHandle {
    pub name: &'static str,
    pub body: EntityId,
    /// `None` for the sun.
    pub pivot: Option<EntityId>,
    pub spin_rate: f32,
    pub spin_axis: SpinAxis,
    pub revolution_rate: f32,
    pub orbital_distance: f32,
}

/// Everything the scene builder created, in build order.
///
/// The animation tick only touches `sun` and `planets`; the rest is kept so
/// callers and tests can find static decorations.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    pub backdrop: EntityId,
    pub sun: BodyHandle,
    pub planets: Vec<BodyHandle>,
    pub orbit_rings: Vec<EntityId>,
    pub asteroid_field: EntityId,
    /// Moons and ring decorations, each parented to a planet body.
    pub attachments: Vec<(&'static str, EntityId)>,
}

impl BodyRegistry {
    /// Sun first, then planets in orbit order.
    pub fn bodies(&self) -> impl Iterator<Item = &BodyHandle> {
        std::iter::once(&self.sun).chain(self.planets.iter())
    }

    pub fn pivots(&self) -> impl Iterator<Item = (EntityId, f32)> + '_ {
        self.planets
            .iter()
            .filter_map(|p| p.pivot.map(|pivot| (pivot, p.revolution_rate)))
    }
}

#[cfg(test)]
impl BodyRegistry {
    pub fn planet(&self, name: &str) -> Option<&BodyHandle> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn attachment(&self, name: &str) -> Option<EntityId> {
        self.attachments.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &'static str, body: u32, pivot: Option<u32>) -> BodyHandle {
        BodyHandle {
            name,
            body: EntityId(body),
            pivot: pivot.map(EntityId),
            spin_rate: 0.01,
            spin_axis: SpinAxis::Y,
            revolution_rate: 0.002,
            orbital_distance: 100.0,
        }
    }

    #[test]
    fn lookup_and_iteration() {
        let registry = BodyRegistry {
            backdrop: EntityId(1),
            sun: handle("sun", 2, None),
            planets: vec![handle("mercury", 4, Some(3)), handle("earth", 6, Some(5))],
            orbit_rings: vec![],
            asteroid_field: EntityId(9),
            attachments: vec![("moon", EntityId(7))],
        };

        assert_eq!(registry.planet("earth").map(|p| p.body), Some(EntityId(6)));
        assert!(registry.planet("pluto").is_none());
        assert_eq!(registry.attachment("moon"), Some(EntityId(7)));

        let names: Vec<_> = registry.bodies().map(|b| b.name).collect();
        assert_eq!(names, ["sun", "mercury", "earth"]);
        let pivots: Vec<_> = registry.pivots().map(|(id, _)| id).collect();
        assert_eq!(pivots, [EntityId(3), EntityId(5)]);
    }
}
