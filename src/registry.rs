use crate::interaction::descriptor::Axis;
use crate::scene_graph::ObjectId;

/// Membership lists filled once by the binder. Read-only afterwards.
#[derive(Debug, Default)]
pub struct InteractiveRegistry {
    pub raycast_targets: Vec<ObjectId>,
    pub spin: Vec<ObjectId>,
    pub hover_scale: Vec<ObjectId>,
    pub keycaps: Vec<(String, ObjectId)>,
    pub scale_lights: Vec<ObjectId>,
    pub fans_x: Vec<ObjectId>,
    pub fans_y: Vec<ObjectId>,
    pub fans_z: Vec<ObjectId>,
    pub themed: Vec<ObjectId>,
    pub glass: Vec<ObjectId>,
    pub steam: Vec<ObjectId>,

    pub hour_hand: Option<ObjectId>,
    pub minute_hand: Option<ObjectId>,
    pub whiteboard: Option<ObjectId>,
    pub screen: Option<ObjectId>,
    pub cup_lid: Option<ObjectId>,
    pub mailbox_cover: Option<ObjectId>,
    pub mailbox_flag: Option<ObjectId>,
}

impl InteractiveRegistry {
    pub fn fan_list_mut(&mut self, axis: Axis) -> &mut Vec<ObjectId> {
        match axis {
            Axis::X => &mut self.fans_x,
            Axis::Y => &mut self.fans_y,
            Axis::Z => &mut self.fans_z,
        }
    }

    pub fn fans(&self) -> impl Iterator<Item = (ObjectId, Axis)> + '_ {
        let x = self.fans_x.iter().map(|id| (*id, Axis::X));
        let y = self.fans_y.iter().map(|id| (*id, Axis::Y));
        let z = self.fans_z.iter().map(|id| (*id, Axis::Z));
        x.chain(y).chain(z)
    }

    pub fn is_spin_target(&self, object: ObjectId) -> bool {
        self.spin.contains(&object)
    }

    pub fn keycaps_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = ObjectId> + 'a {
        self.keycaps
            .iter()
            .filter(move |(label, _)| label == key)
            .map(|(_, id)| *id)
    }
}
