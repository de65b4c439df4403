//! OSC Batch Sink (collaborator contract, §4.7): the core produces an
//! ordered sequence of per-track position updates; wire encoding is a
//! pure function over that sequence, kept separate from the `send`
//! callback so it can be unit tested without a real socket.

use sm_core::{CoordinateSystem, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscEntry {
    pub track_external_index: u32,
    pub position: Position,
    pub coordinate_system: CoordinateSystem,
}

/// One flush's worth of pending OSC messages, in emission order.
#[derive(Debug, Clone, Default)]
pub struct OscBatch {
    pub messages: Vec<OscEntry>,
}

impl OscBatch {
    pub fn push(&mut self, entry: OscEntry) {
        self.messages.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Drain this batch into a fresh, empty one, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Translate one entry to its wire address and argument list:
/// `/track/{index}/position` with three floats, either Cartesian metres
/// or azimuth/elevation/distance depending on the animation's declared
/// coordinate system.
fn to_osc_message(entry: &OscEntry) -> rosc::OscMessage {
    let args = match entry.coordinate_system {
        CoordinateSystem::Xyz => vec![
            rosc::OscType::Float(entry.position.x as f32),
            rosc::OscType::Float(entry.position.y as f32),
            rosc::OscType::Float(entry.position.z as f32),
        ],
        CoordinateSystem::Polar => {
            let (azimuth, elevation, distance) = entry.position.to_spherical();
            vec![
                rosc::OscType::Float(azimuth as f32),
                rosc::OscType::Float(elevation as f32),
                rosc::OscType::Float(distance as f32),
            ]
        }
    };
    rosc::OscMessage {
        addr: format!("/track/{}/position", entry.track_external_index),
        args,
    }
}

/// Encode every message in `batch` as an independent OSC packet. One
/// packet per message rather than a bundle: the transport's ordering
/// guarantee (§5) is per-track-per-animation emission order, which a
/// plain ordered `Vec` of packets already preserves.
pub fn encode_batch(batch: &OscBatch) -> Result<Vec<Vec<u8>>, rosc::OscError> {
    batch
        .messages
        .iter()
        .map(|entry| rosc::encoder::encode(&rosc::OscPacket::Message(to_osc_message(entry))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_encodes_to_empty_vec() {
        let batch = OscBatch::default();
        assert!(encode_batch(&batch).unwrap().is_empty());
    }

    #[test]
    fn take_drains_and_resets() {
        let mut batch = OscBatch::default();
        batch.push(OscEntry {
            track_external_index: 1,
            position: Position::ORIGIN,
            coordinate_system: CoordinateSystem::Xyz,
        });
        let drained = batch.take();
        assert_eq!(drained.len(), 1);
        assert!(batch.is_empty());
    }

    #[test]
    fn encodes_one_packet_per_message_preserving_order() {
        let mut batch = OscBatch::default();
        for i in 0..3u32 {
            batch.push(OscEntry {
                track_external_index: i,
                position: Position::new(i as f64, 0.0, 0.0),
                coordinate_system: CoordinateSystem::Xyz,
            });
        }
        let encoded = encode_batch(&batch).unwrap();
        assert_eq!(encoded.len(), 3);
        assert!(encoded.iter().all(|packet| !packet.is_empty()));
    }
}
