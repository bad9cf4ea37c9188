#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Well-known layer ids used by the campus map.
pub const PLACES_LAYER: LayerId = LayerId(1);
pub const USER_POSITION_LAYER: LayerId = LayerId(2);

pub trait Layer {
    fn id(&self) -> LayerId;
}
