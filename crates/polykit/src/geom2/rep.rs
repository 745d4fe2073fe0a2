//! Interchange representation: outer ring followed by hole rings, each a list of `[x, y]`.
//!
//! This is the only format the kernel reads and writes, and it is what the clip
//! engines exchange with `Poly`. Rings are implicitly closed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque metadata carried by a polygon through clones and derivations.
pub type Meta<M = Value> = BTreeMap<String, M>;

/// One ring of coordinate pairs.
pub type Ring = Vec<[f64; 2]>;

/// Ring 0 is the outer boundary, the rest are holes.
pub type RingSet = Vec<Ring>;

/// A polygon with holes plus its metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyRep<M = Value> {
    pub coordinates: RingSet,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: Meta<M>,
}

impl<M> PolyRep<M> {
    pub fn new(coordinates: RingSet) -> Self {
        Self {
            coordinates,
            meta: Meta::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_is_omitted_when_empty() {
        let rep: PolyRep = PolyRep::new(vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]]);
        let v = serde_json::to_value(&rep).unwrap();
        assert_eq!(v, json!({ "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]] }));
        let back: PolyRep = serde_json::from_value(v).unwrap();
        assert_eq!(back, rep);
    }

    #[test]
    fn meta_survives_serialization() {
        let mut rep: PolyRep = PolyRep::new(vec![vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]]]);
        rep.meta.insert("room".into(), json!("kitchen"));
        let s = serde_json::to_string(&rep).unwrap();
        assert!(s.contains("\"meta\":{\"room\":\"kitchen\"}"));
        let back: PolyRep = serde_json::from_str(&s).unwrap();
        assert_eq!(back.meta["room"], json!("kitchen"));
    }
}
