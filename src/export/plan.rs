//! Network plan: the connectivity record handed to the flatmap renderer.

use crate::algs::network::Network;
use crate::export::analyze::GroupIdentity;
use crate::export::options::ExportOptions;
use serde::{Serialize, Serializer};

/// One centreline of the plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Centreline {
    /// Drawing identifier, `nerve_feature_NN`.
    pub id: String,
    /// Anatomical group name.
    pub label: String,
    /// Canonical point labels, start to end.
    pub connects: Vec<String>,
}

/// Serializes as `{"id": .., "type": .., "centrelines": [..]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkPlan {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub centrelines: Vec<Centreline>,
}

impl NetworkPlan {
    /// Plan for `network`, one centreline per edge in edge order.
    ///
    /// Groups without an identity fall back to their name as id.
    pub fn new(network: &Network, identities: &[GroupIdentity], options: &ExportOptions) -> Self {
        let centrelines = network
            .edges()
            .iter()
            .map(|edge| Centreline {
                id: identities
                    .iter()
                    .find(|i| i.name == edge.group)
                    .map_or_else(|| edge.group.clone(), |i| i.id.clone()),
                label: edge.group.clone(),
                connects: edge.labels.clone(),
            })
            .collect();
        Self {
            id: options.network_id.clone(),
            kind: options.network_type.clone(),
            centrelines,
        }
    }
}

/// Drawing record of one centreline group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Anatomical group name.
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Feature records keyed by drawing identifier, in group order.
///
/// Serializes as a map `{"nerve_feature_NN": {"label": .., "type": "centreline"}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Features(Vec<(String, Feature)>);

impl Features {
    pub fn new(identities: &[GroupIdentity]) -> Self {
        Self(
            identities
                .iter()
                .map(|i| {
                    let feature = Feature {
                        label: i.name.clone(),
                        kind: "centreline".to_string(),
                    };
                    (i.id.clone(), feature)
                })
                .collect(),
        )
    }

    /// Feature drawn under `id`.
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.0.iter().map(|(k, f)| (k.as_str(), f))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Features {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Properties record handed to the renderer alongside the drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlatmapProperties {
    pub features: Features,
    pub networks: Vec<NetworkPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::network::assemble_network;
    use crate::geometry::point::Point2;

    #[test]
    fn plan_follows_network_edges() {
        let net = assemble_network(
            &[
                ("left", Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
                ("right", Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)),
            ],
            &[],
        );
        let identities = [GroupIdentity {
            name: "left".into(),
            label: "group_1".into(),
            id: "nerve_feature_1".into(),
        }];
        let plan = NetworkPlan::new(&net, &identities, &ExportOptions::default());

        assert_eq!(plan.id, "vagus");
        assert_eq!(plan.kind, "nerve");
        assert_eq!(plan.centrelines[0].id, "nerve_feature_1");
        assert_eq!(plan.centrelines[0].connects, ["point_1", "point_2"]);
        assert_eq!(plan.centrelines[1].id, "right");
        assert_eq!(plan.centrelines[1].connects, ["point_2", "point_3"]);
    }

    #[test]
    fn features_are_keyed_by_drawing_id() {
        let identities = [
            GroupIdentity {
                name: "left".into(),
                label: "group_1".into(),
                id: "nerve_feature_1".into(),
            },
            GroupIdentity {
                name: "right".into(),
                label: "group_2".into(),
                id: "nerve_feature_2".into(),
            },
        ];
        let features = Features::new(&identities);
        assert_eq!(features.len(), 2);
        assert_eq!(features.get("nerve_feature_2").unwrap().label, "right");

        let json = serde_json::to_string(&features).unwrap();
        assert_eq!(
            json,
            r#"{"nerve_feature_1":{"label":"left","type":"centreline"},"nerve_feature_2":{"label":"right","type":"centreline"}}"#
        );
    }
}
