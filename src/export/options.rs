//! Export configuration.

use serde::{Deserialize, Serialize};

/// Field names, sampling locations and naming used by an export.
///
/// Missing keys take their defaults when deserialized, so a configuration
/// file only needs to list what differs:
///
/// ```rust
/// use mesh_flatmap::export::ExportOptions;
///
/// let opts = ExportOptions {
///     material_field: "nerve coordinates".into(),
///     ..Default::default()
/// };
/// assert_eq!(opts.coordinate_field, "coordinates");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Field providing 2-D (or higher) positions; only the first two
    /// components are used.
    pub coordinate_field: String,
    /// Field providing the material coordinates used to order branch points.
    pub material_field: String,
    /// Restricts branch offsets to one component of `material_field`. With
    /// `None` offsets are distances over the whole material vector.
    pub material_component: Option<usize>,
    /// Element-local coordinate sampled as a segment's start.
    pub start_xi: f64,
    /// Element-local coordinate sampled as a segment's end.
    pub end_xi: f64,
    /// Name given to elements that belong to no group.
    pub ungrouped_label: String,
    /// Groups that never become paths (e.g. marker groups).
    pub excluded_groups: Vec<String>,
    /// Identifier of the exported network.
    pub network_id: String,
    /// Type tag of the exported network.
    pub network_type: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            coordinate_field: "coordinates".to_string(),
            material_field: "vagus coordinates".to_string(),
            material_component: None,
            start_xi: 0.0,
            end_xi: 1.0,
            ungrouped_label: "ungrouped".to_string(),
            excluded_groups: vec!["marker".to_string()],
            network_id: "vagus".to_string(),
            network_type: "nerve".to_string(),
        }
    }
}

impl ExportOptions {
    /// Whether `group` is skipped as a path.
    pub fn is_excluded(&self, group: &str) -> bool {
        self.excluded_groups.iter().any(|g| g == group)
    }
}
