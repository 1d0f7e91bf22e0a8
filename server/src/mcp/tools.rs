pub mod material;

pub use material::{MATERIAL_REMOVED_MESSAGE, register_material_tools};

use crate::mcp_types::MaterialColor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetMaterialRequest {
    /// Target game object.
    pub object_name: String,

    /// Optional material name.
    #[serde(default)]
    pub material_name: Option<String>,

    /// Optional [R, G, B] or [R, G, B, A] values.
    #[serde(default)]
    pub color: Option<MaterialColor>,

    /// Whether to create the material if it doesn't exist.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

fn default_create_if_missing() -> bool {
    true
}
