use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Linear color components in the 0.0..=1.0 range Unity uses.
///
/// Only three or four components are accepted; any other array length is
/// rejected while the tool arguments are bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MaterialColor {
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}
