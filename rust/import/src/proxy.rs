// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proxy substitution: replace schematic buildings with authored models.
//!
//! Cadastral data encodes some structures (pylons, wind turbines) as plain
//! buildings with a function code. Those look wrong when extruded, so they
//! are replaced by a placed, scaled reference to an authored model file.

use citygml_scene_graph::{Matrix4, Node, ProxyNode, TransformNode};
use citygml_scene_model::{CityObject, CityObjectType, Vector3};
use tracing::warn;

use crate::offset::center_and_direction;

/// One substitutable model variant, selected by measured height.
struct ProxyVariant {
    /// Lowest measured height this variant applies to.
    min_height: f64,
    /// Authored model file the host resolves and loads.
    model_file: &'static str,
    /// Height of the authored model at scale 1.0, in meters.
    reference_height: f64,
}

/// Substitution rule for one cadastral function code.
struct ProxyRule {
    function_code: &'static str,
    /// Variants ordered by descending `min_height`; first match wins.
    variants: &'static [ProxyVariant],
}

const PROXY_RULES: &[ProxyRule] = &[
    // Overhead power line pylons, three sizes.
    ProxyRule {
        function_code: "51002_1251",
        variants: &[
            ProxyVariant {
                min_height: 30.0,
                model_file: "Freileitung.ive",
                reference_height: 31.0,
            },
            ProxyVariant {
                min_height: 15.0,
                model_file: "Freileitung20.ive",
                reference_height: 20.0,
            },
            ProxyVariant {
                min_height: f64::NEG_INFINITY,
                model_file: "FreileitungSmall.ive",
                reference_height: 10.0,
            },
        ],
    },
    // Wind turbines.
    ProxyRule {
        function_code: "51002_1220",
        variants: &[ProxyVariant {
            min_height: f64::NEG_INFINITY,
            model_file: "Windrad.ive",
            reference_height: 1.053,
        }],
    },
];

const FUNCTION_ATTRIBUTE: &str = "bldg:function";
const HEIGHT_ATTRIBUTE: &str = "bldg:measuredheight";

/// Try to substitute an authored proxy model for a building.
///
/// Applies only to `Building` objects whose function code matches a rule.
/// The proxy is scaled to the measured height, yawed to the object's facade
/// direction and anchored at its ground point, all relative to the global
/// offset. A matching building with a malformed height or no usable
/// geometry logs a warning and falls through to regular mesh conversion.
pub(crate) fn try_substitute(object: &CityObject, offset: &Vector3<f64>) -> Option<Node> {
    if object.object_type() != CityObjectType::Building {
        return None;
    }
    let function = object.attribute(FUNCTION_ATTRIBUTE)?;
    let rule = PROXY_RULES
        .iter()
        .find(|rule| rule.function_code == function)?;

    let height: f64 = match object.attribute(HEIGHT_ATTRIBUTE).map(str::parse) {
        Some(Ok(h)) => h,
        _ => {
            warn!(
                "building {} matches proxy function {function} but has no usable measured height",
                object.id()
            );
            return None;
        }
    };

    let Some(variant) = rule.variants.iter().find(|v| height >= v.min_height) else {
        return None;
    };

    let Some((position, direction)) = center_and_direction(object) else {
        warn!(
            "building {} matches proxy function {function} but has no ground geometry",
            object.id()
        );
        return None;
    };

    let scale = height / variant.reference_height;
    let yaw = direction.x.atan2(direction.y);

    let mut transform = TransformNode::new(object.id());
    transform.matrix = Matrix4::new_translation(&(position.coords - offset))
        * Matrix4::new_rotation(Vector3::z() * yaw)
        * Matrix4::new_scaling(scale);
    transform
        .children
        .push(Node::Proxy(ProxyNode::new(variant.model_file)));

    Some(Node::Transform(transform))
}
