//! # Primitive Shape Generation

use super::GeometryData;
use std::f32::consts::PI;

/// Longitude divisions of the shared body sphere
pub const DEFAULT_SECTORS: u32 = 36;
/// Latitude divisions of the shared body sphere
pub const DEFAULT_STACKS: u32 = 18;

/// Generate a unit UV sphere centered at the origin
///
/// # Arguments
/// * `sectors` - Number of longitude segments (minimum 3)
/// * `stacks` - Number of latitude segments (minimum 2)
///
/// Each vertex normal equals its position. UVs run 0..1 around and down.
pub fn generate_sphere(sectors: u32, stacks: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let sectors = sectors.max(3);
    let stacks = stacks.max(2);

    for stack in 0..=stacks {
        let theta = stack as f32 * PI / stacks as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for sector in 0..=sectors {
            let phi = sector as f32 * 2.0 * PI / sectors as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]);
            data.tex_coords
                .push([sector as f32 / sectors as f32, stack as f32 / stacks as f32]);
        }
    }

    for stack in 0..stacks {
        for sector in 0..sectors {
            let first = stack * (sectors + 1) + sector;
            let second = first + sectors + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}
