use serde::{Deserialize, Serialize};

use crate::foundation::error::{VanimError, VanimResult};
use crate::scene::model::MeshVertex;

/// Vertices and a flat triangle index list, ready for a mesh node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Build a `cols × rows` cell grid spanning `[0, width] × [0, height]`.
///
/// Vertices are row-major, `(cols + 1) * (rows + 1)` of them, with UVs covering the unit
/// square. Every cell contributes triangles `(tl, tr, bl)` and `(tr, br, bl)`.
pub fn generate_grid(cols: u32, rows: u32, width: f64, height: f64) -> VanimResult<MeshGeometry> {
    if cols == 0 || rows == 0 {
        return Err(VanimError::validation(format!(
            "mesh grid needs at least one column and one row (got {cols}x{rows})"
        )));
    }
    let v_cols = cols
        .checked_add(1)
        .ok_or_else(|| VanimError::validation("mesh grid is too large"))?;
    let v_rows = rows
        .checked_add(1)
        .ok_or_else(|| VanimError::validation("mesh grid is too large"))?;
    let vertex_count = v_cols
        .checked_mul(v_rows)
        .ok_or_else(|| VanimError::validation("mesh grid is too large"))?;

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for r in 0..v_rows {
        for c in 0..v_cols {
            let u = f64::from(c) / f64::from(cols);
            let v = f64::from(r) / f64::from(rows);
            vertices.push(MeshVertex {
                x: u * width,
                y: v * height,
                u,
                v,
            });
        }
    }

    let mut indices = Vec::with_capacity(cols as usize * rows as usize * 6);
    for r in 0..rows {
        for c in 0..cols {
            let tl = r * v_cols + c;
            let tr = tl + 1;
            let bl = (r + 1) * v_cols + c;
            let br = bl + 1;
            indices.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
        }
    }

    Ok(MeshGeometry { vertices, indices })
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/grid.rs"]
mod tests;
