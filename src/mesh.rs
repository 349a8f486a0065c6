// Rust sphere mesh generator
// 经纬切分的 UV 球，外加线框抽取和粒子散布

use rand::Rng;

#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

pub fn build_sphere(radius: f32, lat: usize, lon: usize) -> SphereMesh {
    let mut positions = Vec::with_capacity((lat + 1) * (lon + 1));
    let mut normals = Vec::with_capacity((lat + 1) * (lon + 1));
    let mut indices = Vec::new();

    for i in 0..=lat {
        let theta = std::f32::consts::PI * (i as f32) / (lat as f32);
        let ny = theta.cos();
        let sin_t = theta.sin();

        for j in 0..=lon {
            let phi = 2.0 * std::f32::consts::PI * (j as f32) / (lon as f32);

            let nx = phi.cos() * sin_t;
            let nz = phi.sin() * sin_t;

            positions.push([radius * nx, radius * ny, radius * nz]);
            // 球心在原点，法线即单位化的位置
            normals.push([nx, ny, nz]);
        }
    }

    for i in 0..lat {
        for j in 0..lon {
            let a = (i * (lon + 1) + j) as u32;
            let b = a + (lon + 1) as u32;

            indices.extend_from_slice(&[
                a, b, a + 1,
                b, b + 1, a + 1,
            ]);
        }
    }

    SphereMesh {
        positions,
        normals,
        indices,
    }
}

/// 把三角网格的棱抽成去重后的线段顶点对（LineList 直接可用）。
pub fn extract_wireframe(mesh: &SphereMesh) -> Vec<[f32; 3]> {
    use std::collections::HashSet;

    let mut edges: HashSet<(u32, u32)> = HashSet::new();
    for tri in mesh.indices.chunks_exact(3) {
        let mut add = |u: u32, v: u32| {
            let e = if u < v { (u, v) } else { (v, u) };
            edges.insert(e);
        };
        add(tri[0], tri[1]);
        add(tri[1], tri[2]);
        add(tri[2], tri[0]);
    }

    let mut lines = Vec::with_capacity(edges.len() * 2);
    for (u, v) in edges {
        lines.push(mesh.positions[u as usize]);
        lines.push(mesh.positions[v as usize]);
    }
    lines
}

/// 在边长 `spread`、以原点为中心的立方体内独立均匀采样。
/// 刻意不做球内剔除：点可以落在球壳外，作为大气/星点效果这是预期行为。
pub fn scatter_particles<R: Rng>(rng: &mut R, count: usize, spread: f32) -> Vec<[f32; 3]> {
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push([
            (rng.gen::<f32>() - 0.5) * spread,
            (rng.gen::<f32>() - 0.5) * spread,
            (rng.gen::<f32>() - 0.5) * spread,
        ]);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn len3(p: &[f32; 3]) -> f32 {
        (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
    }

    #[test]
    fn sphere_counts_and_radius() {
        let mesh = build_sphere(1.2, 50, 50);
        assert_eq!(mesh.positions.len(), 51 * 51);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), 50 * 50 * 6);

        for p in &mesh.positions {
            assert!((len3(p) - 1.2).abs() < 1e-4);
        }
        for n in &mesh.normals {
            assert!((len3(n) - 1.0).abs() < 1e-4);
        }
        let max = mesh.positions.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn wireframe_edges_are_deduped_pairs_on_shell() {
        let mesh = build_sphere(1.21, 24, 24);
        let lines = extract_wireframe(&mesh);
        assert!(!lines.is_empty());
        assert_eq!(lines.len() % 2, 0);
        for p in &lines {
            assert!((len3(p) - 1.21).abs() < 1e-4);
        }
        // 去重后的棱数少于逐三角形计数的 3 × 三角形数
        assert!(lines.len() / 2 < mesh.indices.len());
    }

    #[test]
    fn particles_count_and_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let points = scatter_particles(&mut rng, 300, 4.0);
        assert_eq!(points.len(), 300);
        for p in &points {
            for c in p {
                assert!((-2.0..2.0).contains(c), "coordinate {} out of range", c);
            }
        }
    }
}
