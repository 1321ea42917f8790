use proptest::prelude::*;
use voxland_geom::Vec3;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn coord() -> impl Strategy<Value = f32> {
    -1_000.0f32..1_000.0
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Normalizing a horizontal direction leaves a unit vector with no vertical part
    #[test]
    fn horizontal_normalized_is_flat_unit(v in arb_vec3()) {
        let h = v.horizontal();
        prop_assume!(h.length() > 1e-3);
        let n = h.normalized();
        prop_assert!(approx(n.length(), 1.0, 1e-4));
        prop_assert_eq!(n.y, 0.0);
    }

    // Right vector derived from a flat forward is orthogonal to it and stays flat
    #[test]
    fn right_is_orthogonal_to_forward(v in arb_vec3()) {
        let fwd = v.horizontal();
        prop_assume!(fwd.length() > 1e-3);
        let fwd = fwd.normalized();
        let right = fwd.cross(Vec3::UP).normalized();
        prop_assert!(approx(fwd.dot(right), 0.0, 1e-4));
        prop_assert!(approx(right.y, 0.0, 1e-6));
    }

    // distance_xz ignores y and is symmetric
    #[test]
    fn distance_xz_symmetric(a in arb_vec3(), b in arb_vec3(), dy in coord()) {
        let d1 = a.distance_xz(b);
        let d2 = b.distance_xz(Vec3::new(a.x, a.y + dy, a.z));
        prop_assert!(approx(d1, d2, 1e-3));
    }
}
