use crate::scene::Scene;
use crate::vec3::Vec3;

/// Whether any sphere other than `exclude` blocks the segment between a
/// shading point and a light.
///
/// Works in coordinates relative to the light with `V = point - light`, so
/// the segment is the ray parameter range `[0, 1]`. Because the root is left
/// multiplied by `a = V·V`, the test reads `0 <= at <= a`.
pub fn is_shadowed(scene: &Scene, point: Vec3<f64>, light: Vec3<f64>, exclude: usize) -> bool {
    let v = point - light;
    let a = v.len_sq();

    scene
        .objects
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .any(|(_, model)| {
            let oc = model.geometry.center - light;
            let radius = model.geometry.radius;

            let b = -2.0 * v.dot(&oc);
            let c = oc.len_sq() - radius * radius;

            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return false;
            }

            let at = (-b - discriminant.sqrt()) / 2.0;
            (0.0..=a).contains(&at)
        })
}
