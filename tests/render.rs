use image::Rgb;

use photon::geometry::{Material, Model, Sphere};
use photon::light::PointLight;
use photon::render::{to_pixel, Viewport};
use photon::{bmp, render, Color, Normalization, RenderSettings, Scene, Vec3};

fn brightness(pixel: &Rgb<u8>) -> u32 {
    pixel.0.iter().map(|&c| u32::from(c)).sum()
}

/// Unit diffuse ball five units ahead, lit from just above the eye.
fn lone_ball() -> Scene {
    let mut scene = Scene::new(Default::default());
    scene.objects.push(Model::new(
        Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0),
        Material {
            reflectivity: 0.0,
            albedo: Color::gray(1.0),
        },
    ));
    scene
        .lights
        .push(PointLight::new(Vec3::new(0.0, 0.5, 0.0), Color::gray(8.0)));
    scene
}

fn small(width: u32, height: u32) -> RenderSettings {
    RenderSettings {
        width,
        height,
        samples_per_significance: 0.0,
        ..RenderSettings::default()
    }
}

#[test]
fn lone_ball_renders_shaded_disk_on_sky() {
    let scene = lone_ball();
    let settings = small(64, 64);

    let frame = render(&scene, &settings);
    let image = &frame.image;

    // View-plane row 32 is image row 31.
    let center = image.get_pixel(32, 31);
    assert!(brightness(center) > 0);

    let edges = [
        image.get_pixel(20, 31),
        image.get_pixel(44, 31),
        image.get_pixel(32, 31 - 12),
        image.get_pixel(32, 31 + 12),
    ];
    for edge in edges {
        assert!(brightness(edge) > 0);
        assert!(brightness(center) > brightness(edge), "{center:?} vs {edge:?}");
    }

    let viewport = Viewport::new(&settings);
    for (i, j) in [(0, 0), (63, 0), (0, 63), (63, 63), (0, 32)] {
        let (sky, _) = to_pixel(scene.background.color(&viewport.direction(i, j)), settings.gamma);
        assert_eq!(&sky, image.get_pixel(i, 63 - j));
    }

    assert!(frame.report.primary_hits > 0);
    assert_eq!(0, frame.report.clamped);
}

#[test]
fn fixed_seed_reproduces_image() {
    let scene = Scene::reference();

    for normalization in [Normalization::Streaming, Normalization::Buffered] {
        let settings = RenderSettings {
            samples_per_significance: 20.0,
            normalization,
            seed: 1234,
            ..small(12, 12)
        };

        let a = render(&scene, &settings);
        let b = render(&scene, &settings);
        assert_eq!(a.image, b.image);
        assert_eq!(a.report.shading, b.report.shading);
        assert!(a.report.shading.deepest <= settings.max_depth + 1);
    }
}

#[test]
fn written_bitmap_decodes_to_rendered_frame() {
    let scene = Scene::reference();
    let settings = RenderSettings {
        samples_per_significance: 10.0,
        ..small(13, 7)
    };
    let frame = render(&scene, &settings);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bmp");
    bmp::write(&path, &frame.image).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(frame.image, decoded);
}

#[test]
fn scene_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    std::fs::write(
        &path,
        r#"{
            "objects": [{
                "center": {"x": 0.0, "y": 0.0, "z": 5.0},
                "radius": 1.0,
                "material": {"reflectivity": 0.0, "albedo": {"red": 1.0, "green": 1.0, "blue": 1.0}}
            }],
            "lights": [{
                "position": {"x": 0.0, "y": 0.5, "z": 0.0},
                "power": {"red": 8.0, "green": 8.0, "blue": 8.0}
            }]
        }"#,
    )
    .unwrap();

    let loaded = Scene::load(&path).unwrap();
    assert_eq!(lone_ball(), loaded);

    let settings = small(16, 16);
    assert_eq!(render(&lone_ball(), &settings).image, render(&loaded, &settings).image);
}
