//! Scene files: JSON in, pixels out

use finch::color::{make_color, BLACK, RED, WHITE};
use finch::composite::BlendMode;
use finch::convert::{export_rgb8, export_rgba8};
use finch::demos;
use finch::scene::{ColorSpec, DrawCommand, Scene};
use finch::{FinchError, PixelBuffer};

const SCENE: &str = r##"{
    "name": "sampler",
    "width": 32,
    "height": 24,
    "background": "#000000",
    "commands": [
        { "op": "fill_rect", "left": 2, "top": 2, "right": 10, "bottom": 10, "color": [255, 0, 0] },
        { "op": "line", "x1": 0, "y1": 20, "x2": 31, "y2": 20, "color": "#8000FF00", "blend": "alpha_composite" },
        { "op": "circle", "cx": 20, "cy": 8, "radius": 5, "color": [255, 255, 255, 255] },
        { "op": "text", "x": 12, "y": 14, "text": "Hi", "color": "0xFFFFFF" }
    ]
}"##;

#[test]
fn test_scene_json_renders() {
    let scene = Scene::from_json(SCENE).unwrap();
    assert_eq!(scene.commands.len(), 4);

    let buffer = scene.render_new().unwrap();
    assert_eq!((buffer.width(), buffer.height()), (32, 24));
    assert_eq!(buffer.get_pixel(5, 5), RED);
    assert_eq!(buffer.get_pixel(0, 0), BLACK);
    // half green over black keeps the destination alpha
    assert_eq!(buffer.get_pixel(10, 20), make_color(0, 128, 0));
    // the line endpoint is not drawn
    assert_eq!(buffer.get_pixel(31, 20), BLACK);
    assert_eq!(buffer.get_pixel(25, 8), WHITE);
}

#[test]
fn test_scene_survives_json_round_trip() {
    let mut scene = Scene::new("built", 40, 30).with_background(ColorSpec::Rgb([10, 20, 30]));
    scene
        .push(DrawCommand::FillCircle {
            cx: 20,
            cy: 15,
            radius: 9,
            color: ColorSpec::Hex("#FF00FF".to_string()),
        })
        .push(DrawCommand::Line {
            x1: 0,
            y1: 0,
            x2: 39,
            y2: 29,
            color: ColorSpec::Rgba([255, 255, 0, 100]),
            blend: BlendMode::AlphaComposite,
        })
        .push(DrawCommand::Rect {
            left: 5,
            top: 5,
            right: 35,
            bottom: 25,
            color: ColorSpec::Rgb([0, 255, 255]),
        })
        .push(DrawCommand::TextCentered {
            cx: 20,
            cy: 15,
            text: "ok".to_string(),
            color: ColorSpec::Rgb([0, 0, 0]),
        });

    let json = scene.to_json().unwrap();
    let parsed = Scene::from_json(&json).unwrap();
    assert_eq!(parsed, scene);

    let a = scene.render_new().unwrap();
    let b = parsed.render_new().unwrap();
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!(export_rgb8(&a), export_rgb8(&b));
}

#[test]
fn test_bad_color_fails_before_drawing() {
    let mut scene = Scene::new("broken", 8, 8).with_background(ColorSpec::Rgb([255, 255, 255]));
    scene
        .push(DrawCommand::Clear {
            color: ColorSpec::Rgb([255, 0, 0]),
        })
        .push(DrawCommand::Pixel {
            x: 1,
            y: 1,
            color: ColorSpec::Hex("#GG0000".to_string()),
        });

    let mut buffer = PixelBuffer::new(8, 8).unwrap();
    buffer.clear(BLACK);
    assert!(matches!(scene.render(&mut buffer), Err(FinchError::InvalidColor(_))));
    assert!(buffer.pixels().iter().all(|&p| p == BLACK));

    assert_eq!(scene.render_lossy(&mut buffer), 1);
    assert!(buffer.pixels().iter().all(|&p| p == RED));
}

#[test]
fn test_unknown_op_is_a_parse_error() {
    let json = r#"{ "name": "x", "width": 4, "height": 4, "commands": [ { "op": "spline", "color": [0, 0, 0] } ] }"#;
    assert!(matches!(Scene::from_json(json), Err(FinchError::Json(_))));
}

#[test]
fn test_scene_file_round_trip() {
    let path = std::env::temp_dir().join(format!("finch-scene-{}.json", std::process::id()));
    let scene = Scene::from_json(SCENE).unwrap();
    scene.save(&path).unwrap();
    let loaded = Scene::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, scene);
}

#[test]
fn test_demo_frames_export() {
    for name in demos::NAMES {
        let mut demo = demos::by_name(name).unwrap();
        let mut buffer = PixelBuffer::with_stride(64, 48, 80).unwrap();
        buffer.clear(BLACK);
        demo.update(0.25, 64, 48);
        demo.render(&mut buffer);

        let rgb = export_rgb8(&buffer);
        let rgba = export_rgba8(&buffer);
        assert_eq!(rgb.len(), 64 * 48 * 3, "{name}");
        assert_eq!(rgba.len(), 64 * 48 * 4, "{name}");
        let round = PixelBuffer::from_rgba8(64, 48, &rgba).unwrap();
        for y in 0..48 {
            assert_eq!(round.row(y), buffer.row(y), "{name} row {y}");
        }
    }
}
