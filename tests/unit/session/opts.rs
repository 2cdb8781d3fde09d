use super::*;

#[test]
fn defaults_match_documented_values() {
    let o = CaptureOpts::new(64, 32);
    assert_eq!(o.diff_mode, DiffMode::Scene);
    assert_eq!(o.frame_delay, 2);
    assert_eq!(o.effective_loop_delay(), 2);
    assert_eq!(o.sample_interval, 1);
    assert_eq!(o.sample_budget, 30);
    assert_eq!(o.loop_count, None);
    assert!(o.validate().is_ok());
}

#[test]
fn json_fills_defaults() {
    let o = CaptureOpts::from_json_str(r#"{ "width": 128, "height": 96 }"#).unwrap();
    assert_eq!(o, CaptureOpts::new(128, 96));
}

#[test]
fn json_reads_every_field() {
    let o = CaptureOpts::from_json_str(
        r#"{
            "width": 128,
            "height": 128,
            "diff_mode": 2,
            "crop_box": { "x": 2, "y": 2, "width": 4, "height": 4 },
            "background": { "r": 255, "g": 255, "b": 255 },
            "loop_count": 0,
            "frame_delay": 25,
            "loop_delay": 50,
            "sample_interval": 3,
            "sample_budget": 5
        }"#,
    )
    .unwrap();
    assert_eq!(o.diff_mode, DiffMode::Sprite);
    assert_eq!(o.crop_box, Some(BoundingBox::new(2, 2, 4, 4).unwrap()));
    assert_eq!(o.background, Some(Rgb8::new(255, 255, 255)));
    assert_eq!(o.loop_count, Some(0));
    assert_eq!(o.effective_loop_delay(), 50);
    assert_eq!((o.sample_interval, o.sample_budget), (3, 5));

    let back = CaptureOpts::from_json_str(&o.to_json_string().unwrap()).unwrap();
    assert_eq!(back, o);
}

#[test]
fn json_errors_are_reported() {
    assert!(matches!(
        CaptureOpts::from_json_str(r#"{ "width": 1 }"#),
        Err(GifError::Serde(_))
    ));
    assert!(matches!(
        CaptureOpts::from_json_str(r#"{ "width": 1, "height": 1, "diff_mode": 9 }"#),
        Err(GifError::Serde(_))
    ));
    assert!(matches!(
        CaptureOpts::from_json_str(r#"{ "width": 1, "height": 1, "bogus": true }"#),
        Err(GifError::Serde(_))
    ));
}

#[test]
fn validation_rejects_degenerate_values() {
    assert!(CaptureOpts::new(0, 10).validate().is_err());
    let mut o = CaptureOpts::new(10, 10);
    o.crop_box = Some(BoundingBox::EMPTY);
    assert!(matches!(o.validate(), Err(GifError::Validation(_))));
    let mut o = CaptureOpts::new(10, 10);
    o.sample_interval = 0;
    assert!(o.validate().is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = CaptureOpts::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open capture options"));
}
