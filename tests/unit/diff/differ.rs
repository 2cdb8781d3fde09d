use super::*;
use crate::foundation::core::pack_rgba;

fn frame(width: u32, height: u32, pixels: Vec<u32>) -> PixelBuffer {
    PixelBuffer::new(width, height, pixels).unwrap()
}

fn changed(outcome: DiffOutcome) -> FrameDiff {
    match outcome {
        DiffOutcome::Changed(d) => d,
        DiffOutcome::Unchanged => panic!("expected a changed region"),
    }
}

#[test]
fn full_mode_always_sends_whole_frame() {
    let mut d = FrameDiffer::new(DiffMode::Full);
    let a = frame(2, 2, vec![1, 2, 3, 4]);
    for _ in 0..2 {
        let out = changed(d.diff(&a).unwrap());
        assert_eq!(out.bbox, BoundingBox::full(2, 2));
        assert_eq!(out.data, a.pixels);
        assert_eq!(out.disposal, Disposal::LeaveInPlace);
    }
    assert!(!d.has_stage());
}

#[test]
fn scene_mode_first_frame_is_full_and_seeds_stage() {
    let mut d = FrameDiffer::new(DiffMode::Scene);
    let a = frame(2, 2, vec![0, 0, 0, 0]);
    let out = changed(d.diff(&a).unwrap());
    assert_eq!(out.bbox, BoundingBox::full(2, 2));
    assert_eq!(out.data, vec![0, 0, 0, 0]);
    assert!(d.has_stage());
}

#[test]
fn scene_mode_single_pixel_delta() {
    let mut d = FrameDiffer::new(DiffMode::Scene);
    d.diff(&frame(2, 2, vec![0, 0, 0, 0])).unwrap();
    let out = changed(d.diff(&frame(2, 2, vec![0, 1, 0, 0])).unwrap());
    assert_eq!(out.bbox, BoundingBox::new(1, 0, 1, 1).unwrap());
    assert_eq!(out.data, vec![1]);
    assert_eq!(out.disposal, Disposal::LeaveInPlace);
}

#[test]
fn scene_mode_identical_frame_is_unchanged() {
    let mut d = FrameDiffer::new(DiffMode::Scene);
    let a = frame(3, 1, vec![7, 8, 9]);
    d.diff(&a).unwrap();
    assert_eq!(d.diff(&a).unwrap(), DiffOutcome::Unchanged);
}

#[test]
fn scene_mode_delta_is_sparse_inside_box() {
    let mut d = FrameDiffer::new(DiffMode::Scene);
    d.diff(&frame(3, 3, vec![5; 9])).unwrap();
    // Corners (0,0) and (2,1) change; (1,0) etc. inside the box stay equal.
    let mut next = vec![5; 9];
    next[0] = 6;
    next[5] = 7;
    let out = changed(d.diff(&frame(3, 3, next)).unwrap());
    assert_eq!(out.bbox, BoundingBox::new(0, 0, 3, 2).unwrap());
    assert_eq!(out.data, vec![6, UNCHANGED, UNCHANGED, UNCHANGED, UNCHANGED, 7]);
}

#[test]
fn scene_mode_merges_into_stage() {
    let mut d = FrameDiffer::new(DiffMode::Scene);
    d.diff(&frame(2, 1, vec![1, 1])).unwrap();
    d.diff(&frame(2, 1, vec![2, 1])).unwrap();
    // Against the merged stage only the right pixel differs now.
    let out = changed(d.diff(&frame(2, 1, vec![2, 3])).unwrap());
    assert_eq!(out.bbox, BoundingBox::new(1, 0, 1, 1).unwrap());
    assert_eq!(out.data, vec![3]);
    assert_eq!(d.stage.as_ref().unwrap().pixels, vec![2, 3]);
}

#[test]
fn scene_mode_rejects_resized_frames() {
    let mut d = FrameDiffer::new(DiffMode::Scene);
    d.diff(&frame(2, 1, vec![1, 1])).unwrap();
    assert!(matches!(
        d.diff(&frame(1, 2, vec![1, 1])),
        Err(GifError::Validation(_))
    ));
}

#[test]
fn sprite_mode_crops_content_box() {
    let (w, h) = (8u32, 8u32);
    let mut pixels = vec![0u32; (w * h) as usize];
    let opaque = pack_rgba(9, 9, 9, 255);
    for y in 4..6 {
        for x in 3..5 {
            pixels[(y * w + x) as usize] = opaque;
        }
    }
    let mut d = FrameDiffer::new(DiffMode::Sprite);
    let out = changed(d.diff(&frame(w, h, pixels)).unwrap());
    assert_eq!(out.bbox, BoundingBox::new(3, 4, 2, 2).unwrap());
    assert_eq!(out.data, vec![opaque; 4]);
    assert_eq!(out.disposal, Disposal::RestoreBackground);
    assert!(!d.has_stage());
}

#[test]
fn sprite_mode_blank_frame_still_records() {
    let mut d = FrameDiffer::new(DiffMode::Sprite);
    let blank = frame(4, 4, vec![pack_rgba(255, 255, 255, 0); 16]);
    for _ in 0..2 {
        let out = changed(d.diff(&blank).unwrap());
        assert!(out.bbox.is_empty());
        assert!(out.data.is_empty());
        assert_eq!(out.disposal, Disposal::RestoreBackground);
    }
}

#[test]
fn malformed_frames_are_rejected() {
    let mut d = FrameDiffer::new(DiffMode::Full);
    let bad = PixelBuffer {
        width: 2,
        height: 2,
        pixels: vec![0; 3],
    };
    assert!(d.diff(&bad).is_err());
}
