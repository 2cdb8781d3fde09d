use super::*;

fn ramp(len: usize) -> Vec<u32> {
    (0..len as u32).collect()
}

#[test]
fn crop_copies_rows_at_stride() {
    // 4x3 buffer: 0..12
    let buf = ramp(12);
    let out = crop(&buf, 4, BoundingBox::new(1, 1, 2, 2).unwrap()).unwrap();
    assert_eq!(out, vec![5, 6, 9, 10]);
}

#[test]
fn crop_works_on_index_buffers_too() {
    let buf: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
    let out = crop(&buf, 3, BoundingBox::new(2, 0, 1, 2).unwrap()).unwrap();
    assert_eq!(out, vec![3u8, 6]);
}

#[test]
fn crop_out_of_bounds_is_range_error() {
    let buf = ramp(12);
    let err = crop(&buf, 4, BoundingBox::new(3, 0, 2, 1).unwrap()).unwrap_err();
    assert!(matches!(err, GifError::Range(_)));
    let err = crop(&buf, 4, BoundingBox::new(0, 2, 1, 2).unwrap()).unwrap_err();
    assert!(matches!(err, GifError::Range(_)));
    assert!(matches!(
        crop(&buf, 5, BoundingBox::full(1, 1)),
        Err(GifError::Range(_))
    ));
}

#[test]
fn crop_of_empty_box_is_empty() {
    assert!(crop(&ramp(4), 2, BoundingBox::EMPTY).unwrap().is_empty());
}

#[test]
fn crop_then_place_roundtrips() {
    let original = ramp(30); // 6x5
    let bbox = BoundingBox::new(2, 1, 3, 3).unwrap();
    let patch = crop(&original, 6, bbox).unwrap();

    let mut target = original.clone();
    for px in target.iter_mut() {
        if bbox.contains(*px % 6, *px / 6) {
            *px = 0;
        }
    }
    assert_ne!(target, original);
    place(&patch, bbox.width, &mut target, 6, bbox.x, bbox.y).unwrap();
    assert_eq!(target, original);
}

#[test]
fn place_out_of_bounds_is_range_error_and_leaves_target_untouched() {
    let mut dst = vec![0u32; 9];
    let err = place(&[1, 2, 3, 4], 2, &mut dst, 3, 2, 0).unwrap_err();
    assert!(matches!(err, GifError::Range(_)));
    assert_eq!(dst, vec![0; 9]);
    assert!(place(&[1, 2, 3], 2, &mut dst, 3, 0, 0).is_err());
}
