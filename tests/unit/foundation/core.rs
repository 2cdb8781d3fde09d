use super::*;

#[test]
fn bounding_box_rejects_zero_area() {
    assert!(BoundingBox::new(1, 1, 0, 4).is_err());
    assert!(BoundingBox::new(1, 1, 4, 0).is_err());
    assert!(BoundingBox::new(u32::MAX, 0, 2, 1).is_err());
    let b = BoundingBox::new(1, 2, 3, 4).unwrap();
    assert_eq!((b.right(), b.bottom(), b.area()), (4, 6, 12));
}

#[test]
fn bounding_box_edges_and_containment() {
    let b = BoundingBox::new(2, 3, 2, 2).unwrap();
    assert!(b.contains(2, 3));
    assert!(b.contains(3, 4));
    assert!(!b.contains(4, 4));
    assert!(!b.contains(1, 3));
    assert!(b.fits_within(4, 5));
    assert!(!b.fits_within(3, 5));
    assert!(BoundingBox::EMPTY.is_empty());
    assert!(!BoundingBox::full(1, 1).is_empty());
}

#[test]
fn pixel_packing_puts_alpha_in_high_byte() {
    let px = pack_rgba(0x11, 0x22, 0x33, 0x80);
    assert_eq!(px, 0x8033_2211);
    assert_eq!(alpha_of(px), 0x80);
    assert_eq!(rgb_of(px), Rgb8::new(0x11, 0x22, 0x33));
}

#[test]
fn diff_mode_numeric_codes() {
    assert_eq!(DiffMode::default(), DiffMode::Scene);
    for code in 0u8..3 {
        let mode = DiffMode::try_from(code).unwrap();
        assert_eq!(u8::from(mode), code);
    }
    assert!(DiffMode::try_from(3).is_err());

    let mode: DiffMode = serde_json::from_str("2").unwrap();
    assert_eq!(mode, DiffMode::Sprite);
    assert!(serde_json::from_str::<DiffMode>("7").is_err());
}

#[test]
fn disposal_codes_follow_gif_numbering() {
    assert_eq!(Disposal::LeaveInPlace.code(), 1);
    assert_eq!(Disposal::RestoreBackground.code(), 2);
}
