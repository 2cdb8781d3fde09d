use super::*;

fn opts() -> EncodeOpts {
    EncodeOpts {
        width: 2,
        height: 1,
        loop_count: Some(0),
        background_index: 0,
    }
}

fn frame(indices: Vec<u8>) -> EncodedFrame {
    EncodedFrame {
        x: 0,
        y: 0,
        width: 2,
        height: 1,
        indices,
        delay: 2,
        disposal: Disposal::LeaveInPlace,
        transparent_index: 0,
    }
}

#[test]
fn in_memory_encoder_records_input() {
    let mut enc = InMemoryEncoder::new();
    assert!(enc.opts().is_none());
    let bytes = enc
        .encode(&[frame(vec![0, 1])], &[Rgb8::BLACK, Rgb8::new(1, 2, 3)], &opts())
        .unwrap();
    assert!(bytes.is_empty());
    assert_eq!(enc.frames().len(), 1);
    assert_eq!(enc.palette()[1], Rgb8::new(1, 2, 3));
    assert_eq!(enc.opts(), Some(&opts()));
}

#[test]
fn in_memory_encoder_checks_shapes() {
    let mut enc = InMemoryEncoder::new();
    let palette = [Rgb8::BLACK; 3];
    assert!(matches!(
        enc.encode(&[frame(vec![0, 1])], &palette, &opts()),
        Err(GifError::Encode(_))
    ));
    let palette = [Rgb8::BLACK; 2];
    assert!(enc.encode(&[frame(vec![0])], &palette, &opts()).is_err());
    assert!(enc.frames().is_empty());
}
