use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GifError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GifError::range("x").to_string().contains("range error:"));
    assert!(GifError::state("x").to_string().contains("state error:"));
    assert!(
        GifError::quantize("x")
            .to_string()
            .contains("quantizer error:")
    );
    assert!(GifError::encode("x").to_string().contains("encoder error:"));
    assert!(
        GifError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GifError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
