use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TextclipError::format("x")
            .to_string()
            .contains("format error:")
    );
    assert!(
        TextclipError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TextclipError::asset("x").to_string().contains("asset error:"));
    assert!(
        TextclipError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TextclipError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
