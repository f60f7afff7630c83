/// Inline image codec
///
/// Post images may arrive embedded in the JSON payload as a
/// `data:image/<ext>;base64,<data>` URI. Anything matching that shape is
/// decoded into an in-memory file; any other string passes through
/// unchanged for standard upload handling.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AppError;

const DATA_URI_MARKER: &str = "data:image";
const BASE64_SEPARATOR: &str = ";base64,";

/// A decoded in-memory image, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub content: Vec<u8>,
    pub extension: String,
    pub file_name: String,
}

/// Outcome of inspecting an image field value.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// The value was an embedded data URI and has been decoded.
    Decoded(DecodedImage),
    /// Not an embedded image; hand the raw value to standard handling.
    Passthrough(String),
}

/// Decode an image field value per the data-URI contract.
///
/// Fails with a per-field validation error when the base64 payload is
/// malformed.
pub fn decode_image(value: &str) -> Result<ImagePayload, AppError> {
    if !value.starts_with(DATA_URI_MARKER) {
        return Ok(ImagePayload::Passthrough(value.to_string()));
    }

    let Some((header, payload)) = value.split_once(BASE64_SEPARATOR) else {
        return Ok(ImagePayload::Passthrough(value.to_string()));
    };

    let extension = header
        .strip_prefix("data:image/")
        .unwrap_or("")
        .to_string();

    let content = STANDARD
        .decode(payload)
        .map_err(|_| AppError::validation("image", "invalid base64 payload"))?;

    let file_name = format!("temp.{}", extension);

    Ok(ImagePayload::Decoded(DecodedImage {
        content,
        extension,
        file_name,
    }))
}

/// Rebuild the data URI for a stored image so responses round-trip.
pub fn encode_data_uri(content: &[u8], extension: &str) -> String {
    format!(
        "data:image/{}{}{}",
        extension,
        BASE64_SEPARATOR,
        STANDARD.encode(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_png_data_uri() {
        let bytes = b"\x89PNG\r\n\x1a\n fake image bytes";
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(bytes));

        match decode_image(&uri).unwrap() {
            ImagePayload::Decoded(img) => {
                assert_eq!(img.content, bytes);
                assert_eq!(img.extension, "png");
                assert_eq!(img.file_name, "temp.png");
            }
            other => panic!("expected decoded image, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_comes_from_mime_subtype() {
        let uri = format!("data:image/jpeg;base64,{}", STANDARD.encode(b"jpeg-ish"));
        let ImagePayload::Decoded(img) = decode_image(&uri).unwrap() else {
            panic!("expected decoded image");
        };
        assert_eq!(img.extension, "jpeg");
        assert!(img.file_name.ends_with(".jpeg"));
    }

    #[test]
    fn test_non_matching_value_passes_through() {
        for value in ["plain-filename.png", "https://example.com/a.png", ""] {
            assert_eq!(
                decode_image(value).unwrap(),
                ImagePayload::Passthrough(value.to_string())
            );
        }
    }

    #[test]
    fn test_data_image_without_separator_passes_through() {
        // Has the marker but no ";base64," separator
        let value = "data:image/png,rawdata";
        assert_eq!(
            decode_image(value).unwrap(),
            ImagePayload::Passthrough(value.to_string())
        );
    }

    #[test]
    fn test_malformed_base64_is_a_validation_error() {
        let err = decode_image("data:image/png;base64,!!!not-base64!!!").unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "image"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_round_trips() {
        let bytes = b"binary blob";
        let uri = encode_data_uri(bytes, "gif");
        let ImagePayload::Decoded(img) = decode_image(&uri).unwrap() else {
            panic!("expected decoded image");
        };
        assert_eq!(img.content, bytes);
        assert_eq!(img.extension, "gif");
    }
}
