//! Content conversion helpers on [`FileValue`].
//!
//! Everything here is a pure data transform over the already-loaded bytes.
//! The JSON helper is the single sanctioned place that surfaces a native
//! parse error instead of a [`BridgeResult`], since it performs no I/O.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::de::DeserializeOwned;

use crate::error::{BridgeError, BridgeResult};
use crate::file::FileValue;

impl FileValue {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the content as strict UTF-8.
    pub fn text(&self) -> BridgeResult<String> {
        String::from_utf8(self.bytes.clone()).map_err(|e| {
            BridgeError::io(format!("content of '{}' is not valid UTF-8", self.name))
                .with_cause(e)
        })
    }

    /// Decode the content as UTF-8, replacing invalid sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Parse the content as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.bytes)
    }

    /// Render the content as a `data:` URL with the declared MIME type.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::MimeType;
    use crate::ids::ItemId;

    fn file_with_bytes(bytes: &[u8], mime: MimeType) -> FileValue {
        FileValue {
            id: ItemId::from("f"),
            name: "sample".into(),
            path: None,
            bytes: bytes.to_vec(),
            mime,
            size: bytes.len() as i64,
            modified_at_ms: 0,
            handle: None,
        }
    }

    #[test]
    fn text_decodes_utf8() {
        let file = file_with_bytes("grüße".as_bytes(), MimeType::text_plain());
        assert_eq!(file.text().unwrap(), "grüße");
    }

    #[test]
    fn text_rejects_invalid_utf8_as_io_error() {
        let file = file_with_bytes(&[0xff, 0xfe, 0x00], MimeType::octet_stream());
        let err = file.text().unwrap_err();
        assert_eq!(err.kind(), crate::BridgeErrorKind::Io);
        assert!(file.text_lossy().contains('\u{fffd}'));
    }

    #[test]
    fn json_surfaces_parse_error_directly() {
        let file = file_with_bytes(br#"{"n": 3}"#, MimeType::application_json());
        let value: serde_json::Value = file.json().unwrap();
        assert_eq!(value["n"], 3);

        let broken = file_with_bytes(b"{not json", MimeType::application_json());
        assert!(broken.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn data_url_carries_mime_and_base64_payload() {
        let file = file_with_bytes(b"hi", MimeType::text_plain());
        assert_eq!(file.data_url(), "data:text/plain;base64,aGk=");
    }
}
