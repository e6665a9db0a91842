//! UTF-8セーフなBase64
//!
//! 送信バンドル内のコード・Dockerfile・YAMLはUTF-8バイト列をBase64化して送る。
//! バックエンドが返すログも同じ方式でデコードする。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// テキストをUTF-8バイト列としてBase64エンコード
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Base64をデコードしてUTF-8テキストに戻す
///
/// 改行などの空白は無視する。
pub fn decode_text(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::Encoding(format!("Base64デコード失敗: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding(format!("UTF-8ではありません: {}", e)))
}

/// ログ表示用のデコード
///
/// Base64でなければ受け取ったテキストをそのまま返し、
/// 不正なUTF-8は置換文字で表示する。
pub fn decode_log(encoded: &str) -> String {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => encoded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode_text("OK\n"), "T0sK");
        assert_eq!(encode_text(""), "");
    }

    #[test]
    fn test_round_trip_multibyte() {
        let text = "// 日本語コメント\nString s = \"héllo → 世界 🚀\";\n";
        let encoded = encode_text(text);
        assert!(encoded.is_ascii());
        assert_eq!(decode_text(&encoded).unwrap(), text);
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        let encoded = "aGVsbG8g\nd29ybGQ=\n";
        assert_eq!(decode_text(encoded).unwrap(), "hello world");
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = decode_text("not base64 !!");
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0x41]);
        assert!(matches!(decode_text(&encoded), Err(Error::Encoding(_))));
        assert!(decode_log(&encoded).ends_with('A'));
    }

    #[test]
    fn test_decode_log_falls_back_to_plain_text() {
        assert_eq!(decode_log("job started!"), "job started!");
        assert_eq!(decode_log("T0sK"), "OK\n");
    }
}
