//! ファイル名の命名規則
//!
//! バックエンドへ送る名前やダウンロード名はすべてパスの最後の要素から作る。

const UNKNOWN_FILE_NAME: &str = "unknown.txt";

/// パスの最後の要素（空なら "unknown.txt"）
pub fn base_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => UNKNOWN_FILE_NAME,
    }
}

/// 最後の '.' で名前と拡張子に分ける（拡張子は '.' を含む）
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// 変換後コードのダウンロード名: `A.java` → `A_fixed.java`
pub fn fixed_file_name(path: &str) -> String {
    let (stem, ext) = split_extension(base_name(path));
    format!("{}_fixed{}", stem, ext)
}

/// 生成テストのファイル名: `A.java` → `ATest.java`
pub fn test_file_name(path: &str) -> String {
    let (stem, ext) = split_extension(base_name(path));
    format!("{}Test{}", stem, ext)
}

pub fn dockerfile_name(path: &str) -> String {
    format!("{}_Dockerfile", base_name(path))
}

pub fn manifest_name(path: &str) -> String {
    format!("{}_deployment.yaml", base_name(path))
}
