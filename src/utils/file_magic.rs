/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".pdf"）
///
/// # Returns
/// * `true` - 魔术字节匹配
/// * `false` - 魔术字节不匹配或类型未知
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 文档格式
        ".pdf" => data.starts_with(b"%PDF"),

        // 视频格式
        // ISO BMFF 容器在偏移 4 处有 "ftyp" 标识
        ".mp4" | ".m4v" | ".mov" => data.len() >= 8 && &data[4..8] == b"ftyp",
        // Matroska / WebM 使用 EBML 头
        ".webm" | ".mkv" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 取出文件名的扩展名（小写，含点号）
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.4";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(validate_magic_bytes(pdf_header, ".PDF"));
        assert!(!validate_magic_bytes(b"<html>", ".pdf"));
    }

    #[test]
    fn test_mp4_magic() {
        let mp4_header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&mp4_header, ".mp4"));
        assert!(validate_magic_bytes(&mp4_header, ".mov"));
        assert!(!validate_magic_bytes(&mp4_header, ".webm"));
        assert!(!validate_magic_bytes(&mp4_header[..6], ".mp4"));
    }

    #[test]
    fn test_webm_magic() {
        let webm_header = [0x1A, 0x45, 0xDF, 0xA3, 0x9F, 0x42];
        assert!(validate_magic_bytes(&webm_header, ".webm"));
        assert!(validate_magic_bytes(&webm_header, ".mkv"));
        assert!(!validate_magic_bytes(&webm_header, ".pdf"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], ".exe"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Tesis.PDF").as_deref(), Some(".pdf"));
        assert_eq!(extension_of("clase.final.webm").as_deref(), Some(".webm"));
        assert_eq!(extension_of("sin_extension"), None);
    }
}
