//! multipart 表单读取
//!
//! 文本字段收集到内存，文件字段边读边写入上传目录，同时校验扩展名、魔术字节和大小。

use actix_multipart::{Field, Multipart};
use actix_web::HttpResponse;
use futures_util::{StreamExt, TryStreamExt};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::extension_of;
use crate::utils::text::secure_filename;
use crate::utils::validate_magic_bytes;

// 文本字段的最大字节数
const MAX_TEXT_FIELD: usize = 64 * 1024;
// 校验魔术字节需要的头部长度
const MAGIC_LEN: usize = 8;

/// 文件字段的校验规则
pub(crate) struct UploadRules<'a> {
    pub file_field: &'a str,
    pub allowed_types: &'a [String],
    pub max_size: usize,
    pub upload_dir: &'a str,
}

#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub stored_name: String,
    pub original_name: String,
    pub size: usize,
    path: PathBuf,
}

impl UploadedFile {
    /// 后续处理失败时删除已写入的文件
    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl MultipartForm {
    /// 去掉首尾空白后的非空文本字段
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    /// 解析整数字段，缺省为 None，格式错误返回字段名
    pub fn int(&self, name: &'static str) -> Result<Option<i32>, String> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| format!("{name} must be an integer")),
        }
    }

    pub fn discard_file(&self) {
        if let Some(file) = &self.file {
            file.discard();
        }
    }
}

fn rejected(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn upload_failed(err: PortalError) -> HttpResponse {
    tracing::error!("{}", err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        "File upload failed",
    ))
}

/// 存储文件名：`{uuid}_{安全文件名}`
pub(crate) fn stored_file_name(original_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), secure_filename(original_name))
}

async fn read_text_field(field: &mut Field) -> Result<String, HttpResponse> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| rejected(ErrorCode::BadRequest, e.to_string()))?;
        if buf.len() + data.len() > MAX_TEXT_FIELD {
            return Err(rejected(ErrorCode::BadRequest, "Form field is too large"));
        }
        buf.extend_from_slice(&data);
    }
    String::from_utf8(buf).map_err(|_| rejected(ErrorCode::BadRequest, "Form field is not UTF-8"))
}

async fn write_file_field(
    field: &mut Field,
    original_name: String,
    rules: &UploadRules<'_>,
) -> Result<UploadedFile, HttpResponse> {
    let extension = extension_of(&original_name).unwrap_or_default();
    if !rules
        .allowed_types
        .iter()
        .any(|t| t.to_lowercase() == extension)
    {
        return Err(rejected(
            ErrorCode::FileTypeNotAllowed,
            "File type not allowed",
        ));
    }

    fs::create_dir_all(rules.upload_dir).map_err(|e| upload_failed(e.into()))?;
    let stored_name = stored_file_name(&original_name);
    let path = Path::new(rules.upload_dir).join(&stored_name);
    let mut file = File::create(&path).map_err(|e| upload_failed(e.into()))?;

    let uploaded = UploadedFile {
        stored_name,
        original_name,
        size: 0,
        path,
    };
    let fail = |resp: HttpResponse| {
        uploaded.discard();
        resp
    };

    let mut size = 0usize;
    let mut header: Vec<u8> = Vec::with_capacity(MAGIC_LEN);
    let mut header_checked = false;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| fail(rejected(ErrorCode::FileUploadFailed, e.to_string())))?;

        size += data.len();
        if size > rules.max_size {
            return Err(fail(rejected(
                ErrorCode::FileSizeExceeded,
                "File size exceeds the limit",
            )));
        }

        // 攒够头部后校验一次魔术字节
        if !header_checked {
            let take = (MAGIC_LEN - header.len()).min(data.len());
            header.extend_from_slice(&data[..take]);
            if header.len() >= MAGIC_LEN {
                header_checked = true;
                if !validate_magic_bytes(&header, &extension) {
                    return Err(fail(rejected(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    )));
                }
            }
        }

        file.write_all(&data)
            .map_err(|e| fail(upload_failed(e.into())))?;
    }

    // 小于头部长度的文件
    if !header_checked && !validate_magic_bytes(&header, &extension) {
        return Err(fail(rejected(
            ErrorCode::FileTypeNotAllowed,
            "File content does not match its extension",
        )));
    }

    Ok(UploadedFile { size, ..uploaded })
}

/// 读取整个 multipart 表单，失败时已写入的文件会被删除
pub(crate) async fn read_multipart(
    mut payload: Multipart,
    rules: &UploadRules<'_>,
) -> Result<MultipartForm, HttpResponse> {
    let mut form = MultipartForm::default();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                form.discard_file();
                return Err(rejected(ErrorCode::BadRequest, e.to_string()));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(String::from);

        if name == rules.file_field {
            // 浏览器在未选择文件时也会发送空的文件字段
            let Some(original_name) = filename.filter(|f| !f.is_empty()) else {
                continue;
            };
            if form.file.is_some() {
                form.discard_file();
                return Err(rejected(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                ));
            }
            match write_file_field(&mut field, original_name, rules).await {
                Ok(file) => form.file = Some(file),
                Err(resp) => {
                    form.discard_file();
                    return Err(resp);
                }
            }
        } else {
            match read_text_field(&mut field).await {
                Ok(value) => {
                    form.fields.insert(name, value);
                }
                Err(resp) => {
                    form.discard_file();
                    return Err(resp);
                }
            }
        }
    }

    Ok(form)
}
