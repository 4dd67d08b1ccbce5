//! 验证辅助函数
//!
//! - ensure_name：名称必填、长度上限
//! - ensure_external_id：外部 ID 必填、长度上限

use crate::error::StorageError;

pub const NAME_MAX_LEN: usize = 255;
pub const EXTERNAL_ID_MAX_LEN: usize = 64;

/// 验证名称
pub fn ensure_name(name: &str) -> Result<(), StorageError> {
    if name.trim().is_empty() {
        return Err(StorageError::new("name required"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(StorageError::new("name too long"));
    }
    Ok(())
}

/// 验证外部 ID
pub fn ensure_external_id(external_id: &str) -> Result<(), StorageError> {
    if external_id.trim().is_empty() {
        return Err(StorageError::new("external_id required"));
    }
    if external_id.chars().count() > EXTERNAL_ID_MAX_LEN {
        return Err(StorageError::new("external_id too long"));
    }
    Ok(())
}
