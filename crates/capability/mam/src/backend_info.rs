use crate::client::MamClient;
use domain::MamUser;
use tracing::warn;

/// 查询后台可见的全部用户（含自身与已禁用用户）。
///
/// 失败时记录告警并返回空列表，页面照常渲染。
pub async fn fetch_backend_users(client: &dyn MamClient) -> Vec<MamUser> {
    match client.list_users(true, true).await {
        Ok(users) => users,
        Err(err) => {
            warn!(target: "portal.mam", error = %err, "failed getting all users");
            Vec::new()
        }
    }
}
