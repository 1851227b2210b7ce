use super::{SeaOrmStorage, insert_error, query_error};
use crate::entity::professor_qr_tokens::{ActiveModel, Column, Entity as QrTokens};
use crate::entity::professors::Entity as Professors;
use crate::errors::{PortalError, Result};
use crate::models::qr_tokens::entities::QrToken;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

type Timestamp = chrono::DateTime<chrono::Utc>;

async fn insert_token<C: ConnectionTrait>(
    conn: &C,
    professor_id: i64,
    token: &str,
    expires_at: Option<Timestamp>,
) -> Result<QrToken> {
    let model = ActiveModel {
        professor_id: Set(professor_id),
        token: Set(token.to_string()),
        created_at: Set(chrono::Utc::now().timestamp()),
        expires_at: Set(expires_at.map(|t| t.timestamp())),
        active: Set(true),
        uses: Set(0),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| insert_error(e, "评价令牌"))?;
    Ok(result.into_qr_token())
}

async fn deactivate_all<C: ConnectionTrait>(conn: &C, professor_id: i64) -> Result<u64> {
    let result = QrTokens::update_many()
        .col_expr(Column::Active, Expr::value(false))
        .filter(Column::ProfessorId.eq(professor_id))
        .filter(Column::Active.eq(true))
        .exec(conn)
        .await
        .map_err(|e| PortalError::database_operation(format!("停用评价令牌失败: {e}")))?;
    Ok(result.rows_affected)
}

impl SeaOrmStorage {
    pub async fn get_active_qr_token_impl(&self, professor_id: i64) -> Result<Option<QrToken>> {
        let result = QrTokens::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(query_error("评价令牌"))?;

        Ok(result.map(|m| m.into_qr_token()))
    }

    pub async fn create_qr_token_impl(
        &self,
        professor_id: i64,
        token: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<QrToken> {
        insert_token(&self.db, professor_id, token, expires_at).await
    }

    pub async fn deactivate_qr_tokens_impl(&self, professor_id: i64) -> Result<u64> {
        deactivate_all(&self.db, professor_id).await
    }

    /// 停用旧令牌并创建新令牌，保证同一教师最多一个激活令牌
    pub async fn rotate_qr_token_impl(
        &self,
        professor_id: i64,
        token: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<QrToken> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        // 锁住教师行，同一教师的并发轮换依次执行（SQLite 本身按库加写锁）
        let locked = Professors::find_by_id(professor_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_error("教师"))?;
        if locked.is_none() {
            return Err(PortalError::not_found(format!("教师 {professor_id} 不存在")));
        }

        deactivate_all(&txn, professor_id).await?;
        let created = insert_token(&txn, professor_id, token, expires_at).await?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;
        Ok(created)
    }

    /// 激活且未过期的令牌
    pub async fn get_valid_qr_token_impl(&self, token: &str) -> Result<Option<QrToken>> {
        let now = chrono::Utc::now().timestamp();
        let result = QrTokens::find()
            .filter(Column::Token.eq(token))
            .filter(Column::Active.eq(true))
            .filter(
                Condition::any()
                    .add(Column::ExpiresAt.is_null())
                    .add(Column::ExpiresAt.gt(now)),
            )
            .one(&self.db)
            .await
            .map_err(query_error("评价令牌"))?;

        Ok(result.map(|m| m.into_qr_token()))
    }

    /// 使用次数 +1（单条 UPDATE）
    pub async fn increment_qr_token_uses_impl(&self, id: i64) -> Result<bool> {
        let result = QrTokens::update_many()
            .col_expr(Column::Uses, Expr::col(Column::Uses).add(1))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新令牌使用次数失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::professors::tests::professor_request;
    use super::*;

    async fn setup() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let p = storage
            .create_professor_impl(professor_request("V-2000001", "Luis", "Mata", true))
            .await
            .unwrap();
        (storage, p.id)
    }

    #[tokio::test]
    async fn test_rotate_keeps_single_active_token() {
        let (storage, pid) = setup().await;
        let first = storage.rotate_qr_token_impl(pid, "tok-1", None).await.unwrap();
        let second = storage.rotate_qr_token_impl(pid, "tok-2", None).await.unwrap();
        assert_ne!(first.id, second.id);

        let active = storage.get_active_qr_token_impl(pid).await.unwrap().unwrap();
        assert_eq!(active.token, "tok-2");
        assert!(storage.get_valid_qr_token_impl("tok-1").await.unwrap().is_none());

        let count = QrTokens::find()
            .filter(Column::ProfessorId.eq(pid))
            .filter(Column::Active.eq(true))
            .all(&storage.db)
            .await
            .unwrap()
            .len();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_rotate_unknown_professor() {
        let (storage, _) = setup().await;
        let err = storage
            .rotate_qr_token_impl(9999, "tok-x", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
        assert!(storage.get_valid_qr_token_impl("tok-x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_rotations_leave_one_active() {
        let (storage, pid) = setup().await;
        let (a, b) = tokio::join!(
            storage.rotate_qr_token_impl(pid, "tok-a", None),
            storage.rotate_qr_token_impl(pid, "tok-b", None),
        );
        a.unwrap();
        b.unwrap();

        let active = QrTokens::find()
            .filter(Column::ProfessorId.eq(pid))
            .filter(Column::Active.eq(true))
            .all(&storage.db)
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_token_is_invalid() {
        let (storage, pid) = setup().await;
        let past = chrono::Utc::now() - chrono::Duration::days(1);
        storage.create_qr_token_impl(pid, "old", Some(past)).await.unwrap();
        assert!(storage.get_valid_qr_token_impl("old").await.unwrap().is_none());

        storage.deactivate_qr_tokens_impl(pid).await.unwrap();
        let future = chrono::Utc::now() + chrono::Duration::days(1);
        storage.create_qr_token_impl(pid, "fresh", Some(future)).await.unwrap();
        assert!(storage.get_valid_qr_token_impl("fresh").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_increment_uses() {
        let (storage, pid) = setup().await;
        let token = storage.rotate_qr_token_impl(pid, "tok", None).await.unwrap();
        assert!(storage.increment_qr_token_uses_impl(token.id).await.unwrap());
        assert!(storage.increment_qr_token_uses_impl(token.id).await.unwrap());
        let reloaded = storage.get_valid_qr_token_impl("tok").await.unwrap().unwrap();
        assert_eq!(reloaded.uses, 2);
        assert!(!storage.increment_qr_token_uses_impl(9999).await.unwrap());
    }
}
