//! 教师评价二维码令牌实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "professor_qr_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub professor_id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub created_at: i64,
    pub expires_at: Option<i64>,
    pub active: bool,
    pub uses: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id"
    )]
    Professor,
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_qr_token(self) -> crate::models::qr_tokens::entities::QrToken {
        use crate::models::qr_tokens::entities::QrToken;

        QrToken {
            id: self.id,
            professor_id: self.professor_id,
            token: self.token,
            created_at: super::timestamp_to_datetime(self.created_at),
            expires_at: self.expires_at.map(super::timestamp_to_datetime),
            active: self.active,
            uses: self.uses,
        }
    }
}
