use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    pub admin: bool,

    /// Identity provider marker for accounts created through single sign-on.
    pub sso: Option<String>,

    /// 128-char hex salt
    pub password_salt: String,

    /// Hex HMAC-SHA512 of the password keyed by `password_salt`
    pub password_hash: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
