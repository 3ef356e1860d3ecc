use crate::entity::prelude::*;
use crate::entity::user;
use sea_orm::*;

/// 用户设置仓库
pub struct SettingsRepository;

impl SettingsRepository {
    /// 确保用户记录存在（ID 固定为 1）
    async fn ensure_user_exists(db: &DatabaseConnection) -> Result<(), DbErr> {
        let existing = User::find_by_id(1).one(db).await?;

        if existing.is_none() {
            let user = user::ActiveModel {
                id: Set(1),
                library_root_path: Set(None),
                catalog_base_url: Set(None),
            };

            user.insert(db).await?;
        }

        Ok(())
    }

    /// 获取游戏库根目录
    pub async fn get_library_root_path(db: &DatabaseConnection) -> Result<String, DbErr> {
        Self::ensure_user_exists(db).await?;

        let user = User::find_by_id(1)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User record not found".to_string()))?;

        Ok(user.library_root_path.unwrap_or_default())
    }

    /// 设置游戏库根目录
    pub async fn set_library_root_path(db: &DatabaseConnection, path: String) -> Result<(), DbErr> {
        Self::ensure_user_exists(db).await?;

        let user = User::find_by_id(1)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User record not found".to_string()))?;

        let mut active: user::ActiveModel = user.into();
        active.library_root_path = Set(Some(path));

        active.update(db).await?;
        Ok(())
    }

    /// 获取远端目录服务地址
    pub async fn get_catalog_base_url(db: &DatabaseConnection) -> Result<String, DbErr> {
        Self::ensure_user_exists(db).await?;

        let user = User::find_by_id(1)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User record not found".to_string()))?;

        Ok(user.catalog_base_url.unwrap_or_default())
    }

    /// 设置远端目录服务地址
    pub async fn set_catalog_base_url(db: &DatabaseConnection, url: String) -> Result<(), DbErr> {
        Self::ensure_user_exists(db).await?;

        let user = User::find_by_id(1)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User record not found".to_string()))?;

        let mut active: user::ActiveModel = user.into();
        active.catalog_base_url = Set(Some(url));

        active.update(db).await?;
        Ok(())
    }

    /// 获取所有设置
    pub async fn get_all_settings(db: &DatabaseConnection) -> Result<user::Model, DbErr> {
        Self::ensure_user_exists(db).await?;

        User::find_by_id(1)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User record not found".to_string()))
    }
}
