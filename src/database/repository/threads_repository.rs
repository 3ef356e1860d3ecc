//! 关注帖子数据仓库
//!
//! threads 表记录关注的论坛帖子及其更新标记。
//! 帖子 id 即论坛帖子 ID，由链接解析得到。

use crate::database::dto::NewThread;
use crate::entity::prelude::*;
use crate::entity::threads;
use crate::sync::store::{SortOrder, ThreadFilter, ThreadSortField};
use sea_orm::*;

/// 关注帖子数据仓库
pub struct ThreadsRepository;

impl ThreadsRepository {
    // ==================== 帖子 CRUD 操作 ====================

    /// 插入帖子记录，更新与已读标记初始为 false
    pub async fn insert(
        db: &DatabaseConnection,
        thread: NewThread,
    ) -> Result<threads::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let thread_active = threads::ActiveModel {
            id: Set(thread.id),
            url: Set(thread.url),
            name: Set(thread.name),
            tags: Set(thread.tags.into()),
            update_available: Set(false),
            marked_as_read: Set(false),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        thread_active.insert(db).await
    }

    /// 写入帖子记录：已存在则整体覆盖，否则插入
    pub async fn write(
        db: &DatabaseConnection,
        thread: threads::Model,
    ) -> Result<threads::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;
        let existing = Threads::find_by_id(thread.id).one(db).await?;

        let thread_active = threads::ActiveModel {
            id: Set(thread.id),
            url: Set(thread.url),
            name: Set(thread.name),
            tags: Set(thread.tags),
            update_available: Set(thread.update_available),
            marked_as_read: Set(thread.marked_as_read),
            created_at: match &existing {
                Some(record) => Set(record.created_at),
                None => Set(thread.created_at.or(Some(now))),
            },
            updated_at: Set(Some(now)),
        };

        match existing {
            Some(_) => thread_active.update(db).await,
            None => thread_active.insert(db).await,
        }
    }

    /// 标记帖子已读
    pub async fn mark_read(db: &DatabaseConnection, id: i32) -> Result<threads::Model, DbErr> {
        let thread = Threads::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Thread {} not found", id)))?;

        let mut active: threads::ActiveModel = thread.into();
        active.marked_as_read = Set(true);
        active.updated_at = Set(Some(chrono::Utc::now().timestamp() as i32));

        active.update(db).await
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询帖子
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<threads::Model>, DbErr> {
        Threads::find_by_id(id).one(db).await
    }

    /// 按条件查询帖子，支持排序
    pub async fn search(
        db: &DatabaseConnection,
        filter: ThreadFilter,
        sort: ThreadSortField,
        order: SortOrder,
    ) -> Result<Vec<threads::Model>, DbErr> {
        let query = Self::build_base_query(&filter);
        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let query = match sort {
            ThreadSortField::Id => query.order_by(threads::Column::Id, order),
            ThreadSortField::Name => query.order_by(threads::Column::Name, order),
        };
        query.all(db).await
    }

    /// 删除帖子
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Threads::delete_by_id(id).exec(db).await
    }

    /// 获取帖子总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Threads::find().count(db).await
    }

    // ==================== 私有方法 ====================

    /// 通用的查询构建器：应用筛选条件
    fn build_base_query(filter: &ThreadFilter) -> Select<Threads> {
        let mut query = Threads::find();

        if let Some(id) = filter.id {
            query = query.filter(threads::Column::Id.eq(id));
        }
        if let Some(flag) = filter.update_available {
            query = query.filter(threads::Column::UpdateAvailable.eq(flag));
        }
        if let Some(flag) = filter.marked_as_read {
            query = query.filter(threads::Column::MarkedAsRead.eq(flag));
        }
        query
    }
}
