use chrono::{Duration, Local};
use contracts::shared::debug_log::{LogEntry, LogLevel, LogStats, LogsResponse, Pagination};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use super::query::{display_datetime, display_time, LogFilter, STORED_FORMAT};
use super::sanitize;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bbai_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub level: String,
    pub message: String,
    pub context: Option<String>,
    pub source: String,
    pub meta: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            level: LogLevel::normalize(&m.level),
            message: sanitize::text_field(&m.message),
            source: m.source,
            meta: m.meta.unwrap_or_default(),
            user_id: m.user_id.filter(|id| *id > 0),
            created_at: display_datetime(&m.created_at),
            context: sanitize::context_from_storage(m.context.as_deref()),
            timestamp: m.created_at,
        }
    }
}

/// Sanitized record ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLog {
    pub level: LogLevel,
    pub message: String,
    pub context: Option<String>,
    pub source: String,
    pub meta: Option<String>,
    pub user_id: Option<i64>,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn now_stored() -> String {
    Local::now().format(STORED_FORMAT).to_string()
}

fn condition(filter: &LogFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(level) = filter.level {
        cond = cond.add(Column::Level.eq(level.as_str()));
    }
    if let Some(search) = &filter.search {
        cond = cond.add(
            Condition::any()
                .add(Column::Message.contains(search.as_str()))
                .add(Column::Context.contains(search.as_str())),
        );
    }
    if let Some(from) = filter.created_from() {
        cond = cond.add(Column::CreatedAt.gte(from));
    }
    if let Some(to) = filter.created_to() {
        cond = cond.add(Column::CreatedAt.lte(to));
    }
    cond
}

pub async fn insert(log: NewLog) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        level: Set(log.level.as_str().to_string()),
        message: Set(log.message),
        context: Set(log.context),
        source: Set(log.source),
        meta: Set(log.meta),
        user_id: Set(log.user_id),
        created_at: Set(now_stored()),
    };

    let model = active.insert(conn()).await?;
    Ok(model.id)
}

/// Filtered page of logs, newest first, with stats attached
pub async fn get_logs(filter: &LogFilter) -> anyhow::Result<LogsResponse> {
    let db = conn();
    let select = Entity::find().filter(condition(filter));

    let total_items = select.clone().count(db).await?;
    let logs: Vec<LogEntry> = select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .offset(filter.offset())
        .limit(u64::from(filter.per_page))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(LogsResponse {
        logs,
        pagination: Pagination {
            page: filter.page,
            per_page: filter.per_page,
            total_pages: Pagination::total_pages_for(total_items, filter.per_page),
            total_items,
        },
        stats: get_stats().await?,
    })
}

pub async fn get_stats() -> anyhow::Result<LogStats> {
    let db = conn();

    let total = Entity::find().count(db).await?;
    let warnings = Entity::find()
        .filter(Column::Level.eq(LogLevel::Warning.as_str()))
        .count(db)
        .await?;
    let errors = Entity::find()
        .filter(Column::Level.eq(LogLevel::Error.as_str()))
        .count(db)
        .await?;

    let last_event = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .one(db)
        .await?
        .map(|m| display_datetime(&m.created_at));
    let last_api = Entity::find()
        .filter(Column::Source.eq("api"))
        .order_by_desc(Column::CreatedAt)
        .one(db)
        .await?
        .map(|m| display_time(&m.created_at));

    Ok(LogStats {
        total,
        warnings,
        errors,
        last_event,
        last_api,
    })
}

pub async fn clear_logs() -> anyhow::Result<u64> {
    let result = Entity::delete_many().exec(conn()).await?;
    Ok(result.rows_affected)
}

/// Delete records created more than `days` days ago
pub async fn delete_older_than(days: u32) -> anyhow::Result<u64> {
    let threshold = (Local::now() - Duration::days(i64::from(days)))
        .format(STORED_FORMAT)
        .to_string();
    let result = Entity::delete_many()
        .filter(Column::CreatedAt.lt(threshold))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}
