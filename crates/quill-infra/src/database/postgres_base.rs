use std::collections::HashMap;
use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};

use quill_core::error::RepoError;

use super::entity::{post_tag, tag};

/// PostgreSQL repository over one primary entity.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Map a SeaORM error onto the port's error type.
pub(crate) fn repo_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => {
            let msg = other.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

/// `LOWER(tags.tag) LIKE '%fragment%'` with the fragment's wildcards escaped.
pub(crate) fn tag_contains(fragment: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    Expr::expr(Func::lower(Expr::col((tag::Entity, tag::Column::Tag))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

/// Tags of each listed post, in attachment order.
pub(crate) async fn tags_by_post<C>(
    conn: &C,
    post_ids: &[i32],
) -> Result<HashMap<i32, Vec<tag::Model>>, DbErr>
where
    C: ConnectionTrait,
{
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = post_tag::Entity::find()
        .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
        .order_by_asc(post_tag::Column::PostId)
        .order_by_asc(post_tag::Column::Position)
        .all(conn)
        .await?;
    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let tags: HashMap<i32, tag::Model> = tag::Entity::find()
        .filter(tag::Column::Id.is_in(links.iter().map(|l| l.tag_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let mut by_post: HashMap<i32, Vec<tag::Model>> = HashMap::new();
    for link in links {
        if let Some(t) = tags.get(&link.tag_id) {
            by_post.entry(link.post_id).or_default().push(t.clone());
        }
    }
    Ok(by_post)
}

/// Reuse tags by exact text, inserting the missing ones. Result follows `names` order.
pub(crate) async fn connect_or_create_tags<C>(
    conn: &C,
    names: &[String],
) -> Result<Vec<tag::Model>, DbErr>
where
    C: ConnectionTrait,
{
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let now = Utc::now().fixed_offset();
    let rows = names.iter().map(|name| tag::ActiveModel {
        tag: Set(name.clone()),
        created_at: Set(now),
        ..Default::default()
    });
    tag::Entity::insert_many(rows)
        .on_conflict(OnConflict::column(tag::Column::Tag).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;

    let mut found: HashMap<String, tag::Model> = tag::Entity::find()
        .filter(tag::Column::Tag.is_in(names.iter().cloned()))
        .all(conn)
        .await?
        .into_iter()
        .map(|t| (t.tag.clone(), t))
        .collect();

    names
        .iter()
        .map(|name| {
            found
                .remove(name)
                .ok_or_else(|| DbErr::RecordNotFound(format!("tag '{name}'")))
        })
        .collect()
}

/// Attach `tags` to a post, recording their order.
pub(crate) async fn link_tags<C>(conn: &C, post_id: i32, tags: &[tag::Model]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if tags.is_empty() {
        return Ok(());
    }

    let links = tags
        .iter()
        .zip(0..)
        .map(|(t, position)| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(t.id),
            position: Set(position),
        });
    post_tag::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
