//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use quill_core::domain::{NewPost, Post, PostCard, PostUpdate, Tag};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, TagRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag;
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{
    PostgresBaseRepository, connect_or_create_tags, link_tags, repo_err, tag_contains,
    tags_by_post,
};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_containing(&self, fragment: &str) -> Result<Vec<Tag>, RepoError> {
        tracing::debug!(%fragment, "Searching tags");

        let result = TagEntity::find()
            .filter(tag_contains(fragment))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, text: &str) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            tag: Set(text.to_owned()),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_published_cards(
        &self,
        tag_filter: Option<&str>,
        limit: u64,
    ) -> Result<Vec<PostCard>, RepoError> {
        let mut select = PostEntity::find().filter(post::Column::Published.eq(true));

        if let Some(fragment) = tag_filter {
            let tagged = Query::select()
                .column((post_tag::Entity, post_tag::Column::PostId))
                .from(post_tag::Entity)
                .inner_join(
                    TagEntity,
                    Expr::col((TagEntity, tag::Column::Id))
                        .equals((post_tag::Entity, post_tag::Column::TagId)),
                )
                .and_where(tag_contains(fragment))
                .to_owned();
            select = select.filter(post::Column::Id.in_subquery(tagged));
        }

        let posts = select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
        let mut tags = tags_by_post(&self.db, &ids).await.map_err(repo_err)?;

        Ok(posts
            .into_iter()
            .map(|p| {
                let post_tags = tags.remove(&p.id).unwrap_or_default();
                p.into_card(post_tags)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        let mut tags = tags_by_post(&self.db, &[id]).await.map_err(repo_err)?;
        Ok(Some(model.into_post(tags.remove(&id).unwrap_or_default())))
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let model = post::ActiveModel {
            title: Set(new_post.title),
            content: Set(new_post.content),
            published: Set(new_post.published),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(repo_err)?;

        let tags = connect_or_create_tags(&txn, &new_post.tags)
            .await
            .map_err(repo_err)?;
        link_tags(&txn, model.id, &tags).await.map_err(repo_err)?;

        txn.commit().await.map_err(repo_err)?;
        Ok(model.into_post(tags))
    }

    async fn update(&self, id: i32, update: PostUpdate) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let existing = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(repo_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        active.title = Set(update.title);
        active.content = Set(update.content);
        active.published = Set(update.published);
        let model = active.update(&txn).await.map_err(repo_err)?;

        let tags = match update.tags {
            Some(names) => {
                post_tag::Entity::delete_many()
                    .filter(post_tag::Column::PostId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(repo_err)?;
                let tags = connect_or_create_tags(&txn, &names)
                    .await
                    .map_err(repo_err)?;
                link_tags(&txn, id, &tags).await.map_err(repo_err)?;
                tags
            }
            None => tags_by_post(&txn, &[id])
                .await
                .map_err(repo_err)?
                .remove(&id)
                .unwrap_or_default(),
        };

        txn.commit().await.map_err(repo_err)?;
        Ok(model.into_post(tags))
    }
}
