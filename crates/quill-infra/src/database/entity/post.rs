//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain post from this row and its tags.
    pub fn into_post(self, tags: Vec<super::tag::Model>) -> quill_core::domain::Post {
        quill_core::domain::Post {
            id: self.id,
            title: self.title,
            content: self.content,
            published: self.published,
            created_at: self.created_at.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Project this row and its tags into a card.
    pub fn into_card(self, tags: Vec<super::tag::Model>) -> quill_core::domain::PostCard {
        quill_core::domain::PostCard {
            id: self.id,
            title: self.title,
            created_at: self.created_at.into(),
            tags: tags
                .into_iter()
                .map(|t| quill_core::domain::TagName { tag: t.tag })
                .collect(),
        }
    }
}
