//! Todo entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub todo_page_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::todo_page::Entity",
        from = "Column::TodoPageId",
        to = "super::todo_page::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TodoPage,
}

impl Related<super::todo_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoPage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Todo.
impl From<Model> for daylist_core::domain::Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            todo_page_id: model.todo_page_id,
            content: model.content,
            completed: model.completed,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Todo to SeaORM ActiveModel.
impl From<daylist_core::domain::Todo> for ActiveModel {
    fn from(todo: daylist_core::domain::Todo) -> Self {
        Self {
            id: Set(todo.id),
            todo_page_id: Set(todo.todo_page_id),
            content: Set(todo.content),
            completed: Set(todo.completed),
            created_at: Set(todo.created_at.into()),
            updated_at: Set(todo.updated_at.into()),
        }
    }
}
