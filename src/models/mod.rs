pub mod todo;
pub mod user;

pub use todo::{CompletionFilter, NewTodo, Todo, TodoId, TodoList, TodoQuery, TodoUpdate};
pub use user::User;
