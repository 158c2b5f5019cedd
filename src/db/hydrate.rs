//! 레코드 하이드레이션
//!
//! 테이블에서 꺼낸 엔티티의 관계 슬롯에 지연 로더를 붙입니다. 로더는
//! `Arc<Database>`와 키만 캡처하므로, 관계가 실제로 요청되기 전에는 어떤
//! 쿼리도 실행되지 않습니다. 로더가 돌려준 레코드도 같은 방식으로 바인딩되어
//! `author.posts`처럼 중첩된 경로를 따라갈 수 있습니다.

use std::sync::Arc;

use crate::db::Database;
use crate::domain::entities::{Category, Comment, Post, User};
use crate::projection::Related;

pub fn bind_user(db: &Arc<Database>, user: &User) -> User {
    let mut user = user.detached();
    let (store, id) = (Arc::clone(db), user.id);
    user.posts = Related::deferred(move || {
        let posts = store.read(|t| t.posts_by_user(id))?;
        Ok(bind_posts(&store, &posts))
    });
    user
}

pub fn bind_post(db: &Arc<Database>, post: &Post) -> Post {
    let mut post = post.detached();
    let (id, user_id) = (post.id, post.user_id);

    let store = Arc::clone(db);
    post.author = Related::deferred(move || {
        let author = store.read(|t| t.user(user_id))?;
        Ok(author.map(|u| bind_user(&store, &u)))
    });

    let store = Arc::clone(db);
    post.categories = Related::deferred(move || {
        let categories = store.read(|t| t.categories_of_post(id))?;
        Ok(categories.iter().map(|c| bind_category(&store, c)).collect())
    });

    let store = Arc::clone(db);
    post.comments = Related::deferred(move || {
        let comments = store.read(|t| t.comments_of_post(id))?;
        Ok(comments.iter().map(|c| bind_comment(&store, c)).collect())
    });

    let store = Arc::clone(db);
    post.comments_count = Related::deferred(move || store.read(|t| t.comments_count(id)));

    post
}

pub fn bind_posts(db: &Arc<Database>, posts: &[Post]) -> Vec<Post> {
    posts.iter().map(|p| bind_post(db, p)).collect()
}

pub fn bind_comment(db: &Arc<Database>, comment: &Comment) -> Comment {
    let mut comment = comment.detached();
    let (store, user_id) = (Arc::clone(db), comment.user_id);
    comment.author = Related::deferred(move || {
        let author = store.read(|t| t.user(user_id))?;
        Ok(author.map(|u| bind_user(&store, &u)))
    });
    comment
}

pub fn bind_category(db: &Arc<Database>, category: &Category) -> Category {
    let mut category = category.detached();
    let id = category.id;

    let store = Arc::clone(db);
    category.posts = Related::deferred(move || {
        let posts = store.read(|t| t.posts_in_category(id))?;
        Ok(bind_posts(&store, &posts))
    });

    let store = Arc::clone(db);
    category.posts_count = Related::deferred(move || store.read(|t| t.posts_count(id)));

    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;

    fn seeded() -> Arc<Database> {
        let db = Arc::new(Database::new());
        db.seed_demo("$2b$04$hash").unwrap();
        db
    }

    #[test]
    fn test_binding_runs_no_queries_until_a_relation_is_loaded() {
        let db = seeded();
        let stored = db.read(|t| t.posts.get(&1).cloned()).unwrap().unwrap();
        let before = db.query_count();

        let post = bind_post(&db, &stored);
        assert_eq!(db.query_count(), before);

        assert_eq!(post.comments_count.load().unwrap(), 2);
        assert_eq!(db.query_count(), before + 1);
    }

    #[test]
    fn test_nested_relations_follow_bound_loaders() {
        let db = seeded();
        let stored = db.read(|t| t.comments.get(&1).cloned()).unwrap().unwrap();
        let comment = bind_comment(&db, &stored);

        let wire = Projection::of(&comment).include("author.posts").to_wire().unwrap();

        let author = wire.get("author").unwrap().as_object().unwrap();
        assert_eq!(author.get("name").unwrap().as_scalar().unwrap(), "João Pereira");
        let posts = author.get("posts").unwrap().as_list().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(!posts[0].contains_key("author"));
    }
}
