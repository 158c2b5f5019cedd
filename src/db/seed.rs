//! 데모 데이터
//!
//! `SEED_DEMO_DATA=true`일 때 시작 시점에 한 번 적재됩니다.

use chrono::{NaiveDate, NaiveDateTime};
use log::info;

use crate::core::errors::{AppError, AppResult};
use crate::db::{Database, Tables};
use crate::domain::entities::{Category, Comment, Post, User};
use crate::projection::Related;
use crate::utils::string_utils::slugify;

fn at(y: i32, m: u32, d: u32, h: u32) -> AppResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .ok_or_else(|| AppError::InternalError(format!("invalid seed date {}-{}-{}", y, m, d)))
}

impl Database {
    /// 사용자, 카테고리, 게시글, 댓글 데모 데이터를 적재하고 적재한 행 수를 반환합니다.
    ///
    /// 모든 데모 사용자는 같은 비밀번호 해시를 공유합니다.
    pub fn seed_demo(&self, password_hash: &str) -> AppResult<usize> {
        let rows = self.write(|t| {
            let ana = insert_user(t, "Ana Silva", "ana@example.com", password_hash, at(2024, 1, 1, 9)?);
            let joao = insert_user(t, "João Pereira", "joao@example.com", password_hash, at(2024, 1, 2, 9)?);

            let tech = insert_category(t, "Tecnologia", at(2024, 1, 1, 8)?);
            let travel = insert_category(t, "Viagens", at(2024, 1, 1, 8)?);
            let food = insert_category(t, "Culinária", at(2024, 1, 1, 8)?);

            let rust = insert_post(
                t,
                ana,
                "Introdução ao Rust",
                "Ownership, borrowing e lifetimes explicados com exemplos.",
                Some("Primeiros passos em Rust"),
                Some(at(2024, 1, 10, 10)?),
            );
            let lisbon = insert_post(
                t,
                joao,
                "Roteiro por Lisboa",
                "Três dias entre Alfama, Belém e o Bairro Alto.",
                None,
                Some(at(2024, 2, 1, 12)?),
            );
            let draft = insert_post(
                t,
                ana,
                "Rascunho de receitas",
                "Ideias de receitas para programadores com pouco tempo.",
                None,
                None,
            );

            t.sync_categories(rust, &[tech]);
            t.sync_categories(lisbon, &[travel]);
            t.sync_categories(draft, &[tech, food]);

            insert_comment(t, joao, rust, "Excelente introdução, obrigado!", at(2024, 1, 11, 8)?);
            insert_comment(t, ana, rust, "Obrigada pela leitura, João.", at(2024, 1, 12, 8)?);
            insert_comment(t, ana, lisbon, "Belém é imperdível.", at(2024, 2, 2, 18)?);

            Ok(t.users.len() + t.categories.len() + t.posts.len() + t.comments.len() + t.post_category.len())
        })?;

        info!("🌱 Demo data seeded ({} rows)", rows);
        Ok(rows)
    }
}

fn insert_user(t: &mut Tables, name: &str, email: &str, password_hash: &str, now: NaiveDateTime) -> i64 {
    let mut user = User::new(name.to_string(), email.to_string(), password_hash.to_string(), now);
    user.id = t.next_id("users");
    user.email_verified_at = Some(now);
    t.users.insert(user.id, user.clone());
    user.id
}

fn insert_category(t: &mut Tables, name: &str, now: NaiveDateTime) -> i64 {
    let id = t.next_id("categories");
    t.categories.insert(
        id,
        Category {
            id,
            name: name.to_string(),
            slug: slugify(name),
            created_at: now,
            updated_at: now,
            posts: Related::Unbound,
            posts_count: Related::Unbound,
        },
    );
    id
}

fn insert_post(
    t: &mut Tables,
    user_id: i64,
    title: &str,
    content: &str,
    excerpt: Option<&str>,
    published_at: Option<NaiveDateTime>,
) -> i64 {
    let id = t.next_id("posts");
    let created_at = published_at.unwrap_or_else(|| chrono::Utc::now().naive_utc());
    t.posts.insert(
        id,
        Post {
            id,
            user_id,
            title: title.to_string(),
            slug: slugify(title),
            content: content.to_string(),
            excerpt: excerpt.map(str::to_string),
            published_at,
            created_at,
            updated_at: created_at,
            author: Related::Unbound,
            categories: Related::Unbound,
            comments: Related::Unbound,
            comments_count: Related::Unbound,
        },
    );
    id
}

fn insert_comment(t: &mut Tables, user_id: i64, post_id: i64, content: &str, now: NaiveDateTime) {
    let id = t.next_id("comments");
    t.comments.insert(
        id,
        Comment {
            id,
            user_id,
            post_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            author: Related::Unbound,
        },
    );
}
