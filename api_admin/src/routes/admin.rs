use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::dtos::admin::{AdminUser, ChatsDump, MessagesDump, UsersDump};

/// All users with plan and usage counters.
#[get("/users")]
pub async fn get_users(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let users: Vec<AdminUser> = db::user::get_users(&***pool)
        .await?
        .into_iter()
        .map(AdminUser::from)
        .collect();
    Success::ok(UsersDump {
        total_users: users.len(),
        users,
    })
}

/// All chat sessions of all users.
#[get("/chats")]
pub async fn get_chats(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let chats = db::chat::get_sessions(&***pool).await?;
    Success::ok(ChatsDump {
        total_chats: chats.len(),
        chats,
    })
}

/// All chat messages of all sessions.
#[get("/messages")]
pub async fn get_messages(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let messages = db::chat::get_messages(&***pool).await?;
    Success::ok(MessagesDump {
        total_messages: messages.len(),
        messages,
    })
}
