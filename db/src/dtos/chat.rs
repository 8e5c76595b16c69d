use uuid::Uuid;

pub struct SessionCreateRequest {
    pub user_id: Uuid,
    pub title: String,
}

pub struct MessageCreateRequest {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub is_ai: bool,
}
