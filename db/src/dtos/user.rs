use chrono::NaiveDateTime;

pub struct UserCreateRequest {
    pub email: String,
    pub username: String,
    pub role: String,
    pub subscription_plan: String,
    pub subscription_status: String,
    pub trial_start_date: NaiveDateTime,
    pub trial_end_date: NaiveDateTime,
}
