use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EnrollmentStatusResponse {
    pub course_id: String,
    pub enrolled: bool,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentsResponse {
    pub course_ids: Vec<String>,
}
