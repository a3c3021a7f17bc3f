/*
 * Responsibility
 * - page navigation の分類 (public / special / protected / lesson / instructor / admin)
 * - cookie snapshot だけを見て Allow / Redirect を決める pure function
 */
pub mod decision;
pub mod table;

pub use decision::{GateDecision, Redirect, evaluate};
pub use table::{ACCESS_DENIED_PATH, RouteClass, classify, lesson_course_id};
