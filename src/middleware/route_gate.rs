//! Route gate middleware.
//!
//! Runs in front of every request. Reads the session mirror cookies into a snapshot, asks
//! [`crate::gate::evaluate`] for a decision and either answers with a 307 redirect or lets the
//! request through. Never calls the backend.
//!
//! When a lesson navigation is allowed, the matching `enrolled-{courseId}` cookie is re-issued
//! so that an active learner's flag does not expire mid-course.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::gate::{GateDecision, evaluate, lesson_course_id};
use crate::session::CookieSnapshot;
use crate::state::AppState;

pub fn apply(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, route_gate))
}

async fn route_gate(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let snapshot = CookieSnapshot::from_jar(&jar);
    let path = req.uri().path().to_owned();

    match evaluate(&path, &snapshot) {
        GateDecision::Redirect(redirect) => {
            let location = redirect.location();
            tracing::debug!(path = %path, location = %location, "navigation redirected");
            Redirect::temporary(&location).into_response()
        }
        GateDecision::Allow => {
            let refresh = lesson_course_id(&path)
                .filter(|course_id| snapshot.is_enrolled(course_id))
                .map(str::to_owned);

            let res = next.run(req).await;

            match refresh {
                Some(course_id) => (state.mirror.mark_enrolled(jar, &course_id), res).into_response(),
                None => res,
            }
        }
    }
}
